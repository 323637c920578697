//! Validated conversion settings.

use axum::http::HeaderValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::{ConfigError, ConverterConfig};
use crate::converter::extract::{extract, ExtractionError};
use crate::converter::source::TokenSource;

/// Converter settings after construction-time validation.
///
/// Built once and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRules {
    pub token_source: TokenSource,
    pub encode_token: bool,
    pub source_type: String,
    pub target_type: String,
}

impl Default for ConversionRules {
    fn default() -> Self {
        Self {
            token_source: TokenSource::Combined,
            encode_token: false,
            source_type: "Basic".to_string(),
            target_type: "Bearer".to_string(),
        }
    }
}

impl TryFrom<&ConverterConfig> for ConversionRules {
    type Error = ConfigError;

    fn try_from(config: &ConverterConfig) -> Result<Self, Self::Error> {
        let token_source = config
            .token_source
            .parse::<TokenSource>()
            .map_err(|e| ConfigError::InvalidConfiguration(e.0))?;

        Ok(Self {
            token_source,
            encode_token: config.encode_token,
            source_type: config.source_type.clone(),
            target_type: config.target_type.clone(),
        })
    }
}

impl ConversionRules {
    /// Produce the replacement `Authorization` value for an inbound one.
    ///
    /// The extracted token is base64-encoded when `encode_token` is set, then
    /// prefixed with `target_type` and a single space.
    pub fn convert(&self, header: &[u8]) -> Result<HeaderValue, ExtractionError> {
        let token = extract(header, self)?;
        let token = if self.encode_token {
            STANDARD.encode(&token).into_bytes()
        } else {
            token
        };

        let mut value = Vec::with_capacity(self.target_type.len() + 1 + token.len());
        value.extend_from_slice(self.target_type.as_bytes());
        value.push(b' ');
        value.extend_from_slice(&token);

        let mut value =
            HeaderValue::from_bytes(&value).map_err(|_| ExtractionError::InvalidHeaderValue)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    const USER_LOGIN_PASSWORD: &str = "Basic dXNlcl9sb2dpbjp1c2VyX3Bhc3N3b3Jk";

    fn config(token_source: &str) -> ConverterConfig {
        ConverterConfig {
            token_source: token_source.to_string(),
            ..ConverterConfig::default()
        }
    }

    #[test]
    fn test_defaults_match_config_defaults() {
        let rules = ConversionRules::try_from(&ConverterConfig::default()).unwrap();
        assert_eq!(rules, ConversionRules::default());
    }

    #[test]
    fn test_values_copied_from_config() {
        let rules = ConversionRules::try_from(&ConverterConfig {
            token_source: "password".into(),
            encode_token: true,
            source_type: "Bearer".into(),
            target_type: "Digest".into(),
        })
        .unwrap();

        assert_eq!(rules.token_source, TokenSource::Password);
        assert!(rules.encode_token);
        assert_eq!(rules.source_type, "Bearer");
        assert_eq!(rules.target_type, "Digest");
    }

    #[test]
    fn test_every_recognized_source_is_allowed() {
        for name in ["username", "password", "combined", "unchanged", "decoded"] {
            assert!(ConversionRules::try_from(&config(name)).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_invalid_source_fails_construction() {
        let err = ConversionRules::try_from(&config("not_a_source")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfiguration(ref s) if s == "not_a_source"));
    }

    #[test]
    fn test_convert_plain() {
        let value = ConversionRules::default()
            .convert(USER_LOGIN_PASSWORD.as_bytes())
            .unwrap();
        assert_eq!(value, "Bearer user_loginuser_password");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_convert_encodes_token() {
        let rules = ConversionRules {
            encode_token: true,
            ..ConversionRules::default()
        };
        let value = rules.convert(USER_LOGIN_PASSWORD.as_bytes()).unwrap();
        assert_eq!(value, "Bearer dXNlcl9sb2dpbnVzZXJfcGFzc3dvcmQ=");

        let token = value.to_str().unwrap().strip_prefix("Bearer ").unwrap();
        assert_eq!(STANDARD.decode(token).unwrap(), b"user_loginuser_password");
    }

    #[test]
    fn test_convert_rejects_control_characters() {
        // "a\r\nb"
        let rules = ConversionRules {
            token_source: TokenSource::Decoded,
            ..ConversionRules::default()
        };
        let err = rules.convert(b"Basic YQ0KYg==").unwrap_err();
        assert_eq!(err, ExtractionError::InvalidHeaderValue);
    }

    #[test]
    fn test_encoding_makes_control_characters_safe() {
        let rules = ConversionRules {
            token_source: TokenSource::Decoded,
            encode_token: true,
            ..ConversionRules::default()
        };
        assert_eq!(rules.convert(b"Basic YQ0KYg==").unwrap(), "Bearer YQ0KYg==");
    }
}
