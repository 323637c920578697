//! Token extraction from an inbound `Authorization` value.

use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use thiserror::Error;

use crate::config::ConverterConfig;
use crate::converter::rules::ConversionRules;
use crate::converter::source::TokenSource;

/// Scheme whose payload is a base64 `user:password` pair.
pub const BASIC_SCHEME: &str = "Basic";

/// Standard padded alphabet that tolerates non-zero trailing bits (`YR==` is `a`).
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Reasons a header could not be converted.
///
/// All of them are handled the same way at request time: the header is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("authorization header is not '<scheme> <payload>'")]
    MalformedHeader,

    #[error("authorization scheme does not match the configured source type")]
    SchemeMismatch,

    #[error("authorization payload is not valid base64")]
    DecodeError,

    #[error("username and password sources require the Basic source type")]
    UnsupportedSourceForSplit,

    #[error("decoded credential has no ':' separator")]
    MalformedCredential,

    #[error("invalid token source")]
    InvalidTokenSource,

    #[error("converted value is not a valid header value")]
    InvalidHeaderValue,
}

impl ExtractionError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::MalformedHeader => "malformed_header",
            ExtractionError::SchemeMismatch => "scheme_mismatch",
            ExtractionError::DecodeError => "decode_error",
            ExtractionError::UnsupportedSourceForSplit => "unsupported_source_for_split",
            ExtractionError::MalformedCredential => "malformed_credential",
            ExtractionError::InvalidTokenSource => "invalid_token_source",
            ExtractionError::InvalidHeaderValue => "invalid_header_value",
        }
    }
}

/// Extract the token selected by `rules.token_source` from a raw header value.
///
/// The header is split on its first space into scheme and payload; the scheme must
/// equal `rules.source_type` exactly. Tokens are returned as raw bytes since a
/// decoded payload is not guaranteed to be UTF-8.
pub fn extract(header: &[u8], rules: &ConversionRules) -> Result<Vec<u8>, ExtractionError> {
    let (scheme, payload) = split_once(header, b' ').ok_or(ExtractionError::MalformedHeader)?;
    if scheme != rules.source_type.as_bytes() {
        return Err(ExtractionError::SchemeMismatch);
    }

    if rules.token_source == TokenSource::Unchanged {
        return Ok(payload.to_vec());
    }

    let decoded = PAYLOAD_ENGINE
        .decode(payload)
        .map_err(|_| ExtractionError::DecodeError)?;

    if !rules.token_source.splits_credential() {
        return Ok(decoded);
    }

    if rules.source_type != BASIC_SCHEME {
        return Err(ExtractionError::UnsupportedSourceForSplit);
    }
    let (username, password) =
        split_once(&decoded, b':').ok_or(ExtractionError::MalformedCredential)?;

    match rules.token_source {
        TokenSource::Username => Ok(username.to_vec()),
        TokenSource::Password => Ok(password.to_vec()),
        // No separator between the halves of a combined token.
        TokenSource::Combined => Ok([username, password].concat()),
        TokenSource::Unchanged | TokenSource::Decoded => Err(ExtractionError::InvalidTokenSource),
    }
}

/// Extract using an unvalidated configuration.
///
/// An unrecognized token source fails with [`ExtractionError::InvalidTokenSource`]
/// instead of producing a token.
pub fn extract_token(header: &[u8], config: &ConverterConfig) -> Result<Vec<u8>, ExtractionError> {
    let rules =
        ConversionRules::try_from(config).map_err(|_| ExtractionError::InvalidTokenSource)?;
    extract(header, &rules)
}

fn split_once(bytes: &[u8], separator: u8) -> Option<(&[u8], &[u8])> {
    let at = bytes.iter().position(|b| *b == separator)?;
    Some((&bytes[..at], &bytes[at + 1..]))
}
