//! Token source policies.

use std::fmt;
use std::str::FromStr;

/// Which part of the inbound credential becomes the outbound token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenSource {
    /// Left side of the decoded `user:password` pair.
    Username,
    /// Right side of the decoded `user:password` pair.
    Password,
    /// Username immediately followed by password, without a separator.
    #[default]
    Combined,
    /// The encoded payload exactly as received.
    Unchanged,
    /// The decoded payload, whatever its structure.
    Decoded,
}

impl TokenSource {
    pub const ALL: [TokenSource; 5] = [
        TokenSource::Username,
        TokenSource::Password,
        TokenSource::Combined,
        TokenSource::Unchanged,
        TokenSource::Decoded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenSource::Username => "username",
            TokenSource::Password => "password",
            TokenSource::Combined => "combined",
            TokenSource::Unchanged => "unchanged",
            TokenSource::Decoded => "decoded",
        }
    }

    /// Whether this source needs the decoded credential split on its first colon.
    pub fn splits_credential(&self) -> bool {
        matches!(
            self,
            TokenSource::Username | TokenSource::Password | TokenSource::Combined
        )
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a configured token source is not one of the recognized names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token source '{0}'")]
pub struct UnknownTokenSource(pub String);

impl FromStr for TokenSource {
    type Err = UnknownTokenSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(TokenSource::Username),
            "password" => Ok(TokenSource::Password),
            "combined" => Ok(TokenSource::Combined),
            // "full" was the first-generation name for an unchanged payload.
            "unchanged" | "full" => Ok(TokenSource::Unchanged),
            "decoded" => Ok(TokenSource::Decoded),
            other => Err(UnknownTokenSource(other.to_string())),
        }
    }
}
