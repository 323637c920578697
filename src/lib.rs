//! Authorization header converter for reverse-proxy pipelines.
//!
//! Reads `Authorization: <scheme> <payload>`, extracts a token according to the
//! configured [`TokenSource`], optionally base64-encodes it, and rewrites the
//! header as `<target_type> <token>` before calling the next service. Requests
//! whose header cannot be converted pass through untouched.

pub mod config;
pub mod converter;
pub mod http;
pub mod observability;

pub use config::{AppConfig, ConfigError, ConverterConfig};
pub use converter::{
    create, AuthConverter, AuthConverterLayer, ConversionRules, ExtractionError, TokenSource,
};
pub use http::HttpServer;
