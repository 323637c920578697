//! Authorization header conversion.
//!
//! # Data Flow
//! ```text
//! Authorization: <source_type> <payload>
//!     → extract.rs (split scheme, decode, pick token by source)
//!     → rules.rs (optional base64 re-encode, prefix target_type)
//!     → rewrite.rs (replace header; on failure leave it alone)
//!     → service.rs (tower layer, always calls the next service)
//! Authorization: <target_type> <token>
//! ```
//!
//! Conversion never rejects a request. A header that cannot be converted is
//! forwarded exactly as it arrived.

pub mod extract;
pub mod rewrite;
pub mod rules;
pub mod service;
pub mod source;

pub use extract::{extract, extract_token, ExtractionError, BASIC_SCHEME};
pub use rewrite::{convert_request, rewrite_authorization};
pub use rules::ConversionRules;
pub use service::{create, AuthConverter, AuthConverterLayer};
pub use source::{TokenSource, UnknownTokenSource};
