//! Tower integration for the converter.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::config::{ConfigError, ConverterConfig};
use crate::converter::rewrite::convert_request;
use crate::converter::rules::ConversionRules;

/// Build a converter in front of `next`.
///
/// Fails when the configured token source is not recognized; no handler exists then.
pub fn create<S>(next: S, config: &ConverterConfig) -> Result<AuthConverter<S>, ConfigError> {
    Ok(AuthConverterLayer::new(config)?.layer(next))
}

/// Layer that wraps services in an [`AuthConverter`].
#[derive(Debug, Clone)]
pub struct AuthConverterLayer {
    rules: Arc<ConversionRules>,
}

impl AuthConverterLayer {
    pub fn new(config: &ConverterConfig) -> Result<Self, ConfigError> {
        let rules = ConversionRules::try_from(config)?;
        tracing::debug!(
            token_source = %rules.token_source,
            encode_token = rules.encode_token,
            source_type = %rules.source_type,
            target_type = %rules.target_type,
            "Auth converter configured"
        );
        Ok(Self::from_rules(rules))
    }

    pub fn from_rules(rules: ConversionRules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }
}

impl<S> Layer<S> for AuthConverterLayer {
    type Service = AuthConverter<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthConverter {
            inner,
            rules: Arc::clone(&self.rules),
        }
    }
}

/// Rewrites the `Authorization` header of every request, then calls the inner service.
///
/// The inner service is always called, whether or not the header could be converted.
#[derive(Debug, Clone)]
pub struct AuthConverter<S> {
    inner: S,
    rules: Arc<ConversionRules>,
}

impl<S> AuthConverter<S> {
    pub fn rules(&self) -> &ConversionRules {
        &self.rules
    }
}

impl<S, B> Service<Request<B>> for AuthConverter<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        convert_request(request.headers_mut(), &self.rules);
        self.inner.call(request)
    }
}
