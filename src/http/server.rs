//! HTTP host for the converter.
//!
//! # Responsibilities
//! - Create the Axum router and wire middleware (trace, timeout, converter)
//! - Forward every request to the configured upstream
//! - Graceful shutdown on an external signal

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{uri::Authority, uri::Scheme, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AppConfig, ConfigError};
use crate::converter::AuthConverterLayer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Authority,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server that converts `Authorization` headers and forwards upstream.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the converter settings or upstream address are invalid.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let converter = AuthConverterLayer::new(&config.converter)?;
        let upstream = Authority::from_str(&config.upstream.address)
            .map_err(|_| ConfigError::InvalidUpstream(config.upstream.address.clone()))?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = AppState { upstream, client };

        let router = Self::build_router(&config, state, converter);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The converter sits innermost so the trace span sees the original request.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState, converter: AuthConverterLayer) -> Router {
        Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(converter)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward the (already converted) request to the upstream.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (mut parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let uri = match Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(state.upstream.clone())
        .path_and_query(path_and_query)
        .build()
    {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(error = %e, "Could not build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };
    parts.uri = uri;

    tracing::debug!(method = %parts.method, uri = %parts.uri, "Forwarding request");

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => upstream_response(response),
        Err(e) => {
            tracing::error!(upstream = %state.upstream, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Re-box an upstream body so it streams back through axum.
fn upstream_response(response: hyper::Response<Incoming>) -> Response {
    let (parts, body) = response.into_parts();
    Response::from_parts(parts, Body::new(body))
}

/// Wait for Ctrl+C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
