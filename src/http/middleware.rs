//! Axum middleware adapter for routers that prefer `from_fn_with_state`
//! over the tower layer.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::converter::{convert_request, ConversionRules};

/// Rewrite `Authorization` and continue; never short-circuits.
pub async fn convert_authorization(
    State(rules): State<Arc<ConversionRules>>,
    mut request: Request,
    next: Next,
) -> Response {
    convert_request(request.headers_mut(), &rules);
    next.run(request).await
}
