use crate::AppState;
use axum::{Router, routing::get};

/// Public Router Module
///
/// The only route exempt from the default-deny policy: a liveness probe for
/// monitoring and load balancers. Everything else on the server requires
/// credentials, including unknown paths.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(|| async { "ok" }))
}
