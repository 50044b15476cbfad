use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Reader Router Module
///
/// The read-only half of the planet surface. Both routes accept the USER and
/// ADMIN roles; the role check runs inside each handler after the Basic-auth
/// extractor has resolved the caller's identity.
pub fn reader_routes() -> Router<AppState> {
    Router::new()
        // GET /planets
        // Lists all planets. No pagination, no ordering guarantee beyond
        // whatever the storage returns.
        .route("/planets", get(handlers::list_planets))
        // GET /planets/{id}
        // Single-planet lookup; 404 with "Planet not found" when absent.
        .route("/planets/{id}", get(handlers::get_planet))
}
