use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, post, put},
};

/// Admin Router Module
///
/// Every mutating route on the planet surface. All handlers here demand the
/// ADMIN role and reply 403 to authenticated readers.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /planets
        // Creates one planet; name validation happens at the boundary.
        .route("/planets", post(handlers::create_planet))
        // POST /planets/batch
        // Creates many planets in one request. Rejects an empty list with
        // 400; element-level constraint failures surface as 500.
        .route("/planets/batch", post(handlers::create_planets_batch))
        // PUT /planets/{id}
        // Full replace of an existing planet (204), 404 when absent.
        .route("/planets/{id}", put(handlers::update_planet))
        // DELETE /planets/{id}
        // Removes an existing planet (204), 404 when absent.
        .route("/planets/{id}", delete(handlers::delete_planet))
}
