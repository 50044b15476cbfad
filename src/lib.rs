use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Module for routing segregation (Public, Reader, Admin).
pub mod routes;
use routes::{admin, public, reader};

// --- Public Re-exports ---

// Makes core state types easily accessible to the entry point and tests.
pub use config::AppConfig;
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};
pub use service::PlanetService;

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) from the
/// `#[utoipa::path]` handlers and `ToSchema` models. Served at
/// `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_planets,
        handlers::get_planet,
        handlers::create_planet,
        handlers::create_planets_batch,
        handlers::update_planet,
        handlers::delete_planet,
    ),
    components(schemas(models::Planet, models::CreatePlanetRequest)),
    tags(
        (name = "swplanet", description = "Planet CRUD API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe container holding all application services and
/// configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway, also consulted directly by the auth extractor.
    pub repo: RepositoryState,
    /// Business layer over the repository (not-found translation, existence
    /// checks before update/delete).
    pub service: PlanetService,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Wires the service onto the repository. The service and the auth
    /// extractor share the same gateway instance.
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        let service = PlanetService::new(repo.clone());
        Self {
            repo,
            service,
            config,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// Allow extractors to selectively pull components from the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies the observability layers, and
/// registers the application state.
///
/// Authentication is enforced by the `AuthUser` extractor that every planet
/// handler (and the fallback) takes as an argument; authorization is the
/// role check inside each handler. Unmatched routes fall through to the
/// default-deny fallback, which requires ADMIN before admitting a 404.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(reader::reader_routes())
        .merge(admin::admin_routes())
        // Default-deny covers both unmatched paths and unmatched verbs on
        // matched paths; neither is reachable without ADMIN credentials.
        .fallback(handlers::fallback)
        .method_not_allowed_fallback(handlers::fallback)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                // Generate a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Wrap the request/response lifecycle in a tracing span that
                // carries the request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Return the generated x-request-id header to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`: includes the `x-request-id` header (if
/// present) in the structured logging metadata alongside the HTTP method and
/// URI, so every log line for a single request is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
