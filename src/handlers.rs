use crate::{
    AppState,
    auth::AuthUser,
    error::ApiError,
    models::{CreatePlanetRequest, Planet},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

// Authorization lives here, not in the service: the extractor has already
// authenticated the caller (or rejected with 401), so each handler only has
// to match the caller's role against the route's requirement.

/// list_planets
///
/// [Reader Route] Lists every planet. An empty array is a valid success.
#[utoipa::path(
    get,
    path = "/planets",
    responses(
        (status = 200, description = "All planets", body = [Planet]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn list_planets(
    auth: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Planet>>, ApiError> {
    if !auth.can_read() {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.service.find_all().await?))
}

/// get_planet
///
/// [Reader Route] Retrieves a single planet by id. The service translates an
/// absent row into the 404 with the fixed "Planet not found" message.
#[utoipa::path(
    get,
    path = "/planets/{id}",
    params(("id" = i32, Path, description = "Planet ID")),
    responses(
        (status = 200, description = "Found", body = Planet),
        (status = 404, description = "Planet not found")
    )
)]
pub async fn get_planet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Planet>, ApiError> {
    if !auth.can_read() {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.service.find_by_id(id).await?))
}

/// create_planet
///
/// [Admin Route] Inserts a new planet. Validation of the required `name`
/// happens here at the request boundary, before the service is invoked; any
/// client-supplied id is structurally impossible since the payload has none.
#[utoipa::path(
    post,
    path = "/planets",
    request_body = CreatePlanetRequest,
    responses(
        (status = 201, description = "Created", body = Planet),
        (status = 400, description = "Missing or empty name")
    )
)]
pub async fn create_planet(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePlanetRequest>,
) -> Result<(StatusCode, Json<Planet>), ApiError> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }
    payload.validate()?;
    let planet = state.service.save(payload).await?;
    Ok((StatusCode::CREATED, Json(planet)))
}

/// create_planets_batch
///
/// [Admin Route] Inserts a list of planets, one row at a time, without a
/// surrounding transaction.
///
/// Only the list-level non-empty check runs at the boundary. Elements are
/// NOT validated individually: a bad element reaches the table, trips its
/// CHECK constraint, and comes back as a 500 — after any earlier elements
/// were already inserted. This asymmetry is the observed contract.
#[utoipa::path(
    post,
    path = "/planets/batch",
    request_body = [CreatePlanetRequest],
    responses(
        (status = 201, description = "Created", body = [Planet]),
        (status = 400, description = "Empty input list"),
        (status = 500, description = "An element violated a table constraint")
    )
)]
pub async fn create_planets_batch(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<Vec<CreatePlanetRequest>>,
) -> Result<(StatusCode, Json<Vec<Planet>>), ApiError> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }
    if payload.is_empty() {
        return Err(ApiError::Validation("Input planet list cannot be empty"));
    }
    let planets = state.service.save_all(payload).await?;
    Ok((StatusCode::CREATED, Json(planets)))
}

/// update_planet
///
/// [Admin Route] Full replace by id: every field is overwritten with the
/// payload, the id is forced from the path, and omitted optional fields are
/// lost. 404 when the row does not exist (checked before the write).
#[utoipa::path(
    put,
    path = "/planets/{id}",
    params(("id" = i32, Path, description = "Planet ID")),
    request_body = CreatePlanetRequest,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Missing or empty name"),
        (status = 404, description = "Planet not found")
    )
)]
pub async fn update_planet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreatePlanetRequest>,
) -> Result<StatusCode, ApiError> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }
    payload.validate()?;
    state.service.update(payload.into_planet(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// delete_planet
///
/// [Admin Route] Removes a planet by id. 404 when the row does not exist
/// (checked before the delete).
#[utoipa::path(
    delete,
    path = "/planets/{id}",
    params(("id" = i32, Path, description = "Planet ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Planet not found")
    )
)]
pub async fn delete_planet(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// fallback
///
/// Default-deny for every route/verb combination not declared above: the
/// caller must authenticate (401 otherwise) and hold the ADMIN role (403
/// otherwise) just to learn that the route does not exist.
pub async fn fallback(auth: AuthUser) -> Result<StatusCode, ApiError> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden);
    }
    Ok(StatusCode::NOT_FOUND)
}
