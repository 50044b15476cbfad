use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::ApiError;

// --- Core Application Schemas (Mapped to Database) ---

/// Planet
///
/// Represents a persisted planet record from the `planet` table. This is the
/// primary data structure for the CRUD surface; `id` is assigned by the
/// database on insert and is immutable afterwards except through a full
/// replace by id (PUT).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    // Primary key, assigned by the database on insert.
    pub id: i32,
    // Required and non-empty for every persisted row (also enforced by a
    // CHECK constraint on the table).
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    /// Serialized as `filmAppearances` on the wire.
    pub film_appearances: Option<i64>,
}

/// User
///
/// The user's canonical credential record stored in the `users` table.
/// Read-only from this system's perspective: it is consulted only by the
/// Basic-auth extractor and never exposed through any endpoint, which is why
/// it carries neither `Serialize` nor `ToSchema`.
#[derive(Debug, Clone, Deserialize, FromRow, Default)]
pub struct User {
    pub id: i32,
    // Unique login name.
    pub username: String,
    // Argon2 PHC-formatted password hash.
    pub password: String,
    // The RBAC field: 'ADMIN' or 'USER'.
    pub role: String,
}

/// --- Request Payloads (Input Schemas) ---

/// CreatePlanetRequest
///
/// Input payload for creating a planet (POST /planets, elements of
/// POST /planets/batch) and for the full-replace body of PUT /planets/{id}.
/// A client-supplied `id` is deliberately absent: identity is assigned by
/// storage on create and forced from the path on update.
///
/// `serde(default)` keeps deserialization permissive: a body with no `name`
/// parses to an empty string and is rejected by `validate()` with the
/// field-level 400, instead of failing JSON extraction with a 422.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePlanetRequest {
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub film_appearances: Option<i64>,
}

impl CreatePlanetRequest {
    /// Request-boundary validation, invoked by the single-item handlers
    /// before the service layer is ever called.
    ///
    /// Deliberately NOT applied to batch elements: the batch endpoint only
    /// checks that the list is non-empty, so a bad element travels down to
    /// the table's CHECK constraint and surfaces as a 500.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("The name of planet is mandatory"));
        }
        Ok(())
    }

    /// Builds the full replacement entity for PUT, with the identity taken
    /// from the request path rather than the body.
    pub fn into_planet(self, id: i32) -> Planet {
        Planet {
            id,
            name: self.name,
            climate: self.climate,
            terrain: self.terrain,
            film_appearances: self.film_appearances,
        }
    }
}
