use crate::{
    error::ApiError,
    models::{CreatePlanetRequest, Planet},
    repository::RepositoryState,
};

/// The fixed message surfaced whenever a planet lookup comes back empty.
pub const PLANET_NOT_FOUND: &str = "Planet not found";

/// PlanetService
///
/// The business layer between the handlers and the persistence gateway. Thin
/// by design: its one real responsibility is not-found translation — turning
/// an empty lookup into an explicit `NotFound` failure instead of letting
/// silence propagate — applied directly by `find_by_id` and reused as the
/// existence check that guards `update` and `delete`.
#[derive(Clone)]
pub struct PlanetService {
    repo: RepositoryState,
}

impl PlanetService {
    pub fn new(repo: RepositoryState) -> Self {
        Self { repo }
    }

    /// Returns every row; an empty list is a valid success.
    pub async fn find_all(&self) -> Result<Vec<Planet>, ApiError> {
        Ok(self.repo.find_all().await?)
    }

    /// Fetches one row, translating an absent result into `NotFound`.
    pub async fn find_by_id(&self, id: i32) -> Result<Planet, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound(PLANET_NOT_FOUND))
    }

    /// Inserts a new row; storage assigns the identity.
    pub async fn save(&self, req: CreatePlanetRequest) -> Result<Planet, ApiError> {
        Ok(self.repo.save(req).await?)
    }

    /// Inserts each row in order. Not atomic: if an element fails its table
    /// constraint, earlier inserts stay and the error propagates as-is.
    pub async fn save_all(
        &self,
        reqs: Vec<CreatePlanetRequest>,
    ) -> Result<Vec<Planet>, ApiError> {
        Ok(self.repo.save_all(reqs).await?)
    }

    /// Full replace by id. The row must exist first; the check and the write
    /// are separate reads (read-then-write), so a concurrent delete between
    /// them is an accepted race, not something this layer guards against.
    pub async fn update(&self, planet: Planet) -> Result<(), ApiError> {
        self.find_by_id(planet.id).await?;
        Ok(self.repo.update(planet).await?)
    }

    /// Removes the row for `id`, failing with `NotFound` when there is none.
    /// Delete is by entity: the fetched row is handed back to the gateway.
    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let planet = self.find_by_id(id).await?;
        Ok(self.repo.delete(&planet).await?)
    }
}
