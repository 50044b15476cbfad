use crate::models::{CreatePlanetRequest, Planet, User};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI32, Ordering},
};

/// Repository Trait
///
/// The persistence gateway: an abstract contract over the `planet` table plus
/// the single credential lookup the authentication layer needs. Handlers and
/// the service interact with this trait only, so the concrete backend
/// (Postgres in production, in-memory for tests) is swappable.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) shareable across Axum's task boundaries.
///
/// Every method returns `Result<_, sqlx::Error>`; storage failures are never
/// swallowed here — they propagate to the HTTP boundary as a 500.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Planet CRUD ---
    async fn find_all(&self) -> Result<Vec<Planet>, sqlx::Error>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Planet>, sqlx::Error>;
    // Insert, letting storage assign the id.
    async fn save(&self, req: CreatePlanetRequest) -> Result<Planet, sqlx::Error>;
    // Row-by-row inserts. NOT atomic: a failing element leaves the earlier
    // inserts in place, matching the original contract.
    async fn save_all(&self, reqs: Vec<CreatePlanetRequest>)
    -> Result<Vec<Planet>, sqlx::Error>;
    // Full replace by id. Existence is the service's concern, not ours.
    async fn update(&self, planet: Planet) -> Result<(), sqlx::Error>;
    // Delete-by-entity: the service fetches the row first.
    async fn delete(&self, planet: &Planet) -> Result<(), sqlx::Error>;

    // --- Authentication Gateway ---
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The production implementation of the `Repository` trait, backed by a
/// PostgreSQL connection pool. All queries are parameterized through sqlx
/// binds; the `planet.name` CHECK constraint is what turns an unvalidated
/// batch element into a storage error.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn find_all(&self) -> Result<Vec<Planet>, sqlx::Error> {
        sqlx::query_as::<_, Planet>(
            "SELECT id, name, climate, terrain, film_appearances FROM planet",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Planet>, sqlx::Error> {
        sqlx::query_as::<_, Planet>(
            "SELECT id, name, climate, terrain, film_appearances FROM planet WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save(&self, req: CreatePlanetRequest) -> Result<Planet, sqlx::Error> {
        sqlx::query_as::<_, Planet>(
            "INSERT INTO planet (name, climate, terrain, film_appearances) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, climate, terrain, film_appearances",
        )
            .bind(req.name)
            .bind(req.climate)
            .bind(req.terrain)
            .bind(req.film_appearances)
            .fetch_one(&self.pool)
            .await
    }

    async fn save_all(
        &self,
        reqs: Vec<CreatePlanetRequest>,
    ) -> Result<Vec<Planet>, sqlx::Error> {
        let mut saved = Vec::with_capacity(reqs.len());
        for req in reqs {
            saved.push(self.save(req).await?);
        }
        Ok(saved)
    }

    async fn update(&self, planet: Planet) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE planet SET name = $2, climate = $3, terrain = $4, film_appearances = $5 \
             WHERE id = $1",
        )
        .bind(planet.id)
        .bind(planet.name)
        .bind(planet.climate)
        .bind(planet.terrain)
        .bind(planet.film_appearances)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, planet: &Planet) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM planet WHERE id = $1")
            .bind(planet.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, role FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }
}

/// InMemoryRepository
///
/// A HashMap-backed implementation used by the test suites so the full HTTP
/// stack can be exercised without a live Postgres. It mirrors the table's
/// behavior closely enough to matter: ids come from a sequence counter and an
/// empty `name` fails exactly like the CHECK constraint would.
pub struct InMemoryRepository {
    planets: Mutex<HashMap<i32, Planet>>,
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            planets: Mutex::new(HashMap::new()),
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    /// Registers a credential record for the auth extractor to find.
    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    /// Inserts a planet directly, bypassing the HTTP surface. Returns the
    /// assigned id.
    pub fn seed_planet(&self, req: CreatePlanetRequest) -> i32 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.planets.lock().unwrap().insert(
            id,
            Planet {
                id,
                name: req.name,
                climate: req.climate,
                terrain: req.terrain,
                film_appearances: req.film_appearances,
            },
        );
        id
    }

    fn check_name(name: &str) -> Result<(), sqlx::Error> {
        // Stand-in for the planet_name_not_empty CHECK constraint.
        if name.trim().is_empty() {
            return Err(sqlx::Error::Protocol(
                "violates check constraint \"planet_name_not_empty\"".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Planet>, sqlx::Error> {
        Ok(self.planets.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Planet>, sqlx::Error> {
        Ok(self.planets.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, req: CreatePlanetRequest) -> Result<Planet, sqlx::Error> {
        Self::check_name(&req.name)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let planet = Planet {
            id,
            name: req.name,
            climate: req.climate,
            terrain: req.terrain,
            film_appearances: req.film_appearances,
        };
        self.planets.lock().unwrap().insert(id, planet.clone());
        Ok(planet)
    }

    async fn save_all(
        &self,
        reqs: Vec<CreatePlanetRequest>,
    ) -> Result<Vec<Planet>, sqlx::Error> {
        let mut saved = Vec::with_capacity(reqs.len());
        // Intentionally not transactional, same as the Postgres path.
        for req in reqs {
            saved.push(self.save(req).await?);
        }
        Ok(saved)
    }

    async fn update(&self, planet: Planet) -> Result<(), sqlx::Error> {
        Self::check_name(&planet.name)?;
        self.planets.lock().unwrap().insert(planet.id, planet);
        Ok(())
    }

    async fn delete(&self, planet: &Planet) -> Result<(), sqlx::Error> {
        self.planets.lock().unwrap().remove(&planet.id);
        Ok(())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}
