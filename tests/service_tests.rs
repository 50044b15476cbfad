use async_trait::async_trait;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use swplanet::{
    PlanetService,
    error::ApiError,
    models::{CreatePlanetRequest, Planet, User},
    repository::{Repository, RepositoryState},
};

// --- MOCK REPOSITORY ---

// Control point for the service tests: pre-canned lookup results plus flags
// recording whether a write ever reached the gateway.
struct RecordingRepo {
    find_result: Option<Planet>,
    update_called: AtomicBool,
    delete_called: AtomicBool,
    deleted_entity: Mutex<Option<Planet>>,
}

impl RecordingRepo {
    fn returning(planet: Option<Planet>) -> Arc<Self> {
        Arc::new(Self {
            find_result: planet,
            update_called: AtomicBool::new(false),
            delete_called: AtomicBool::new(false),
            deleted_entity: Mutex::new(None),
        })
    }
}

#[async_trait]
impl Repository for RecordingRepo {
    async fn find_all(&self) -> Result<Vec<Planet>, sqlx::Error> {
        Ok(self.find_result.clone().into_iter().collect())
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Planet>, sqlx::Error> {
        Ok(self.find_result.clone())
    }

    async fn save(&self, req: CreatePlanetRequest) -> Result<Planet, sqlx::Error> {
        Ok(Planet {
            id: 1,
            name: req.name,
            climate: req.climate,
            terrain: req.terrain,
            film_appearances: req.film_appearances,
        })
    }

    async fn save_all(
        &self,
        reqs: Vec<CreatePlanetRequest>,
    ) -> Result<Vec<Planet>, sqlx::Error> {
        let mut out = Vec::new();
        for (i, req) in reqs.into_iter().enumerate() {
            out.push(Planet {
                id: i as i32 + 1,
                name: req.name,
                climate: req.climate,
                terrain: req.terrain,
                film_appearances: req.film_appearances,
            });
        }
        Ok(out)
    }

    async fn update(&self, _planet: Planet) -> Result<(), sqlx::Error> {
        self.update_called.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, planet: &Planet) -> Result<(), sqlx::Error> {
        self.delete_called.store(true, Ordering::SeqCst);
        *self.deleted_entity.lock().unwrap() = Some(planet.clone());
        Ok(())
    }

    async fn find_user_by_username(&self, _username: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(None)
    }
}

// --- FIXTURES ---

fn valid_planet() -> Planet {
    Planet {
        id: 1,
        name: "Earth".to_string(),
        climate: Some("temperate".to_string()),
        terrain: Some("sea, mountain, arid, forest".to_string()),
        film_appearances: None,
    }
}

fn planet_to_be_saved() -> CreatePlanetRequest {
    CreatePlanetRequest {
        name: "Earth".to_string(),
        climate: Some("temperate".to_string()),
        terrain: Some("sea, earth, mountain, arid, florest".to_string()),
        film_appearances: None,
    }
}

fn service_with(repo: Arc<RecordingRepo>) -> (PlanetService, Arc<RecordingRepo>) {
    let state: RepositoryState = repo.clone();
    (PlanetService::new(state), repo)
}

// --- TESTS ---

#[tokio::test]
async fn find_all_returns_planets() {
    let (service, _) = service_with(RecordingRepo::returning(Some(valid_planet())));
    let planets = service.find_all().await.unwrap();
    assert_eq!(planets, vec![valid_planet()]);
}

#[tokio::test]
async fn find_all_empty_is_a_valid_success() {
    let (service, _) = service_with(RecordingRepo::returning(None));
    assert!(service.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_by_id_returns_planet_when_it_exists() {
    let (service, _) = service_with(RecordingRepo::returning(Some(valid_planet())));
    let planet = service.find_by_id(1).await.unwrap();
    assert_eq!(planet, valid_planet());
}

#[tokio::test]
async fn find_by_id_translates_absence_into_not_found() {
    let (service, _) = service_with(RecordingRepo::returning(None));
    match service.find_by_id(1).await {
        Err(ApiError::NotFound(msg)) => assert_eq!(msg, "Planet not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn save_returns_planet_with_assigned_id() {
    let (service, _) = service_with(RecordingRepo::returning(None));
    let planet = service.save(planet_to_be_saved()).await.unwrap();
    assert_eq!(planet.id, 1);
    assert_eq!(planet.name, "Earth");
}

#[tokio::test]
async fn save_all_returns_every_saved_planet() {
    let (service, _) = service_with(RecordingRepo::returning(None));
    let planets = service
        .save_all(vec![planet_to_be_saved(), planet_to_be_saved()])
        .await
        .unwrap();
    assert_eq!(planets.len(), 2);
    assert!(planets.iter().all(|p| p.id > 0));
}

#[tokio::test]
async fn update_writes_when_the_planet_exists() {
    let (service, repo) = service_with(RecordingRepo::returning(Some(valid_planet())));
    let mut replacement = valid_planet();
    replacement.climate = Some("temperate, hot, artic".to_string());

    service.update(replacement).await.unwrap();
    assert!(repo.update_called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn update_fails_with_not_found_and_performs_no_write() {
    let (service, repo) = service_with(RecordingRepo::returning(None));

    let result = service.update(valid_planet()).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert!(!repo.update_called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn delete_removes_the_fetched_entity() {
    let (service, repo) = service_with(RecordingRepo::returning(Some(valid_planet())));

    service.delete(1).await.unwrap();
    assert!(repo.delete_called.load(Ordering::SeqCst));
    // Delete is by entity: the gateway receives the row the service fetched.
    assert_eq!(*repo.deleted_entity.lock().unwrap(), Some(valid_planet()));
}

#[tokio::test]
async fn delete_fails_with_not_found_and_performs_no_delete() {
    let (service, repo) = service_with(RecordingRepo::returning(None));

    let result = service.delete(1).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
    assert!(!repo.delete_called.load(Ordering::SeqCst));
}
