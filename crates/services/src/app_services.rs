use std::sync::Arc;

use storage::auth::{AuthProvider, LocalAuthProvider};
use storage::repository::Storage;

use crate::Clock;
use crate::assessment_service::AssessmentService;
use crate::auth_service::AuthService;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::firebase_auth::{FirebaseAuthProvider, FirebaseConfig};
use crate::profile_service::ProfileService;
use crate::progress_service::ProgressService;

/// Which identity provider backs sign-in.
#[derive(Clone, Debug)]
pub enum AuthBackend {
    /// Argon2-hashed accounts in the app's own storage.
    Local,
    Firebase(FirebaseConfig),
}

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    assessment: Arc<AssessmentService>,
    profiles: Arc<ProfileService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        backend: AuthBackend,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, backend))
    }

    /// Build services over in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, AuthBackend::Local)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, backend: AuthBackend) -> Self {
        let provider: Arc<dyn AuthProvider> = match backend {
            AuthBackend::Local => Arc::new(LocalAuthProvider::new(
                Arc::clone(&storage.accounts),
                clock,
            )),
            AuthBackend::Firebase(config) => Arc::new(FirebaseAuthProvider::new(config)),
        };
        let profiles = ProfileService::new(clock, Arc::clone(&storage.profiles));
        let auth = AuthService::new(provider, profiles.clone());
        let catalog = CatalogService::new(
            clock,
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.enrollments),
        );
        let progress =
            ProgressService::new(Arc::clone(&storage.catalog), Arc::clone(&storage.enrollments));
        let assessment =
            AssessmentService::new(Arc::clone(&storage.catalog), Arc::clone(&storage.enrollments));

        Self {
            auth: Arc::new(auth),
            catalog: Arc::new(catalog),
            progress: Arc::new(progress),
            assessment: Arc::new(assessment),
            profiles: Arc::new(profiles),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn assessment(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessment)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }
}
