use std::sync::Arc;

use services::{AssessmentService, AuthService, CatalogService, ProfileService, ProgressService};
use skill_core::model::Session;

/// Services the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn auth(&self) -> Arc<AuthService>;
    fn catalog(&self) -> Arc<CatalogService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn assessment(&self) -> Arc<AssessmentService>;
    fn profiles(&self) -> Arc<ProfileService>;
}

#[derive(Clone)]
pub struct AppContext {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    assessment: Arc<AssessmentService>,
    profiles: Arc<ProfileService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth: app.auth(),
            catalog: app.catalog(),
            progress: app.progress(),
            assessment: app.assessment(),
            profiles: app.profiles(),
        }
    }

    /// Snapshot of the signed-in user.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.auth.current()
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Reactive copy of the signed-in user, kept in sync with `AuthService`.
#[derive(Clone, Copy)]
pub struct CurrentSession(pub dioxus::prelude::Signal<Option<Session>>);
