//! Shared error types for the services crate.

use thiserror::Error;

use skill_core::model::{CourseId, CredentialsError, ModuleId, ProfileError, UserId};
use storage::auth::AuthError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("sign in to continue")]
    NotAuthenticated,
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AssessmentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("sign in to continue")]
    NotAuthenticated,
    #[error("module {0} not found")]
    ModuleNotFound(ModuleId),
    #[error("No exam data found.")]
    NoExam,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error("profile {0} not found")]
    NotFound(UserId),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthServiceError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
