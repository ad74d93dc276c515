#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessment_service;
pub mod auth_service;
pub mod catalog_service;
pub mod error;
pub mod firebase_auth;
pub mod profile_service;
pub mod progress_service;

pub use skill_core::Clock;

pub use app_services::{AppServices, AuthBackend};
pub use assessment_service::{
    AssessmentService, CompletionWrite, ExamContent, ModuleContent, Submission,
};
pub use auth_service::AuthService;
pub use catalog_service::{CatalogService, CourseDetails, ModuleStatus};
pub use error::{
    AppServicesError, AssessmentError, AuthServiceError, CatalogError, ProfileServiceError,
    ProgressError,
};
pub use firebase_auth::{FirebaseAuthProvider, FirebaseConfig};
pub use profile_service::ProfileService;
pub use progress_service::ProgressService;
