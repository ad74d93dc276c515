use dioxus::prelude::*;
use dioxus_router::Link;
use services::{
    AssessmentError, AuthServiceError, CatalogError, ProfileServiceError, ProgressError,
};

use crate::routes::Route;

/// How a failed operation is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewErrorKind {
    NotAuthenticated,
    NotFound,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    pub kind: ViewErrorKind,
    message: String,
}

impl ViewError {
    #[must_use]
    pub fn not_authenticated() -> Self {
        Self {
            kind: ViewErrorKind::NotAuthenticated,
            message: "Please sign in to continue.".into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ViewErrorKind::NotFound,
            message: message.into(),
        }
    }

    /// A remote failure. Logged once here, then only displayed.
    #[must_use]
    pub fn failed(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "operation failed");
        Self {
            kind: ViewErrorKind::Failed,
            message: "Something went wrong. Please try again.".into(),
        }
    }

    /// A rejected form submission; the message comes straight from the service.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            kind: ViewErrorKind::Failed,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CatalogError> for ViewError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotAuthenticated => Self::not_authenticated(),
            CatalogError::CourseNotFound(_) => Self::not_found("Course not found."),
            other => Self::failed(&other),
        }
    }
}

impl From<ProgressError> for ViewError {
    fn from(err: ProgressError) -> Self {
        Self::failed(&err)
    }
}

impl From<AssessmentError> for ViewError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::NotAuthenticated => Self::not_authenticated(),
            AssessmentError::ModuleNotFound(_) => Self::not_found("Module not found."),
            AssessmentError::NoExam => Self::not_found(err.to_string()),
            other => Self::failed(&other),
        }
    }
}

impl From<ProfileServiceError> for ViewError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::NotFound(_) => Self::not_found("Profile not found."),
            ProfileServiceError::Profile(e) => Self::rejected(e.to_string()),
            other => Self::failed(&other),
        }
    }
}

impl From<AuthServiceError> for ViewError {
    fn from(err: AuthServiceError) -> Self {
        tracing::warn!(error = %err, "authentication rejected");
        Self::rejected(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::not_found("Nothing to show.")),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Inline message for a failed load or action.
#[component]
pub fn ErrorNotice(error: ViewError) -> Element {
    rsx! {
        div { class: "notice notice--error",
            p { "{error.message()}" }
            if error.kind == ViewErrorKind::NotAuthenticated {
                Link { to: Route::Login {}, "Sign in" }
            }
        }
    }
}
