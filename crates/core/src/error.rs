use thiserror::Error;

use crate::model::{
    CourseError, CredentialsError, IdError, ModuleError, ProfileError, QuizError,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
}
