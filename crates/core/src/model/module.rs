use thiserror::Error;
use url::Url;

use crate::model::ids::{CourseId, ModuleId};
use crate::model::quiz::QuizQuestion;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module name cannot be empty")]
    EmptyName,

    #[error("invalid content link: {0}")]
    InvalidContentLink(String),
}

/// A unit of course content, optionally paired with a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    id: ModuleId,
    course_id: CourseId,
    name: String,
    content_link: Option<Url>,
    quiz: Vec<QuizQuestion>,
}

impl Module {
    /// Creates a module.
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::EmptyName` if the name is blank.
    pub fn new(
        id: ModuleId,
        course_id: CourseId,
        name: impl Into<String>,
        content_link: Option<Url>,
        quiz: Vec<QuizQuestion>,
    ) -> Result<Self, ModuleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModuleError::EmptyName);
        }
        Ok(Self {
            id,
            course_id,
            name: name.trim().to_owned(),
            content_link,
            quiz,
        })
    }

    /// Parses a stored content link. Blank links mean "no content".
    ///
    /// # Errors
    ///
    /// Returns `ModuleError::InvalidContentLink` if the value is not a URL.
    pub fn parse_content_link(raw: Option<&str>) -> Result<Option<Url>, ModuleError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(link) => Url::parse(link)
                .map(Some)
                .map_err(|e| ModuleError::InvalidContentLink(e.to_string())),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content_link(&self) -> Option<&Url> {
        self.content_link.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    #[must_use]
    pub fn has_quiz(&self) -> bool {
        !self.quiz.is_empty()
    }
}
