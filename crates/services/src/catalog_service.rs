use std::collections::HashSet;
use std::sync::Arc;

use skill_core::model::{
    CompletionTarget, Course, CourseId, Enrollment, EnrollmentBatch, Module, Session, UserId,
};
use storage::repository::{CatalogRepository, EnrollmentRepository};
use tracing::{debug, info};

use crate::Clock;
use crate::error::CatalogError;

/// A module as listed on the course details screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStatus {
    pub module: Module,
    pub completed: bool,
}

/// Course details for an enrolled user.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetails {
    pub course: Course,
    pub modules: Vec<ModuleStatus>,
    pub exam_completed: bool,
}

impl CourseDetails {
    #[must_use]
    pub fn completed_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.completed).count()
    }
}

/// Reads the course catalog and manages enrollments.
#[derive(Clone)]
pub struct CatalogService {
    clock: Clock,
    catalog: Arc<dyn CatalogRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<dyn CatalogRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            enrollments,
        }
    }

    /// All courses ordered by ID, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        let courses = self.catalog.list_courses().await?;
        debug!(count = courses.len(), "listed courses");
        Ok(courses)
    }

    /// Fetch a single course.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CourseNotFound` if it does not exist.
    pub async fn get_course(&self, course_id: &CourseId) -> Result<Course, CatalogError> {
        self.catalog
            .get_course(course_id)
            .await?
            .ok_or_else(|| CatalogError::CourseNotFound(course_id.clone()))
    }

    /// Whether the user has joined the course.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn is_enrolled(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<bool, CatalogError> {
        Ok(self
            .enrollments
            .get_enrollment(user_id, course_id)
            .await?
            .is_some())
    }

    /// Join a course: writes the enrollment and one pending completion record
    /// per module and per exam entry in a single batch.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CourseNotFound` before any write if the course is
    /// missing, or `CatalogError::Storage` if the batch fails.
    pub async fn enroll(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Enrollment, CatalogError> {
        if self.catalog.get_course(course_id).await?.is_none() {
            return Err(CatalogError::CourseNotFound(course_id.clone()));
        }

        let (modules, exam) = futures::try_join!(
            self.catalog.list_modules(course_id),
            self.catalog.list_exam_entries(course_id),
        )?;

        let enrollment = Enrollment::new(user_id.clone(), course_id.clone(), self.clock.now());
        let batch = EnrollmentBatch::seed(
            enrollment.clone(),
            modules.into_iter().map(|m| m.id().clone()),
            exam.into_iter().map(|e| e.id),
        );
        self.enrollments.write_enrollment(&batch).await?;

        info!(
            user = %user_id,
            course = %course_id,
            records = batch.completions.len(),
            "enrolled in course"
        );
        Ok(enrollment)
    }

    /// Course with its modules, the user's completion flags and the final-exam flag.
    ///
    /// Module rows the repository cannot read, nameless ones included, never reach here.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotAuthenticated` without a session and
    /// `CatalogError::CourseNotFound` if the course is missing.
    pub async fn course_details(
        &self,
        session: Option<&Session>,
        course_id: &CourseId,
    ) -> Result<CourseDetails, CatalogError> {
        let session = session.ok_or(CatalogError::NotAuthenticated)?;
        let user_id = &session.user_id;

        let (course, modules, completions, enrollment) = futures::try_join!(
            self.catalog.get_course(course_id),
            self.catalog.list_modules(course_id),
            self.enrollments.list_completions(user_id, course_id),
            self.enrollments.get_enrollment(user_id, course_id),
        )?;
        let course = course.ok_or_else(|| CatalogError::CourseNotFound(course_id.clone()))?;

        let done: HashSet<_> = completions
            .into_iter()
            .filter(|c| c.completed)
            .filter_map(|c| match c.target {
                CompletionTarget::Module(id) => Some(id),
                CompletionTarget::ExamEntry(_) => None,
            })
            .collect();

        let modules = modules
            .into_iter()
            .map(|module| ModuleStatus {
                completed: done.contains(module.id()),
                module,
            })
            .collect();

        Ok(CourseDetails {
            course,
            modules,
            exam_completed: enrollment.is_some_and(|e| e.completed),
        })
    }
}
