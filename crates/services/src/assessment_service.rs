use std::sync::Arc;

use skill_core::model::quiz::{score_exam, score_quiz};
use skill_core::model::{
    AnswerSheet, CompletionTarget, CourseId, ExamEntry, Module, ModuleId, Score, Session,
};
use storage::repository::{CatalogRepository, EnrollmentRepository, StorageError};
use tracing::{info, warn};

use crate::error::AssessmentError;

/// Whether the completion flag reached storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionWrite {
    Recorded,
    Failed(String),
}

/// Result of submitting a quiz or the final exam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub score: Score,
    pub completion: CompletionWrite,
}

impl Submission {
    #[must_use]
    pub fn recorded(&self) -> bool {
        self.completion == CompletionWrite::Recorded
    }
}

/// A module opened by a signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleContent {
    pub module: Module,
    pub completed: bool,
}

/// The final exam of a course.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamContent {
    pub entries: Vec<ExamEntry>,
    pub completed: bool,
}

/// Loads quizzes and exams, scores submissions and records completion.
///
/// Completion is gated on submission, not on the score.
#[derive(Clone)]
pub struct AssessmentService {
    catalog: Arc<dyn CatalogRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl AssessmentService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            catalog,
            enrollments,
        }
    }

    /// Load a module with the user's completion flag.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotAuthenticated` without a session,
    /// `AssessmentError::ModuleNotFound` if the module does not exist.
    pub async fn load_module(
        &self,
        session: Option<&Session>,
        course_id: &CourseId,
        module_id: &ModuleId,
    ) -> Result<ModuleContent, AssessmentError> {
        let session = session.ok_or(AssessmentError::NotAuthenticated)?;
        let (module, completions) = futures::try_join!(
            self.catalog.get_module(course_id, module_id),
            self.enrollments.list_completions(&session.user_id, course_id),
        )?;
        let module = module.ok_or_else(|| AssessmentError::ModuleNotFound(module_id.clone()))?;
        let target = CompletionTarget::Module(module_id.clone());
        let completed = completions
            .iter()
            .any(|c| c.target == target && c.completed);
        Ok(ModuleContent { module, completed })
    }

    /// Load the final exam of a course.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotAuthenticated` without a session,
    /// `AssessmentError::NoExam` if the course has no exam entries.
    pub async fn load_exam(
        &self,
        session: Option<&Session>,
        course_id: &CourseId,
    ) -> Result<ExamContent, AssessmentError> {
        let session = session.ok_or(AssessmentError::NotAuthenticated)?;
        let (entries, enrollment) = futures::try_join!(
            self.catalog.list_exam_entries(course_id),
            self.enrollments.get_enrollment(&session.user_id, course_id),
        )?;
        if entries.is_empty() {
            return Err(AssessmentError::NoExam);
        }
        Ok(ExamContent {
            entries,
            completed: enrollment.is_some_and(|e| e.completed),
        })
    }

    /// Score a module quiz and mark the module completed.
    ///
    /// Answers are keyed by question position. The completion flag is set
    /// whatever the score; a failed write is reported in the submission.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotAuthenticated` without a session (nothing
    /// is written), `AssessmentError::ModuleNotFound` if the module is missing.
    pub async fn submit_quiz(
        &self,
        session: Option<&Session>,
        course_id: &CourseId,
        module_id: &ModuleId,
        answers: &AnswerSheet,
    ) -> Result<Submission, AssessmentError> {
        let session = session.ok_or(AssessmentError::NotAuthenticated)?;
        let module = self
            .catalog
            .get_module(course_id, module_id)
            .await?
            .ok_or_else(|| AssessmentError::ModuleNotFound(module_id.clone()))?;

        let score = score_quiz(module.quiz(), answers);
        let write = self
            .enrollments
            .mark_completed(
                &session.user_id,
                course_id,
                &CompletionTarget::Module(module_id.clone()),
            )
            .await;

        let completion = completion_outcome(write, "module");
        info!(
            user = %session.user_id,
            course = %course_id,
            module = %module_id,
            %score,
            "quiz submitted"
        );
        Ok(Submission { score, completion })
    }

    /// Score the final exam and set the enrollment's exam flag.
    ///
    /// Answers are keyed by exam entry ID. Exam-entry completion records are
    /// marked as well.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::NotAuthenticated` without a session (nothing
    /// is written), `AssessmentError::NoExam` if the course has no exam.
    pub async fn submit_exam(
        &self,
        session: Option<&Session>,
        course_id: &CourseId,
        answers: &AnswerSheet,
    ) -> Result<Submission, AssessmentError> {
        let session = session.ok_or(AssessmentError::NotAuthenticated)?;
        let entries = self.catalog.list_exam_entries(course_id).await?;
        if entries.is_empty() {
            return Err(AssessmentError::NoExam);
        }

        let score = score_exam(&entries, answers);
        let mut write = self
            .enrollments
            .mark_exam_completed(&session.user_id, course_id)
            .await;
        if write.is_ok() {
            for entry in &entries {
                write = self
                    .enrollments
                    .mark_completed(
                        &session.user_id,
                        course_id,
                        &CompletionTarget::ExamEntry(entry.id.clone()),
                    )
                    .await;
                if write.is_err() {
                    break;
                }
            }
        }

        let completion = completion_outcome(write, "exam");
        info!(user = %session.user_id, course = %course_id, %score, "exam submitted");
        Ok(Submission { score, completion })
    }
}

fn completion_outcome(write: Result<(), StorageError>, what: &'static str) -> CompletionWrite {
    match write {
        Ok(()) => CompletionWrite::Recorded,
        Err(e) => {
            warn!(error = %e, what, "completion flag was not recorded");
            CompletionWrite::Failed(e.to_string())
        }
    }
}
