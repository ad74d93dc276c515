use chrono::{DateTime, Utc};

use crate::model::ids::{CourseId, ExamEntryId, ModuleId, UserId};

/// Links a user to a course they joined.
///
/// `completed` tracks the final exam only; module progress lives in
/// [`Completion`] records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub completed: bool,
    pub joined_at: DateTime<Utc>,
}

impl Enrollment {
    #[must_use]
    pub fn new(user_id: UserId, course_id: CourseId, joined_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            course_id,
            completed: false,
            joined_at,
        }
    }
}

/// What a completion record tracks inside an enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CompletionTarget {
    Module(ModuleId),
    ExamEntry(ExamEntryId),
}

impl CompletionTarget {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionTarget::Module(_) => "module",
            CompletionTarget::ExamEntry(_) => "exam",
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            CompletionTarget::Module(id) => id.as_str(),
            CompletionTarget::ExamEntry(id) => id.as_str(),
        }
    }

    #[must_use]
    pub fn module_id(&self) -> Option<&ModuleId> {
        match self {
            CompletionTarget::Module(id) => Some(id),
            CompletionTarget::ExamEntry(_) => None,
        }
    }
}

/// Per-user flag for a module (or exam entry) within an enrolled course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub target: CompletionTarget,
    pub completed: bool,
}

impl Completion {
    /// A not-yet-completed record, as seeded on enrollment.
    #[must_use]
    pub fn pending(user_id: UserId, course_id: CourseId, target: CompletionTarget) -> Self {
        Self {
            user_id,
            course_id,
            target,
            completed: false,
        }
    }
}

/// Everything written atomically when a user joins a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentBatch {
    pub enrollment: Enrollment,
    pub completions: Vec<Completion>,
}

impl EnrollmentBatch {
    /// Builds the batch: the enrollment plus one pending record per module and
    /// per exam entry.
    #[must_use]
    pub fn seed(
        enrollment: Enrollment,
        modules: impl IntoIterator<Item = ModuleId>,
        exam_entries: impl IntoIterator<Item = ExamEntryId>,
    ) -> Self {
        let user = enrollment.user_id.clone();
        let course = enrollment.course_id.clone();
        let completions = modules
            .into_iter()
            .map(CompletionTarget::Module)
            .chain(exam_entries.into_iter().map(CompletionTarget::ExamEntry))
            .map(|target| Completion::pending(user.clone(), course.clone(), target))
            .collect();
        Self {
            enrollment,
            completions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn seed_creates_one_pending_record_per_target() {
        let enrollment = Enrollment::new(
            UserId::new("u").unwrap(),
            CourseId::new("c").unwrap(),
            fixed_now(),
        );
        let batch = EnrollmentBatch::seed(
            enrollment,
            vec![ModuleId::new("m1").unwrap(), ModuleId::new("m2").unwrap()],
            vec![ExamEntryId::new("e1").unwrap()],
        );
        assert_eq!(batch.completions.len(), 3);
        assert!(batch.completions.iter().all(|c| !c.completed));
        assert_eq!(batch.completions[2].target.kind(), "exam");
        assert!(!batch.enrollment.completed);
    }

    #[test]
    fn seed_with_nothing_is_empty() {
        let enrollment = Enrollment::new(
            UserId::new("u").unwrap(),
            CourseId::new("c").unwrap(),
            fixed_now(),
        );
        let batch = EnrollmentBatch::seed(enrollment, Vec::new(), Vec::new());
        assert!(batch.completions.is_empty());
    }
}
