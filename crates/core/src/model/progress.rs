use crate::model::course::Course;

/// Where a course stands for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    Ongoing,
    Completed,
}

/// Share of finished modules in an ongoing course.
///
/// A course without modules has no meaningful ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressFraction {
    Ratio(f64),
    NotApplicable,
}

impl ProgressFraction {
    /// Value for a progress bar; `NotApplicable` draws as empty.
    #[must_use]
    pub fn bar_value(&self) -> f64 {
        match self {
            ProgressFraction::Ratio(r) => *r,
            ProgressFraction::NotApplicable => 0.0,
        }
    }

    /// Whole percent, or `None` when not applicable.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> Option<u32> {
        match self {
            ProgressFraction::Ratio(r) => Some((r * 100.0).round() as u32),
            ProgressFraction::NotApplicable => None,
        }
    }
}

/// Point-in-time progress of one enrolled course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseProgress {
    pub course: Course,
    pub total_modules: usize,
    pub completed_modules: usize,
    pub exam_completed: bool,
}

impl CourseProgress {
    #[must_use]
    pub fn new(
        course: Course,
        total_modules: usize,
        completed_modules: usize,
        exam_completed: bool,
    ) -> Self {
        Self {
            course,
            total_modules,
            completed_modules: completed_modules.min(total_modules),
            exam_completed,
        }
    }

    #[must_use]
    pub fn all_modules_done(&self) -> bool {
        self.completed_modules == self.total_modules
    }

    /// Completed iff every module is done and the final exam flag is set.
    #[must_use]
    pub fn status(&self) -> CourseStatus {
        if self.all_modules_done() && self.exam_completed {
            CourseStatus::Completed
        } else {
            CourseStatus::Ongoing
        }
    }

    /// Modules are finished, only the final exam remains.
    #[must_use]
    pub fn final_exam_left(&self) -> bool {
        self.all_modules_done() && !self.exam_completed
    }

    #[must_use]
    pub fn fraction(&self) -> ProgressFraction {
        if self.total_modules == 0 {
            return ProgressFraction::NotApplicable;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.completed_modules as f64 / self.total_modules as f64;
        ProgressFraction::Ratio(ratio)
    }
}

/// Enrolled courses split into ongoing and completed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressOverview {
    pub ongoing: Vec<CourseProgress>,
    pub completed: Vec<CourseProgress>,
}

impl ProgressOverview {
    /// Partitions the given progress entries by status, preserving order.
    #[must_use]
    pub fn partition(entries: impl IntoIterator<Item = CourseProgress>) -> Self {
        let (completed, ongoing) = entries
            .into_iter()
            .partition(|p| p.status() == CourseStatus::Completed);
        Self { ongoing, completed }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ongoing.is_empty() && self.completed.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ongoing.len() + self.completed.len()
    }
}
