mod account;
mod course;
mod enrollment;
mod ids;
mod module;
mod profile;
mod progress;
pub mod quiz;

pub use ids::{CourseId, ExamEntryId, IdError, ModuleId, UserId, MAX_ID_LEN};

pub use account::{Credentials, CredentialsError, MIN_PASSWORD_LEN, Session};
pub use course::{genres, Course, CourseError, CourseFilter};
pub use enrollment::{Completion, CompletionTarget, Enrollment, EnrollmentBatch};
pub use module::{Module, ModuleError};
pub use profile::{DEFAULT_PROFILE_PICTURE, ProfileError, ProfileUpdate, UserProfile};
pub use progress::{CourseProgress, CourseStatus, ProgressFraction, ProgressOverview};
pub use quiz::{AnswerSheet, ExamEntry, QuestionKey, QuizError, QuizQuestion, Score};
