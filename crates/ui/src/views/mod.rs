mod auth;
mod course_details;
mod course_join;
mod courses;
mod exam;
mod home;
mod module;
mod profile;
mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::{LoginView, RegisterView};
pub use course_details::CourseDetailsView;
pub use course_join::CourseJoinView;
pub use courses::CoursesView;
pub use exam::ExamView;
pub use home::HomeView;
pub use module::ModuleView;
pub use profile::ProfileView;
pub use state::{ErrorNotice, ViewError, ViewErrorKind, ViewState, view_state_from_resource};
