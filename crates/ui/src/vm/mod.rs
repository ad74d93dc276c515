mod course_vm;
mod home_vm;
mod profile_vm;
mod quiz_vm;

pub use course_vm::{
    CourseCardVm, ModuleRowVm, course_route, map_course_cards, map_module_rows,
};
pub use home_vm::{
    DEFAULT_VIEWPORT_WIDTH, ProgressCardVm, columns_for_width, filter_progress_cards, greeting,
    map_progress_cards, visible_count,
};
pub use profile_vm::ProfileFormVm;
pub use quiz_vm::{QuizItemVm, QuizVm, completion_notice, score_message};
