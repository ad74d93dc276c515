use dioxus::prelude::*;
use dioxus_router::Link;
use skill_core::model::CourseId;

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::{ErrorNotice, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ModuleRowVm, map_module_rows};

#[derive(Clone, Debug, PartialEq)]
struct DetailsData {
    name: String,
    description: String,
    image: Option<String>,
    modules: Vec<ModuleRowVm>,
    completed_modules: usize,
    exam_completed: bool,
}

#[component]
pub fn CourseDetailsView(course_id: CourseId) -> Element {
    let ctx = use_context::<AppContext>();
    let CurrentSession(session) = use_context::<CurrentSession>();
    let catalog = ctx.catalog();

    let id_for_resource = course_id.clone();
    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let course_id = id_for_resource.clone();
        let session = session();
        async move {
            let details = catalog.course_details(session.as_ref(), &course_id).await?;
            Ok::<_, ViewError>(DetailsData {
                name: details.course.name().to_string(),
                description: details.course.description().to_string(),
                image: details.course.image_data_uri(),
                modules: map_module_rows(&details),
                completed_modules: details.completed_modules(),
                exam_completed: details.exam_completed,
            })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page details-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorNotice { error: err }
                    Link { to: Route::Courses {}, "Back to courses" }
                },
                ViewState::Ready(data) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{data.name}" }
                        p { class: "view-subtitle",
                            "{data.completed_modules} / {data.modules.len()} modules completed"
                        }
                    }
                    if let Some(src) = data.image.as_ref() {
                        img { class: "course-hero", src: "{src}", alt: "{data.name}" }
                    }
                    p { class: "course-description", "{data.description}" }
                    section { class: "module-list",
                        h3 { "Modules" }
                        if data.modules.is_empty() {
                            p { class: "muted", "This course has no modules yet." }
                        }
                        ul {
                            for row in data.modules {
                                li { key: "{row.id}",
                                    class: if row.completed { "module-row module-row--done" } else { "module-row" },
                                    Link {
                                        to: Route::Module {
                                            course_id: course_id.clone(),
                                            module_id: row.id.clone(),
                                        },
                                        "{row.name}"
                                    }
                                    span { class: "module-status", "{row.status_label}" }
                                }
                            }
                        }
                    }
                    section { class: "exam-entry",
                        h3 { "Final Exam" }
                        if data.exam_completed {
                            p { class: "module-status", "Completed" }
                        }
                        Link {
                            class: "btn btn-primary",
                            to: Route::Exam { course_id: course_id.clone() },
                            if data.exam_completed { "Retake Exam" } else { "Take Exam" }
                        }
                    }
                },
            }
        }
    }
}
