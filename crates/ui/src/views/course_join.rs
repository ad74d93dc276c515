use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use skill_core::model::{Course, CourseId};

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::{ErrorNotice, ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq)]
enum JoinState {
    Idle,
    Joining,
    Error(ViewError),
}

/// Join prompt for a course the user is not enrolled in yet.
#[component]
pub fn CourseJoinView(course_id: CourseId) -> Element {
    let ctx = use_context::<AppContext>();
    let CurrentSession(session) = use_context::<CurrentSession>();
    let navigator = use_navigator();
    let catalog = ctx.catalog();
    let mut join_state = use_signal(|| JoinState::Idle);

    let catalog_for_resource = catalog.clone();
    let id_for_resource = course_id.clone();
    let resource = use_resource(move || {
        let catalog = catalog_for_resource.clone();
        let course_id = id_for_resource.clone();
        async move { Ok::<Course, ViewError>(catalog.get_course(&course_id).await?) }
    });

    let on_join = move |_| {
        if join_state() == JoinState::Joining {
            return;
        }
        let Some(current) = session() else {
            join_state.set(JoinState::Error(ViewError::not_authenticated()));
            return;
        };
        let catalog = catalog.clone();
        let course_id = course_id.clone();
        join_state.set(JoinState::Joining);
        spawn(async move {
            match catalog.enroll(&current.user_id, &course_id).await {
                Ok(_) => {
                    join_state.set(JoinState::Idle);
                    let _ = navigator.replace(Route::CourseDetails { course_id });
                }
                Err(err) => join_state.set(JoinState::Error(err.into())),
            }
        });
    };

    let state = view_state_from_resource(resource);
    let joining = join_state() == JoinState::Joining;

    rsx! {
        div { class: "page join-page",
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
                ViewState::Ready(course) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{course.name()}" }
                        if let Some(genre) = course.genre() {
                            span { class: "badge", "{genre}" }
                        }
                    }
                    if let Some(src) = course.image_data_uri() {
                        img { class: "course-hero", src: "{src}", alt: "{course.name()}" }
                    }
                    p { class: "course-description", "{course.description()}" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: joining,
                        onclick: on_join,
                        if joining { "Joining..." } else { "Join Course" }
                    }
                    if let JoinState::Error(err) = join_state() {
                        ErrorNotice { error: err }
                    }
                },
            }
        }
    }
}
