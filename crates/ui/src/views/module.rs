use dioxus::prelude::*;
use dioxus_router::Link;
use skill_core::model::{AnswerSheet, CourseId, ModuleId};

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::quiz::{QuizForm, QuizOutcome, SubmitState};
use crate::views::{ErrorNotice, ViewError, ViewState, view_state_from_resource};
use crate::vm::QuizVm;

#[derive(Clone, Debug, PartialEq)]
struct ModuleData {
    name: String,
    content_link: Option<String>,
    quiz: QuizVm,
    completed: bool,
}

#[component]
pub fn ModuleView(course_id: CourseId, module_id: ModuleId) -> Element {
    let ctx = use_context::<AppContext>();
    let CurrentSession(session) = use_context::<CurrentSession>();
    let assessment = ctx.assessment();
    let mut submit_state = use_signal(|| SubmitState::Idle);

    let assessment_for_resource = assessment.clone();
    let ids = (course_id.clone(), module_id.clone());
    let resource = use_resource(move || {
        let assessment = assessment_for_resource.clone();
        let (course_id, module_id) = ids.clone();
        let session = session();
        async move {
            let content = assessment
                .load_module(session.as_ref(), &course_id, &module_id)
                .await?;
            Ok::<_, ViewError>(ModuleData {
                name: content.module.name().to_string(),
                content_link: content.module.content_link().map(|url| url.to_string()),
                quiz: QuizVm::for_module(&content.module),
                completed: content.completed,
            })
        }
    });

    let back_course = course_id.clone();
    let on_submit = use_callback(move |answers: AnswerSheet| {
        let assessment = assessment.clone();
        let course_id = course_id.clone();
        let module_id = module_id.clone();
        let current = session();
        submit_state.set(SubmitState::Submitting);
        spawn(async move {
            let result = assessment
                .submit_quiz(current.as_ref(), &course_id, &module_id, &answers)
                .await;
            match result {
                Ok(submission) => {
                    let recorded = submission.recorded();
                    submit_state.set(SubmitState::Scored(submission));
                    if recorded {
                        let mut resource = resource;
                        resource.restart();
                    }
                }
                Err(err) => submit_state.set(SubmitState::Error(err.into())),
            }
        });
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page module-page",
            Link {
                class: "back-link",
                to: Route::CourseDetails { course_id: back_course },
                "Back to course"
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorNotice { error: err }
                },
                ViewState::Ready(data) => rsx! {
                    h2 { class: "view-title", "{data.name}" }
                    if data.completed {
                        p { class: "notice notice--success", "You have completed this module." }
                    }
                    match data.content_link.as_ref() {
                        Some(href) => rsx! {
                            a { class: "content-link", href: "{href}", target: "_blank", "Open module content" }
                        },
                        None => rsx! {
                            p { class: "muted", "No content available." }
                        },
                    }
                    if data.completed {
                        QuizOutcome { submit_state }
                    } else if data.quiz.is_empty() {
                        p { class: "muted", "This module has no quiz." }
                    } else {
                        h3 { "Quiz" }
                        QuizForm {
                            quiz: data.quiz,
                            submit_label: "Submit Quiz",
                            submit_state,
                            on_submit,
                        }
                        QuizOutcome { submit_state }
                    }
                },
            }
        }
    }
}
