use dioxus::prelude::*;
use dioxus_router::Link;
use skill_core::model::{AnswerSheet, CourseId};

use crate::context::{AppContext, CurrentSession};
use crate::routes::Route;
use crate::views::quiz::{QuizForm, QuizOutcome, SubmitState};
use crate::views::{ErrorNotice, ViewError, ViewState, view_state_from_resource};
use crate::vm::QuizVm;

#[derive(Clone, Debug, PartialEq)]
struct ExamData {
    quiz: QuizVm,
    completed: bool,
}

#[component]
pub fn ExamView(course_id: CourseId) -> Element {
    let ctx = use_context::<AppContext>();
    let CurrentSession(session) = use_context::<CurrentSession>();
    let assessment = ctx.assessment();
    let mut submit_state = use_signal(|| SubmitState::Idle);
    let mut exam_done = use_signal(|| false);

    let assessment_for_resource = assessment.clone();
    let id_for_resource = course_id.clone();
    let resource = use_resource(move || {
        let assessment = assessment_for_resource.clone();
        let course_id = id_for_resource.clone();
        let session = session();
        async move {
            let exam = assessment.load_exam(session.as_ref(), &course_id).await?;
            Ok::<_, ViewError>(ExamData {
                quiz: QuizVm::for_exam(&exam.entries),
                completed: exam.completed,
            })
        }
    });

    let back_course = course_id.clone();
    let on_submit = use_callback(move |answers: AnswerSheet| {
        let assessment = assessment.clone();
        let course_id = course_id.clone();
        let current = session();
        submit_state.set(SubmitState::Submitting);
        spawn(async move {
            match assessment
                .submit_exam(current.as_ref(), &course_id, &answers)
                .await
            {
                Ok(submission) => {
                    exam_done.set(submission.recorded());
                    submit_state.set(SubmitState::Scored(submission));
                }
                Err(err) => submit_state.set(SubmitState::Error(err.into())),
            }
        });
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page exam-page",
            Link {
                class: "back-link",
                to: Route::CourseDetails { course_id: back_course },
                "Back to course"
            }
            h2 { class: "view-title", "Final Exam" }
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
                    if data.completed || exam_done() {
                        p { class: "notice notice--success", "You have completed the final exam." }
                    }
                    QuizForm {
                        quiz: data.quiz,
                        submit_label: "Submit Exam",
                        submit_state,
                        on_submit,
                    }
                    QuizOutcome { submit_state }
                },
            }
        }
    }
}
