use dioxus::prelude::*;
use services::Submission;
use skill_core::model::AnswerSheet;

use crate::views::{ErrorNotice, ViewError};
use crate::vm::{QuizVm, completion_notice, score_message};

#[derive(Clone, Debug, PartialEq)]
pub(super) enum SubmitState {
    Idle,
    Submitting,
    Scored(Submission),
    Error(ViewError),
}

/// Radio-button questionnaire shared by module quizzes and the exam.
///
/// Answers lock once the submission is scored.
#[component]
pub(super) fn QuizForm(
    quiz: QuizVm,
    submit_label: &'static str,
    submit_state: Signal<SubmitState>,
    on_submit: EventHandler<AnswerSheet>,
) -> Element {
    let mut form = use_signal(|| quiz.clone());
    // A reload with other questions starts over; the same questions keep their picks.
    use_effect(use_reactive((&quiz,), move |(quiz,)| {
        if !form.peek().same_questions(&quiz) {
            form.set(quiz);
        }
    }));

    let submitting = *submit_state.read() == SubmitState::Submitting;
    let scored = matches!(*submit_state.read(), SubmitState::Scored(_));
    let items = form.read().items().to_vec();

    rsx! {
        div { class: "quiz",
            for (index, item) in items.into_iter().enumerate() {
                fieldset { key: "{item.key}", class: "quiz-question",
                    legend { "{index + 1}. {item.question}" }
                    for (answer, label) in item.answers.iter().enumerate() {
                        label { key: "{answer}", class: "quiz-answer",
                            input {
                                r#type: "radio",
                                name: "question-{index}",
                                checked: form.read().selected(index) == Some(answer),
                                disabled: scored,
                                onchange: move |_| form.write().select(index, answer),
                            }
                            "{label}"
                        }
                    }
                }
            }
            if !scored {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_submit.call(form.read().answers().clone()),
                    if submitting { "Submitting..." } else { "{submit_label}" }
                }
            }
        }
    }
}

/// Score or failure of the last submission. Renders nothing before one.
#[component]
pub(super) fn QuizOutcome(submit_state: Signal<SubmitState>) -> Element {
    match submit_state() {
        SubmitState::Scored(submission) => rsx! {
            p { class: "quiz-score", "{score_message(&submission.score)}" }
            if let Some(notice) = completion_notice(&submission) {
                p { class: "notice notice--warning", "{notice}" }
            }
        },
        SubmitState::Error(err) => rsx! {
            ErrorNotice { error: err }
        },
        SubmitState::Idle | SubmitState::Submitting => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::CompletionWrite;
    use skill_core::model::{CourseId, Module, ModuleId, QuizQuestion, Score};

    use crate::views::test_harness::drive_dom;

    fn quiz() -> QuizVm {
        let question = |text: &str| {
            QuizQuestion::new(text, vec!["a".into(), "b".into()], 0).unwrap()
        };
        let module = Module::new(
            ModuleId::new("m1").unwrap(),
            CourseId::new("guitar").unwrap(),
            "Chords",
            None,
            vec![question("Which chord?"), question("Which string?")],
        )
        .unwrap();
        QuizVm::for_module(&module)
    }

    #[component]
    fn OpenQuiz() -> Element {
        let submit_state = use_signal(|| SubmitState::Idle);
        rsx! {
            QuizForm { quiz: quiz(), submit_label: "Submit Quiz", submit_state, on_submit: move |_| {} }
            QuizOutcome { submit_state }
        }
    }

    #[component]
    fn ScoredQuiz() -> Element {
        let submit_state = use_signal(|| {
            SubmitState::Scored(Submission {
                score: Score { correct: 1, total: 2 },
                completion: CompletionWrite::Recorded,
            })
        });
        rsx! {
            QuizForm { quiz: quiz(), submit_label: "Submit Quiz", submit_state, on_submit: move |_| {} }
            QuizOutcome { submit_state }
        }
    }

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        drive_dom(&mut dom);
        dioxus_ssr::render(&dom)
    }

    #[test]
    fn open_quiz_offers_the_submit_button() {
        let html = render(OpenQuiz);
        assert!(html.contains("Which string?"), "missing question in {html}");
        assert!(html.contains("Submit Quiz"), "missing submit in {html}");
        assert!(!html.contains("You scored"), "unexpected score in {html}");
    }

    #[test]
    fn scored_quiz_locks_answers_and_shows_the_score() {
        let html = render(ScoredQuiz);
        assert!(html.contains("Which chord?"), "missing question in {html}");
        assert!(html.contains("disabled"), "answers still editable in {html}");
        assert!(!html.contains("Submit Quiz"), "submit still offered in {html}");
        assert!(html.contains("You scored 1 out of 2"), "missing score in {html}");
    }
}
