use services::{CompletionWrite, Submission};
use skill_core::model::{AnswerSheet, ExamEntry, Module, QuestionKey, Score};

/// One question with its answer choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizItemVm {
    pub key: QuestionKey,
    pub question: String,
    pub answers: Vec<String>,
}

/// Questions of a module quiz or exam plus the answers picked so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizVm {
    items: Vec<QuizItemVm>,
    answers: AnswerSheet,
}

impl QuizVm {
    /// Module questions are addressed by position.
    #[must_use]
    pub fn for_module(module: &Module) -> Self {
        let items = module
            .quiz()
            .iter()
            .enumerate()
            .map(|(index, q)| QuizItemVm {
                key: QuestionKey::Position(index),
                question: q.question().to_string(),
                answers: q.answers().to_vec(),
            })
            .collect();
        Self {
            items,
            answers: AnswerSheet::new(),
        }
    }

    /// Exam questions are addressed by entry id.
    #[must_use]
    pub fn for_exam(entries: &[ExamEntry]) -> Self {
        let items = entries
            .iter()
            .map(|entry| QuizItemVm {
                key: QuestionKey::Entry(entry.id.clone()),
                question: entry.question.question().to_string(),
                answers: entry.question.answers().to_vec(),
            })
            .collect();
        Self {
            items,
            answers: AnswerSheet::new(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[QuizItemVm] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pick an answer for the question at `index`. Later picks replace earlier ones.
    pub fn select(&mut self, index: usize, answer: usize) {
        if let Some(item) = self.items.get(index) {
            self.answers.select(item.key.clone(), answer);
        }
    }

    #[must_use]
    pub fn selected(&self, index: usize) -> Option<usize> {
        self.items
            .get(index)
            .and_then(|item| self.answers.selected(&item.key))
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// True when both carry the same questions, whatever was picked.
    #[must_use]
    pub fn same_questions(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

#[must_use]
pub fn score_message(score: &Score) -> String {
    format!("You scored {score}")
}

/// Extra line shown when the score could not be saved.
#[must_use]
pub fn completion_notice(submission: &Submission) -> Option<String> {
    match &submission.completion {
        CompletionWrite::Recorded => None,
        CompletionWrite::Failed(reason) => Some(format!(
            "Your progress could not be saved ({reason}). Please submit again."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::model::quiz::score_quiz;
    use skill_core::model::{CourseId, ExamEntryId, ModuleId, QuizQuestion};

    fn question(text: &str, correct: usize) -> QuizQuestion {
        QuizQuestion::new(text, vec!["a".into(), "b".into(), "c".into()], correct).unwrap()
    }

    fn module() -> Module {
        Module::new(
            ModuleId::new("m1").unwrap(),
            CourseId::new("guitar").unwrap(),
            "Chords",
            None,
            vec![question("One", 1), question("Two", 0), question("Three", 2)],
        )
        .unwrap()
    }

    #[test]
    fn selections_score_through_the_sheet() {
        let module = module();
        let mut quiz = QuizVm::for_module(&module);
        quiz.select(0, 1);
        quiz.select(1, 0);
        quiz.select(2, 0);
        quiz.select(2, 1);
        quiz.select(9, 0);

        assert_eq!(quiz.answered(), 3);
        assert_eq!(quiz.selected(2), Some(1));
        let score = score_quiz(module.quiz(), quiz.answers());
        assert_eq!(score_message(&score), "You scored 2 out of 3");
    }

    #[test]
    fn exam_items_use_entry_keys() {
        let entries = vec![ExamEntry::new(ExamEntryId::new("e1").unwrap(), question("Q", 0))];
        let mut quiz = QuizVm::for_exam(&entries);
        quiz.select(0, 2);
        assert_eq!(
            quiz.answers()
                .selected(&QuestionKey::Entry(ExamEntryId::new("e1").unwrap())),
            Some(2)
        );
        assert!(QuizVm::for_exam(&[]).is_empty());
    }

    #[test]
    fn picks_do_not_change_question_identity() {
        let module = module();
        let mut picked = QuizVm::for_module(&module);
        picked.select(0, 2);
        assert!(picked.same_questions(&QuizVm::for_module(&module)));

        let edited = Module::new(
            ModuleId::new("m1").unwrap(),
            CourseId::new("guitar").unwrap(),
            "Chords",
            None,
            vec![question("One", 1), question("Two, revised", 0)],
        )
        .unwrap();
        assert!(!picked.same_questions(&QuizVm::for_module(&edited)));
    }

    #[test]
    fn failed_write_adds_a_notice() {
        let score = Score {
            correct: 1,
            total: 2,
        };
        let ok = Submission {
            score,
            completion: CompletionWrite::Recorded,
        };
        assert!(completion_notice(&ok).is_none());
        let failed = Submission {
            score,
            completion: CompletionWrite::Failed("offline".into()),
        };
        assert!(completion_notice(&failed).unwrap().contains("offline"));
    }
}
