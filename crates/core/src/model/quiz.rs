use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ExamEntryId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("question must offer at least one answer")]
    NoAnswers,

    #[error("correct answer index {index} is out of bounds for {len} answers")]
    CorrectAnswerOutOfBounds { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with a single correct answer.
///
/// Module quizzes and final-exam entries share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion", into = "RawQuestion")]
pub struct QuizQuestion {
    question: String,
    answers: Vec<String>,
    correct_answer: usize,
}

impl QuizQuestion {
    /// Creates a question, checking that the correct index points at an answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the text is blank, there are no answers, or the
    /// correct-answer index is out of bounds.
    pub fn new(
        question: impl Into<String>,
        answers: Vec<String>,
        correct_answer: usize,
    ) -> Result<Self, QuizError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(QuizError::EmptyQuestion);
        }
        if answers.is_empty() {
            return Err(QuizError::NoAnswers);
        }
        if correct_answer >= answers.len() {
            return Err(QuizError::CorrectAnswerOutOfBounds {
                index: correct_answer,
                len: answers.len(),
            });
        }
        Ok(Self {
            question,
            answers,
            correct_answer,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_answer)
    }
}

/// Stored JSON shape, validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawQuestion {
    question: String,
    answers: Vec<String>,
    correct_answer: usize,
}

impl TryFrom<RawQuestion> for QuizQuestion {
    type Error = QuizError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Self::new(raw.question, raw.answers, raw.correct_answer)
    }
}

impl From<QuizQuestion> for RawQuestion {
    fn from(q: QuizQuestion) -> Self {
        Self {
            question: q.question,
            answers: q.answers,
            correct_answer: q.correct_answer,
        }
    }
}

/// A final-exam entry: a question stored as its own document under the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamEntry {
    pub id: ExamEntryId,
    pub question: QuizQuestion,
}

impl ExamEntry {
    #[must_use]
    pub fn new(id: ExamEntryId, question: QuizQuestion) -> Self {
        Self { id, question }
    }
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// Addresses a question inside a submission.
///
/// Module quizzes are addressed by position, exam entries by their id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    Position(usize),
    Entry(ExamEntryId),
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKey::Position(index) => write!(f, "#{index}"),
            QuestionKey::Entry(id) => write!(f, "{id}"),
        }
    }
}

/// The answers a student selected. Unanswered questions are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selected: HashMap<QuestionKey, usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the selection for a question.
    pub fn select(&mut self, key: QuestionKey, answer: usize) {
        self.selected.insert(key, answer);
    }

    #[must_use]
    pub fn with(mut self, key: QuestionKey, answer: usize) -> Self {
        self.select(key, answer);
        self
    }

    #[must_use]
    pub fn selected(&self, key: &QuestionKey) -> Option<usize> {
        self.selected.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

impl FromIterator<(usize, usize)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let selected = iter
            .into_iter()
            .map(|(position, answer)| (QuestionKey::Position(position), answer))
            .collect();
        Self { selected }
    }
}

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Number of correctly answered questions out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} out of {}", self.correct, self.total)
    }
}

/// Scores a submission. No partial credit, no negative marking; a question with
/// no selection never matches.
#[must_use]
pub fn score<'a, I>(questions: I, answers: &AnswerSheet) -> Score
where
    I: IntoIterator<Item = (QuestionKey, &'a QuizQuestion)>,
{
    let mut total = 0;
    let mut correct = 0;
    for (key, question) in questions {
        total += 1;
        if question.is_correct(answers.selected(&key)) {
            correct += 1;
        }
    }
    Score { correct, total }
}

/// Scores a module quiz, keyed by question position.
#[must_use]
pub fn score_quiz(quiz: &[QuizQuestion], answers: &AnswerSheet) -> Score {
    score(
        quiz.iter()
            .enumerate()
            .map(|(index, q)| (QuestionKey::Position(index), q)),
        answers,
    )
}

/// Scores a final exam, keyed by entry id.
#[must_use]
pub fn score_exam(entries: &[ExamEntry], answers: &AnswerSheet) -> Score {
    score(
        entries
            .iter()
            .map(|entry| (QuestionKey::Entry(entry.id.clone()), &entry.question)),
        answers,
    )
}
