//! Multiple-choice quizzes: scoring and the state of one attempt.
//!
//! A score is the rounded percentage of questions whose recorded choice
//! equals the correct option. Unanswered questions count as wrong.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pass threshold used when a quiz does not set its own.
pub const DEFAULT_PASS_SCORE: u32 = 70;

/// Question id → chosen option index
pub type Answers = HashMap<String, usize>;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Percentage needed to pass
    #[serde(default)]
    pub pass_score: Option<u32>,
    #[serde(default)]
    pub is_belt_exam: Option<bool>,
    #[serde(default)]
    pub style_id: Option<String>,
    #[serde(default)]
    pub belt_id: Option<String>,
    #[serde(default)]
    pub lesson_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl Question {
    pub fn is_correct(&self, answers: &Answers) -> bool {
        answers.get(&self.id) == Some(&self.correct_option_index)
    }
}

/// How a single question went, known once the quiz is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Wrong,
    Unanswered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    /// Percentage, 0-100
    pub score: u32,
    pub passed: bool,
    pub correct: usize,
    pub total: usize,
}

/// What gets recorded for a finished attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizAttempt {
    pub quiz_id: String,
    pub score: u32,
    pub passed: bool,
}

/// Number of questions answered correctly.
pub fn correct_count(questions: &[Question], answers: &Answers) -> usize {
    questions.iter().filter(|q| q.is_correct(answers)).count()
}

/// Percentage of correct answers, rounded half up.
///
/// An empty question set scores 0.
pub fn score_answers(questions: &[Question], answers: &Answers) -> u32 {
    percentage(correct_count(questions, answers), questions.len())
}

/// Whether `score` reaches the pass threshold (70 when unset).
pub fn passes(score: u32, pass_score: Option<u32>) -> bool {
    score >= pass_score.unwrap_or(DEFAULT_PASS_SCORE)
}

fn percentage(correct: usize, total: usize) -> u32 {
    let total = total.max(1) as u64;
    let correct = correct as u64;
    // round(100 * correct / total) without floats
    ((200 * correct + total) / (2 * total)) as u32
}

/// One user's pass through a quiz.
///
/// Choices can be changed freely until [`QuizSession::submit`]; after that
/// the session is read-only until [`QuizSession::reset`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    questions: Vec<Question>,
    answers: Answers,
    submitted: bool,
    default_pass_score: u32,
}

impl QuizSession {
    pub fn new(quiz: Quiz, mut questions: Vec<Question>) -> Self {
        questions.sort_by_key(|q| (q.display_order.is_none(), q.display_order));
        for question in &questions {
            if question.correct_option_index >= question.options.len() {
                log::warn!(
                    "question {} marks option {} correct but has {} options",
                    question.id,
                    question.correct_option_index,
                    question.options.len()
                );
            }
        }
        Self {
            quiz,
            questions,
            answers: Answers::new(),
            submitted: false,
            default_pass_score: DEFAULT_PASS_SCORE,
        }
    }

    /// Use a different threshold for quizzes without their own `pass_score`.
    pub fn with_default_pass_score(mut self, score: u32) -> Self {
        self.default_pass_score = score;
        self
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Questions in display order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answer(&self, question_id: &str) -> Option<usize> {
        self.answers.get(question_id).copied()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn pass_score(&self) -> u32 {
        self.quiz.pass_score.unwrap_or(self.default_pass_score)
    }

    /// Record a choice. Returns `false` and changes nothing when the quiz is
    /// already submitted, the question is unknown, or the option is out of
    /// range.
    pub fn select(&mut self, question_id: &str, option: usize) -> bool {
        if self.submitted {
            log::debug!("ignoring answer for {question_id}: quiz already submitted");
            return false;
        }
        let Some(question) = self.questions.iter().find(|q| q.id == question_id) else {
            log::debug!("ignoring answer for unknown question {question_id}");
            return false;
        };
        if option >= question.options.len() {
            log::debug!("ignoring option {option} for {question_id}: out of range");
            return false;
        }
        self.answers.insert(question.id.clone(), option);
        true
    }

    /// Finish the attempt. A quiz with no questions cannot be submitted.
    pub fn submit(&mut self) -> bool {
        if self.questions.is_empty() {
            return false;
        }
        self.submitted = true;
        true
    }

    /// Clear all choices and return to the unanswered state.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.submitted = false;
    }

    /// Percentage score, 0 until submitted.
    pub fn score(&self) -> u32 {
        if !self.submitted {
            return 0;
        }
        score_answers(&self.questions, &self.answers)
    }

    pub fn passed(&self) -> bool {
        self.submitted && self.score() >= self.pass_score()
    }

    pub fn outcome(&self, question_id: &str) -> Option<Outcome> {
        if !self.submitted {
            return None;
        }
        let question = self.questions.iter().find(|q| q.id == question_id)?;
        Some(match self.answer(question_id) {
            None => Outcome::Unanswered,
            Some(_) if question.is_correct(&self.answers) => Outcome::Correct,
            Some(_) => Outcome::Wrong,
        })
    }

    pub fn result(&self) -> Option<QuizResult> {
        if !self.submitted {
            return None;
        }
        Some(QuizResult {
            score: self.score(),
            passed: self.passed(),
            correct: correct_count(&self.questions, &self.answers),
            total: self.questions.len(),
        })
    }

    pub fn attempt(&self) -> Option<QuizAttempt> {
        let result = self.result()?;
        Some(QuizAttempt {
            quiz_id: self.quiz.id.clone(),
            score: result.score,
            passed: result.passed,
        })
    }
}
