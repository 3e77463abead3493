//! Questionnaire models (GERD-Q, RSI and the habit onboarding questions).
//!
//! Scoring happens server-side. The client only checks that every question
//! has an answer that belongs to it before allowing submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionnaireId {
    GerdQ,
    Rsi,
}

impl QuestionnaireId {
    /// Backend identifier used in `/api/questionnaires/{id}/`.
    pub fn id(self) -> u32 {
        match self {
            QuestionnaireId::GerdQ => 1,
            QuestionnaireId::Rsi => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn has_option(&self, option_id: u64) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Selected option per question, `questionId -> optionId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers(BTreeMap<u64, u64>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select (or replace) the answer to a question.
    pub fn select(&mut self, question_id: u64, option_id: u64) {
        self.0.insert(question_id, option_id);
    }

    pub fn get(&self, question_id: u64) -> Option<u64> {
        self.0.get(&question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.0.iter().map(|(q, o)| (*q, *o))
    }
}

impl FromIterator<(u64, u64)> for Answers {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Submit is enabled only when the answer count equals the question count.
pub fn can_submit(questions: &[Question], answers: &Answers) -> bool {
    !questions.is_empty() && answers.answered_count() == questions.len()
}

/// Full check: every question answered with one of its own options and no
/// answers to unknown questions.
pub fn validate_answers(
    questions: &[Question],
    answers: &Answers,
) -> Result<SubmitAnswers, ValidationErrors> {
    let mut errors = Vec::new();
    for question in questions {
        match answers.get(question.id) {
            None => errors.push(FieldError::new(question.id.to_string(), "unanswered")),
            Some(option) if !question.has_option(option) => {
                errors.push(FieldError::new(question.id.to_string(), "unknown option"))
            }
            Some(_) => {}
        }
    }
    for (question_id, _) in answers.iter() {
        if !questions.iter().any(|q| q.id == question_id) {
            errors.push(FieldError::new(question_id.to_string(), "unknown question"));
        }
    }
    if !errors.is_empty() || !can_submit(questions, answers) {
        if errors.is_empty() {
            errors.push(FieldError::new("answers", "no questions to answer"));
        }
        return Err(ValidationErrors(errors));
    }

    Ok(SubmitAnswers {
        answers: answers
            .iter()
            .map(|(question_id, option_id)| SubmittedAnswer {
                question_id,
                option_id,
            })
            .collect(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: u64,
    pub option_id: u64,
}

/// Body of `POST /api/questionnaires/{id}/submit/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswers {
    pub answers: Vec<SubmittedAnswer>,
}

/// Server acknowledgement; scores are opaque to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub classification: Option<String>,
}
