// src/models/question.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::personality::TraitScore;

/// One selectable answer of a quiz question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,

    /// Trait weights this option contributes when selected.
    pub personality: TraitScore,
}

/// A quiz question. Options are referenced by index from answers,
/// so their order is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt shown to the respondent.
    #[serde(rename = "question")]
    pub prompt: String,

    pub options: Vec<AnswerOption>,
}

/// DTO for sending a question to the client (option weights stay server side).
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicQuestion {
    pub question: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            question: q.prompt.clone(),
            options: q.options.iter().map(|o| o.text.clone()).collect(),
        }
    }
}

/// The ordered questions assigned to one respondent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionSet(Vec<Question>);

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self(questions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }

    pub fn to_public(&self) -> Vec<PublicQuestion> {
        self.0.iter().map(PublicQuestion::from).collect()
    }
}
