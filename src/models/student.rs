// src/models/student.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    book::Book,
    personality::{Genre, Trait},
    question::{PublicQuestion, QuestionSet},
};

/// A respondent record: the sampled questions and the latest answers.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    /// Normalized (trimmed, lower-case) name. Acts as the record key.
    pub name: String,
    pub questions: QuestionSet,
    /// `None` until answers have been submitted.
    pub answers: Option<AnswerSet>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn new(name: impl Into<String>, questions: QuestionSet) -> Self {
        let now = chrono::Utc::now();
        Self {
            name: name.into(),
            questions,
            answers: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Selected option indexes, one non-empty set per question.
///
/// Only produced by [`AnswerSet::validate`] in request handling, so a stored
/// answer set always matches its question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerSet(Vec<Vec<usize>>);

impl AnswerSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<usize>> {
        self.0.iter()
    }

    /// Checks a raw `answers` payload against the respondent's questions.
    ///
    /// Rejects the whole payload on the first problem; nothing is coerced.
    pub fn validate(raw: &Value, questions: &QuestionSet) -> Result<Self, AnswerValidationError> {
        let rows = raw.as_array().ok_or(AnswerValidationError::NotAnArray)?;

        if rows.len() != questions.len() {
            return Err(AnswerValidationError::LengthMismatch {
                expected: questions.len(),
                actual: rows.len(),
            });
        }

        let mut answers = Vec::with_capacity(rows.len());
        for (position, (row, question)) in rows.iter().zip(questions.iter()).enumerate() {
            let row = row
                .as_array()
                .ok_or(AnswerValidationError::NotAnArray)?;
            if row.is_empty() {
                return Err(AnswerValidationError::EmptySelection { question: position });
            }

            let mut chosen: Vec<usize> = Vec::with_capacity(row.len());
            for value in row {
                let index = value
                    .as_u64()
                    .ok_or(AnswerValidationError::NotAnIndex { question: position })?;
                let options = question.options.len();
                let index = usize::try_from(index)
                    .ok()
                    .filter(|i| *i < options)
                    .ok_or(AnswerValidationError::IndexOutOfRange {
                        question: position,
                        index,
                        options,
                    })?;
                if chosen.contains(&index) {
                    return Err(AnswerValidationError::DuplicateIndex {
                        question: position,
                        index,
                    });
                }
                chosen.push(index);
            }
            answers.push(chosen);
        }

        Ok(Self(answers))
    }
}

impl From<Vec<Vec<usize>>> for AnswerSet {
    fn from(answers: Vec<Vec<usize>>) -> Self {
        Self(answers)
    }
}

/// Why a submitted answer payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerValidationError {
    #[error("answers must be an array of arrays of option indexes")]
    NotAnArray,

    #[error("expected {expected} answers, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("answer {question} must select at least one option")]
    EmptySelection { question: usize },

    #[error("answer {question} contains a value that is not an option index")]
    NotAnIndex { question: usize },

    #[error("answer {question} selects option {index}, but the question has {options} options")]
    IndexOutOfRange {
        question: usize,
        index: u64,
        options: usize,
    },

    #[error("answer {question} selects option {index} more than once")]
    DuplicateIndex { question: usize, index: usize },
}

/// Trims and lower-cases a respondent name.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// DTO for starting (or resuming) a quiz.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InitiateRequest {
    #[validate(length(min = 1, max = 50, message = "Invalid student name"))]
    pub name: String,
}

/// DTO for submitting answers.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitAnswersRequest {
    #[validate(length(min = 1, max = 50, message = "Invalid student name"))]
    pub name: String,

    /// One array of selected option indexes per question.
    /// Missing means `null`, which fails answer validation.
    #[serde(default)]
    #[schema(value_type = Vec<Vec<u64>>)]
    pub answers: Value,
}

/// Student as returned to the client.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub name: String,
    pub questions: Vec<PublicQuestion>,
    pub answers: Option<AnswerSet>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Student> for StudentResponse {
    fn from(s: &Student) -> Self {
        Self {
            name: s.name.clone(),
            questions: s.questions.to_public(),
            answers: s.answers.clone(),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Matched genre, both projected vectors and the recommended books.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchResult {
    pub genre: Genre,
    /// Names the index positions of both vectors.
    pub traits: Vec<Trait>,
    pub student_vector: Vec<i32>,
    pub genre_vector: Vec<i32>,
    pub books: Vec<Book>,
}

/// Response body of both student endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentEnvelope {
    pub message: String,
    pub student: StudentResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
}
