// src/scoring/mod.rs

//! Personality scoring: sampling questions, averaging answers and
//! matching the result against genre archetypes.

pub mod aggregate;
pub mod matcher;
pub mod sampler;
pub mod vector;

use thiserror::Error;

use crate::{
    catalog::ArchetypeTable,
    models::{
        personality::{Genre, TRAIT_COUNT, TraitScore},
        question::QuestionSet,
        student::AnswerSet,
    },
};

pub use aggregate::aggregate;
pub use matcher::match_genre;
pub use sampler::{SamplingError, sample};
pub use vector::to_vector;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("{answers} answers for {questions} questions")]
    LengthMismatch { questions: usize, answers: usize },

    #[error("question {question} has {options} options, index {index} is out of range")]
    IndexOutOfRange {
        question: usize,
        index: usize,
        options: usize,
    },

    #[error("no option was selected")]
    NoSelections,
}

/// Output of [`evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: TraitScore,
    pub genre: Genre,
    pub student_vector: [i32; TRAIT_COUNT],
    pub genre_vector: [i32; TRAIT_COUNT],
}

/// Aggregates the answers, matches a genre and projects both vectors.
pub fn evaluate(
    archetypes: &ArchetypeTable,
    questions: &QuestionSet,
    answers: &AnswerSet,
) -> Result<Evaluation, ScoringError> {
    let score = aggregate(questions, answers)?;
    let genre = match_genre(archetypes, &score);

    Ok(Evaluation {
        score,
        genre,
        student_vector: to_vector(&score),
        genre_vector: to_vector(&archetypes.archetype(genre)),
    })
}
