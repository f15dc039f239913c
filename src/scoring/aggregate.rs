// src/scoring/aggregate.rs

use super::ScoringError;
use crate::models::{
    personality::{TRAIT_COUNT, Trait, TraitScore},
    question::QuestionSet,
    student::AnswerSet,
};

/// Averages the trait weights of every selected option.
///
/// The divisor counts selected options, not questions: a question answered
/// with two options weighs twice as much as one answered with a single option.
/// Each mean is truncated toward zero.
pub fn aggregate(questions: &QuestionSet, answers: &AnswerSet) -> Result<TraitScore, ScoringError> {
    if questions.len() != answers.len() {
        return Err(ScoringError::LengthMismatch {
            questions: questions.len(),
            answers: answers.len(),
        });
    }

    let mut totals = [0i64; TRAIT_COUNT];
    let mut selections: i64 = 0;

    for (position, (question, chosen)) in questions.iter().zip(answers.iter()).enumerate() {
        for &index in chosen {
            let option = question
                .options
                .get(index)
                .ok_or(ScoringError::IndexOutOfRange {
                    question: position,
                    index,
                    options: question.options.len(),
                })?;

            for (total, (_, weight)) in totals.iter_mut().zip(option.personality.iter()) {
                *total += i64::from(weight);
            }
            selections += 1;
        }
    }

    if selections == 0 {
        return Err(ScoringError::NoSelections);
    }

    // A mean of i32 values always fits back into i32.
    Ok(TraitScore::from_fn(|t: Trait| {
        (totals[t.index()] / selections) as i32
    }))
}
