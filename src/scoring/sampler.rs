// src/scoring/sampler.rs

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

use crate::{catalog::QuestionBank, models::question::QuestionSet};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplingError {
    #[error("cannot sample {requested} questions from a bank of {available}")]
    InsufficientBank { requested: usize, available: usize },
}

/// Draws `count` distinct questions from the bank.
///
/// Shuffles the bank order with a Fisher-Yates shuffle from `rng`, then keeps
/// the first `count`, so every ordered subset is equally likely.
pub fn sample<R: Rng + ?Sized>(
    bank: &QuestionBank,
    count: usize,
    rng: &mut R,
) -> Result<QuestionSet, SamplingError> {
    let available = bank.len();
    if count > available {
        return Err(SamplingError::InsufficientBank {
            requested: count,
            available,
        });
    }

    let mut order: Vec<usize> = (0..available).collect();
    order.shuffle(rng);

    let questions = order
        .into_iter()
        .take(count)
        .map(|i| bank.questions()[i].clone())
        .collect();

    Ok(QuestionSet::new(questions))
}
