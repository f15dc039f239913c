// src/scoring/vector.rs

use crate::models::personality::{TRAIT_COUNT, Trait, TraitScore};

/// Projects a score onto the canonical trait order. Weights are not scaled.
pub fn to_vector(score: &TraitScore) -> [i32; TRAIT_COUNT] {
    Trait::ALL.map(|t| score.get(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_follows_trait_order() {
        let score = TraitScore::new(1, 2, 3, 4, 5);
        let v = to_vector(&score);
        for (i, t) in Trait::ALL.iter().enumerate() {
            assert_eq!(v[i], score.get(*t));
        }
        assert_eq!(v, [1, 2, 3, 4, 5]);
    }
}
