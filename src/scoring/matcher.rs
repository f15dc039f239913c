// src/scoring/matcher.rs

use crate::{
    catalog::ArchetypeTable,
    models::personality::{Genre, TraitScore},
};

/// Euclidean distance between two scores over all traits.
pub fn euclidean_distance(a: &TraitScore, b: &TraitScore) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|((_, x), (_, y))| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Returns the genre whose archetype is closest to `score`.
///
/// Genres are evaluated in table order and a distance equal to the current
/// minimum replaces it, so on an exact tie the later genre wins.
pub fn match_genre(table: &ArchetypeTable, score: &TraitScore) -> Genre {
    let [(first, first_archetype), rest @ ..] = table.entries();

    let mut best = *first;
    let mut min = euclidean_distance(first_archetype, score);

    for (genre, archetype) in rest {
        let distance = euclidean_distance(archetype, score);
        if distance <= min {
            min = distance;
            best = *genre;
        }
    }

    best
}
