use std::collections::HashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use crate::items::{normalize_reading, Item, ItemBank};

/// Up to `n` wrong readings for `item`, drawn from every other item's readings.
///
/// Candidates are normalized and deduplicated. Anything matching one of
/// `item`'s own readings is excluded, so an alternate reading of the correct
/// kanji never shows up as a "wrong" option. Returns fewer than `n` when
/// the bank runs short.
pub fn reading_distractors<R>(bank: &ItemBank, item: &Item, n: usize, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let own: HashSet<String> = item.normalized_readings().collect();
    let correct = item.canonical_reading();

    let mut seen = HashSet::new();
    let mut pool: Vec<String> = bank
        .items()
        .iter()
        .filter(|other| other.identity != item.identity)
        .flat_map(|other| other.readings.iter().map(|r| normalize_reading(r)))
        .filter(|r| !r.is_empty() && *r != correct && !own.contains(r))
        .filter(|r| seen.insert(r.clone()))
        .collect();

    pool.shuffle(rng);
    pool.truncate(n);

    if pool.len() < n {
        tracing::debug!(
            kanji = %item.identity,
            requested = n,
            available = pool.len(),
            "Not enough reading distractors"
        );
    }

    pool
}
