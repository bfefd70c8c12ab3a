use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a question is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionMode {
    /// Kanji shown in context; the user picks its reading.
    Read,
    /// Reading and context shown; the user supplies the kanji.
    Write,
}

impl fmt::Display for QuestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionMode::Read => write!(f, "read"),
            QuestionMode::Write => write!(f, "write"),
        }
    }
}

/// `round(k * ratio)` with halves rounded up, capped at `k`.
pub fn write_count_for(k: usize, write_ratio: f64) -> usize {
    let raw = (k as f64 * write_ratio.clamp(0.0, 1.0)).round();
    if raw.is_finite() && raw > 0.0 {
        (raw as usize).min(k)
    } else {
        0
    }
}

/// Label `k` questions: `round(k * write_ratio)` write, the rest read, in random order.
pub fn assign_modes<R>(k: usize, write_ratio: f64, rng: &mut R) -> Vec<QuestionMode>
where
    R: Rng + ?Sized,
{
    let writes = write_count_for(k, write_ratio);
    let mut modes: Vec<QuestionMode> = (0..k)
        .map(|i| if i < writes { QuestionMode::Write } else { QuestionMode::Read })
        .collect();
    modes.shuffle(rng);
    modes
}
