//! Aggregate confidence scoring over unresolved segments.

use crate::types::SuspectSegment;

/// Each unresolved segment costs 1/20 of confidence before the floor.
const COUNT_DIVISOR: f64 = 20.0;

/// The count-based term never drops below this.
const BASE_FLOOR: f64 = 0.5;

/// Weight of the character-concentration penalty.
const CONCENTRATION_WEIGHT: f64 = 0.7;

/// The final score never drops below this.
const SCORE_FLOOR: f64 = 0.1;

/// Confidence in the content given the segments that stayed unresolved.
///
/// 1.0 when nothing is unresolved. Otherwise a count-based base, floored
/// at 0.5, is discounted by the share of the text occupied by unresolved
/// segments, and the result is floored at 0.1. `total_chars` is the length
/// of the whole input in characters.
pub fn confidence_score(unresolved: &[SuspectSegment], total_chars: usize) -> f64 {
    if unresolved.is_empty() {
        return 1.0;
    }

    let base = (1.0 - unresolved.len() as f64 / COUNT_DIVISOR).max(BASE_FLOOR);

    let concentration = if total_chars == 0 {
        0.0
    } else {
        let flagged: usize = unresolved.iter().map(|s| s.text.chars().count()).sum();
        flagged as f64 / total_chars as f64
    };

    (base * (1.0 - concentration * CONCENTRATION_WEIGHT)).max(SCORE_FLOOR)
}
