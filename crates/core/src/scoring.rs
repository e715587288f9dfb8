//! Scoring module - word values and the session score counter
//!
//! A word is worth the square of its length; the sequencer multiplies that
//! by the running pass multiplier and, when a match covers the whole board,
//! by the full-match bonus. Awards accumulate in a pending bucket that is
//! flushed into the committed total, mirroring a debounced score display:
//! the committed total only ever grows by exactly the sum of the awards.

use wordgrid_types::FULL_MATCH_BONUS;

/// Base score of a word: length squared
///
/// `word_score("cat") == 9`, `word_score("words") == 25`.
pub fn word_score(word: &str) -> u32 {
    let len = word.chars().count() as u32;
    len * len
}

/// Award for one match: base score times the running multiplier times the
/// full-match bonus (1 when the board is not fully covered)
pub fn match_award(word: &str, multiplier: u32, full_match: bool) -> u32 {
    let bonus = if full_match { FULL_MATCH_BONUS } else { 1 };
    word_score(word)
        .saturating_mul(multiplier)
        .saturating_mul(bonus)
}

/// Session score state: committed total plus an in-flight pending bucket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreCounter {
    total: u64,
    pending: u32,
}

impl ScoreCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed total
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Awards accumulated since the last flush
    pub fn pending(&self) -> u32 {
        self.pending
    }

    /// Committed total plus pending awards
    pub fn grand_total(&self) -> u64 {
        self.total + self.pending as u64
    }

    /// Accumulate one award into the pending bucket
    pub fn add(&mut self, amount: u32) {
        self.pending = self.pending.saturating_add(amount);
    }

    /// Fold the pending bucket into the committed total
    /// Returns the amount flushed
    pub fn flush(&mut self) -> u32 {
        let flushed = self.pending;
        self.total += flushed as u64;
        self.pending = 0;
        flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_scores() {
        assert_eq!(word_score("cat"), 9);
        assert_eq!(word_score("word"), 16);
        assert_eq!(word_score("words"), 25);
        assert_eq!(word_score(""), 0);
    }

    #[test]
    fn test_match_award_multiplier() {
        assert_eq!(match_award("cat", 1, false), 9);
        assert_eq!(match_award("cat", 2, false), 18);
        assert_eq!(match_award("cat", 3, false), 27);
    }

    #[test]
    fn test_match_award_full_match_bonus() {
        assert_eq!(match_award("cat", 1, true), 90);
        assert_eq!(match_award("cat", 2, true), 180);
    }

    #[test]
    fn test_counter_accumulates_and_flushes() {
        let mut counter = ScoreCounter::new();
        counter.add(9);
        counter.add(18);
        assert_eq!(counter.total(), 0);
        assert_eq!(counter.pending(), 27);
        assert_eq!(counter.grand_total(), 27);

        assert_eq!(counter.flush(), 27);
        assert_eq!(counter.total(), 27);
        assert_eq!(counter.pending(), 0);
    }

    #[test]
    fn test_counter_total_equals_sum_of_adds() {
        let mut counter = ScoreCounter::new();
        let awards = [9u32, 16, 25, 49, 4];
        let mut sum = 0u64;
        for (i, award) in awards.iter().enumerate() {
            counter.add(*award);
            sum += *award as u64;
            // Flush at arbitrary points; the invariant holds regardless
            if i % 2 == 1 {
                counter.flush();
            }
        }
        counter.flush();
        assert_eq!(counter.total(), sum);
    }

    #[test]
    fn test_counter_flush_when_empty() {
        let mut counter = ScoreCounter::new();
        assert_eq!(counter.flush(), 0);
        assert_eq!(counter.total(), 0);
    }
}
