//! Dictionary module - word membership and the session letter pool
//!
//! The dictionary is loaded once from a plain-text word list. Lines are
//! trimmed and lower-cased and only the first tab-separated column is kept,
//! so annotated lists ("word\tfrequency") work unchanged. Lookup is a
//! case-insensitive membership test; malformed or empty input is simply not
//! a word, never an error.
//!
//! The [`LetterPool`] is the per-session bag that hands out playable
//! letters. Whenever the bag runs dry it refills itself from the letters of
//! one random dictionary word (alphabetic characters only, shuffled), so a
//! draw never blocks or fails. Randomness comes from the caller's
//! [`SimpleRng`] so replicas sharing a seed draw identical letters.

use std::collections::HashSet;

use crate::rng::SimpleRng;

/// Case-insensitive word-membership set with uniform random draws
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: HashSet<String>,
    /// Insertion-ordered copy of the set, for uniform random selection
    list: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from newline-delimited text
    ///
    /// Each line is trimmed, lower-cased, and cut at the first tab; empty
    /// results are dropped and duplicates are kept once.
    pub fn from_text(text: &str) -> Self {
        let mut words = HashSet::new();
        let mut list = Vec::new();

        for line in text.lines() {
            let word = line.trim().to_lowercase();
            let word = word.split('\t').next().unwrap_or("");
            if word.is_empty() {
                continue;
            }
            if words.insert(word.to_string()) {
                list.push(word.to_string());
            }
        }

        Self { words, list }
    }

    /// Number of distinct words loaded
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Case-insensitive membership test; empty input is never a word
    pub fn is_word(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        if word.bytes().all(|b| b.is_ascii_lowercase()) {
            self.words.contains(word)
        } else {
            self.words.contains(&word.to_lowercase())
        }
    }

    /// Uniform random word from the loaded set
    ///
    /// Returns an empty string when the dictionary is empty; loaders reject
    /// empty word lists so this does not occur in a running session.
    pub fn random_word<'a>(&'a self, rng: &mut SimpleRng) -> &'a str {
        rng.choose(&self.list).map(String::as_str).unwrap_or("")
    }
}

/// Per-session bag of playable letters
///
/// Serves letters one at a time, refilling from a fresh random dictionary
/// word whenever exhausted. The pool is never queried empty.
#[derive(Debug, Clone, Default)]
pub struct LetterPool {
    pool: Vec<char>,
}

impl LetterPool {
    pub fn new() -> Self {
        Self { pool: Vec::new() }
    }

    /// Letters currently waiting in the bag
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Draw the next letter, refilling the bag if needed
    pub fn draw(&mut self, dict: &Dictionary, rng: &mut SimpleRng) -> char {
        self.refill_if_empty(dict, rng);
        self.pool.pop().unwrap_or('e')
    }

    /// Peek at the letter the next draw will return
    pub fn peek(&mut self, dict: &Dictionary, rng: &mut SimpleRng) -> char {
        self.refill_if_empty(dict, rng);
        self.pool.last().copied().unwrap_or('e')
    }

    fn refill_if_empty(&mut self, dict: &Dictionary, rng: &mut SimpleRng) {
        // A word made only of non-alphabetic characters contributes nothing,
        // so retry a bounded number of times rather than looping forever on
        // a degenerate list.
        let mut attempts = 0;
        while self.pool.is_empty() && attempts < 32 {
            let word = dict.random_word(rng);
            self.pool.extend(
                word.chars()
                    .filter(|c| c.is_ascii_alphabetic())
                    .map(|c| c.to_ascii_lowercase()),
            );
            rng.shuffle(&mut self.pool);
            attempts += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &str) -> Dictionary {
        Dictionary::from_text(words)
    }

    #[test]
    fn test_from_text_trims_and_lowercases() {
        let d = dict("  CAT  \ndog\nBird\n");
        assert_eq!(d.len(), 3);
        assert!(d.is_word("cat"));
        assert!(d.is_word("bird"));
    }

    #[test]
    fn test_from_text_uses_first_tab_column() {
        let d = dict("cat\t123\ndog\tnoun\tcommon\n");
        assert_eq!(d.len(), 2);
        assert!(d.is_word("cat"));
        assert!(d.is_word("dog"));
        assert!(!d.is_word("123"));
    }

    #[test]
    fn test_from_text_deduplicates_and_skips_blank_lines() {
        let d = dict("cat\n\nCAT\ncat\t1\n\n");
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_is_word_case_insensitive() {
        let d = dict("word\n");
        assert!(d.is_word("word"));
        assert!(d.is_word("WORD"));
        assert!(d.is_word("WoRd"));
        assert!(!d.is_word("sword"));
    }

    #[test]
    fn test_is_word_malformed_input() {
        let d = dict("cat\n");
        assert!(!d.is_word(""));
        assert!(!d.is_word(" "));
        assert!(!d.is_word("c t"));
    }

    #[test]
    fn test_random_word_is_member() {
        let d = dict("cat\ndog\nbird\n");
        let mut rng = SimpleRng::new(7);
        for _ in 0..20 {
            let word = d.random_word(&mut rng).to_string();
            assert!(d.is_word(&word));
        }
    }

    #[test]
    fn test_random_word_empty_dictionary() {
        let d = dict("");
        let mut rng = SimpleRng::new(7);
        assert_eq!(d.random_word(&mut rng), "");
    }

    #[test]
    fn test_pool_draws_letters_of_some_word() {
        let d = dict("cat\n");
        let mut rng = SimpleRng::new(1);
        let mut pool = LetterPool::new();

        let mut drawn = vec![
            pool.draw(&d, &mut rng),
            pool.draw(&d, &mut rng),
            pool.draw(&d, &mut rng),
        ];
        drawn.sort_unstable();
        assert_eq!(drawn, vec!['a', 'c', 't']);
    }

    #[test]
    fn test_pool_refills_silently() {
        let d = dict("cat\ndogs\nplane\n");
        let mut rng = SimpleRng::new(3);
        let mut pool = LetterPool::new();

        // Far more draws than any single word's letters; must never fail
        for _ in 0..100 {
            let letter = pool.draw(&d, &mut rng);
            assert!(letter.is_ascii_lowercase());
        }
    }

    #[test]
    fn test_pool_peek_matches_next_draw() {
        let d = dict("letters\n");
        let mut rng = SimpleRng::new(11);
        let mut pool = LetterPool::new();

        for _ in 0..20 {
            let peeked = pool.peek(&d, &mut rng);
            assert_eq!(pool.draw(&d, &mut rng), peeked);
        }
    }

    #[test]
    fn test_pool_filters_non_letters() {
        let d = dict("it's\n");
        let mut rng = SimpleRng::new(5);
        let mut pool = LetterPool::new();

        for _ in 0..9 {
            let letter = pool.draw(&d, &mut rng);
            assert!(letter.is_ascii_lowercase());
        }
    }

    #[test]
    fn test_pool_deterministic_across_replicas() {
        let d = dict("cat\ndogs\nplane\nwords\n");
        let mut rng_a = SimpleRng::new(77);
        let mut rng_b = SimpleRng::new(77);
        let mut pool_a = LetterPool::new();
        let mut pool_b = LetterPool::new();

        for _ in 0..50 {
            assert_eq!(pool_a.draw(&d, &mut rng_a), pool_b.draw(&d, &mut rng_b));
        }
    }
}
