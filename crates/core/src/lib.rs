//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and the word
//! resolution pipeline. It has **zero dependencies** on UI, networking, or
//! I/O, making it:
//!
//! - **Deterministic**: Same seed and command sequence produce identical
//!   sessions (the basis of the arcade server/client replica model)
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 7x7 letter board with identity-tracked tiles, slides, and
//!   the full-match predicate
//! - [`dict`]: word-list membership and the self-refilling letter pool
//! - [`matcher`]: four-direction word detection through a placed tile
//! - [`scoring`]: word values and the committed/pending score counter
//! - [`twist`]: the eight board-altering events offered every tenth move
//! - [`game`]: the session state machine tying it all together
//! - [`rng`]: seeded LCG behind every random draw
//! - [`snapshot`]: read-only projection for observers and the wire
//!
//! # Game Rules
//!
//! - Words must be at least 3 letters and pass through the placed tile
//! - Words count in all four directions (rows, columns, and both reversals)
//! - A word scores its length squared, times an escalating multiplier
//! - Covering every letter on the board multiplies a match by 10
//! - Every 10th placement offers a pick of 3 out of 8 twists
//! - The game ends when all 49 cells are occupied
//!
//! # Example
//!
//! ```
//! use wordgrid_core::{Dictionary, Game, PassOutcome};
//!
//! let dict = Dictionary::from_text("cat\ndog\n");
//! let mut game = Game::new(dict, 12345);
//!
//! game.place('c', 0, 0);
//! game.place('a', 1, 0);
//! let result = game.place('t', 2, 0);
//!
//! assert_eq!(result.events[0].word, "cat");
//! assert!(matches!(result.outcome, PassOutcome::Continue));
//! assert!(game.score().pending() > 0);
//! ```

pub mod dict;
pub mod game;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod twist;

pub use wordgrid_types as types;

// Re-export commonly used types for convenience
pub use dict::{Dictionary, LetterPool};
pub use game::{Game, PassOutcome, PassResult, ScoreEvent, TwistOutcome};
pub use grid::Grid;
pub use matcher::{find_matches, WordMatch, MAX_WORD_LEN};
pub use rng::SimpleRng;
pub use scoring::{match_award, word_score, ScoreCounter};
pub use snapshot::GameSnapshot;
pub use twist::{offer_twists, Twist};
