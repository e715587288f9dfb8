//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, presentation, arcade protocol).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 7x7 letter grid:
//!
//! - **Width**: 7 columns (indexed 0-6)
//! - **Height**: 7 rows (indexed 0-6)
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_WORD_LEN` | 3 | Shortest word that can score |
//! | `FULL_MATCH_BONUS` | 10 | Multiplier when every letter on the board is matched |
//! | `TWIST_INTERVAL` | 10 | Twists are offered every Nth committed placement |
//! | `TWIST_OFFER_COUNT` | 3 | Twists offered per trigger, drawn from 8 kinds |
//! | `HAND_SIZE` | 7 | Letters dealt to the hand at session start |
//! | `ADD_CARDS_AMOUNT` | 3 | Letters granted by the AddCards twist |
//!
//! # Examples
//!
//! ```
//! use wordgrid_types::{TwistKind, letter_code, GRID_WIDTH, GRID_HEIGHT};
//!
//! // Parse a twist kind from its wire name (case-insensitive)
//! let kind = TwistKind::from_str("slideUp").unwrap();
//! assert_eq!(kind, TwistKind::SlideUp);
//! assert_eq!(kind.as_str(), "slideUp");
//!
//! // Letters map to stable 1-based codes for snapshots
//! assert_eq!(letter_code('a'), 1);
//! assert_eq!(letter_code('z'), 26);
//!
//! // Board dimensions
//! assert_eq!(GRID_WIDTH, 7);
//! assert_eq!(GRID_HEIGHT, 7);
//! ```

/// Grid width in cells (7 columns)
pub const GRID_WIDTH: u8 = 7;

/// Grid height in cells (7 rows)
pub const GRID_HEIGHT: u8 = 7;

/// Total number of cells on the grid
pub const GRID_CELLS: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Shortest substring that can score as a word
pub const MIN_WORD_LEN: usize = 3;

/// Score multiplier applied when a match leaves no unmatched letter on the board
pub const FULL_MATCH_BONUS: u32 = 10;

/// Twists are offered on every Nth committed placement
pub const TWIST_INTERVAL: u32 = 10;

/// Number of twists offered per trigger
pub const TWIST_OFFER_COUNT: usize = 3;

/// Number of twist kinds to draw from
pub const TWIST_KIND_COUNT: usize = 8;

/// Letters dealt to the hand at session start
pub const HAND_SIZE: usize = 7;

/// Letters granted to the hand by the AddCards twist
pub const ADD_CARDS_AMOUNT: usize = 3;

/// Placeholder character for empty cells in scan lines
///
/// Empty cells are rendered as a blank so substring offsets stay aligned
/// with grid coordinates; no dictionary word contains a blank, so candidates
/// spanning a gap never match.
pub const BLANK: char = ' ';

/// Opaque tile identity
///
/// Tiles are compared by handle, never by letter: two tiles carrying the
/// same letter are still distinct board objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

/// A single placed letter occupying one grid cell
///
/// `used` is set once the tile has participated in a scored match; it feeds
/// full-match-bonus detection and survives until the tile is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
    pub used: bool,
}

impl Tile {
    pub fn new(id: TileId, letter: char) -> Self {
        Self {
            id,
            letter,
            used: false,
        }
    }
}

/// Cell on the grid (None = empty, Some = occupied by a tile)
pub type Cell = Option<Tile>;

/// Board-altering twist kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwistKind {
    Replace,
    Destroy,
    AddCards,
    SlideUp,
    SlideRight,
    SlideLeft,
    SlideDown,
    MoreMulti,
}

impl TwistKind {
    /// All kinds in declaration order; offers draw 3 of these without replacement
    pub const ALL: [TwistKind; TWIST_KIND_COUNT] = [
        TwistKind::Replace,
        TwistKind::Destroy,
        TwistKind::AddCards,
        TwistKind::SlideUp,
        TwistKind::SlideRight,
        TwistKind::SlideLeft,
        TwistKind::SlideDown,
        TwistKind::MoreMulti,
    ];

    /// Parse twist kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "replace" => Some(TwistKind::Replace),
            "destroy" => Some(TwistKind::Destroy),
            "addcards" => Some(TwistKind::AddCards),
            "slideup" => Some(TwistKind::SlideUp),
            "slideright" => Some(TwistKind::SlideRight),
            "slideleft" => Some(TwistKind::SlideLeft),
            "slidedown" => Some(TwistKind::SlideDown),
            "moremulti" => Some(TwistKind::MoreMulti),
            _ => None,
        }
    }

    /// Convert to wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TwistKind::Replace => "replace",
            TwistKind::Destroy => "destroy",
            TwistKind::AddCards => "addCards",
            TwistKind::SlideUp => "slideUp",
            TwistKind::SlideRight => "slideRight",
            TwistKind::SlideLeft => "slideLeft",
            TwistKind::SlideDown => "slideDown",
            TwistKind::MoreMulti => "moreMulti",
        }
    }

    /// Whether offering this twist requires letters drawn from the board/pool
    pub fn needs_letters(&self) -> bool {
        matches!(self, TwistKind::Replace | TwistKind::Destroy)
    }
}

/// Stable 1-based code for a lowercase ascii letter (0 for anything else)
///
/// Used by snapshots and the wire protocol to encode board cells compactly.
pub fn letter_code(letter: char) -> u8 {
    if letter.is_ascii_lowercase() {
        (letter as u8) - b'a' + 1
    } else {
        0
    }
}

/// Inverse of [`letter_code`]; returns None for 0 or out-of-range codes
pub fn code_letter(code: u8) -> Option<char> {
    if (1..=26).contains(&code) {
        Some((b'a' + code - 1) as char)
    } else {
        None
    }
}
