//! Twist module - the board-altering events offered every tenth move
//!
//! Eight fixed templates exist; each trigger offers three of them, drawn
//! without replacement. Templates carry `[1]`/`[2]` placeholders for the
//! letters assigned at offer time and parenthesized emphasis spans for the
//! presentation layer. The Replace and Destroy twists are bound to a random
//! letter currently on the board; Replace additionally draws the
//! replacement letter from the session pool.

use arrayvec::ArrayVec;

use wordgrid_types::{Tile, TwistKind, TWIST_OFFER_COUNT};

use crate::dict::{Dictionary, LetterPool};
use crate::grid::Grid;
use crate::rng::SimpleRng;

/// One offered board-altering event
///
/// `index` is the stable position within the offer, used by the player (and
/// the wire protocol) to pick a twist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Twist {
    pub kind: TwistKind,
    pub title: &'static str,
    pub description: &'static str,
    pub first: Option<char>,
    pub second: Option<char>,
    pub index: u8,
}

/// Title and description template for a twist kind
pub fn template(kind: TwistKind) -> (&'static str, &'static str) {
    match kind {
        TwistKind::Replace => (
            "Alchemy",
            "Turns every ([1]) on the board into a ([2]) and checks them for (new words).",
        ),
        TwistKind::Destroy => (
            "Purge",
            "Removes every ([1]) from the board.",
        ),
        TwistKind::AddCards => (
            "Reinforcements",
            "Adds (three letters) to your hand.",
        ),
        TwistKind::SlideUp => (
            "Northern winds",
            "Slides the whole board (up), destroying the (top row).",
        ),
        TwistKind::SlideRight => (
            "Eastern winds",
            "Slides the whole board (right), destroying the (rightmost column).",
        ),
        TwistKind::SlideLeft => (
            "Western winds",
            "Slides the whole board (left), destroying the (leftmost column).",
        ),
        TwistKind::SlideDown => (
            "Southern winds",
            "Slides the whole board (down), destroying the (bottom row).",
        ),
        TwistKind::MoreMulti => (
            "Greed",
            "Word multipliers grow (one faster) for the rest of the game.",
        ),
    }
}

/// Select three twists without replacement and bind their letters
///
/// Replace and Destroy take `first` from a uniformly random tile currently
/// on the board (None when the board is empty, which makes applying them a
/// no-op); Replace takes `second` from the letter pool.
pub fn offer_twists(
    grid: &Grid,
    dict: &Dictionary,
    pool: &mut LetterPool,
    rng: &mut SimpleRng,
) -> ArrayVec<Twist, TWIST_OFFER_COUNT> {
    let mut kinds = TwistKind::ALL;
    rng.shuffle(&mut kinds);

    let board_letters: Vec<char> = grid
        .cells()
        .iter()
        .flatten()
        .map(|tile: &Tile| tile.letter)
        .collect();

    let mut offered = ArrayVec::new();
    for (index, kind) in kinds.iter().copied().take(TWIST_OFFER_COUNT).enumerate() {
        let (title, description) = template(kind);
        let mut first = None;
        let mut second = None;
        if kind.needs_letters() {
            first = rng.choose(&board_letters).copied();
            if kind == TwistKind::Replace && first.is_some() {
                second = Some(pool.draw(dict, rng));
            }
        }
        offered.push(Twist {
            kind,
            title,
            description,
            first,
            second,
            index: index as u8,
        });
    }
    offered
}
