//! Operation layer - validated entry points over the game core
//!
//! The core trusts its callers; this crate is where caller intent gets
//! checked before it mutates a session. Every refusal is a typed
//! [`OpError`] carrying a stable wire code and a human-readable message,
//! so the adapter can reject bad commands without inventing strings.
//!
//! The layer also enforces the sequencing contract: while a twist offer is
//! pending, placements and removals are refused until the player picks.

use wordgrid_core::{Game, PassResult, Twist, TwistOutcome};
use wordgrid_types::{GRID_HEIGHT, GRID_WIDTH, TWIST_OFFER_COUNT};

/// Why an operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    GameOver,
    TwistPending,
    NoTwistPending,
    OutOfBounds,
    CellOccupied,
    CellEmpty,
    NotALetter,
    BadTwistIndex,
}

impl OpError {
    /// Stable error code for the wire protocol
    pub fn code(self) -> &'static str {
        match self {
            OpError::GameOver => "game_over",
            OpError::TwistPending => "twist_pending",
            OpError::NoTwistPending => "no_twist_pending",
            OpError::OutOfBounds | OpError::CellOccupied | OpError::CellEmpty => "invalid_place",
            OpError::NotALetter => "invalid_letter",
            OpError::BadTwistIndex => "invalid_twist",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            OpError::GameOver => "the session has ended",
            OpError::TwistPending => "a twist offer is awaiting a pick",
            OpError::NoTwistPending => "no twist offer is pending",
            OpError::OutOfBounds => "coordinate outside the 7x7 board",
            OpError::CellOccupied => "target cell already holds a tile",
            OpError::CellEmpty => "target cell holds no tile",
            OpError::NotALetter => "placed value must be a single ascii letter",
            OpError::BadTwistIndex => "twist index does not name an offered twist",
        }
    }
}

impl std::fmt::Display for OpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for OpError {}

fn in_bounds(x: i8, y: i8) -> bool {
    (0..GRID_WIDTH as i8).contains(&x) && (0..GRID_HEIGHT as i8).contains(&y)
}

fn ensure_open(game: &Game) -> Result<(), OpError> {
    if game.game_over() {
        return Err(OpError::GameOver);
    }
    if game.offered_twists().is_some() {
        return Err(OpError::TwistPending);
    }
    Ok(())
}

/// Validate and commit a placement
pub fn apply_place(game: &mut Game, letter: char, x: i8, y: i8) -> Result<PassResult, OpError> {
    ensure_open(game)?;
    if !letter.is_ascii_alphabetic() {
        return Err(OpError::NotALetter);
    }
    if !in_bounds(x, y) {
        return Err(OpError::OutOfBounds);
    }
    if game.grid().get(x, y).is_some() {
        return Err(OpError::CellOccupied);
    }
    Ok(game.place(letter, x, y))
}

/// Validate and commit an undo removal
pub fn apply_remove(game: &mut Game, x: i8, y: i8) -> Result<PassResult, OpError> {
    ensure_open(game)?;
    if !in_bounds(x, y) {
        return Err(OpError::OutOfBounds);
    }
    if game.grid().get(x, y).is_none() {
        return Err(OpError::CellEmpty);
    }
    Ok(game.remove(x, y))
}

/// Validate and apply the player's twist pick
pub fn apply_pick_twist(game: &mut Game, index: usize) -> Result<(Twist, TwistOutcome), OpError> {
    if game.game_over() {
        return Err(OpError::GameOver);
    }
    if game.offered_twists().is_none() {
        return Err(OpError::NoTwistPending);
    }
    if index >= TWIST_OFFER_COUNT {
        return Err(OpError::BadTwistIndex);
    }
    game.pick_twist(index).ok_or(OpError::BadTwistIndex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordgrid_core::Dictionary;

    fn game() -> Game {
        Game::new(Dictionary::from_text("cat\ndog\n"), 1)
    }

    #[test]
    fn place_rejected_out_of_bounds() {
        let mut g = game();
        assert_eq!(apply_place(&mut g, 'a', -1, 0), Err(OpError::OutOfBounds));
        assert_eq!(apply_place(&mut g, 'a', 7, 0), Err(OpError::OutOfBounds));
        assert_eq!(apply_place(&mut g, 'a', 0, 7), Err(OpError::OutOfBounds));
        assert_eq!(g.move_count(), 0);
    }

    #[test]
    fn place_rejected_on_occupied_cell() {
        let mut g = game();
        apply_place(&mut g, 'a', 3, 3).unwrap();
        let err = apply_place(&mut g, 'b', 3, 3).unwrap_err();
        assert_eq!(err, OpError::CellOccupied);
        assert_eq!(err.code(), "invalid_place");
    }

    #[test]
    fn place_rejected_for_non_letter() {
        let mut g = game();
        assert_eq!(apply_place(&mut g, '3', 0, 0), Err(OpError::NotALetter));
        assert_eq!(apply_place(&mut g, ' ', 0, 0), Err(OpError::NotALetter));
    }

    #[test]
    fn place_uppercase_is_normalized() {
        let mut g = game();
        apply_place(&mut g, 'Q', 0, 0).unwrap();
        assert_eq!(g.grid().get(0, 0).unwrap().letter, 'q');
    }

    #[test]
    fn remove_rejected_on_empty_cell() {
        let mut g = game();
        assert_eq!(apply_remove(&mut g, 2, 2), Err(OpError::CellEmpty));
    }

    #[test]
    fn remove_clears_placed_tile() {
        let mut g = game();
        apply_place(&mut g, 'a', 2, 2).unwrap();
        apply_remove(&mut g, 2, 2).unwrap();
        assert!(g.grid().get(2, 2).is_none());
    }

    #[test]
    fn placements_blocked_while_twists_pending() {
        let mut g = game();
        for i in 0..10 {
            apply_place(&mut g, 'z', i % 7, i / 7).unwrap();
        }
        assert!(g.offered_twists().is_some());

        assert_eq!(apply_place(&mut g, 'a', 6, 6), Err(OpError::TwistPending));
        assert_eq!(apply_remove(&mut g, 0, 0), Err(OpError::TwistPending));

        apply_pick_twist(&mut g, 0).unwrap();
        apply_place(&mut g, 'a', 6, 6).unwrap();
    }

    #[test]
    fn pick_twist_requires_pending_offer() {
        let mut g = game();
        assert_eq!(apply_pick_twist(&mut g, 0), Err(OpError::NoTwistPending));
    }

    #[test]
    fn pick_twist_rejects_bad_index() {
        let mut g = game();
        for i in 0..10 {
            apply_place(&mut g, 'z', i % 7, i / 7).unwrap();
        }
        assert_eq!(apply_pick_twist(&mut g, 3), Err(OpError::BadTwistIndex));
        // The offer survives a bad pick
        assert!(g.offered_twists().is_some());
        apply_pick_twist(&mut g, 2).unwrap();
    }

    #[test]
    fn everything_rejected_after_game_over() {
        let mut g = game();
        // Letters that never assemble "cat" or "dog", cycled so a Destroy
        // twist can only ever take a few tiles at a time.
        let fillers: Vec<char> = "befhijklmnpqrsuvwxz".chars().collect();
        let mut next = 0usize;

        // Drive the session until the board fills. Twists must be picked as
        // they come; each ten-placement cycle nets at least three tiles even
        // if a slide or destroy fires, so this terminates.
        let mut guard = 0;
        while !g.game_over() {
            guard += 1;
            assert!(guard < 2000, "session failed to reach game over");

            if g.offered_twists().is_some() {
                apply_pick_twist(&mut g, 0).unwrap();
                continue;
            }

            let free = (0..7)
                .flat_map(|y| (0..7).map(move |x| (x, y)))
                .find(|&(x, y)| g.grid().get(x, y).is_none());
            if let Some((x, y)) = free {
                apply_place(&mut g, fillers[next % fillers.len()], x, y).unwrap();
                next += 1;
            }
        }

        assert!(g.game_over());
        assert_eq!(apply_place(&mut g, 'a', 0, 0), Err(OpError::GameOver));
        assert_eq!(apply_remove(&mut g, 0, 0), Err(OpError::GameOver));
        assert_eq!(apply_pick_twist(&mut g, 0), Err(OpError::GameOver));
    }
}
