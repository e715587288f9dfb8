//! Read-only session projection
//!
//! The snapshot is the client-visible state of a networked replica: plain
//! arrays and counters, nothing borrowed from the live session. Observers
//! and tests consume it; the adapter serializes it onto the wire.

use wordgrid_types::{GRID_HEIGHT, GRID_WIDTH};

/// Flat projection of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Letter codes per cell: 0 = empty, 1..=26 = 'a'..='z'
    pub board: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    /// Which occupied cells have already scored in a match
    pub used: [[bool; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub score_total: u64,
    pub score_pending: u32,
    pub multiplier_step: u32,
    pub move_count: u32,
    /// True while a twist offer awaits the player's pick
    pub twists_pending: bool,
    pub game_over: bool,
    /// Current RNG state of the session
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.used = [[false; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.score_total = 0;
        self.score_pending = 0;
        self.multiplier_step = 1;
        self.move_count = 0;
        self.twists_pending = false;
        self.game_over = false;
        self.seed = 0;
    }

    /// Whether the session still accepts placements
    pub fn playable(&self) -> bool {
        !self.game_over && !self.twists_pending
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&code| code != 0)
            .count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut snapshot = Self {
            board: [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            used: [[false; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            score_total: 0,
            score_pending: 0,
            multiplier_step: 1,
            move_count: 0,
            twists_pending: false,
            game_over: false,
            seed: 0,
        };
        snapshot.clear();
        snapshot
    }
}
