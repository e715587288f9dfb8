//! Game module - the authoritative session state and pass sequencer
//!
//! [`Game`] ties together the grid, dictionary, letter pool, and RNG, and
//! drives the resolution pass triggered by each placement or removal:
//! scan (matcher) -> score (ascending word length, escalating multiplier,
//! per-match full-board bonus) -> terminal outcome (game over, twist offer,
//! undo offer, or plain continue).
//!
//! A pass is one synchronous `&mut self` call, so scanning always completes
//! before scoring and scoring before the twist check, and at most one pass
//! is ever in flight per game. The core emits fully-computed event lists
//! with no embedded delays; pacing is the presentation layer's problem.

use arrayvec::ArrayVec;

use wordgrid_types::{
    Tile, TileId, TwistKind, ADD_CARDS_AMOUNT, FULL_MATCH_BONUS, TWIST_INTERVAL,
    TWIST_OFFER_COUNT,
};

use crate::dict::{Dictionary, LetterPool};
use crate::grid::Grid;
use crate::matcher::{find_matches, WordMatch, MAX_WORD_LEN};
use crate::rng::SimpleRng;
use crate::scoring::{match_award, ScoreCounter};
use crate::snapshot::GameSnapshot;
use crate::twist::{offer_twists, Twist};

/// One scored match, in pass order
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEvent {
    pub word: String,
    pub tiles: ArrayVec<Tile, MAX_WORD_LEN>,
    pub reversed: bool,
    /// Running multiplier applied to this match
    pub multiplier: u32,
    /// 10 when this match completed a fully-covered board, 1 otherwise
    pub bonus: u32,
    pub awarded: u32,
}

/// Terminal signal of a resolution pass
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    Continue,
    GameOver,
    OfferTwists(ArrayVec<Twist, TWIST_OFFER_COUNT>),
    OfferUndo,
}

/// Everything a presentation layer needs to replay one pass
#[derive(Debug, Clone, PartialEq)]
pub struct PassResult {
    pub events: Vec<ScoreEvent>,
    pub outcome: PassOutcome,
}

/// Result of applying one twist
#[derive(Debug, Clone, PartialEq)]
pub enum TwistOutcome {
    /// Tiles removed and the sub-pass run at each replacement position
    Replaced {
        removed: Vec<Tile>,
        passes: Vec<PassResult>,
    },
    Destroyed {
        removed: Vec<Tile>,
    },
    /// Letters granted to the player's hand
    CardsAdded {
        letters: [char; ADD_CARDS_AMOUNT],
    },
    /// Tiles pushed off the leading edge
    Slid {
        exploded: Vec<Tile>,
    },
    /// New multiplier escalation step
    MultiRaised {
        step: u32,
    },
}

/// Authoritative game session
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    dict: Dictionary,
    pool: LetterPool,
    rng: SimpleRng,
    score: ScoreCounter,
    /// Multiplier growth per scored match; raised permanently by MoreMulti
    multi_addition: u32,
    /// Committed placements since the last twist trigger
    move_count: u32,
    /// Monotonic tile id allocator
    next_tile_id: u32,
    /// Twists offered and not yet picked
    offered: Option<ArrayVec<Twist, TWIST_OFFER_COUNT>>,
    game_over: bool,
}

impl Game {
    /// Create a new session over the given dictionary and RNG seed
    ///
    /// All collaborators are passed in explicitly; the game never reaches
    /// for global state, so two replicas constructed alike stay identical.
    pub fn new(dict: Dictionary, seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            dict,
            pool: LetterPool::new(),
            rng: SimpleRng::new(seed),
            score: ScoreCounter::new(),
            multi_addition: 1,
            move_count: 0,
            next_tile_id: 0,
            offered: None,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    pub fn score(&self) -> &ScoreCounter {
        &self.score
    }

    /// Fold pending awards into the committed total (the presentation
    /// layer's debounced score tick); returns the amount flushed
    pub fn flush_score(&mut self) -> u32 {
        self.score.flush()
    }

    pub fn multiplier_step(&self) -> u32 {
        self.multi_addition
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Current RNG state (replicas restarted from it replay identically)
    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Twists offered and awaiting a pick, if any
    pub fn offered_twists(&self) -> Option<&[Twist]> {
        self.offered.as_deref()
    }

    /// Final score once the session has ended
    pub fn final_score(&self) -> u64 {
        self.score.grand_total()
    }

    /// Draw one playable letter for the hand
    pub fn deal(&mut self) -> char {
        self.pool.draw(&self.dict, &mut self.rng)
    }

    /// Letter the next deal will return
    pub fn peek_next_letter(&mut self) -> char {
        self.pool.peek(&self.dict, &mut self.rng)
    }

    fn spawn_tile(&mut self, letter: char) -> Tile {
        self.next_tile_id += 1;
        Tile::new(TileId(self.next_tile_id), letter)
    }

    /// Commit a placement at (x, y) and run its resolution pass
    ///
    /// Callers are expected to have validated the coordinate and that the
    /// cell is free (see the engine crate); the letter is normalized to
    /// lowercase.
    pub fn place(&mut self, letter: char, x: i8, y: i8) -> PassResult {
        let tile = self.spawn_tile(letter.to_ascii_lowercase());
        self.grid.set(x, y, Some(tile));
        self.move_count += 1;

        let events = self.resolve_at(x, y);
        let no_matches = events.is_empty();
        PassResult {
            events,
            outcome: self.close_pass(no_matches),
        }
    }

    /// Undo a placement: clear the cell and re-run resolution at it
    ///
    /// The move counter decrements (saturating) so the forced replay of the
    /// same letter re-arms the twist trigger. The re-resolution never
    /// scores - every candidate now spans the vacated blank - and a removal
    /// neither ends the game nor offers twists or undo.
    pub fn remove(&mut self, x: i8, y: i8) -> PassResult {
        self.grid.set(x, y, None);
        self.move_count = self.move_count.saturating_sub(1);

        let events = self.resolve_at(x, y);
        PassResult {
            events,
            outcome: PassOutcome::Continue,
        }
    }

    /// Apply the offered twist at `index`, consuming the offer
    ///
    /// Returns None when no offer is pending or the index does not name one
    /// of the offered twists (the offer then stays pending).
    pub fn pick_twist(&mut self, index: usize) -> Option<(Twist, TwistOutcome)> {
        let offered = self.offered.as_ref()?;
        let twist = offered.iter().find(|t| t.index as usize == index)?.clone();
        self.offered = None;

        let outcome = self.apply_twist(&twist);
        Some((twist, outcome))
    }

    /// Scan and score one pass at (x, y)
    ///
    /// Matches resolve in ascending word length (ties keep discovery
    /// order). The full-board predicate is evaluated per match, before that
    /// match's tiles are marked used.
    fn resolve_at(&mut self, x: i8, y: i8) -> Vec<ScoreEvent> {
        let mut matches = find_matches(&self.grid, &self.dict, x, y);
        matches.sort_by_key(WordMatch::len);

        let mut events = Vec::with_capacity(matches.len());
        let mut multiplier = 1u32;

        for m in matches {
            let full_match = self.grid.is_fully_matched(&m.tiles);
            let awarded = match_award(&m.word, multiplier, full_match);
            self.grid.mark_used(&m.tiles);
            self.score.add(awarded);

            events.push(ScoreEvent {
                word: m.word,
                tiles: m.tiles,
                reversed: m.reversed,
                multiplier,
                bonus: if full_match { FULL_MATCH_BONUS } else { 1 },
                awarded,
            });

            multiplier += self.multi_addition;
        }

        events
    }

    /// Terminal outcome of a placement pass
    ///
    /// Precedence: game over beats the twist check beats the undo offer.
    fn close_pass(&mut self, no_matches: bool) -> PassOutcome {
        if self.grid.is_full() {
            self.game_over = true;
            self.score.flush();
            return PassOutcome::GameOver;
        }

        if self.twist_due() {
            self.move_count = 0;
            let offered = offer_twists(&self.grid, &self.dict, &mut self.pool, &mut self.rng);
            self.offered = Some(offered.clone());
            return PassOutcome::OfferTwists(offered);
        }

        if no_matches {
            return PassOutcome::OfferUndo;
        }

        PassOutcome::Continue
    }

    fn twist_due(&self) -> bool {
        self.move_count != 0 && self.move_count % TWIST_INTERVAL == 0
    }

    fn apply_twist(&mut self, twist: &Twist) -> TwistOutcome {
        match twist.kind {
            TwistKind::Replace => self.apply_replace(twist),
            TwistKind::Destroy => {
                let removed = match twist.first {
                    Some(letter) => {
                        let tiles: Vec<Tile> = self
                            .grid
                            .tiles_with_letter(letter)
                            .into_iter()
                            .map(|(_, _, t)| t)
                            .collect();
                        self.grid.remove(&tiles);
                        tiles
                    }
                    None => Vec::new(),
                };
                TwistOutcome::Destroyed { removed }
            }
            TwistKind::AddCards => {
                let mut letters = ['a'; ADD_CARDS_AMOUNT];
                for slot in &mut letters {
                    *slot = self.pool.draw(&self.dict, &mut self.rng);
                }
                TwistOutcome::CardsAdded { letters }
            }
            TwistKind::SlideUp => TwistOutcome::Slid {
                exploded: self.grid.slide_vertical(1),
            },
            TwistKind::SlideDown => TwistOutcome::Slid {
                exploded: self.grid.slide_vertical(-1),
            },
            TwistKind::SlideRight => TwistOutcome::Slid {
                exploded: self.grid.slide_horizontal(1),
            },
            TwistKind::SlideLeft => TwistOutcome::Slid {
                exploded: self.grid.slide_horizontal(-1),
            },
            TwistKind::MoreMulti => {
                self.multi_addition += 1;
                TwistOutcome::MultiRaised {
                    step: self.multi_addition,
                }
            }
        }
    }

    /// Remove every tile lettered `first`, spawn replacements at the same
    /// positions, and re-resolve each position sequentially
    ///
    /// Each sub-pass runs a fresh resolution (multiplier restarts at 1) and
    /// runs to completion once started; sub-passes never end the game or
    /// trigger twists.
    fn apply_replace(&mut self, twist: &Twist) -> TwistOutcome {
        let Some(first) = twist.first else {
            return TwistOutcome::Replaced {
                removed: Vec::new(),
                passes: Vec::new(),
            };
        };
        let replacement = match twist.second {
            Some(letter) => letter,
            None => self.pool.draw(&self.dict, &mut self.rng),
        };

        let sites = self.grid.tiles_with_letter(first);
        let removed: Vec<Tile> = sites.iter().map(|(_, _, t)| *t).collect();
        self.grid.remove(&removed);

        let mut passes = Vec::with_capacity(sites.len());
        for (x, y, _) in sites {
            let tile = self.spawn_tile(replacement);
            self.grid.set(x, y, Some(tile));
            let events = self.resolve_at(x, y);
            passes.push(PassResult {
                events,
                outcome: PassOutcome::Continue,
            });
        }

        TwistOutcome::Replaced { removed, passes }
    }

    /// Write the read-only projection of this session
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_codes(&mut out.board, &mut out.used);
        out.score_total = self.score.total();
        out.score_pending = self.score.pending();
        out.multiplier_step = self.multi_addition;
        out.move_count = self.move_count;
        out.twists_pending = self.offered.is_some();
        out.game_over = self.game_over;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}
