//! Word matcher - detects every dictionary word formed through a placement
//!
//! Given the coordinate of a just-placed tile, four scan lines are built:
//! the affected row, the affected column, and their reversals. Empty cells
//! render as a blank placeholder so substring offsets stay aligned with
//! grid coordinates. Every substring of length >= 3 that is a dictionary
//! word and spans the placement index is collected; for the reversed lines
//! the must-include index is mirrored.
//!
//! No deduplication happens across the four directions: a word that also
//! reads validly in a second direction registers twice, rewarding
//! multi-directional formations (see DESIGN.md).

use arrayvec::ArrayVec;

use wordgrid_types::{Cell, Tile, BLANK, GRID_HEIGHT, GRID_WIDTH, MIN_WORD_LEN};

use crate::dict::Dictionary;
use crate::grid::Grid;

/// Longest possible word on the board (one full line)
pub const MAX_WORD_LEN: usize = GRID_WIDTH as usize;

/// One detected word: its text, the tiles forming it in reading order, and
/// whether it was read against the natural direction
#[derive(Debug, Clone, PartialEq)]
pub struct WordMatch {
    pub word: String,
    pub tiles: ArrayVec<Tile, MAX_WORD_LEN>,
    pub reversed: bool,
}

impl WordMatch {
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Find every dictionary word passing through the cell at (x, y)
///
/// Scan order is row, column, reversed row, reversed column; within a line,
/// longer substrings are visited first. Matches are returned in scan order;
/// the sequencer imposes its own ordering.
pub fn find_matches(grid: &Grid, dict: &Dictionary, x: i8, y: i8) -> Vec<WordMatch> {
    if !grid.is_in_bounds(x, y) {
        return Vec::new();
    }

    let row = grid.row(y);
    let column = grid.column(x);

    let mut row_reversed = row;
    row_reversed.reverse();
    let mut column_reversed = column;
    column_reversed.reverse();

    let mut matches = Vec::new();
    scan_line(&row, x as usize, false, dict, &mut matches);
    scan_line(&column, y as usize, false, dict, &mut matches);
    scan_line(
        &row_reversed,
        (GRID_WIDTH - 1) as usize - x as usize,
        true,
        dict,
        &mut matches,
    );
    scan_line(
        &column_reversed,
        (GRID_HEIGHT - 1) as usize - y as usize,
        true,
        dict,
        &mut matches,
    );
    matches
}

/// Scan one line for dictionary words spanning `must_include`
fn scan_line(
    cells: &[Cell],
    must_include: usize,
    reversed: bool,
    dict: &Dictionary,
    out: &mut Vec<WordMatch>,
) {
    let letters: ArrayVec<char, MAX_WORD_LEN> = cells
        .iter()
        .map(|c| c.map(|t| t.letter).unwrap_or(BLANK))
        .collect();

    if letters.len() < MIN_WORD_LEN {
        return;
    }

    for len in (MIN_WORD_LEN..=letters.len()).rev() {
        for start in 0..=letters.len() - len {
            if must_include < start || must_include >= start + len {
                continue;
            }
            let word: String = letters[start..start + len].iter().collect();
            if !dict.is_word(&word) {
                continue;
            }
            // A dictionary word cannot contain the blank placeholder, so
            // every covered cell is occupied.
            let tiles: ArrayVec<Tile, MAX_WORD_LEN> =
                cells[start..start + len].iter().flatten().copied().collect();
            if tiles.len() != len {
                continue;
            }
            out.push(WordMatch {
                word,
                tiles,
                reversed,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordgrid_types::TileId;

    fn dict() -> Dictionary {
        Dictionary::from_text("cat\ncats\ntac\ndog\nscat\nwas\nsaw\n")
    }

    fn place(grid: &mut Grid, letters: &str, x: i8, y: i8, horizontal: bool) {
        for (i, letter) in letters.chars().enumerate() {
            let id = TileId((y as u32 + 1) * 100 + x as u32 * 10 + i as u32);
            let tile = Tile::new(id, letter);
            if horizontal {
                grid.set(x + i as i8, y, Some(tile));
            } else {
                grid.set(x, y + i as i8, Some(tile));
            }
        }
    }

    #[test]
    fn test_row_match_through_placement() {
        let mut grid = Grid::new();
        place(&mut grid, "cat", 0, 0, true);

        let matches = find_matches(&grid, &dict(), 2, 0);
        assert!(matches.iter().any(|m| m.word == "cat" && !m.reversed));
        for m in &matches {
            assert!(m.len() >= MIN_WORD_LEN);
        }
    }

    #[test]
    fn test_placement_must_be_inside_span() {
        let mut grid = Grid::new();
        // "cat" at columns 0..2; the probe at column 4 is outside its span
        place(&mut grid, "cat", 0, 0, true);
        place(&mut grid, "x", 4, 0, true);

        let matches = find_matches(&grid, &dict(), 4, 0);
        assert!(matches.iter().all(|m| m.word != "cat"));
    }

    #[test]
    fn test_column_match() {
        let mut grid = Grid::new();
        place(&mut grid, "dog", 3, 2, false);

        let matches = find_matches(&grid, &dict(), 3, 3);
        assert!(matches.iter().any(|m| m.word == "dog" && !m.reversed));
    }

    #[test]
    fn test_reversed_match_detected() {
        let mut grid = Grid::new();
        // "tac" left-to-right reads "cat" right-to-left
        place(&mut grid, "tac", 1, 4, true);

        let matches = find_matches(&grid, &dict(), 2, 4);
        // Both orientations are real words here: "tac" forward, "cat" reversed
        assert!(matches.iter().any(|m| m.word == "tac" && !m.reversed));
        assert!(matches.iter().any(|m| m.word == "cat" && m.reversed));
    }

    #[test]
    fn test_reversed_tiles_in_reading_order() {
        let mut grid = Grid::new();
        place(&mut grid, "tac", 0, 0, true);

        let matches = find_matches(&grid, &dict(), 1, 0);
        let reversed = matches.iter().find(|m| m.reversed).unwrap();
        let letters: String = reversed.tiles.iter().map(|t| t.letter).collect();
        assert_eq!(letters, reversed.word);
    }

    #[test]
    fn test_overlapping_lengths_all_collected() {
        let mut grid = Grid::new();
        place(&mut grid, "scat", 0, 1, true);

        let matches = find_matches(&grid, &dict(), 2, 1);
        // "scat" and the embedded "cat" both qualify through column 2
        assert!(matches.iter().any(|m| m.word == "scat"));
        assert!(matches.iter().any(|m| m.word == "cat"));
    }

    #[test]
    fn test_blank_gap_breaks_words() {
        let mut grid = Grid::new();
        place(&mut grid, "ca", 0, 0, true);
        place(&mut grid, "t", 3, 0, true); // gap at column 2

        let matches = find_matches(&grid, &dict(), 1, 0);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_idempotent_on_static_board() {
        let mut grid = Grid::new();
        place(&mut grid, "cats", 0, 5, true);
        let d = dict();

        let first = find_matches(&grid, &d, 0, 5);
        let second = find_matches(&grid, &d, 0, 5);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_empty_cell_probe_finds_nothing() {
        let mut grid = Grid::new();
        place(&mut grid, "cat", 0, 0, true);

        // Probing an empty cell: every candidate spans the blank
        let matches = find_matches(&grid, &dict(), 5, 0);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_out_of_bounds_probe() {
        let grid = Grid::new();
        assert!(find_matches(&grid, &dict(), -1, 0).is_empty());
        assert!(find_matches(&grid, &dict(), 0, 7).is_empty());
    }

    #[test]
    fn test_palindromic_line_registers_both_directions() {
        let mut grid = Grid::new();
        place(&mut grid, "was", 0, 0, true);

        let matches = find_matches(&grid, &dict(), 1, 0);
        // "was" forward and "saw" reversed both score
        assert_eq!(matches.len(), 2);
    }
}
