//! Four-in-a-row detection around a single anchor cell
//!
//! The same traversal answers two questions. Anchored on a disc that was just
//! played it tells whether that disc completed a line. Anchored on an empty
//! cell it counts how many lines a disc there *would* complete, which the
//! evaluator uses as a threat probe.

use crate::board::{BoardState, Cell, Player};

/// The eight neighbouring directions as `(row, column)` steps
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// indices into DIRECTIONS of the two halves of each axis
const AXES: [(usize, usize); 4] = [
    // primary diagonal
    (0, 7),
    // anti-diagonal
    (2, 5),
    // horizontal
    (3, 4),
    // vertical
    (1, 6),
];

/// Counts consecutive discs of `player` starting at `(row, column_index)` and
/// stepping by `direction`
fn walk(
    board: &BoardState,
    row: isize,
    column_index: isize,
    direction: (isize, isize),
    player: Cell,
) -> usize {
    match board.cell_at(row, column_index) {
        Some(cell) if cell == player => {
            1 + walk(
                board,
                row + direction.0,
                column_index + direction.1,
                direction,
                player,
            )
        }
        _ => 0,
    }
}

/// Per-axis totals around the anchor at `row` of the 1-indexed `column`
///
/// Each direction counts the anchor itself once, so every axis total holds
/// the anchor twice: a total above 4 means the anchor sits on a run of at
/// least four.
pub fn axis_totals(board: &BoardState, row: usize, column: usize, player: Player) -> [usize; 4] {
    let player = Cell::from(player);
    let (row, column_index) = (row as isize, column as isize - 1);

    let mut runs = [1; 8];
    for (run, &(dr, dc)) in runs.iter_mut().zip(DIRECTIONS.iter()) {
        *run += walk(board, row + dr, column_index + dc, (dr, dc), player);
    }

    let mut totals = [0; 4];
    for (total, &(a, b)) in totals.iter_mut().zip(AXES.iter()) {
        *total = runs[a] + runs[b];
    }
    totals
}

/// Number of axes (0 to 4) on which a disc for `player` at the anchor
/// completes four in a row. The anchor may be empty.
pub fn count_threats_at(board: &BoardState, row: usize, column: usize, player: Player) -> usize {
    axis_totals(board, row, column, player)
        .iter()
        .filter(|&&total| total > 4)
        .count()
}

/// Threat count anchored on the top disc of `column`
pub fn count_threats(board: &BoardState, column: usize, player: Player) -> usize {
    count_threats_at(board, board.anchor_row(column), column, player)
}

/// Whether the top disc of `column` is part of four in a row for `player`
pub fn connects_four(board: &BoardState, column: usize, player: Player) -> bool {
    axis_totals(board, board.anchor_row(column), column, player)
        .iter()
        .any(|&total| total > 4)
}
