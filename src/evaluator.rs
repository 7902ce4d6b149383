//! Static evaluation of non-terminal positions
//!
//! Scores are from [`Player::One`]'s point of view: positive favours the
//! engine, negative the opponent.
//!
//! For every column the evaluator probes the empty cells a disc could
//! realistically reach soon: normally only the next drop position, but when a
//! neighbouring stack is taller, every empty cell up to one above the taller
//! neighbour's top disc is probed. Each probed cell is scored by the number
//! of lines it would complete for either player, weighted by row parity since
//! under alternating play the first player tends to claim odd rows and the
//! second player even rows.
//!
//! The weighting is deliberately lopsided and sees little in the opening,
//! where no probe finds a threat and every position scores 0.

use crate::board::{BoardState, Player};
use crate::line_detector::count_threats_at;
use crate::search::WIN_SCORE;
use crate::WIDTH;

/// Score of a position that `winner` has just won
pub fn terminal_score(winner: Player) -> i32 {
    match winner {
        Player::One => WIN_SCORE,
        Player::Two => -WIN_SCORE,
    }
}

pub fn player_one_weight(row: usize) -> i32 {
    if row % 2 != 0 {
        5
    } else {
        3
    }
}

pub fn player_two_weight(row: usize) -> i32 {
    if row % 2 == 0 {
        3
    } else {
        2
    }
}

/// Heuristic score of a position where nobody has connected four
pub fn evaluate(board: &BoardState) -> i32 {
    let mut player_one = 0;
    let mut player_two = 0;

    for column in 1..=WIDTH {
        let height = board.height_of(column);
        let balance_height = board.height_of(column - 1).min(board.height_of(column + 1));
        let probes = if height >= balance_height {
            height - balance_height + 1
        } else {
            1
        };

        // the n-th empty slot from the top of the stack sits at row `height - n`
        for offset in (1..=probes).take_while(|&offset| offset <= height) {
            let row = height - offset;
            let threats_one = count_threats_at(board, row, column, Player::One) as i32;
            let threats_two = count_threats_at(board, row, column, Player::Two) as i32;
            player_one += player_one_weight(row) * threats_one;
            player_two += player_two_weight(row) * threats_two;
        }
    }

    player_one - player_two
}
