//! A depth-limited minimax agent for Connect 4

use tracing::{debug, warn};

use crate::{
    board::*, evaluator, line_detector, transposition_table::*, HEIGHT, WIDTH,
};

/// Score of a position won by [`Player::One`]; its negation is a win for
/// [`Player::Two`]
pub const WIN_SCORE: i32 = i32::MAX;

/// Result of a top-level search
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchOutcome {
    /// The chosen 1-indexed column, `None` if no move beat a certain loss
    pub best_move: Option<usize>,
    /// Minimax value of the chosen move
    pub score: i32,
    /// Nodes visited, including transposition table hits
    pub node_count: usize,
}

// state shared by the nodes of a single top-level search
struct Search {
    transposition_table: TranspositionTable,
    node_count: usize,
}

impl Search {
    fn new() -> Self {
        Self {
            transposition_table: TranspositionTable::new(),
            node_count: 0,
        }
    }

    /// Node where [`Player::One`] is to move, `last_move` having just been
    /// played by [`Player::Two`]
    fn maximize(
        &mut self,
        board: &mut BoardState,
        mut alpha: i32,
        beta: i32,
        last_move: usize,
        depth: u32,
    ) -> i32 {
        self.node_count += 1;

        let key = board.key();
        if let Some(value) = self.transposition_table.get(&key) {
            return value;
        }

        let has_won = line_detector::connects_four(board, last_move, Player::Two);
        if has_won || depth == 0 {
            let value = if has_won {
                evaluator::terminal_score(Player::Two)
            } else {
                evaluator::evaluate(board)
            };
            self.transposition_table.set(key, value);
            return value;
        }

        let mut value = -WIN_SCORE;
        for column in board.legal_moves() {
            if let Some(mut child) = board.scoped_move(column, Player::One) {
                value = value.max(self.minimize(&mut child, alpha, beta, column, depth));
            }
            // the minimizing parent will never allow this line
            if value >= beta {
                self.transposition_table.set(key, value);
                return value;
            }
            alpha = alpha.max(value);
        }

        self.transposition_table.set(key, value);
        value
    }

    /// Node where [`Player::Two`] is to move. Only this side spends depth, so
    /// `depth` counts move pairs rather than plies.
    fn minimize(
        &mut self,
        board: &mut BoardState,
        alpha: i32,
        mut beta: i32,
        last_move: usize,
        depth: u32,
    ) -> i32 {
        self.node_count += 1;

        let key = board.key();
        if let Some(value) = self.transposition_table.get(&key) {
            return value;
        }

        let has_won = line_detector::connects_four(board, last_move, Player::One);
        if has_won || depth == 0 {
            let value = if has_won {
                evaluator::terminal_score(Player::One)
            } else {
                evaluator::evaluate(board)
            };
            self.transposition_table.set(key, value);
            return value;
        }

        let mut value = WIN_SCORE;
        for column in board.legal_moves() {
            if let Some(mut child) = board.scoped_move(column, Player::Two) {
                value = value.min(self.maximize(&mut child, alpha, beta, column, depth - 1));
            }
            if value <= alpha {
                self.transposition_table.set(key, value);
                return value;
            }
            beta = beta.min(value);
        }

        self.transposition_table.set(key, value);
        value
    }
}

/// Chooses moves for [`Player::One`] on a board it keeps in sync with the game
///
/// Both sides' confirmed moves are recorded through
/// [`apply_external_move`](Self::apply_external_move); the search itself
/// plays and retracts moves on the same board, leaving it unchanged.
#[derive(Clone)]
pub struct SearchEngine {
    board: BoardState,

    /// The number of nodes searched by this `SearchEngine` so far (for diagnostics only)
    pub node_count: usize,
}

impl SearchEngine {
    pub fn new(board: BoardState) -> Self {
        Self {
            board,
            node_count: 0,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Records a move confirmed by the outside world
    pub fn apply_external_move(&mut self, column: usize, player: Player) -> bool {
        self.board.apply_move(column, player)
    }

    pub fn board_snapshot(&self) -> [[Cell; WIDTH]; HEIGHT] {
        self.board.snapshot()
    }

    /// The column [`Player::One`] should play, or `None` when every move
    /// loses against best play within the horizon (or no move is left).
    /// The caller then has to pick a move some other way.
    pub fn compute_best_move(&mut self, depth: u32) -> Option<usize> {
        self.search(depth).best_move
    }

    /// Searches every move of [`Player::One`] in ascending column order,
    /// keeping the first of equally scored moves
    pub fn search(&mut self, depth: u32) -> SearchOutcome {
        let mut search = Search::new();

        let mut alpha = -WIN_SCORE;
        let beta = WIN_SCORE;
        let mut best_score = -WIN_SCORE;
        let mut best_move = None;

        for column in self.board.legal_moves() {
            let score = match self.board.scoped_move(column, Player::One) {
                Some(mut child) => search.minimize(&mut child, alpha, beta, column, depth),
                None => continue,
            };
            if score > best_score {
                best_score = score;
                best_move = Some(column);
            }
            // a won position cannot be improved on
            if best_score >= beta {
                break;
            }
            alpha = alpha.max(best_score);
        }

        let outcome = SearchOutcome {
            best_move,
            score: best_score,
            node_count: search.node_count,
        };
        self.node_count += search.node_count;

        debug!(
            depth,
            best_move = ?outcome.best_move,
            score = outcome.score,
            nodes = outcome.node_count,
            cached = search.transposition_table.len(),
            cache_hits = search.transposition_table.hits(),
            "search finished"
        );
        if best_move.is_none() {
            warn!(depth, "no move avoids a forced loss");
        }

        outcome
    }
}

impl std::ops::Deref for SearchEngine {
    type Target = BoardState;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}
