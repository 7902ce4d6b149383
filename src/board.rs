use anyhow::{anyhow, Result};

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::{line_detector, HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// The value this cell contributes to a [`StateKey`]
    pub fn digit(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    /// The engine, maximising
    One,
    /// The opponent, minimising
    Two,
}

impl Player {
    pub fn opponent(&self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// Row-major encoding of every cell on the board, used as the
/// transposition table key
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StateKey([u8; WIDTH * HEIGHT]);

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0.iter() {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

/// A Connect 4 board that is mutated in place
///
/// Columns are 1-indexed (`1..=WIDTH`). Row 0 is the top of the board, so
/// discs stack from row `HEIGHT - 1` upwards.
///
/// `heights` counts the empty slots left in each column. It is padded with a
/// permanently empty column on either side so neighbouring columns can be
/// read without bounds checks; the padding is never written to.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BoardState {
    cells: [[Cell; WIDTH]; HEIGHT],
    heights: [usize; WIDTH + 2],
    num_moves: usize,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            heights: [HEIGHT; WIDTH + 2],
            num_moves: 0,
        }
    }

    /// Builds a board from a string of 1-indexed columns, played alternately
    /// starting with [`Player::One`]
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::One;
        let mut game_over = false;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if game_over {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    if !board.apply_move(column, player) {
                        return Err(anyhow!("Invalid move, column {} full", column));
                    }
                    game_over = line_detector::connects_four(&board, column, player);
                    player = player.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Playable columns in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        (1..=WIDTH).filter(|&column| self.is_legal(column)).collect()
    }

    pub fn is_legal(&self, column: usize) -> bool {
        (1..=WIDTH).contains(&column) && self.heights[column] > 0
    }

    /// Drops a disc for `player` into `column`.
    ///
    /// Returns `false` without touching the board if the column is full or
    /// out of range.
    pub fn apply_move(&mut self, column: usize, player: Player) -> bool {
        if !self.is_legal(column) {
            return false;
        }
        self.heights[column] -= 1;
        self.cells[self.heights[column]][column - 1] = player.into();
        self.num_moves += 1;
        true
    }

    /// Removes the top disc of `column`. Only valid directly after the
    /// matching [`apply_move`](Self::apply_move).
    pub fn undo_move(&mut self, column: usize) -> bool {
        if !(1..=WIDTH).contains(&column) || self.heights[column] >= HEIGHT {
            return false;
        }
        self.cells[self.heights[column]][column - 1] = Cell::Empty;
        self.heights[column] += 1;
        self.num_moves -= 1;
        true
    }

    /// Applies a move that is undone again when the returned guard is dropped
    ///
    /// Guards must be dropped in the reverse order they were created, which
    /// scoping enforces as long as the guarded board is not itself mutated
    /// through [`apply_move`](Self::apply_move) without a matching undo.
    pub fn scoped_move(&mut self, column: usize, player: Player) -> Option<MoveGuard<'_>> {
        if self.apply_move(column, player) {
            Some(MoveGuard {
                board: self,
                column,
            })
        } else {
            None
        }
    }

    pub fn key(&self) -> StateKey {
        let mut key = [0; WIDTH * HEIGHT];
        for (slot, cell) in key.iter_mut().zip(self.cells.iter().flatten()) {
            *slot = cell.digit();
        }
        StateKey(key)
    }

    /// Empty slots left in `column`. Columns `0` and `WIDTH + 1` are the
    /// always-empty padding; anything further out reads as full.
    pub fn height_of(&self, column: usize) -> usize {
        self.heights.get(column).copied().unwrap_or(0)
    }

    /// Row of the top disc in `column`, or `HEIGHT` when the column is empty
    pub fn anchor_row(&self, column: usize) -> usize {
        self.height_of(column)
    }

    /// Cell at `row` (0 is the top) of the 1-indexed `column`
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        if column == 0 {
            return None;
        }
        self.cells.get(row).and_then(|r| r.get(column - 1)).copied()
    }

    pub(crate) fn cell_at(&self, row: isize, column_index: isize) -> Option<Cell> {
        if row < 0 || row >= HEIGHT as isize || column_index < 0 || column_index >= WIDTH as isize {
            return None;
        }
        Some(self.cells[row as usize][column_index as usize])
    }

    pub fn snapshot(&self) -> [[Cell; WIDTH]; HEIGHT] {
        self.cells
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == WIDTH * HEIGHT
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A move applied through [`BoardState::scoped_move`], undone on drop
pub struct MoveGuard<'a> {
    board: &'a mut BoardState,
    column: usize,
}

impl Deref for MoveGuard<'_> {
    type Target = BoardState;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        self.board.undo_move(self.column);
    }
}
