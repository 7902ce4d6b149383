//! Playing a full game against an outside opponent
//!
//! The engine never talks to the opponent directly. Whatever front-end hosts
//! the game (a terminal, a browser session, a simulated player) implements
//! [`GameInterface`], and [`GameDriver`] alternates turns between the two.

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::{board::*, config::Config, line_detector, search::SearchEngine};

/// The outside world the engine plays in
pub trait GameInterface {
    /// Waits for the opponent to move and returns the 1-indexed column it played
    fn opponent_move(&mut self, board: &BoardState) -> Result<usize>;

    /// Carries out the engine's move
    fn play_move(&mut self, column: usize) -> Result<()>;

    /// Called with the current board whenever it changes
    fn show(&mut self, _board: &BoardState) -> Result<()> {
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    /// State of the game after `player` dropped a disc into `column`
    pub fn after_move(board: &BoardState, column: usize, player: Player) -> Self {
        if line_detector::connects_four(board, column, player) {
            match player {
                Player::One => GameState::PlayerOneWin,
                Player::Two => GameState::PlayerTwoWin,
            }
        } else if board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }
}

/// Uniformly random legal column, the fallback when the search finds no move
pub fn random_legal_move<R: Rng>(board: &BoardState, rng: &mut R) -> Option<usize> {
    let moves = board.legal_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.random_range(0..moves.len())])
}

/// Runs a game between the engine ([`Player::One`]) and an opponent behind a
/// [`GameInterface`] ([`Player::Two`])
pub struct GameDriver<I> {
    engine: SearchEngine,
    interface: I,
    config: Config,
    rng: StdRng,
    state: GameState,
    to_move: Player,
}

impl<I: GameInterface> GameDriver<I> {
    pub fn new(interface: I, config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            engine: SearchEngine::new(BoardState::new()),
            interface,
            config,
            rng,
            state: GameState::Playing,
            to_move: if config.engine_first {
                Player::One
            } else {
                Player::Two
            },
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &BoardState {
        self.engine.board()
    }

    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Plays a single move for whoever is next
    pub fn step(&mut self) -> Result<GameState> {
        if self.state != GameState::Playing {
            return Err(anyhow!("Game is already over: {:?}", self.state));
        }

        let player = self.to_move;
        let column = match player {
            Player::One => self.engine_move()?,
            Player::Two => {
                let column = self.interface.opponent_move(self.engine.board())?;
                if !self.engine.apply_external_move(column, Player::Two) {
                    return Err(anyhow!("Opponent played unplayable column {}", column));
                }
                info!(column, "opponent moved");
                column
            }
        };

        self.state = GameState::after_move(self.engine.board(), column, player);
        self.to_move = player.opponent();
        debug!("board after move:\n{}", self.engine.board());
        self.interface.show(self.engine.board())?;
        Ok(self.state)
    }

    /// Plays until the game is won or drawn
    pub fn run(&mut self) -> Result<GameState> {
        self.interface.show(self.engine.board())?;
        while self.state == GameState::Playing {
            self.step()?;
        }
        info!(state = ?self.state, moves = self.engine.num_moves(), "game over");
        Ok(self.state)
    }

    fn engine_move(&mut self) -> Result<usize> {
        let column = match self.engine.compute_best_move(self.config.depth) {
            Some(column) => column,
            None => {
                let column = random_legal_move(self.engine.board(), &mut self.rng)
                    .ok_or_else(|| anyhow!("No legal moves left"))?;
                info!(column, "no saving move found, playing at random");
                column
            }
        };

        self.interface.play_move(column)?;
        if !self.engine.apply_external_move(column, Player::One) {
            return Err(anyhow!("Engine chose unplayable column {}", column));
        }
        info!(column, "engine moved");
        Ok(column)
    }
}
