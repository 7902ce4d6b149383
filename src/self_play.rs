//! Batch games of the engine against a random opponent
//!
//! Every game runs on its own engine and board, so games are spread over
//! threads while each search stays single-threaded.

use anyhow::{anyhow, Result};
use indicatif::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;

use std::fmt;

use crate::{
    board::BoardState,
    config::Config,
    game::{random_legal_move, GameDriver, GameInterface, GameState},
};

// keeps the opponent's random stream apart from the engine's fallback stream
const OPPONENT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// An opponent that plays uniformly random legal moves
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl GameInterface for RandomOpponent {
    fn opponent_move(&mut self, board: &BoardState) -> Result<usize> {
        random_legal_move(board, &mut self.rng).ok_or_else(|| anyhow!("No legal moves left"))
    }

    fn play_move(&mut self, _column: usize) -> Result<()> {
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MatchSummary {
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
}

impl MatchSummary {
    pub fn total(&self) -> usize {
        self.engine_wins + self.opponent_wins + self.draws
    }

    fn record(&mut self, state: GameState) {
        match state {
            GameState::PlayerOneWin => self.engine_wins += 1,
            GameState::PlayerTwoWin => self.opponent_wins += 1,
            GameState::Draw => self.draws += 1,
            GameState::Playing => {}
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: {} engine wins, {} opponent wins, {} draws",
            self.total(),
            self.engine_wins,
            self.opponent_wins,
            self.draws
        )
    }
}

/// Plays `games` games of the engine against [`RandomOpponent`]
///
/// Game `i` is seeded from `config.seed + i`, so a seeded run always produces
/// the same summary.
pub fn run_matches(games: usize, config: Config) -> Result<MatchSummary> {
    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let results = (0..games)
        .into_par_iter()
        .map(|game| {
            let seed = base_seed.wrapping_add(game as u64);
            let mut driver = GameDriver::new(
                RandomOpponent::new(seed ^ OPPONENT_SEED_SALT),
                config.with_seed(seed),
            );
            let state = driver.run();
            progress.inc(1);
            state
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish_and_clear();

    let mut summary = MatchSummary::default();
    for state in results {
        summary.record(state);
    }
    info!(depth = config.depth, %summary, "self-play finished");
    Ok(summary)
}
