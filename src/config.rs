use anyhow::{anyhow, Result};

/// The search depth the engine plays at unless told otherwise
pub const DEFAULT_DEPTH: u32 = 4;

/// Deepest search accepted. The minimizing side alone spends depth, so this
/// already reaches `2 * MAX_DEPTH` plies.
pub const MAX_DEPTH: u32 = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Search depth in move pairs
    pub depth: u32,
    /// Whether the engine makes the first move of the game
    pub engine_first: bool,
    /// Seed for the random fallback move; drawn from the OS when `None`
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_depth(self, depth: u32) -> Result<Self> {
        if depth < 1 || depth > MAX_DEPTH {
            return Err(anyhow!(
                "Invalid depth {}. Depth must be between 1 and {}",
                depth,
                MAX_DEPTH
            ));
        }
        Ok(Self { depth, ..self })
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            engine_first: true,
            seed: None,
        }
    }
}

/// Parses a depth answer, a blank answer meaning [`DEFAULT_DEPTH`]
pub fn parse_depth(input: &str) -> Result<u32> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_DEPTH);
    }
    let depth = input
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid number: {}", input))?;
    Config::default().with_depth(depth).map(|config| config.depth)
}
