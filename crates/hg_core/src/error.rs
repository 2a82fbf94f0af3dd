use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Both handles passed to `simulate_game` carry the same team identity.
    #[error("invalid matchup: {0}")]
    InvalidMatchup(String),

    /// A roster handed to `Team::from_specs` cannot field a line.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// Sudden death ran past the configured safety cap without a winner.
    #[error("shootout still tied after {rounds} rounds")]
    ShootoutStalled { rounds: u32 },
}

pub type Result<T> = std::result::Result<T, GameError>;
