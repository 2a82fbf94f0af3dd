//! # hg_core - Hockey League Game Simulation Engine
//!
//! Simulates one hockey game at a time between two persistent teams:
//! line rotations driven by player energy, lazy goaltender selection with
//! emergency call-ups, probabilistic shot and goal resolution, injuries with
//! replacement and recovery, and a period/overtime/shootout state machine.
//!
//! The engine owns no I/O. Callers build teams ([`Team::generate`] or
//! [`Team::from_specs`]), hand them to [`GameEngine::simulate_game`] together
//! with a random source, and read the returned [`GameResult`] plus the
//! mutated team state. Passing a seeded rng makes a run reproducible.

pub mod engine;
pub mod error;
pub mod models;

pub use engine::{EngineConfig, GameEngine, GamePhase};
pub use error::{GameError, Result};
pub use models::{
    GameDecision, GameEvent, GameEventType, GameResult, Line, Player, PlayerId, PlayerSpec,
    Position, Team, TeamStats,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
