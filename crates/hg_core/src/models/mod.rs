pub mod events;
pub mod game_result;
pub mod line;
pub mod player;
pub mod team;

pub use events::{GameEvent, GameEventType};
pub use game_result::{GameDecision, GameResult, PeriodScore, ShootoutAttempt, ShootoutResult};
pub use line::{Line, LINE_SIZE, TOP_SELECTION};
pub use player::{Player, PlayerId, PlayerPool, Position, ENERGY_MAX, ENERGY_MIN};
pub use team::{PlayerSpec, Team, TeamStats};
