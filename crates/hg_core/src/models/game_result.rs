//! Per-game outcome data returned to the caller.

use serde::{Deserialize, Serialize};

use super::events::GameEvent;

/// When the final score was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameDecision {
    Regular,
    Overtime,
    Shootout,
}

impl GameDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameDecision::Regular => "regular",
            GameDecision::Overtime => "overtime",
            GameDecision::Shootout => "shootout",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodScore {
    pub home: u8,
    pub away: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootoutAttempt {
    pub round: u32,
    pub is_home_team: bool,
    pub jersey_number: u8,
    pub scored: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShootoutResult {
    pub goals_home: u16,
    pub goals_away: u16,
    /// Rounds played; at least 3 when a shootout took place.
    pub rounds: u32,
    pub attempts: Vec<ShootoutAttempt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// One entry per period played: three regulation entries, plus the
    /// overtime entry when one was needed.
    pub period_scores: Vec<PeriodScore>,
    /// Final score including shootout goals, matching the teams'
    /// goals-for/against bookkeeping.
    pub score_home: u16,
    pub score_away: u16,
    pub decision: GameDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shootout: Option<ShootoutResult>,
    pub events: Vec<GameEvent>,
}

impl GameResult {
    pub fn winner_is_home(&self) -> bool {
        self.score_home > self.score_away
    }
}
