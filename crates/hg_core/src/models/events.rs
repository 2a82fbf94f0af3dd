//! Structured in-game events for the reporting layer.
//!
//! The engine records what happened; whether and how to display it is the
//! caller's concern.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventType {
    Goal,
    Injury,
    LineChange,
    ShootoutGoal,
    ShootoutMiss,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub event_type: GameEventType,
    pub is_home_team: bool,
    /// Regulation period 1..=3, overtime 4. Absent for shootout events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u8>,
    /// Shootout round, set only for shootout events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<u8>,
}

impl GameEvent {
    pub fn goal(period: u8, is_home_team: bool, jersey_number: u8) -> Self {
        Self {
            event_type: GameEventType::Goal,
            is_home_team,
            period: Some(period),
            round: None,
            jersey_number: Some(jersey_number),
        }
    }

    pub fn injury(period: u8, is_home_team: bool, jersey_number: u8) -> Self {
        Self {
            event_type: GameEventType::Injury,
            is_home_team,
            period: Some(period),
            round: None,
            jersey_number: Some(jersey_number),
        }
    }

    pub fn line_change(period: u8, is_home_team: bool) -> Self {
        Self {
            event_type: GameEventType::LineChange,
            is_home_team,
            period: Some(period),
            round: None,
            jersey_number: None,
        }
    }

    pub fn shootout_goal(round: u32, is_home_team: bool, jersey_number: u8) -> Self {
        Self {
            event_type: GameEventType::ShootoutGoal,
            is_home_team,
            period: None,
            round: Some(round),
            jersey_number: Some(jersey_number),
        }
    }

    pub fn shootout_miss(round: u32, is_home_team: bool, jersey_number: u8) -> Self {
        Self {
            event_type: GameEventType::ShootoutMiss,
            is_home_team,
            period: None,
            round: Some(round),
            jersey_number: Some(jersey_number),
        }
    }
}
