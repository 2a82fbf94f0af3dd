//! Player state and the per-team player pool.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lower bound for player energy.
pub const ENERGY_MIN: f32 = 0.0;
/// Upper bound for player energy.
pub const ENERGY_MAX: f32 = 25.0;

/// Energy drained per iteration while on the ice, uniform within this range.
const ACTIVE_DRAIN_MIN: f32 = 1.5;
const ACTIVE_DRAIN_MAX: f32 = 6.0;
/// Energy regained per iteration on the bench.
const REST_RECOVERY: f32 = 1.0;

/// Identifier of a player within one team's pool.
///
/// Lines and rosters store ids only; the pool is the sole owner of `Player`
/// values, so swapping a player out on injury cannot leave a stale copy
/// behind in another container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Skater,
    Goaltender,
}

impl Position {
    pub fn is_goaltender(&self) -> bool {
        matches!(self, Position::Goaltender)
    }

    pub fn is_skater(&self) -> bool {
        matches!(self, Position::Skater)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    /// Unique within a team, 1..=99.
    pub jersey_number: u8,
    pub position: Position,
    /// Offensive value in 0..=100. Goaltenders carry 0.
    pub offensive_value: u8,
    /// Defensive value in 0..=100.
    pub defensive_value: u8,
    /// Current energy, always within [0, 25].
    pub energy: f32,
    pub injured: bool,
    /// Games left to sit out while injured.
    pub injury_games_remaining: u8,
    pub goals_scored: u32,
    /// Whether the player is on the team's current line.
    pub active: bool,
}

impl Player {
    /// One iteration of energy flow: active players drain a uniform
    /// 1.5..=6.0, bench players recover 1.0. The result stays in [0, 25].
    pub fn update_energy(&mut self, is_active: bool, rng: &mut impl Rng) {
        if is_active {
            let drain = rng.gen_range(ACTIVE_DRAIN_MIN..=ACTIVE_DRAIN_MAX);
            self.energy = (self.energy - drain).max(ENERGY_MIN);
        } else {
            self.energy = (self.energy + REST_RECOVERY).min(ENERGY_MAX);
        }
    }
}

/// Sole owner of a team's players, keyed by [`PlayerId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerPool {
    players: HashMap<PlayerId, Player>,
    next_id: u32,
}

impl PlayerPool {
    /// Create a player and hand back its id.
    pub fn add(
        &mut self,
        jersey_number: u8,
        position: Position,
        offensive_value: u8,
        defensive_value: u8,
        energy: f32,
    ) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.players.insert(
            id,
            Player {
                id,
                jersey_number,
                position,
                offensive_value,
                defensive_value,
                energy: energy.clamp(ENERGY_MIN, ENERGY_MAX),
                injured: false,
                injury_games_remaining: 0,
                goals_scored: 0,
                active: false,
            },
        );
        id
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn jersey_taken(&self, jersey_number: u8) -> bool {
        self.players.values().any(|p| p.jersey_number == jersey_number)
    }
}
