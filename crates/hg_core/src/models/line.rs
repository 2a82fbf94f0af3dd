//! Five-skater line groupings and their derived aggregates.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::player::{Player, PlayerId, PlayerPool};

/// Skaters on a line.
pub const LINE_SIZE: usize = 5;
/// Default cut for top-offense and lowest-energy selections.
pub const TOP_SELECTION: usize = 3;

/// A line holds ids only; the owning team's pool resolves them. A skater may
/// sit on several lines at once but never twice on the same line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    players: Vec<PlayerId>,
}

impl Line {
    pub fn new(players: Vec<PlayerId>) -> Self {
        debug_assert_eq!(players.len(), LINE_SIZE);
        Self { players }
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }

    /// Swap `out` for `replacement` in every slot it occupies.
    pub fn replace(&mut self, out: PlayerId, replacement: PlayerId) {
        for slot in &mut self.players {
            if *slot == out {
                *slot = replacement;
            }
        }
    }

    pub fn has_injured(&self, pool: &PlayerPool) -> bool {
        self.resolve(pool).any(|p| p.injured)
    }

    pub fn average_energy(&self, pool: &PlayerPool) -> f32 {
        self.mean(pool, |p| p.energy)
    }

    pub fn average_offense(&self, pool: &PlayerPool) -> f32 {
        self.mean(pool, |p| f32::from(p.offensive_value))
    }

    pub fn average_defense(&self, pool: &PlayerPool) -> f32 {
        self.mean(pool, |p| f32::from(p.defensive_value))
    }

    /// Line members sorted by offensive value, best first, truncated to
    /// `count`. Ties keep roster order (the sort is stable).
    pub fn top_offensive(&self, pool: &PlayerPool, count: usize) -> Vec<PlayerId> {
        let mut ids = self.players.clone();
        ids.sort_by(|&a, &b| {
            let off_a = pool.get(a).map_or(0, |p| p.offensive_value);
            let off_b = pool.get(b).map_or(0, |p| p.offensive_value);
            off_b.cmp(&off_a)
        });
        ids.truncate(count);
        ids
    }

    /// Line members sorted by energy, lowest first, truncated to `count`.
    pub fn lowest_energy(&self, pool: &PlayerPool, count: usize) -> Vec<PlayerId> {
        let mut ids = self.players.clone();
        ids.sort_by(|&a, &b| {
            let energy_a = pool.get(a).map_or(0.0, |p| p.energy);
            let energy_b = pool.get(b).map_or(0.0, |p| p.energy);
            energy_a.partial_cmp(&energy_b).unwrap_or(Ordering::Equal)
        });
        ids.truncate(count);
        ids
    }

    fn resolve<'a>(&'a self, pool: &'a PlayerPool) -> impl Iterator<Item = &'a Player> {
        self.players.iter().filter_map(|&id| pool.get(id))
    }

    fn mean(&self, pool: &PlayerPool, value: impl Fn(&Player) -> f32) -> f32 {
        let values: Vec<f32> = self.resolve(pool).map(value).collect();
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f32>() / values.len() as f32
    }
}
