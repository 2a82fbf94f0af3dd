//! Team roster, line rotation, goaltender selection, and injury handling.

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::engine::probability;
use crate::error::{GameError, Result};

use super::line::{Line, LINE_SIZE, TOP_SELECTION};
use super::player::{Player, PlayerId, PlayerPool, Position, ENERGY_MAX};

/// Skaters on a freshly generated roster.
pub const ROSTER_SKATERS: usize = 18;
/// Goaltenders on a freshly generated roster.
pub const ROSTER_GOALTENDERS: usize = 2;
/// Lines per team.
pub const LINE_COUNT: usize = 4;
/// A goaltender below this energy is pulled at the next re-evaluation.
pub const GOALTENDER_MIN_ENERGY: f32 = 16.0;
/// A line below this average energy triggers a line change.
pub const LINE_CHANGE_THRESHOLD: f32 = 18.0;

const JERSEY_MIN: u8 = 1;
const JERSEY_MAX: u8 = 99;

/// Cumulative statistics, persisted across games until explicitly reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub games_played: u32,
    pub regular_wins: u32,
    pub overtime_wins: u32,
    pub shootout_wins: u32,
    pub regular_losses: u32,
    pub overtime_losses: u32,
    pub shootout_losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub injuries: u32,
}

/// Explicit player description for callers that assemble rosters by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub jersey_number: u8,
    pub offensive_value: u8,
    pub defensive_value: u8,
    pub energy: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: Uuid,
    pub city: String,
    pub name: String,
    pool: PlayerPool,
    /// Active skater roster in insertion order; injured players are moved to
    /// the reserve and replaced here.
    skaters: Vec<PlayerId>,
    goaltenders: Vec<PlayerId>,
    injured_reserve: Vec<PlayerId>,
    lines: Vec<Line>,
    current_line: usize,
    active_goaltender: Option<PlayerId>,
    pub stats: TeamStats,
}

impl Team {
    /// Generate a full roster: 18 skaters, 2 goaltenders, 4 random lines,
    /// and a starting goaltender pick.
    pub fn generate(city: impl Into<String>, name: impl Into<String>, rng: &mut impl Rng) -> Self {
        let mut team = Team {
            id: Uuid::new_v4(),
            city: city.into(),
            name: name.into(),
            pool: PlayerPool::default(),
            skaters: Vec::with_capacity(ROSTER_SKATERS),
            goaltenders: Vec::with_capacity(ROSTER_GOALTENDERS),
            injured_reserve: Vec::new(),
            lines: Vec::with_capacity(LINE_COUNT),
            current_line: 0,
            active_goaltender: None,
            stats: TeamStats::default(),
        };

        for _ in 0..ROSTER_SKATERS {
            let jersey = team.unused_jersey(rng);
            let id = team.pool.add(
                jersey,
                Position::Skater,
                rng.gen_range(50..=100),
                rng.gen_range(50..=100),
                rng.gen_range(1..=25) as f32,
            );
            team.skaters.push(id);
        }
        for _ in 0..ROSTER_GOALTENDERS {
            let jersey = team.unused_jersey(rng);
            let id = team.pool.add(
                jersey,
                Position::Goaltender,
                0,
                rng.gen_range(60..=90),
                rng.gen_range(1..=25) as f32,
            );
            team.goaltenders.push(id);
        }

        team.regenerate_lines(rng);
        team.set_current_line(0);
        team.pick_starting_goaltender(rng);
        team
    }

    /// Assemble a team from explicit specs. Lines are dealt in roster order,
    /// wrapping around, so callers control line composition through ordering.
    /// The starting goaltender is resolved when a game begins.
    pub fn from_specs(
        city: impl Into<String>,
        name: impl Into<String>,
        skaters: &[PlayerSpec],
        goaltenders: &[PlayerSpec],
    ) -> Result<Self> {
        if skaters.len() < LINE_SIZE {
            return Err(GameError::InvalidRoster(format!(
                "need at least {} skaters, got {}",
                LINE_SIZE,
                skaters.len()
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for spec in skaters.iter().chain(goaltenders) {
            if !seen.insert(spec.jersey_number) {
                return Err(GameError::InvalidRoster(format!(
                    "jersey #{} assigned twice",
                    spec.jersey_number
                )));
            }
        }

        let mut team = Team {
            id: Uuid::new_v4(),
            city: city.into(),
            name: name.into(),
            pool: PlayerPool::default(),
            skaters: Vec::with_capacity(skaters.len()),
            goaltenders: Vec::with_capacity(goaltenders.len()),
            injured_reserve: Vec::new(),
            lines: Vec::with_capacity(LINE_COUNT),
            current_line: 0,
            active_goaltender: None,
            stats: TeamStats::default(),
        };
        for spec in skaters {
            let id = team.pool.add(
                spec.jersey_number,
                Position::Skater,
                spec.offensive_value,
                spec.defensive_value,
                spec.energy,
            );
            team.skaters.push(id);
        }
        for spec in goaltenders {
            let id = team.pool.add(
                spec.jersey_number,
                Position::Goaltender,
                spec.offensive_value,
                spec.defensive_value,
                spec.energy,
            );
            team.goaltenders.push(id);
        }

        let dealt: Vec<Line> = (0..LINE_COUNT)
            .map(|k| {
                let ids = (0..LINE_SIZE)
                    .map(|s| team.skaters[(k * LINE_SIZE + s) % team.skaters.len()])
                    .collect();
                Line::new(ids)
            })
            .collect();
        team.lines = dealt;
        team.set_current_line(0);
        Ok(team)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pool(&self) -> &PlayerPool {
        &self.pool
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.pool.get(id)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn current_line(&self) -> &Line {
        &self.lines[self.current_line]
    }

    pub fn active_goaltender(&self) -> Option<&Player> {
        self.active_goaltender.and_then(|id| self.pool.get(id))
    }

    pub fn skater_ids(&self) -> &[PlayerId] {
        &self.skaters
    }

    pub fn skaters(&self) -> impl Iterator<Item = &Player> {
        self.skaters.iter().filter_map(|&id| self.pool.get(id))
    }

    pub fn goaltenders(&self) -> impl Iterator<Item = &Player> {
        self.goaltenders.iter().filter_map(|&id| self.pool.get(id))
    }

    pub fn injured_reserve(&self) -> impl Iterator<Item = &Player> {
        self.injured_reserve.iter().filter_map(|&id| self.pool.get(id))
    }

    /// Reset to the first line and pick a starting goaltender. Called by the
    /// engine before the opening face-off.
    pub fn prepare_for_game(&mut self, rng: &mut impl Rng) {
        self.set_current_line(0);
        self.pick_starting_goaltender(rng);
    }

    /// Starting pick: highest defensive value among non-injured goaltenders,
    /// no energy requirement. Falls back to an emergency goaltender if the
    /// whole pool is injured.
    pub fn pick_starting_goaltender(&mut self, rng: &mut impl Rng) {
        match self.best_goaltender(None) {
            Some(id) => self.active_goaltender = Some(id),
            None => {
                let id = self.add_emergency_goaltender(rng);
                self.active_goaltender = Some(id);
            }
        }
    }

    /// Lazy re-evaluation: only when the active goaltender is unset, injured,
    /// or under the energy floor, switch to the best qualifying goaltender
    /// (non-injured, energy >= 16, highest defensive value). When nobody
    /// qualifies, synthesize an emergency goaltender.
    pub fn update_active_goaltender(&mut self, rng: &mut impl Rng) {
        let needs_swap = match self.active_goaltender.and_then(|id| self.pool.get(id)) {
            Some(g) => g.injured || g.energy < GOALTENDER_MIN_ENERGY,
            None => true,
        };
        if !needs_swap {
            return;
        }
        match self.best_goaltender(Some(GOALTENDER_MIN_ENERGY)) {
            Some(id) => {
                trace!("{}: goaltender swap to #{}", self, self.jersey_of(id));
                self.active_goaltender = Some(id);
            }
            None => {
                let id = self.add_emergency_goaltender(rng);
                debug!("{}: emergency goaltender #{} pressed into service", self, self.jersey_of(id));
                self.active_goaltender = Some(id);
            }
        }
    }

    /// When the current line's average energy has dropped under the change
    /// threshold the engine calls this: pick the highest-energy line among
    /// those with no injured member, regenerating all four lines first if
    /// every line carries an injury. Returns whether the line rotation
    /// actually changed.
    pub fn select_best_line(&mut self, rng: &mut impl Rng) -> bool {
        let mut candidates: Vec<usize> = (0..self.lines.len())
            .filter(|&i| !self.lines[i].has_injured(&self.pool))
            .collect();
        let mut regenerated = false;
        if candidates.is_empty() {
            self.regenerate_lines(rng);
            candidates = (0..self.lines.len()).collect();
            regenerated = true;
        }

        let mut best = match candidates.first() {
            Some(&i) => i,
            None => return false,
        };
        for &i in candidates.iter().skip(1) {
            if self.lines[i].average_energy(&self.pool) > self.lines[best].average_energy(&self.pool)
            {
                best = i;
            }
        }

        let changed = regenerated || best != self.current_line;
        if changed {
            trace!("{}: line change to line {}", self, best + 1);
        }
        self.set_current_line(best);
        changed
    }

    /// One injury check for the attacking side. Probability follows the
    /// current line's average energy and the period number; on a hit, one of
    /// the line's three lowest-energy skaters goes down for 10..=40 games and
    /// is replaced everywhere by a freshly generated skater. At most one
    /// injury per call. Returns the injured player's jersey number.
    pub fn handle_injury(&mut self, period: u8, rng: &mut impl Rng) -> Option<u8> {
        let line = self.lines.get(self.current_line)?;
        let prob = probability::injury_probability(line.average_energy(&self.pool), period);
        if rng.gen::<f64>() > prob {
            return None;
        }

        let candidates = line.lowest_energy(&self.pool, TOP_SELECTION);
        let victim = *candidates.choose(rng)?;
        let duration = rng.gen_range(10..=40);
        let jersey = self.jersey_of(victim);
        if let Some(p) = self.pool.get_mut(victim) {
            p.injured = true;
            p.injury_games_remaining = duration;
            p.active = false;
        }

        let replacement_jersey = self.unused_jersey(rng);
        let replacement = self.pool.add(
            replacement_jersey,
            Position::Skater,
            rng.gen_range(40..=60),
            rng.gen_range(50..=100),
            rng.gen_range(1..=25) as f32,
        );
        self.skaters.retain(|&id| id != victim);
        self.skaters.push(replacement);
        self.injured_reserve.push(victim);
        for line in &mut self.lines {
            line.replace(victim, replacement);
        }
        let now_active = self.lines[self.current_line].contains(replacement);
        if let Some(p) = self.pool.get_mut(replacement) {
            p.active = now_active;
        }

        self.stats.injuries += 1;
        debug!("{}: #{} injured for {} games, #{} called up", self, jersey, duration, replacement_jersey);
        Some(jersey)
    }

    /// Apply the per-iteration energy update to every rostered skater;
    /// active means membership in the current line. Goaltender energy is
    /// not swept here.
    pub fn update_line_energy(&mut self, rng: &mut impl Rng) {
        let on_ice: Vec<PlayerId> = self.lines[self.current_line].players().to_vec();
        for i in 0..self.skaters.len() {
            let id = self.skaters[i];
            let is_active = on_ice.contains(&id);
            if let Some(p) = self.pool.get_mut(id) {
                p.update_energy(is_active, rng);
                p.active = is_active;
            }
        }
    }

    /// Tick down every reserved player's remaining games; fully recovered
    /// players rejoin the active roster (lines pick them up at the next
    /// regeneration). Returns the jerseys that came back.
    pub fn advance_injury_recovery(&mut self) -> Vec<u8> {
        let mut recovered = Vec::new();
        let reserve = std::mem::take(&mut self.injured_reserve);
        for id in reserve {
            let healed = match self.pool.get_mut(id) {
                Some(p) => {
                    p.injury_games_remaining = p.injury_games_remaining.saturating_sub(1);
                    if p.injury_games_remaining == 0 {
                        p.injured = false;
                        true
                    } else {
                        false
                    }
                }
                None => continue,
            };
            if healed {
                recovered.push(self.jersey_of(id));
                self.skaters.push(id);
            } else {
                self.injured_reserve.push(id);
            }
        }
        for &jersey in &recovered {
            debug!("{}: #{} returns from injury", self, jersey);
        }
        recovered
    }

    /// Bump the given player's lifetime goal count. Returns the jersey for
    /// event bookkeeping.
    pub fn record_goal(&mut self, id: PlayerId) -> Option<u8> {
        let p = self.pool.get_mut(id)?;
        p.goals_scored += 1;
        Some(p.jersey_number)
    }

    /// Zero cumulative statistics and per-player goal counts. Energy and
    /// injury state are untouched.
    pub fn reset_statistics(&mut self) {
        self.stats = TeamStats::default();
        for p in self.pool.iter_mut() {
            p.goals_scored = 0;
        }
    }

    fn set_current_line(&mut self, index: usize) {
        self.current_line = index;
        let on_ice: Vec<PlayerId> = self.lines[index].players().to_vec();
        for i in 0..self.skaters.len() {
            let id = self.skaters[i];
            if let Some(p) = self.pool.get_mut(id) {
                p.active = on_ice.contains(&id);
            }
        }
    }

    /// Re-sample all four lines from the active roster: five distinct
    /// skaters per line, sharing allowed across lines. Line slots keep
    /// roster order so tie-breaks stay stable.
    fn regenerate_lines(&mut self, rng: &mut impl Rng) {
        let resampled: Vec<Line> = (0..LINE_COUNT)
            .map(|_| {
                let mut sample: Vec<PlayerId> =
                    self.skaters.choose_multiple(rng, LINE_SIZE).copied().collect();
                sample.sort_by_key(|&id| self.roster_index(id));
                Line::new(sample)
            })
            .collect();
        self.lines = resampled;
        if self.current_line >= self.lines.len() {
            self.current_line = 0;
        }
    }

    fn roster_index(&self, id: PlayerId) -> usize {
        self.skaters.iter().position(|&p| p == id).unwrap_or(usize::MAX)
    }

    /// First-encountered highest defensive value among non-injured
    /// goaltenders, optionally requiring a minimum energy.
    fn best_goaltender(&self, min_energy: Option<f32>) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, u8)> = None;
        for &id in &self.goaltenders {
            let g = match self.pool.get(id) {
                Some(g) if !g.injured => g,
                _ => continue,
            };
            if let Some(min) = min_energy {
                if g.energy < min {
                    continue;
                }
            }
            if best.map_or(true, |(_, def)| g.defensive_value > def) {
                best = Some((id, g.defensive_value));
            }
        }
        best.map(|(id, _)| id)
    }

    fn add_emergency_goaltender(&mut self, rng: &mut impl Rng) -> PlayerId {
        let jersey = self.unused_jersey(rng);
        let id = self.pool.add(
            jersey,
            Position::Goaltender,
            0,
            rng.gen_range(50..=80),
            ENERGY_MAX,
        );
        self.goaltenders.push(id);
        id
    }

    fn unused_jersey(&self, rng: &mut impl Rng) -> u8 {
        loop {
            let jersey = rng.gen_range(JERSEY_MIN..=JERSEY_MAX);
            if !self.pool.jersey_taken(jersey) {
                return jersey;
            }
        }
    }

    fn jersey_of(&self, id: PlayerId) -> u8 {
        self.pool.get(id).map_or(0, |p| p.jersey_number)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.city, self.name)
    }
}
