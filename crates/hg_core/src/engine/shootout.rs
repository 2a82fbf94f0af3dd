//! Shootout resolution: alternating attempts, then sudden death.

use log::{debug, error};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{GameError, Result};
use crate::models::events::GameEvent;
use crate::models::game_result::{ShootoutAttempt, ShootoutResult};
use crate::models::player::PlayerId;
use crate::models::team::Team;

/// Rounds both teams always shoot before sudden death can end the game.
pub const MIN_ROUNDS: u32 = 3;

/// Run the full shootout, home shooting first each round. The loop is
/// almost-surely finite; `round_cap` converts a pathological never-decided
/// matchup into an error instead of spinning forever.
pub(crate) fn run(
    round_cap: u32,
    home: &mut Team,
    away: &mut Team,
    events: &mut Vec<GameEvent>,
    rng: &mut impl Rng,
) -> Result<ShootoutResult> {
    let mut result = ShootoutResult::default();
    let mut round: u32 = 1;
    loop {
        if round > round_cap {
            error!(
                "shootout between {} and {} still tied after {} rounds",
                home, away, round_cap
            );
            return Err(GameError::ShootoutStalled { rounds: round_cap });
        }

        if let Some(attempt) = attempt(round, home, away, true, events, rng) {
            if attempt.scored {
                result.goals_home += 1;
            }
            result.attempts.push(attempt);
        }
        if let Some(attempt) = attempt(round, away, home, false, events, rng) {
            if attempt.scored {
                result.goals_away += 1;
            }
            result.attempts.push(attempt);
        }

        if round >= MIN_ROUNDS && result.goals_home != result.goals_away {
            result.rounds = round;
            return Ok(result);
        }
        round += 1;
    }
}

/// One attempt: a random healthy skater against the defending goaltender.
/// The goal rule is deterministic — the shooter scores exactly when their
/// offensive value exceeds the goaltender's defensive value.
fn attempt(
    round: u32,
    attacker: &mut Team,
    defender: &mut Team,
    attacker_is_home: bool,
    events: &mut Vec<GameEvent>,
    rng: &mut impl Rng,
) -> Option<ShootoutAttempt> {
    let shooters: Vec<PlayerId> = attacker
        .skaters()
        .filter(|p| !p.injured && p.position.is_skater())
        .map(|p| p.id)
        .collect();
    let shooter = *shooters.choose(rng)?;
    defender.update_active_goaltender(rng);

    let (jersey_number, offense) =
        attacker.player(shooter).map(|p| (p.jersey_number, p.offensive_value))?;
    let goalie_defense = defender.active_goaltender().map(|g| g.defensive_value)?;
    let scored = i16::from(goalie_defense) - i16::from(offense) < 0;

    if scored {
        debug!("shootout round {}: {} scores via #{}", round, attacker, jersey_number);
        events.push(GameEvent::shootout_goal(round, attacker_is_home, jersey_number));
    } else {
        events.push(GameEvent::shootout_miss(round, attacker_is_home, jersey_number));
    }
    Some(ShootoutAttempt { round, is_home_team: attacker_is_home, jersey_number, scored })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::team::PlayerSpec;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spec(jersey: u8, offense: u8, defense: u8, energy: f32) -> PlayerSpec {
        PlayerSpec {
            jersey_number: jersey,
            offensive_value: offense,
            defensive_value: defense,
            energy,
        }
    }

    fn team(offense: u8, goalie_defense: u8) -> Team {
        let skaters: Vec<PlayerSpec> =
            (0..5).map(|i| spec(10 + i, offense, 50, 20.0)).collect();
        let goaltenders = vec![spec(30, 0, goalie_defense, 25.0)];
        Team::from_specs("Test", "Team", &skaters, &goaltenders).expect("valid roster")
    }

    #[test]
    fn test_one_sided_shootout_ends_at_three_rounds() {
        // Home shooters (80) beat the away goaltender (70); away shooters
        // (60) never beat the home goaltender (70).
        let mut home = team(80, 70);
        let mut away = team(60, 70);
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut events = Vec::new();
        home.prepare_for_game(&mut rng);
        away.prepare_for_game(&mut rng);

        let result = run(1000, &mut home, &mut away, &mut events, &mut rng).expect("decided");
        assert_eq!(result.rounds, MIN_ROUNDS);
        assert_eq!(result.goals_home, 3);
        assert_eq!(result.goals_away, 0);
        assert_eq!(result.attempts.len(), 6);
        assert_ne!(result.goals_home, result.goals_away);
    }

    #[test]
    fn test_early_lead_still_plays_three_rounds() {
        let mut home = team(80, 70);
        let mut away = team(60, 70);
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut events = Vec::new();
        home.prepare_for_game(&mut rng);
        away.prepare_for_game(&mut rng);

        // Home leads 1-0 after round one but the shootout must run the
        // minimum three rounds regardless.
        let result = run(1000, &mut home, &mut away, &mut events, &mut rng).expect("decided");
        assert!(result.rounds >= MIN_ROUNDS);
        assert!(result.attempts.iter().any(|a| a.round == 3));
    }

    #[test]
    fn test_never_decided_matchup_hits_the_cap() {
        // Both sides always score: the score stays level every round.
        let mut home = team(90, 40);
        let mut away = team(90, 40);
        let mut rng = ChaCha8Rng::seed_from_u64(29);
        let mut events = Vec::new();
        home.prepare_for_game(&mut rng);
        away.prepare_for_game(&mut rng);

        let result = run(25, &mut home, &mut away, &mut events, &mut rng);
        assert!(matches!(result, Err(GameError::ShootoutStalled { rounds: 25 })));
    }

    proptest::proptest! {
        /// Whatever the rosters look like, a shootout that finishes is
        /// decisive: at least three rounds, scores differ, and both sides
        /// shot every round. Degenerate matchups (both sides always or never
        /// scoring) are the only way to hit the cap.
        #[test]
        fn prop_finished_shootout_is_decisive(
            seed in proptest::prelude::any::<u64>(),
            home_off in proptest::collection::vec(0u8..=100, 5),
            away_off in proptest::collection::vec(0u8..=100, 5),
            home_def in 0u8..=100,
            away_def in 0u8..=100,
        ) {
            let build = |offs: &[u8], def: u8| {
                let skaters: Vec<PlayerSpec> = offs
                    .iter()
                    .enumerate()
                    .map(|(i, &off)| spec(10 + i as u8, off, 50, 20.0))
                    .collect();
                Team::from_specs("Prop", "Team", &skaters, &[spec(30, 0, def, 25.0)])
                    .expect("valid roster")
            };
            let mut home = build(&home_off, home_def);
            let mut away = build(&away_off, away_def);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut events = Vec::new();
            home.prepare_for_game(&mut rng);
            away.prepare_for_game(&mut rng);

            if let Ok(result) = run(200, &mut home, &mut away, &mut events, &mut rng) {
                proptest::prop_assert!(result.rounds >= MIN_ROUNDS);
                proptest::prop_assert_ne!(result.goals_home, result.goals_away);
                proptest::prop_assert_eq!(result.attempts.len() as u32, result.rounds * 2);
            }
        }
    }

    #[test]
    fn test_attempts_record_round_and_side() {
        let mut home = team(80, 70);
        let mut away = team(60, 70);
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut events = Vec::new();
        home.prepare_for_game(&mut rng);
        away.prepare_for_game(&mut rng);

        let result = run(1000, &mut home, &mut away, &mut events, &mut rng).expect("decided");
        for (i, attempt) in result.attempts.iter().enumerate() {
            assert_eq!(attempt.round as usize, i / 2 + 1);
            assert_eq!(attempt.is_home_team, i % 2 == 0);
        }
        // Events mirror the attempts one to one.
        assert_eq!(events.len(), result.attempts.len());
    }
}
