//! Human-readable rendering of game results and team statistics.

use hg_core::{GameEventType, GameResult, Player, Team};

/// Which recorded events get echoed to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct DisplaySettings {
    pub print_goals: bool,
    pub print_injuries: bool,
    pub print_line_changes: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { print_goals: true, print_injuries: true, print_line_changes: false }
    }
}

pub fn print_game(result: &GameResult, home: &str, away: &str, settings: &DisplaySettings) {
    for event in &result.events {
        let team = if event.is_home_team { home } else { away };
        let jersey = event.jersey_number.unwrap_or(0);
        match event.event_type {
            GameEventType::Goal if settings.print_goals => {
                println!("GOAL! {} scores via player #{}!", team, jersey);
            }
            GameEventType::Injury if settings.print_injuries => {
                println!("{}: player #{} got injured!", team, jersey);
            }
            GameEventType::LineChange if settings.print_line_changes => {
                println!("{}: line change due to low energy.", team);
            }
            GameEventType::ShootoutGoal if settings.print_goals => {
                let round = event.round.unwrap_or(0);
                println!("Shootout round {}: {} scores via player #{}!", round, team, jersey);
            }
            GameEventType::ShootoutMiss if settings.print_goals => {
                let round = event.round.unwrap_or(0);
                println!("Shootout round {}: {} miss (player #{}).", round, team, jersey);
            }
            _ => {}
        }
    }

    for (i, scores) in result.period_scores.iter().enumerate() {
        let label = if i < 3 { format!("Period {}", i + 1) } else { "Overtime".to_string() };
        println!("{}: {} {} - {} {}", label, home, scores.home, away, scores.away);
    }
    if let Some(so) = &result.shootout {
        println!("Shootout ({} rounds): {} {} - {} {}", so.rounds, home, so.goals_home, away, so.goals_away);
    }
    println!("=== Final Score: {} {} - {} {} ===", home, result.score_home, away, result.score_away);
    println!("Game decided in {}.", result.decision.as_str());
}

pub fn print_team_stats(team: &Team) {
    println!("\n=== {} Statistics ===", team);
    println!("Games Played: {}", team.stats.games_played);
    println!("Regular Wins: {}", team.stats.regular_wins);
    println!("Overtime Wins: {}", team.stats.overtime_wins);
    println!("Shootout Wins: {}", team.stats.shootout_wins);
    println!("Regular Losses: {}", team.stats.regular_losses);
    println!("Overtime Losses: {}", team.stats.overtime_losses);
    println!("Shootout Losses: {}", team.stats.shootout_losses);
    println!("Goals For: {}", team.stats.goals_for);
    println!("Goals Against: {}", team.stats.goals_against);
    println!("Total Injuries: {}", team.stats.injuries);

    let mut skaters: Vec<&Player> = team.skaters().collect();
    skaters.sort_by(|a, b| b.goals_scored.cmp(&a.goals_scored));
    println!("\nSkaters (sorted by goals scored):");
    for p in skaters {
        println!(
            "Player #{} - Goals: {}, Offensive Value: {}",
            p.jersey_number, p.goals_scored, p.offensive_value
        );
    }

    let mut goaltenders: Vec<&Player> = team.goaltenders().collect();
    goaltenders.sort_by(|a, b| b.defensive_value.cmp(&a.defensive_value));
    println!("\nGoaltenders (sorted by defensive value):");
    for g in goaltenders {
        println!("Player #{} - Defensive Value: {}", g.jersey_number, g.defensive_value);
    }

    let injured: Vec<&Player> = team.injured_reserve().collect();
    if !injured.is_empty() {
        println!("\nInjured Reserve:");
        for p in injured {
            println!("Player #{} - Games Remaining: {}", p.jersey_number, p.injury_games_remaining);
        }
    }
}

pub fn list_teams(teams: &[Team]) {
    println!("\nAvailable Teams:");
    for (i, team) in teams.iter().enumerate() {
        println!("{}. {}", i + 1, team);
    }
}
