//! Interactive hockey league simulator.
//!
//! Builds a 32-team league, then drives the simulation engine from a menu:
//! simulate games, inspect cumulative statistics, tweak what gets printed,
//! reset the books.

use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};

use hg_core::GameEngine;

mod league;
mod report;

use league::League;
use report::DisplaySettings;

#[derive(Parser, Debug)]
#[command(name = "hg_cli")]
#[command(about = "Simulate a hockey league from the terminal", long_about = None)]
struct Args {
    /// Seed for a reproducible run (entropy-seeded when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Warn);
    env_logger::Builder::new().filter_level(level).format_timestamp(None).init();

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    log::info!("creating league");
    let mut league = League::create(&mut rng);
    let engine = GameEngine::default();
    let mut settings = DisplaySettings::default();

    loop {
        println!("\n====== Hockey Game Simulator Menu ======");
        println!("1. Simulate Game(s)");
        println!("2. Show Data");
        println!("3. Simulation Parameters");
        println!("4. Reset Data");
        println!("5. Exit");
        match prompt("Select an option: ").as_str() {
            "1" => simulate_games_menu(&mut league, &engine, &settings, &mut rng),
            "2" => show_data_menu(&league),
            "3" => parameters_menu(&mut settings),
            "4" => {
                league.reset_statistics();
                println!("All team data has been reset.");
            }
            "5" => {
                println!("Exiting the simulator. Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn prompt(text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn random_pair(count: usize, rng: &mut impl Rng) -> (usize, usize) {
    let home = rng.gen_range(0..count);
    let mut away = rng.gen_range(0..count - 1);
    if away >= home {
        away += 1;
    }
    (home, away)
}

fn simulate_games_menu(
    league: &mut League,
    engine: &GameEngine,
    settings: &DisplaySettings,
    rng: &mut impl Rng,
) {
    let games: u32 = prompt("Enter number of games to simulate (default 1): ").parse().unwrap_or(1);

    println!("\nSelect teams for simulation:");
    println!("1. Random teams");
    println!("2. Choose teams");
    let count = league.teams.len();
    let (home_idx, away_idx) = if prompt("Your choice (default random): ") == "2" {
        report::list_teams(&league.teams);
        let first = prompt("Select Team 1 (number): ").parse::<usize>().ok();
        let second = prompt("Select Team 2 (number): ").parse::<usize>().ok();
        match (first, second) {
            (Some(a), Some(b))
                if a != b && (1..=count).contains(&a) && (1..=count).contains(&b) =>
            {
                (a - 1, b - 1)
            }
            _ => {
                println!("Invalid selection. Using random teams.");
                random_pair(count, rng)
            }
        }
    } else {
        random_pair(count, rng)
    };

    let home_label = league.teams[home_idx].to_string();
    let away_label = league.teams[away_idx].to_string();

    for game in 1..=games {
        println!("\n=== Simulating Game {}: {} vs {} ===", game, home_label, away_label);
        let Some((home, away)) = league.pair_mut(home_idx, away_idx) else {
            println!("Teams must be different.");
            return;
        };
        match engine.simulate_game(home, away, rng) {
            Ok(result) => report::print_game(&result, &home_label, &away_label, settings),
            Err(err) => {
                eprintln!("Simulation failed: {}", err);
                return;
            }
        }
    }
}

fn show_data_menu(league: &League) {
    loop {
        println!("\n--- Show Data Menu ---");
        println!("1. List all teams");
        println!("2. Show team statistics");
        println!("3. Back");
        match prompt("Select an option: ").as_str() {
            "1" => report::list_teams(&league.teams),
            "2" => {
                report::list_teams(&league.teams);
                match prompt("Select a team by number: ").parse::<usize>() {
                    Ok(n) if (1..=league.teams.len()).contains(&n) => {
                        report::print_team_stats(&league.teams[n - 1]);
                    }
                    _ => println!("Invalid selection."),
                }
            }
            "3" => return,
            _ => println!("Invalid option. Try again."),
        }
    }
}

fn parameters_menu(settings: &mut DisplaySettings) {
    loop {
        let state = |on: bool| if on { "On" } else { "Off" };
        println!("\n--- Simulation Parameters Menu ---");
        println!("1. Toggle Print Goals (currently: {})", state(settings.print_goals));
        println!("2. Toggle Print Injuries (currently: {})", state(settings.print_injuries));
        println!("3. Toggle Print Line Changes (currently: {})", state(settings.print_line_changes));
        println!("4. Back");
        match prompt("Select an option: ").as_str() {
            "1" => settings.print_goals = !settings.print_goals,
            "2" => settings.print_injuries = !settings.print_injuries,
            "3" => settings.print_line_changes = !settings.print_line_changes,
            "4" => return,
            _ => println!("Invalid option. Try again."),
        }
    }
}
