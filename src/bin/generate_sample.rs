//! Synthetic shot data for demos and smoke tests.
//!
//! Writes `NBA_<year>_Shots.csv` files with the same columns as the real
//! dataset, for a small fictional league.
//!
//! Usage: cargo run --bin generate_sample -- [--dir data] [--from 2004]
//!        [--to 2023] [--games 20] [--seed N]

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use shotchart::constants::{DEFAULT_DATA_DIR, FIRST_SEASON, LAST_SEASON, season_file_name};
use shotchart::init_logging;
use tracing::info;

const TEAMS: [(&str, &str); 6] = [
    ("Miami Heat", "MIA"),
    ("Boston Celtics", "BOS"),
    ("San Antonio Spurs", "SAS"),
    ("Golden State Warriors", "GSW"),
    ("Denver Nuggets", "DEN"),
    ("New York Knicks", "NYK"),
];

const PLAYERS_PER_TEAM: usize = 5;
const SHOTS_PER_TEAM_GAME: usize = 85;

/// Shot profile: (weight, min distance ft, max distance ft, make chance)
const PROFILES: [(u32, f64, f64, f64); 4] = [
    (35, 0.0, 4.0, 0.64),
    (15, 4.0, 14.0, 0.41),
    (15, 14.0, 22.0, 0.40),
    (35, 22.5, 27.0, 0.36),
];

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct SampleRow<'a> {
    season_1: i32,
    season_2: String,
    team_name: &'a str,
    player_name: &'a str,
    game_date: String,
    game_id: i64,
    home_team: &'a str,
    away_team: &'a str,
    shot_made: &'static str,
    loc_x: f64,
    loc_y: f64,
}

struct GenConfig {
    dir: PathBuf,
    from: i32,
    to: i32,
    games: usize,
    seed: Option<u64>,
}

fn parse_args() -> GenConfig {
    let mut config = GenConfig {
        dir: PathBuf::from(DEFAULT_DATA_DIR),
        from: FIRST_SEASON,
        to: LAST_SEASON,
        games: 20,
        seed: None,
    };
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dir" => {
                if let Some(value) = args.next() {
                    config.dir = PathBuf::from(value);
                }
            }
            "--from" => config.from = args.next().and_then(|v| v.parse().ok()).unwrap_or(config.from),
            "--to" => config.to = args.next().and_then(|v| v.parse().ok()).unwrap_or(config.to),
            "--games" => {
                config.games = args.next().and_then(|v| v.parse().ok()).unwrap_or(config.games)
            }
            "--seed" => config.seed = args.next().and_then(|v| v.parse().ok()),
            _ => {}
        }
    }
    config
}

fn player_names(team_code: &str) -> Vec<String> {
    (1..=PLAYERS_PER_TEAM)
        .map(|n| format!("{} Player {}", team_code, n))
        .collect()
}

/// Random location in raw feet (hoop at x=0, y=4.5) plus made flag
fn random_shot(rng: &mut StdRng) -> (f64, f64, bool) {
    let total: u32 = PROFILES.iter().map(|p| p.0).sum();
    let mut pick = rng.gen_range(0..total);
    let mut profile = PROFILES[0];
    for p in PROFILES {
        if pick < p.0 {
            profile = p;
            break;
        }
        pick -= p.0;
    }

    let (_, min_d, max_d, make_chance) = profile;
    let dist = rng.gen_range(min_d..max_d);
    // Angle measured from the baseline; stay in front of it
    let angle = rng.gen_range(0.05..std::f64::consts::PI - 0.05);
    let x = (dist * angle.cos()).clamp(-24.9, 24.9);
    let y = (dist * angle.sin() + 4.5).max(0.0);
    let made = rng.gen_range(0.0..1.0) < make_chance;
    (x, y, made)
}

fn write_season(config: &GenConfig, season: i32, rng: &mut StdRng) -> Result<usize, String> {
    let path = config.dir.join(season_file_name(season));
    let mut writer = csv::Writer::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;

    let season_label = format!("{}-{:02}", season - 1, season.rem_euclid(100));
    let start = NaiveDate::from_ymd_opt(season - 1, 11, 1)
        .ok_or_else(|| format!("bad season {}", season))?;
    let rosters: Vec<Vec<String>> = TEAMS.iter().map(|(_, code)| player_names(code)).collect();

    let mut rows = 0;
    for game in 0..config.games {
        let home = rng.gen_range(0..TEAMS.len());
        let mut away = rng.gen_range(0..TEAMS.len() - 1);
        if away >= home {
            away += 1;
        }
        let date = start + Duration::days((game * 3) as i64);
        let game_id = (season as i64 % 100) * 1_000_000 + 20_000 + game as i64;

        for team in [home, away] {
            for _ in 0..SHOTS_PER_TEAM_GAME {
                let (x, y, made) = random_shot(rng);
                let roster = &rosters[team];
                let player = &roster[rng.gen_range(0..roster.len())];
                writer
                    .serialize(SampleRow {
                        season_1: season,
                        season_2: season_label.clone(),
                        team_name: TEAMS[team].0,
                        player_name: player,
                        game_date: date.format("%m-%d-%Y").to_string(),
                        game_id,
                        home_team: TEAMS[home].1,
                        away_team: TEAMS[away].1,
                        shot_made: if made { "TRUE" } else { "FALSE" },
                        loc_x: (x * 10.0).round() / 10.0,
                        loc_y: (y * 10.0).round() / 10.0,
                    })
                    .map_err(|e| e.to_string())?;
                rows += 1;
            }
        }
    }
    writer.flush().map_err(|e| e.to_string())?;
    Ok(rows)
}

fn main() -> ExitCode {
    init_logging(false);
    let config = parse_args();
    if config.from > config.to {
        eprintln!("--from {} is after --to {}", config.from, config.to);
        return ExitCode::from(2);
    }
    if let Err(e) = fs::create_dir_all(&config.dir) {
        eprintln!("Failed to create {}: {}", config.dir.display(), e);
        return ExitCode::FAILURE;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!(
        "Generating seasons {}-{} into {} ({} games each)",
        config.from,
        config.to,
        config.dir.display(),
        config.games
    );
    for season in config.from..=config.to {
        match write_season(&config, season, &mut rng) {
            Ok(rows) => info!("{}: {} shots", season, rows),
            Err(e) => {
                eprintln!("Failed to write season {}: {}", season, e);
                return ExitCode::FAILURE;
            }
        }
    }
    println!("Done.");
    ExitCode::SUCCESS
}
