//! Season contact sheet: one chart per season for a player, tiled together.
//!
//! Usage: cargo run --bin season_sheet -- "<PLAYER>" [--style kde] [--cols 4]
//!        [--settings FILE] [--out FILE]

use std::path::PathBuf;
use std::process::ExitCode;

use rayon::prelude::*;
use shotchart::dashboard::{ensure_parent, sanitize_file_name};
use shotchart::{
    ChartRequest, ChartSubject, PlotStyle, SeasonChoice, Session, Settings, ShotChartError,
    combine_images, init_logging,
};
use tracing::warn;

struct SheetConfig {
    player: String,
    style: Option<PlotStyle>,
    cols: u32,
    settings: Option<PathBuf>,
    out: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<SheetConfig, String> {
    let mut config = SheetConfig {
        player: String::new(),
        style: None,
        cols: 4,
        settings: None,
        out: None,
        verbose: false,
    };
    let mut name_parts = Vec::new();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" => {
                if let Some(value) = args.next() {
                    config.style = Some(value.parse().map_err(|e: ShotChartError| e.to_string())?);
                }
            }
            "--cols" => {
                if let Some(value) = args.next() {
                    config.cols = value.parse().map_err(|_| format!("bad --cols {:?}", value))?;
                }
            }
            "--settings" => config.settings = args.next().map(PathBuf::from),
            "--out" | "-o" => config.out = args.next().map(PathBuf::from),
            "--verbose" | "-v" => config.verbose = true,
            _ => name_parts.push(arg),
        }
    }

    if name_parts.is_empty() {
        return Err("usage: season_sheet <PLAYER> [--style simple|kde|hex] [--cols N] [--out FILE]".into());
    }
    config.player = name_parts.join(" ");
    Ok(config)
}

fn main() -> ExitCode {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };
    init_logging(config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SheetConfig) -> shotchart::Result<()> {
    let settings = match &config.settings {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load(),
    };
    let style = match config.style {
        Some(style) => style,
        None => settings.default_style()?,
    };
    let session = Session::new(settings)?;

    // Load everything up front: a missing season stops the sheet
    let dataset = session.cache().all_seasons()?;
    let seasons: Vec<i32> = dataset
        .seasons()
        .into_iter()
        .filter(|&season| {
            dataset
                .iter()
                .any(|r| r.season == season && r.player_name == config.player)
        })
        .collect();

    if seasons.is_empty() {
        println!("No shots found for {}", config.player);
        return Ok(());
    }

    println!(
        "Rendering {} season charts for {} ({})",
        seasons.len(),
        config.player,
        style
    );

    let charts: Vec<_> = seasons
        .par_iter()
        .map(|&season| {
            let request = ChartRequest::new(
                ChartSubject::Player {
                    name: config.player.clone(),
                    season: SeasonChoice::Year(season),
                },
                style,
            );
            session.render(&request).map(|chart| (season, chart))
        })
        .collect::<shotchart::Result<_>>()?;

    for (season, chart) in &charts {
        if chart.summary.attempts == 0 {
            warn!("{} has no shots in {}", config.player, season);
        }
        println!("  {}  {}", season, chart.summary.subtitle());
    }

    let images: Vec<_> = charts.into_iter().map(|(_, chart)| chart.image).collect();
    let Some(sheet) = combine_images(&images, config.cols) else {
        return Ok(());
    };

    let out = config.out.clone().unwrap_or_else(|| {
        session.settings().output_dir.join(format!(
            "sheet_{}_{}.png",
            sanitize_file_name(&config.player),
            style
        ))
    });
    ensure_parent(&out)?;
    sheet.save(&out)?;
    println!("Saved {}", out.display());
    Ok(())
}
