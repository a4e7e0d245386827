//! Shotchart - command line front end
//!
//! Each invocation is one dashboard action: render a chart or list what
//! the data holds.

use std::process::ExitCode;

use shotchart::cli::{CliArgs, Command, print_help};
use shotchart::{Session, Settings, ShotChartError, init_logging};

fn main() -> ExitCode {
    let cli = match CliArgs::from_env() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };
    init_logging(cli.verbose);

    if cli.command == Command::Help {
        print_help();
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ShotChartError::NoData { missing }) => {
            println!("No data available. Missing season files:");
            for path in missing {
                println!("  {}", path.display());
            }
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CliArgs) -> shotchart::Result<()> {
    let settings = match &cli.settings {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load(),
    };
    let default_style = settings.default_style()?;
    let session = Session::new(settings)?;

    match cli.command {
        Command::Players { season } => {
            let players = session.players(season)?;
            println!("{} players ({})", players.len(), season);
            for name in players {
                println!("  {}", name);
            }
        }
        Command::Teams { season } => {
            let teams = session.teams(season)?;
            println!("{} teams ({})", teams.len(), season);
            for name in teams {
                println!("  {}", name);
            }
        }
        Command::Games { team, season } => {
            let games = session.games(&team, season)?;
            if games.is_empty() {
                println!("No games for {} in {}", team, season);
                return Ok(());
            }
            println!("{} games for {} in {}", games.len(), team, season);
            println!("  {:<12} {:<10} {:<28} {:>4}", "GAME_ID", "DATE", "OPPONENT", "FGA");
            for game in games {
                let opponent = game
                    .opponent
                    .unwrap_or_else(|| format!("{} @ {}", game.away_team, game.home_team));
                println!(
                    "  {:<12} {:<10} {:<28} {:>4}",
                    game.game_id, game.date, opponent, game.attempts
                );
            }
        }
        command => {
            let Some(request) = command.into_request(default_style) else {
                return Ok(());
            };
            println!("Rendering {} ({})", request.subject.title(), request.style);
            let output = session.render_to(&request, cli.out.as_deref())?;
            output.summary.print();
            println!();
            println!("Chart: {}", output.image_path.display());
            println!("Stats: {}", output.summary_path.display());
        }
    }

    Ok(())
}
