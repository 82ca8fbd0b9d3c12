use clap::Parser;
use serde::Serialize;
use tennis_mdp::utils::error::ErrorSeverity;
use tennis_mdp::utils::logger::{self, LogFormat};
use tennis_mdp::utils::validation::validate_path;
use tennis_mdp::{
    CliConfig, Command, EngineConfig, EngineError, MatchFormat, Matchup, OutputFormat,
    PredictionEngine, Result, StaticRatings, WinProbability,
};

fn main() {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    match format {
        OutputFormat::Json => logger::init_logger(LogFormat::Json, cli.verbose),
        OutputFormat::Text => logger::init_logger(LogFormat::Compact, cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli, &config, format) {
        tracing::error!("{} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run(cli: &CliConfig, config: &EngineConfig, format: OutputFormat) -> Result<()> {
    let engine = config.prediction_engine()?;

    match &cli.command {
        Command::Game { serve } => {
            let hold = engine.game(*serve)?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "serve": serve, "hold": hold }))?,
                OutputFormat::Text => println!("Server holds with probability {:.6}", hold),
            }
        }
        Command::Tiebreak { p1, p2 } => {
            let result = engine.tiebreak(*p1, *p2)?;
            emit(format, "tiebreak", &result)?;
        }
        Command::Set { p1, p2 } => {
            let breakdown = engine.set_breakdown(*p1, *p2)?;
            match format {
                OutputFormat::Json => print_json(&breakdown)?,
                OutputFormat::Text => {
                    println!(
                        "Hold probabilities: player 1 {:.6}, player 2 {:.6}",
                        breakdown.player1_hold, breakdown.player2_hold
                    );
                    println!("Reach 6-6: {:.6}", breakdown.tiebreak_reached);
                    print_pair("set", &breakdown.set_win());
                }
            }
        }
        Command::Match { p1, p2, best_of } => {
            let engine = match best_of {
                Some(sets) => {
                    let match_format = MatchFormat::from_sets(*sets).ok_or_else(|| {
                        EngineError::validation("best_of", sets, "Value must be 3 or 5")
                    })?;
                    PredictionEngine::new(match_format)
                        .with_sum_tolerance(config.engine.sum_tolerance)
                }
                None => engine,
            };
            let result = engine.predict(*p1, *p2)?;
            emit(format, "match", &result)?;
        }
        Command::Predict {
            roster,
            player1,
            player2,
        } => {
            validate_path("roster", roster)?;
            let ratings = StaticRatings::from_file(roster)?;
            let matchup = Matchup::new(ratings, config.matchup.clone(), engine);
            let prediction = matchup.predict(player1, player2)?;
            match format {
                OutputFormat::Json => print_json(&prediction)?,
                OutputFormat::Text => {
                    println!(
                        "{} serve {:.4} vs {} serve {:.4}",
                        prediction.player1.name,
                        prediction.player1_serve,
                        prediction.player2.name,
                        prediction.player2_serve
                    );
                    print_pair("match", &prediction.result);
                }
            }
        }
    }

    Ok(())
}

fn emit(format: OutputFormat, unit: &str, result: &WinProbability) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Text => {
            print_pair(unit, result);
            Ok(())
        }
    }
}

fn print_pair(unit: &str, result: &WinProbability) {
    println!("Player 1 wins the {} with probability {:.6}", unit, result.player1);
    println!("Player 2 wins the {} with probability {:.6}", unit, result.player2);
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
