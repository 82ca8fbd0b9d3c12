use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "tennis-mdp")]
#[command(about = "Tennis match odds from serve-point win probabilities")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Probability that the server holds a service game
    Game {
        #[arg(long)]
        serve: f64,
    },
    /// Tiebreak odds with player 1 serving first
    Tiebreak {
        #[arg(long)]
        p1: f64,
        #[arg(long)]
        p2: f64,
    },
    /// Set odds with player 1 serving first
    Set {
        #[arg(long)]
        p1: f64,
        #[arg(long)]
        p2: f64,
    },
    /// Match odds
    Match {
        #[arg(long)]
        p1: f64,
        #[arg(long)]
        p2: f64,
        /// Number of sets, 3 or 5; overrides the config file
        #[arg(long)]
        best_of: Option<u8>,
    },
    /// Match odds for two players from a roster file
    Predict {
        #[arg(long)]
        roster: String,
        #[arg(long)]
        player1: String,
        #[arg(long)]
        player2: String,
    },
}
