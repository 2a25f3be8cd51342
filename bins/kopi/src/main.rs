//! Kopi CLI - cafe recommendations from the terminal
//!
//! Loads the signed-in user's recommendations, enriches them with cafe
//! details and ranks them by rating, distance and facilities.

use clap::{Args, Parser, Subcommand, ValueEnum};
use kopi_core::config::Config;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{distance, facilities, recommend};

/// Cafe recommendations, ranked
#[derive(Parser)]
#[command(name = "kopi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Path to kopi.toml
    #[arg(short, long, global = true, env = "KOPI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ranked recommendations for a user
    Recommend(RecommendArgs),

    /// List the facilities offered by a user's recommended cafes
    Facilities {
        /// User to load recommendations for
        #[arg(short, long, env = "KOPI_USER_ID")]
        user: Option<String>,
    },

    /// Great-circle distance between two points
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },
}

#[derive(Args)]
pub struct RecommendArgs {
    /// User to load recommendations for
    #[arg(short, long, env = "KOPI_USER_ID")]
    pub user: Option<String>,

    /// Your latitude (overrides [location] in kopi.toml)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Your longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Sort by rating
    #[arg(long, value_enum)]
    pub sort: Option<RatingArg>,

    /// Sort by distance (ignored when your location is unknown)
    #[arg(long, value_enum)]
    pub distance: Option<DistanceArg>,

    /// Only show cafes offering this facility (repeatable)
    #[arg(long = "facility", value_name = "LABEL")]
    pub facilities: Vec<String>,

    /// Number of cafes to show (overrides [ranking] top_n)
    #[arg(short = 'n', long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RatingArg {
    /// Best rated first
    RatingDesc,
    /// Worst rated first
    RatingAsc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistanceArg {
    /// Closest first
    Nearest,
    /// Farthest first
    Farthest,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Distance { lat1, lng1, lat2, lng2 } => {
            init_logging(cli.verbose, None);
            distance::run(lat1, lng1, lat2, lng2, cli.format)
        }
        Commands::Recommend(args) => match load_config(cli.config.as_deref(), cli.verbose) {
            Ok(config) => recommend::run(args, &config, cli.format).await,
            Err(err) => Err(err.into()),
        },
        Commands::Facilities { user } => match load_config(cli.config.as_deref(), cli.verbose) {
            Ok(config) => facilities::run(user, &config, cli.format).await,
            Err(err) => Err(err.into()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, cli.format),
    }
}

fn load_config(path: Option<&std::path::Path>, verbose: u8) -> kopi_core::Result<Config> {
    let config = Config::load(path);
    init_logging(verbose, config.as_ref().ok());
    let config = config?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }
    Ok(config)
}

fn init_logging(verbose: u8, config: Option<&Config>) {
    let mut telemetry = kopi_telemetry::TelemetryConfig::default();
    if let Some(config) = config {
        telemetry.log_level.clone_from(&config.schema.logging.level);
        telemetry.json = config.schema.logging.json;
    }
    if let Err(err) = kopi_telemetry::init_with_config(telemetry.with_verbosity(verbose)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), err);
    }
}

fn report(err: &anyhow::Error, format: Format) -> ExitCode {
    match err.downcast_ref::<kopi_core::Error>() {
        Some(core) => {
            tracing::debug!(code = %core.code, "Command failed");
            let exit = ExitCode::from(u8::try_from(core.exit_code()).unwrap_or(1));
            if format == Format::Json {
                match serde_json::to_string_pretty(&core.to_report()) {
                    Ok(json) => {
                        println!("{json}");
                        return exit;
                    }
                    Err(encode) => tracing::warn!(error = %encode, "Could not encode error report"),
                }
            }
            output::Status::error(&core.message);
            if let Some(context) = &core.context {
                output::Status::hint(context);
            }
            if let Some(suggestion) = &core.suggestion {
                output::Status::hint(suggestion);
            }
            exit
        }
        None => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
