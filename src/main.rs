use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use navdex::core::log::init_logging;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for navdex::AppCommand {
    fn from(cmd: Commands) -> navdex::AppCommand {
        match cmd {
            Commands::Serve { bind } => navdex::AppCommand::Serve { bind },
            Commands::Search {
                query,
                offset,
                limit,
            } => navdex::AppCommand::Search {
                query,
                offset,
                limit,
            },
            Commands::Show { serial_number } => navdex::AppCommand::Show { serial_number },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the NAV JSON API
    Serve {
        /// Address to listen on, overrides the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Search schemes by scheme name or fund house
    Search {
        query: String,
        /// Number of matches to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Maximum number of matches to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a single scheme by serial number
    Show { serial_number: u32 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The server logs by default; one-shot commands keep stdout for their output
    let default_level = match cli.command {
        Some(Commands::Serve { .. }) => LevelFilter::INFO,
        _ => LevelFilter::OFF,
    };
    init_logging(cli.verbose, default_level);

    let result = match cli.command {
        Some(Commands::Setup) => navdex::cli::setup::setup(),
        Some(cmd) => navdex::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
