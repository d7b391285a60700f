// fitleague entry point.
//
// 1. Parse arguments
// 2. Initialize tracing (stderr; stdout carries the JSON output)
// 3. Load config, copying defaults on first run
// 4. Run the subcommand and print its document

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fitleague_cli::{commands, config, inputs};
use fitleague_core::standings::ScoringFormat;
use tracing::info;

#[derive(Parser)]
#[command(name = "fitleague")]
#[command(author, version, about = "League scheduling and standings", long_about = None)]
struct Cli {
    /// Directory holding config/ and defaults/ (default: current directory)
    #[arg(short, long, env = "FITLEAGUE_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rules document for the configured league
    Rules,
    /// Generate the season calendar
    Schedule(ScheduleArgs),
    /// Compute standings from a results file
    Standings(StandingsArgs),
}

#[derive(Parser)]
struct ScheduleArgs {
    /// JSON array of roster members
    #[arg(long)]
    roster: PathBuf,

    /// Number of weeks (default: the configured season length)
    #[arg(long)]
    weeks: Option<u32>,

    /// Seed for the random partner draw (overrides [schedule].seed)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser)]
struct StandingsArgs {
    /// JSON array of roster members
    #[arg(long)]
    roster: PathBuf,

    /// JSON object with `matches` and `participants`
    #[arg(long)]
    results: PathBuf,

    /// Scoring format (default: [league].scoring_format, then the sport's own)
    #[arg(long)]
    format: Option<ScoringFormat>,

    /// Print the doubles team table instead of per-member standings
    #[arg(long)]
    teams: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = match &cli.dir {
        Some(dir) => config::load_config_at(dir),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, sport={}, {} weeks",
        config.league.name, config.sport, config.league.season_weeks
    );

    let output = match cli.command {
        Commands::Rules => commands::rules(&config)?,
        Commands::Schedule(args) => {
            let roster = inputs::load_roster(&args.roster)?;
            commands::schedule(&config, &roster, args.weeks, args.seed)?
        }
        Commands::Standings(args) => {
            let roster = inputs::load_roster(&args.roster)?;
            let results = inputs::load_results(&args.results)?;
            commands::standings(&config, &roster, &results, args.format, args.teams)?
        }
    };

    println!("{output}");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("fitleague=info,fitleague_cli=info,fitleague_core=info,warn")
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
