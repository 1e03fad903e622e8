//! Scorebook CLI
//!
//! Replays a JSON match script through the scoring engine and prints
//! scorecards, results and replay checks.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod render;
mod script;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use scorebook_ledger::Ledger;
use scorebook_match::Match;
use scorebook_projection::{ViewConfig, verify_replay};
use script::MatchScript;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scorebook")]
#[command(about = "Scorebook - ball-by-ball cricket scoring", long_about = None)]
struct Cli {
    /// Log level for scorebook crates (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print innings scorecards
    Scorecard {
        /// Path to match script
        #[arg(short, long)]
        file: PathBuf,
        /// Innings to show (1 or 2); both when omitted
        #[arg(short, long)]
        innings: Option<u8>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Show every ball in the recent-balls feed
        #[arg(long)]
        all: bool,
    },
    /// Print the match result
    Result {
        /// Path to match script
        #[arg(short, long)]
        file: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Fold each ledger twice and compare snapshot digests
    Replay {
        /// Path to match script
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Check that every event in a script is accepted
    Validate {
        /// Path to match script
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("scorebook={}", level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("scorebook=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(file: &Path) -> Result<Match> {
    MatchScript::load(file)?.play()
}

fn innings_numbers(m: &Match, innings: Option<u8>) -> Result<Vec<u8>> {
    match innings {
        Some(n @ (1 | 2)) => Ok(vec![n]),
        Some(n) => bail!("innings must be 1 or 2, got {}", n),
        None if m.innings(2).is_some() => Ok(vec![1, 2]),
        None => Ok(vec![1]),
    }
}

fn scorecard(file: &Path, innings: Option<u8>, json: bool, all: bool) -> Result<()> {
    let m = load(file)?;
    let config = if all {
        ViewConfig::default().show_all()
    } else {
        ViewConfig::default()
    };
    let cards: Vec<_> = innings_numbers(&m, innings)?
        .into_iter()
        .map(|n| m.scorecard(n, &config))
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
    } else {
        let text = cards
            .iter()
            .map(render::scorecard)
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("rendering scorecard")?;
        print!("{}", text.join("\n"));
    }
    Ok(())
}

fn result(file: &Path, json: bool) -> Result<()> {
    let m = load(file)?;
    let result = m.result();
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} ({})", result, m.status());
    }
    Ok(())
}

fn replay(file: &Path) -> Result<()> {
    let m = load(file)?;
    let mut consistent = true;
    for number in [1u8, 2] {
        let Some(innings) = m.innings(number) else {
            continue;
        };
        let ledger = innings.ledger();
        let restored = Ledger::from_bytes(&ledger.to_bytes()?)
            .wrap_err_with(|| format!("decoding innings {} ledger", number))?;
        let check = verify_replay(ledger, &innings.at_crease(), innings.batting_squad())?;
        let round_trip = restored == *ledger;
        consistent &= check.is_consistent() && round_trip;
        println!(
            "Innings {}: {} deliveries, digest {}, replay {}, encoding {}",
            number,
            check.deliveries,
            check.first.short(),
            if check.is_consistent() { "stable" } else { "DIVERGED" },
            if round_trip { "exact" } else { "MISMATCH" }
        );
    }
    if !consistent {
        bail!("replay verification failed");
    }
    Ok(())
}

fn validate(file: &Path) -> Result<()> {
    let script = MatchScript::load(file)?;
    let m = script.play()?;
    info!(events = script.events.len(), status = %m.status(), "script valid");
    println!(
        "{} events accepted; match {} ({:?})",
        script.events.len(),
        m.status(),
        m.phase()
    );
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Scorecard {
            file,
            innings,
            json,
            all,
        } => scorecard(&file, innings, json, all),
        Commands::Result { file, json } => result(&file, json),
        Commands::Replay { file } => replay(&file),
        Commands::Validate { file } => validate(&file),
    }
}
