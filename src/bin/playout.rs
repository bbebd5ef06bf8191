//! Random playout CLI.
//!
//! Plays games with random legal clicks, checks board invariants after every
//! action, and writes one JSON summary per game.
//!
//! Usage:
//!   cargo run --release --bin playout -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 100)
//!   --max-actions N  Clicks per game before it is abandoned (default: 2000)
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --config FILE    Rules config JSON
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lifedeath::config::RulesConfig;
use lifedeath::playout::{self, PlayoutConfig, PlayoutStats};

struct Args {
    config: PlayoutConfig,
    output: Option<String>,
    quiet: bool,
}

fn value<T: FromStr>(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<T, String> {
    args.next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| format!("invalid {flag} value"))
}

fn parse_args() -> Result<Option<Args>, String> {
    let mut parsed = Args {
        config: PlayoutConfig::default(),
        output: None,
        quiet: false,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--games" => parsed.config.num_games = value(&mut args, "--games")?,
            "--max-actions" => parsed.config.max_actions = value(&mut args, "--max-actions")?,
            "--threads" => parsed.config.threads = value(&mut args, "--threads")?,
            "--seed" => parsed.config.seed = value(&mut args, "--seed")?,
            "--config" => {
                let path: String = value(&mut args, "--config")?;
                parsed.config.rules =
                    RulesConfig::load(path.as_ref()).map_err(|e| e.to_string())?;
            }
            "--output" => parsed.output = Some(value(&mut args, "--output")?),
            "--quiet" => parsed.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(Some(parsed))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(a)) => a,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("{e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };
    let config = &args.config;

    if !args.quiet {
        info!(
            games = config.num_games,
            max_actions = config.max_actions,
            threads = config.threads,
            "starting playouts"
        );
    }

    let start = Instant::now();
    let games = match playout::run_playouts(config) {
        Ok(g) => g,
        Err(e) => {
            error!("failed to build thread pool: {e}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if !args.quiet {
        info!(
            "completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        eprintln!("{}", PlayoutStats::from_games(&games));
    }

    let written = match &args.output {
        Some(path) => File::create(path)
            .and_then(|f| playout::write_jsonl(&games, &mut BufWriter::new(f))),
        None => {
            let stdout = io::stdout();
            playout::write_jsonl(&games, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = written {
        error!("failed to write output: {e}");
        return ExitCode::FAILURE;
    }

    if games.iter().any(|g| !g.violations.is_empty()) {
        error!("invariant violations found");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    eprintln!("Usage: playout [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 100)");
    eprintln!("  --max-actions N  Clicks per game before it is abandoned (default: 2000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE    Rules config JSON");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
