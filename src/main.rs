//! lifedeath -- a Life & Death chess engine driven over a line protocol.
//!
//! Reads commands from stdin and writes a rendered snapshot to stdout after
//! every command that can change the game. Logs go to stderr and are
//! filtered through `RUST_LOG`.
//!
//! Usage:
//!   lifedeath [--json] [--config FILE]

use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use lifedeath::config::RulesConfig;
use lifedeath::engine::Engine;
use lifedeath::presenter::{JsonPresenter, Presenter, Session, SessionError, TextPresenter};
use lifedeath::protocol::parser::{parse_command, Command};

struct Options {
    json: bool,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        json: false,
        config: None,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--config" => {
                let path = args.next().ok_or("--config needs a file path")?;
                options.config = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            error!("{e}");
            eprintln!("Usage: lifedeath [--json] [--config FILE]");
            return ExitCode::FAILURE;
        }
    };

    let rules = match &options.config {
        Some(path) => match RulesConfig::load(path) {
            Ok(r) => r,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => RulesConfig::default(),
    };

    let stdout = io::stdout();
    let out = io::BufWriter::new(stdout.lock());
    let engine = Engine::new(rules);
    let result = if options.json {
        run(Session::new(engine, JsonPresenter::new(out)))
    } else {
        run(Session::new(engine, TextPresenter::new(out)))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the command loop until `quit` or end of input.
fn run<P: Presenter>(mut session: Session<P>) -> Result<(), SessionError> {
    session.show()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let Some(cmd) = parse_command(&line) else {
            continue;
        };

        let result = match cmd {
            Command::NewGame => session.new_game(),
            Command::Position { notation } => session.set_position(&notation),
            Command::Click { row, col } => session.on_square_activated(row, col),
            Command::Finish => session.finish_turn(),
            Command::Show => session.show(),
            Command::Fen => {
                let notation = session.engine().notation();
                session.presenter_mut().report("position", &notation)
            }
            Command::Quit => break,
        };

        match result {
            Ok(()) => {}
            Err(SessionError::Io(e)) => return Err(SessionError::Io(e)),
            Err(e) => {
                warn!("{e}");
                session.presenter_mut().report("error", &e.to_string())?;
            }
        }
    }
    Ok(())
}
