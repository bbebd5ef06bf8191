//! Random playouts.
//!
//! Drives engines with random legal clicks and checks board invariants after
//! every step. Used for soak testing and benchmarking; summaries are written
//! as JSONL.

use std::fmt;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::board::{Color, PieceKind, Square};
use crate::config::RulesConfig;
use crate::engine::{Engine, Outcome, Phase};
use crate::resolve::piece_can_act;

/// Settings for a batch of playouts.
#[derive(Debug, Clone)]
pub struct PlayoutConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Clicks per game before it is abandoned.
    pub max_actions: usize,
    /// Worker threads.
    pub threads: usize,
    /// Base random seed (0 = use entropy).
    pub seed: u64,
    pub rules: RulesConfig,
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        PlayoutConfig {
            num_games: 100,
            max_actions: 2000,
            threads: 4,
            seed: 0,
            rules: RulesConfig::default(),
        }
    }
}

/// Result of one playout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayoutSummary {
    pub game_id: usize,
    pub seed: u64,
    /// Clicks and turn finishes issued.
    pub actions: usize,
    /// Clicks the engine rejected.
    pub rejected: usize,
    /// Player switches observed.
    pub turns: usize,
    pub outcome: Option<Outcome>,
    pub final_position: String,
    /// Broken invariants, with the action index they were seen at.
    pub violations: Vec<String>,
}

/// Plays one game with random clicks from the starting position.
pub fn random_playout(seed: u64, rules: &RulesConfig, max_actions: usize) -> PlayoutSummary {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = Engine::new(*rules);
    let mut summary = PlayoutSummary {
        game_id: 0,
        seed,
        actions: 0,
        rejected: 0,
        turns: 0,
        outcome: None,
        final_position: String::new(),
        violations: Vec::new(),
    };

    while summary.actions < max_actions && engine.outcome().is_none() {
        let player = engine.turn().current_player;

        let result = if engine.pending_turn_switch() {
            engine.finish_turn()
        } else {
            let candidates = candidate_clicks(&engine);
            let may_finish = engine.phase() == Phase::SelectPiece && engine.turn().has_acted();
            if candidates.is_empty() || (may_finish && rng.gen_bool(0.1)) {
                if !may_finish {
                    debug!(seed, "no candidate clicks");
                    break;
                }
                engine.finish_turn()
            } else {
                let Some(&sq) = candidates.choose(&mut rng) else {
                    break;
                };
                engine.handle_click(sq.r() as isize, sq.c() as isize)
            }
        };
        summary.actions += 1;
        if result.is_err() {
            summary.rejected += 1;
        }

        let switched = engine.turn().current_player != player;
        if switched {
            summary.turns += 1;
        }
        for v in check_invariants(&engine, switched) {
            summary.violations.push(format!("action {}: {}", summary.actions, v));
        }
    }

    summary.outcome = engine.outcome();
    summary.final_position = engine.notation();
    summary
}

/// Squares worth clicking in the engine's current phase.
fn candidate_clicks(engine: &Engine) -> Vec<Square> {
    match engine.phase() {
        Phase::SelectPiece => engine
            .board()
            .pieces()
            .filter(|p| piece_can_act(p, engine.board(), engine.turn(), engine.config()))
            .map(|p| p.square)
            .collect(),
        Phase::SelectTarget => {
            let mut squares: Vec<Square> = engine.valid_moves().iter().map(|m| m.to).collect();
            squares.extend_from_slice(engine.valid_attacks());
            squares.extend(engine.valid_special_actions().iter().map(|a| a.target));
            squares
        }
        Phase::SelectStaging => engine.staging_options().to_vec(),
        Phase::SelectResting => engine.resting_options().to_vec(),
    }
}

/// Returns a description of every broken invariant.
pub fn check_invariants(engine: &Engine, just_switched: bool) -> Vec<String> {
    let board = engine.board();
    let mut violations = Vec::new();

    if !board.is_consistent() {
        violations.push("piece square does not match its cell".to_string());
    }
    for p in board.pieces() {
        if p.is_intimidated && p.has_shield {
            violations.push(format!("intimidated piece at {} is shielded", p.square));
        }
    }
    if just_switched && engine.turn().has_acted() {
        violations.push("turn flags set right after a switch".to_string());
    }
    if engine.phase() == Phase::SelectPiece {
        let spirits: Vec<_> = board.pieces().filter(|p| p.is_spirit()).collect();
        for a in &spirits {
            for b in &spirits {
                if a.kind == PieceKind::Life
                    && b.kind == PieceKind::Death
                    && a.square.is_adjacent(b.square)
                {
                    violations.push(format!("Life {} touches Death {}", a.square, b.square));
                }
            }
        }
        let lists_empty = engine.valid_moves().is_empty()
            && engine.valid_attacks().is_empty()
            && engine.valid_special_actions().is_empty()
            && engine.staging_options().is_empty()
            && engine.resting_options().is_empty();
        if !lists_empty || engine.selected().is_some() {
            violations.push("selection state left over in SelectPiece".to_string());
        }
    }
    violations
}

/// Runs `config.num_games` playouts on a rayon pool. Results are ordered by
/// game id.
pub fn run_playouts(config: &PlayoutConfig) -> Result<Vec<PlayoutSummary>, rayon::ThreadPoolBuildError> {
    use rayon::prelude::*;

    let base_seed = if config.seed != 0 {
        config.seed
    } else {
        SmallRng::from_entropy().gen()
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()?;

    let mut games: Vec<PlayoutSummary> = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|game_id| {
                let seed = base_seed.wrapping_add(game_id as u64);
                let mut summary = random_playout(seed, &config.rules, config.max_actions);
                summary.game_id = game_id;
                summary
            })
            .collect()
    });
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Writes summaries as JSON lines.
pub fn write_jsonl<W: Write>(games: &[PlayoutSummary], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate figures over a batch of playouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayoutStats {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub stalled: usize,
    pub unfinished: usize,
    pub total_actions: usize,
    pub violations: usize,
}

impl PlayoutStats {
    pub fn from_games(games: &[PlayoutSummary]) -> Self {
        let mut stats = PlayoutStats {
            games: games.len(),
            ..PlayoutStats::default()
        };
        for g in games {
            stats.total_actions += g.actions;
            stats.violations += g.violations.len();
            match g.outcome {
                Some(Outcome::Victory { winner: Color::White }) => stats.white_wins += 1,
                Some(Outcome::Victory { winner: Color::Black }) => stats.black_wins += 1,
                Some(Outcome::Stalled) => stats.stalled += 1,
                None => stats.unfinished += 1,
            }
        }
        stats
    }
}

impl fmt::Display for PlayoutStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Playout Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(
            f,
            "White wins: {}  Black wins: {}  Stalled: {}  Unfinished: {}",
            self.white_wins, self.black_wins, self.stalled, self.unfinished
        )?;
        let avg = if self.games > 0 {
            self.total_actions as f64 / self.games as f64
        } else {
            0.0
        };
        writeln!(f, "Avg actions/game: {avg:.1}")?;
        write!(f, "Invariant violations: {}", self.violations)
    }
}
