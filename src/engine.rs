//! Engine state management.
//!
//! Holds the board, the turn, and the interaction state of the
//! select → target → stage → rest protocol. Every mutation enters through
//! `handle_click`; the resolver and move generator are called from here.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::board::{
    Board, Color, Move, MoveKind, Piece, PieceKind, SpecialAction, SpecialKind, Square,
};
use crate::config::RulesConfig;
use crate::movegen::{actions_for, staging_squares};
use crate::protocol::notation::{encode_position, parse_position, NotationError, Position};
use crate::protocol::snapshot::Snapshot;
use crate::resolve::{
    available_actions, begin_next_turn, can_make_special, can_make_standard, check_annihilation,
    check_intimidation, check_path, turn_exhausted, Turn,
};

const MSG_SELECT_PIECE: &str = "Select a piece to move.";
const MSG_SELECT_TARGET: &str = "Select a destination, target, or special action.";
const MSG_SELECT_STAGING: &str = "Select a staging square for the attack.";
const MSG_SELECT_RESTING: &str = "Choose a resting square for your piece.";
const MSG_NO_STAGING: &str = "No valid staging squares for this attack.";
const MSG_SLOTS_SPENT: &str = "You have made all available moves this turn.";
const MSG_TURN_ENDING: &str = "Turn ending.";

/// Errors returned by `Engine::handle_click` and `Engine::finish_turn`.
///
/// Whenever one is returned the engine has already been put back into a safe
/// state; the caller only needs to report it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("({row},{col}) is off the board")]
    InvalidCoordinate { row: isize, col: isize },

    #[error("illegal action: {0}")]
    IllegalAction(String),

    #[error("no staging square available for this attack")]
    NoStagingAvailable,

    #[error("turn is ending; call finish_turn first")]
    TurnPending,

    #[error("the game is over")]
    GameOver,
}

/// Step of the click protocol the engine is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SelectPiece,
    SelectTarget,
    SelectStaging,
    SelectResting,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// The loser's King was removed.
    Victory { winner: Color },
    /// Neither player has any action left.
    Stalled,
}

/// Attacker and target of an attack in progress.
///
/// During SelectStaging `attacker` is the attacker's origin; during
/// SelectResting it is the staging square the attacker now stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackInfo {
    pub attacker: Square,
    pub target: Square,
}

/// A single game: board, turn, and interaction state.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    turn: Turn,
    config: RulesConfig,
    phase: Phase,
    selected: Option<Square>,
    valid_moves: Vec<Move>,
    valid_attacks: Vec<Square>,
    valid_special_actions: Vec<SpecialAction>,
    staging_options: Vec<Square>,
    resting_options: Vec<Square>,
    attack: Option<AttackInfo>,
    status: String,
    pending_turn_switch: bool,
    outcome: Option<Outcome>,
    /// Which sides had a King when the game was set up; only those can lose one.
    kings_in_play: [bool; 2],
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(RulesConfig::default())
    }
}

impl Engine {
    /// Creates an engine on the starting position with White to move.
    pub fn new(config: RulesConfig) -> Self {
        Engine::with_position(
            Position {
                board: Board::initial(),
                turn: Turn::new(Color::White),
            },
            config,
        )
    }

    /// Creates an engine on an arbitrary position.
    pub fn with_position(position: Position, config: RulesConfig) -> Self {
        let kings_in_play = [
            position.board.find_king(Color::White).is_some(),
            position.board.find_king(Color::Black).is_some(),
        ];
        Engine {
            board: position.board,
            turn: position.turn,
            config,
            phase: Phase::SelectPiece,
            selected: None,
            valid_moves: Vec::new(),
            valid_attacks: Vec::new(),
            valid_special_actions: Vec::new(),
            staging_options: Vec::new(),
            resting_options: Vec::new(),
            attack: None,
            status: MSG_SELECT_PIECE.to_string(),
            pending_turn_switch: false,
            outcome: None,
            kings_in_play,
        }
    }

    /// Creates an engine from position notation.
    pub fn from_notation(notation: &str, config: RulesConfig) -> Result<Self, NotationError> {
        Ok(Engine::with_position(parse_position(notation)?, config))
    }

    /// Resets to the starting position, keeping the rules.
    pub fn new_game(&mut self) {
        *self = Engine::new(self.config);
    }

    /// Replaces the position, keeping the rules. On error the engine is unchanged.
    pub fn set_position(&mut self, notation: &str) -> Result<(), NotationError> {
        *self = Engine::from_notation(notation, self.config)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    pub fn valid_attacks(&self) -> &[Square] {
        &self.valid_attacks
    }

    pub fn valid_special_actions(&self) -> &[SpecialAction] {
        &self.valid_special_actions
    }

    pub fn staging_options(&self) -> &[Square] {
        &self.staging_options
    }

    pub fn resting_options(&self) -> &[Square] {
        &self.resting_options
    }

    pub fn attack(&self) -> Option<AttackInfo> {
        self.attack
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn pending_turn_switch(&self) -> bool {
        self.pending_turn_switch
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Encodes the current position.
    pub fn notation(&self) -> String {
        encode_position(&self.board, &self.turn)
    }

    /// Captures everything a presenter needs to draw the game.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Alias of `handle_click`.
    pub fn on_square_activated(&mut self, row: isize, col: isize) -> Result<(), ActionError> {
        self.handle_click(row, col)
    }

    /// Feeds one click into the state machine.
    #[instrument(level = "debug", skip(self), fields(phase = ?self.phase, player = ?self.turn.current_player))]
    pub fn handle_click(&mut self, row: isize, col: isize) -> Result<(), ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::GameOver);
        }
        if self.pending_turn_switch {
            return Err(ActionError::TurnPending);
        }
        let square = usize::try_from(row)
            .ok()
            .zip(usize::try_from(col).ok())
            .and_then(|(r, c)| Square::new(r, c));
        let Some(square) = square else {
            // A half-finished capture stays put; otherwise fall back to selection.
            if self.phase != Phase::SelectResting {
                self.reset_selection();
            }
            return Err(ActionError::InvalidCoordinate { row, col });
        };

        match self.phase {
            Phase::SelectPiece => self.select(square),
            Phase::SelectTarget => self.on_target(square),
            Phase::SelectStaging => self.on_staging(square),
            Phase::SelectResting => self.on_resting(square),
        }
    }

    /// Cancels the current selection.
    ///
    /// During SelectResting the capture has already happened, so the attacker
    /// rests where it stands and the action completes instead.
    pub fn deselect(&mut self) {
        match (self.phase, self.attack) {
            (Phase::SelectResting, Some(info)) => {
                self.complete_resting(info.attacker);
            }
            _ => self.reset_selection(),
        }
    }

    /// Ends the current player's turn.
    ///
    /// Completes a deferred switch, or ends the turn early once the player has
    /// spent at least one slot or has nothing left to do. Refused in the middle
    /// of an attack.
    pub fn finish_turn(&mut self) -> Result<(), ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::GameOver);
        }
        if self.pending_turn_switch {
            self.pending_turn_switch = false;
            self.advance_turn();
            return Ok(());
        }
        match self.phase {
            Phase::SelectStaging | Phase::SelectResting => {
                return Err(ActionError::IllegalAction(
                    "finish the attack before ending the turn".to_string(),
                ));
            }
            Phase::SelectTarget => self.reset_selection(),
            Phase::SelectPiece => {}
        }
        if !self.turn.has_acted() && !turn_exhausted(&self.board, &self.turn, &self.config) {
            return Err(ActionError::IllegalAction(
                "no action taken this turn".to_string(),
            ));
        }
        self.advance_turn();
        Ok(())
    }

    fn select(&mut self, square: Square) -> Result<(), ActionError> {
        let Some(piece) = self.board.get(square).copied() else {
            self.reset_selection();
            return Ok(());
        };
        if piece.owner() != self.turn.current_player {
            self.reset_selection();
            self.status = format!("That piece belongs to {}.", piece.owner().name());
            return Ok(());
        }

        let slot_open = if piece.is_spirit() {
            !self.turn.special_move_made || !self.turn.standard_move_made
        } else {
            !self.turn.standard_move_made
        };
        let actions = available_actions(
            &piece,
            actions_for(&piece, &self.board),
            &self.board,
            &self.turn,
            &self.config,
        );
        if actions.is_empty() {
            self.reset_selection();
            let reason = if slot_open {
                format!("{:?} at {} has no available actions.", piece.kind, square)
            } else {
                MSG_SLOTS_SPENT.to_string()
            };
            self.status = reason.clone();
            return Err(ActionError::IllegalAction(reason));
        }

        debug!(kind = ?piece.kind, %square, "selected");
        self.reset_selection();
        self.phase = Phase::SelectTarget;
        self.selected = Some(square);
        self.valid_moves = actions.moves;
        self.valid_attacks = actions.attacks;
        self.valid_special_actions = actions.special_actions;
        self.status = MSG_SELECT_TARGET.to_string();
        Ok(())
    }

    fn on_target(&mut self, square: Square) -> Result<(), ActionError> {
        let Some(selected) = self.selected else {
            self.reset_selection();
            return Ok(());
        };
        if square == selected {
            self.reset_selection();
            return Ok(());
        }
        if let Some(mv) = self.valid_moves.iter().find(|m| m.to == square).copied() {
            return self.execute_move(selected, mv);
        }
        if self.valid_attacks.contains(&square) {
            return self.initiate_attack(selected, square);
        }
        if let Some(action) = self
            .valid_special_actions
            .iter()
            .find(|a| a.target == square)
            .copied()
        {
            return self.execute_special_action(selected, action);
        }
        let own_piece = self
            .board
            .get(square)
            .is_some_and(|p| p.owner() == self.turn.current_player);
        if own_piece {
            return self.select(square);
        }
        self.reset_selection();
        Ok(())
    }

    fn on_staging(&mut self, square: Square) -> Result<(), ActionError> {
        if self.staging_options.contains(&square) {
            self.execute_attack(square)
        } else {
            self.reset_selection();
            Ok(())
        }
    }

    fn on_resting(&mut self, square: Square) -> Result<(), ActionError> {
        if self.resting_options.contains(&square) {
            self.complete_resting(square);
        } else {
            debug!(%square, "ignored while resting");
        }
        Ok(())
    }

    fn execute_move(&mut self, from: Square, mv: Move) -> Result<(), ActionError> {
        let piece = self.piece_at(from)?;
        if let MoveKind::SpecialJump { over } = mv.kind {
            debug!(%from, %over, to = %mv.to, "special jump");
        }
        // Knights hop; nothing they cross affects them.
        let destroyed =
            piece.kind != PieceKind::Knight && check_path(&mut self.board, from, from, mv.to);
        if destroyed {
            self.status = format!("{:?} destroyed passing Death.", piece.kind);
        } else {
            self.relocate(from, mv.to);
        }
        self.complete_action(piece.kind, true);
        Ok(())
    }

    fn initiate_attack(&mut self, from: Square, target: Square) -> Result<(), ActionError> {
        let attacker = self.piece_at(from)?;
        let staging = staging_squares(&attacker, target, &self.board);
        match staging.as_slice() {
            [] => {
                self.reset_selection();
                self.status = MSG_NO_STAGING.to_string();
                Err(ActionError::NoStagingAvailable)
            }
            [only] => {
                self.attack = Some(AttackInfo { attacker: from, target });
                self.execute_attack(*only)
            }
            _ => {
                self.attack = Some(AttackInfo { attacker: from, target });
                self.phase = Phase::SelectStaging;
                self.staging_options = staging;
                self.status = MSG_SELECT_STAGING.to_string();
                Ok(())
            }
        }
    }

    fn execute_attack(&mut self, staging: Square) -> Result<(), ActionError> {
        let Some(AttackInfo { attacker: from, target }) = self.attack else {
            self.reset_selection();
            return Err(ActionError::IllegalAction("no attack in progress".to_string()));
        };
        let attacker = self.piece_at(from)?;

        if staging != from {
            let destroyed = attacker.kind != PieceKind::Knight
                && check_path(&mut self.board, from, from, staging);
            if destroyed {
                self.status = format!("{:?} destroyed passing Death.", attacker.kind);
                self.complete_action(attacker.kind, true);
                return Ok(());
            }
            self.relocate(from, staging);
        } else if let Some(p) = self.board.get_mut(from) {
            p.has_moved = true;
        }

        let Some(victim) = self.board.get_mut(target) else {
            self.complete_action(attacker.kind, true);
            return Ok(());
        };
        if victim.has_shield {
            victim.has_shield = false;
            info!(kind = ?victim.kind, %target, "shield broken");
            self.status = format!("Shield of {:?} at {} broken.", victim.kind, target);
            self.complete_action(attacker.kind, true);
            return Ok(());
        }

        if let Some(captured) = self.board.clear(target) {
            info!(kind = ?captured.kind, color = ?captured.color, %target, "captured");
        }
        self.phase = Phase::SelectResting;
        self.staging_options.clear();
        self.resting_options = vec![staging, target];
        self.attack = Some(AttackInfo { attacker: staging, target });
        self.status = MSG_SELECT_RESTING.to_string();
        Ok(())
    }

    fn complete_resting(&mut self, rest: Square) {
        let Some(AttackInfo { attacker: at, .. }) = self.attack else {
            self.reset_selection();
            return;
        };
        let Some(kind) = self.board.get(at).map(|p| p.kind) else {
            self.reset_selection();
            return;
        };
        if rest != at && !check_path(&mut self.board, at, at, rest) {
            self.relocate(at, rest);
        }
        self.complete_action(kind, true);
    }

    fn execute_special_action(
        &mut self,
        from: Square,
        action: SpecialAction,
    ) -> Result<(), ActionError> {
        let spirit = self.piece_at(from)?;
        match action.kind {
            SpecialKind::Heal => {
                let immunity = self.config.heal_grants_immunity;
                if let Some(target) = self.board.get_mut(action.target) {
                    target.grant_shield();
                    if immunity {
                        target.is_immune = true;
                    }
                    info!(kind = ?target.kind, target = %action.target, "healed");
                }
            }
            SpecialKind::Kill => {
                if let Some(victim) = self.board.clear(action.target) {
                    info!(kind = ?victim.kind, color = ?victim.color, target = %action.target, "killed");
                }
            }
        }
        self.turn.standard_move_made = true;
        if self.config.special_action_uses_both_slots {
            self.turn.special_move_made = true;
        }
        self.complete_action(spirit.kind, false);
        Ok(())
    }

    /// Marks the slot, resolves board-wide effects, and decides whether the
    /// turn goes on.
    fn complete_action(&mut self, kind: PieceKind, moved: bool) {
        if kind.is_spirit() {
            if moved {
                self.turn.special_move_made = true;
            }
        } else {
            self.turn.standard_move_made = true;
        }

        check_annihilation(&mut self.board);
        check_intimidation(&mut self.board);

        let status = std::mem::take(&mut self.status);
        self.reset_selection();
        if self.update_outcome() {
            return;
        }
        self.complete_turn();
        // Keep the result of the action visible while the turn carries on.
        if !self.pending_turn_switch && !status.is_empty() && !is_prompt(&status) {
            self.status = format!("{} {}", status, self.status);
        }
    }

    fn complete_turn(&mut self) {
        if !turn_exhausted(&self.board, &self.turn, &self.config) {
            self.status = self.slot_prompt();
            return;
        }
        if self.config.defer_turn_switch {
            self.pending_turn_switch = true;
            self.status = MSG_TURN_ENDING.to_string();
            return;
        }
        self.advance_turn();
    }

    /// Hands the turn over, passing again for a player with nothing to do.
    fn advance_turn(&mut self) {
        self.reset_selection();
        begin_next_turn(&mut self.board, &mut self.turn);
        if !turn_exhausted(&self.board, &self.turn, &self.config) {
            self.status = format!("{} to move.", self.turn.current_player.name());
            return;
        }

        let passed = self.turn.current_player;
        info!(player = ?passed, "no available actions, passing");
        begin_next_turn(&mut self.board, &mut self.turn);
        if turn_exhausted(&self.board, &self.turn, &self.config) {
            info!("neither player can act");
            self.outcome = Some(Outcome::Stalled);
            self.status = "Neither player can act. Game stalled.".to_string();
            return;
        }
        self.status = format!(
            "{} has no available actions. {} to move.",
            passed.name(),
            self.turn.current_player.name()
        );
    }

    /// Records a win when a King that was in play has disappeared.
    fn update_outcome(&mut self) -> bool {
        for (i, color) in [Color::White, Color::Black].into_iter().enumerate() {
            if self.kings_in_play[i] && self.board.find_king(color).is_none() {
                let winner = !color;
                info!(winner = ?winner, "king removed, game over");
                self.outcome = Some(Outcome::Victory { winner });
                self.status = format!("{} King has fallen. {} wins.", color.name(), winner.name());
                return true;
            }
        }
        false
    }

    fn slot_prompt(&self) -> String {
        let player = self.turn.current_player;
        let standard = can_make_standard(&self.board, player, &self.turn);
        let special = can_make_special(&self.board, player, &self.turn);
        match (standard, special) {
            (true, false) if self.turn.special_move_made => {
                "Standard move remaining.".to_string()
            }
            (false, true) if self.turn.standard_move_made => {
                "Special move remaining.".to_string()
            }
            _ => MSG_SELECT_PIECE.to_string(),
        }
    }

    fn relocate(&mut self, from: Square, to: Square) {
        if self.board.relocate(from, to) {
            if let Some(p) = self.board.get_mut(to) {
                p.has_moved = true;
            }
        }
    }

    fn piece_at(&mut self, square: Square) -> Result<Piece, ActionError> {
        match self.board.get(square).copied() {
            Some(p) => Ok(p),
            None => {
                self.reset_selection();
                Err(ActionError::IllegalAction(format!("no piece at {square}")))
            }
        }
    }

    fn reset_selection(&mut self) {
        self.phase = Phase::SelectPiece;
        self.selected = None;
        self.valid_moves.clear();
        self.valid_attacks.clear();
        self.valid_special_actions.clear();
        self.staging_options.clear();
        self.resting_options.clear();
        self.attack = None;
        self.status = MSG_SELECT_PIECE.to_string();
    }
}

fn is_prompt(status: &str) -> bool {
    matches!(
        status,
        MSG_SELECT_PIECE | MSG_SELECT_TARGET | MSG_SELECT_STAGING | MSG_SELECT_RESTING
    )
}
