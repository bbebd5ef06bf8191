//! Turn bookkeeping.
//!
//! A turn offers two slots: the standard slot (a standard piece moves or
//! attacks, or a spirit heals or kills) and the special slot (a spirit
//! moves). The player keeps the turn until neither slot can be used.

use serde::Serialize;
use tracing::info;

use crate::board::{Actions, Board, Color, Piece, Square};
use crate::config::RulesConfig;
use crate::movegen::{actions_for, staging_squares};

/// Whose turn it is and which slots have been spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub current_player: Color,
    pub standard_move_made: bool,
    pub special_move_made: bool,
}

impl Turn {
    pub fn new(player: Color) -> Self {
        Turn {
            current_player: player,
            standard_move_made: false,
            special_move_made: false,
        }
    }

    /// Hands the turn to the other player with both slots fresh.
    pub fn switch(&mut self) {
        *self = Turn::new(!self.current_player);
    }

    /// True once any slot has been spent this turn.
    pub fn has_acted(&self) -> bool {
        self.standard_move_made || self.special_move_made
    }
}

/// Narrows `actions` to what the turn still allows `piece` to do.
///
/// Standard pieces need the standard slot for everything. Spirits move with
/// the special slot and heal or kill with the standard slot (plus the special
/// slot when `special_action_uses_both_slots` is set). Attacks with no
/// staging square are dropped, since they can never be carried out.
pub fn available_actions(
    piece: &Piece,
    mut actions: Actions,
    board: &Board,
    turn: &Turn,
    config: &RulesConfig,
) -> Actions {
    if piece.is_spirit() {
        actions.attacks.clear();
        if turn.special_move_made {
            actions.moves.clear();
        }
        let special_blocked = turn.standard_move_made
            || (config.special_action_uses_both_slots && turn.special_move_made);
        if special_blocked {
            actions.special_actions.clear();
        }
    } else {
        actions.special_actions.clear();
        if turn.standard_move_made {
            actions.moves.clear();
            actions.attacks.clear();
        }
        actions.attacks.retain(|&target| can_stage(piece, target, board));
    }
    actions
}

fn can_stage(attacker: &Piece, target: Square, board: &Board) -> bool {
    !staging_squares(attacker, target, board).is_empty()
}

/// True if the piece could still be selected this turn.
pub fn piece_can_act(piece: &Piece, board: &Board, turn: &Turn, config: &RulesConfig) -> bool {
    piece.owner() == turn.current_player
        && !available_actions(piece, actions_for(piece, board), board, turn, config).is_empty()
}

/// True if `player` still has a standard-slot action: a standard piece move
/// or attack, or a spirit heal or kill.
pub fn can_make_standard(board: &Board, player: Color, turn: &Turn) -> bool {
    !turn.standard_move_made
        && board.pieces().filter(|p| p.owner() == player).any(|p| {
            let actions = actions_for(p, board);
            if p.is_spirit() {
                !actions.special_actions.is_empty()
            } else {
                !actions.moves.is_empty()
                    || actions.attacks.iter().any(|&t| can_stage(p, t, board))
            }
        })
}

/// True if `player` still has a special-slot action: a spirit move.
pub fn can_make_special(board: &Board, player: Color, turn: &Turn) -> bool {
    !turn.special_move_made
        && board
            .pieces()
            .filter(|p| p.owner() == player && p.is_spirit())
            .any(|p| !actions_for(p, board).moves.is_empty())
}

/// True if the current player has nothing left to do this turn.
pub fn turn_exhausted(board: &Board, turn: &Turn, config: &RulesConfig) -> bool {
    !board
        .pieces()
        .any(|p| piece_can_act(p, board, turn, config))
}

/// Clears immunity on every piece `player` owns. Runs at the start of that
/// player's turn, ending immunity granted during their previous one.
pub fn clear_immunity(board: &mut Board, player: Color) {
    board.for_each_owned_mut(player, |p| p.is_immune = false);
}

/// Switches the player and starts their turn.
pub fn begin_next_turn(board: &mut Board, turn: &mut Turn) {
    turn.switch();
    clear_immunity(board, turn.current_player);
    info!(player = ?turn.current_player, "turn switched");
}
