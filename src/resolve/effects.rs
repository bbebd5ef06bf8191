//! Pass-through effects.
//!
//! A piece whose path crosses a stationary Life gains a shield; crossing a
//! Death costs it its shield, or its life when it has none. Immune pieces
//! ignore Death.

use tracing::info;

use crate::board::{Board, PieceKind, Square};

/// Applies the effect of a stationary `static_kind` piece to the piece on
/// `moving`.
///
/// Returns true when the moving piece was destroyed; it has then already been
/// removed from `moving` and the caller must abandon the relocation.
pub fn apply_pass_through(board: &mut Board, moving: Square, static_kind: PieceKind) -> bool {
    let Some(piece) = board.get_mut(moving) else {
        return false;
    };
    match static_kind {
        PieceKind::Life => {
            piece.grant_shield();
            false
        }
        PieceKind::Death => {
            if piece.is_immune {
                return false;
            }
            if piece.has_shield {
                piece.has_shield = false;
                return false;
            }
            if let Some(fallen) = board.clear(moving) {
                info!(kind = ?fallen.kind, color = ?fallen.color, square = %moving, "destroyed passing Death");
            }
            true
        }
        _ => false,
    }
}

/// Walks the straight line from `from` to `to`, both ends excluded, applying
/// the effect of every Life or Death on the way in order.
///
/// The moving piece is still standing on `moving` while this runs. Stops and
/// returns true as soon as it is destroyed.
pub fn check_path(board: &mut Board, moving: Square, from: Square, to: Square) -> bool {
    for sq in from.between(to) {
        let Some(kind) = board.get(sq).filter(|p| p.is_spirit()).map(|p| p.kind) else {
            continue;
        };
        if apply_pass_through(board, moving, kind) {
            return true;
        }
    }
    false
}
