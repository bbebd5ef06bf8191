//! Effect resolution.
//!
//! Applies the status effects that follow a relocation or a completed
//! action: pass-through, annihilation, intimidation, and the turn bookkeeping
//! that decides when play passes to the other side.

pub mod annihilation;
pub mod effects;
pub mod intimidation;
pub mod turn;

pub use annihilation::check_annihilation;
pub use effects::{apply_pass_through, check_path};
pub use intimidation::{check_intimidation, Intimidation};
pub use turn::{
    available_actions, begin_next_turn, can_make_special, can_make_standard, clear_immunity,
    piece_can_act, turn_exhausted, Turn,
};
