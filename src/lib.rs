//! Life & Death chess rules engine library.
//!
//! Exposes the board representation, move generation, effect resolution, the
//! click-driven engine, and the protocol and presentation layers used by the
//! binaries and integration tests.

pub mod board;
pub mod config;
pub mod engine;
pub mod movegen;
pub mod playout;
pub mod presenter;
pub mod protocol;
pub mod resolve;

pub use config::RulesConfig;
pub use engine::{ActionError, Engine, Outcome, Phase};
