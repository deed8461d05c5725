//! Combat state and its interpreter.
//!
//! - [`Board`]: every table, every card, the population registry and the
//!   transfer log
//! - [`Arena`]: a board plus the presenter and the run loop that resolves
//!   attacks and lifecycle transitions against it
//!
//! Kinds plug behaviour in through hooks; nothing here knows about any
//! particular kind.

mod arena;
mod attack;
mod board;

pub use arena::Arena;
pub use attack::{default_attack, strike, strike_opposite};
pub use board::{Board, Player};
