//! Core combat types: entities, players, configuration, context, errors.
//!
//! This module contains the building blocks every other module shares.
//! Games configure these via `CombatConfig` rather than modifying the core.

pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod player;

pub use config::CombatConfig;
pub use context::GameContext;
pub use entity::EntityId;
pub use error::{CombatError, CombatResult};
pub use player::{PlayerId, PlayerMap};
