//! Combat effects: damage, power changes, population bonuses.
//!
//! - [`resolve_damage`] / [`deal_damage`]: the damage modifier pipeline
//! - [`empower`] / [`heal`]: power changes that are not damage
//! - [`PopulationRegistry`]: per-kind live counts and triangular bonuses

mod damage;
mod population;
mod power;

pub use damage::{deal_damage, resolve_damage, DamageEvent};
pub use population::{triangular, PopulationRegistry};
pub use power::{empower, heal};
