//! # ccg-combat
//!
//! Combat resolution and ability-modifier core for a turn-based card game.
//!
//! ## Design Principles
//!
//! 1. **Behaviour is data**: a card does what the hooks it currently owns
//!    say. Kinds are definitions, not types, and a hook can move from one
//!    card to another at runtime.
//!
//! 2. **Explicit continuations**: anything that may wait on presentation
//!    takes a one-shot [`Signal`]. Resolution runs on a single-threaded
//!    ready queue and never depends on animation timing.
//!
//! 3. **Shared state is explicit**: the only cross-card counters live in
//!    the board's population registry, and every lifecycle edge updates
//!    them exactly once.
//!
//! ## Modules
//!
//! - `core`: entity and player IDs, configuration, context, errors
//! - `cards`: kinds, card instances, traits, classification
//! - `hooks`: hook slots, per-card hook sets, ability transfer
//! - `stack`: signals and the ordered step sequencer
//! - `effects`: damage pipeline, power changes, population bonuses
//! - `zones`: tables
//! - `view`: the presenter interface and bundled presenters
//! - `rules`: board state and the arena interpreter
//! - `games`: concrete rosters

pub mod cards;
pub mod core;
pub mod effects;
pub mod games;
pub mod hooks;
pub mod rules;
pub mod stack;
pub mod view;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    CombatConfig, CombatError, CombatResult, EntityId, GameContext, PlayerId, PlayerMap,
};

pub use crate::cards::{
    Card, Category, Classifier, KindDefinition, KindId, KindRegistry, Trait, TraitSet,
};

pub use crate::hooks::{Hook, HookSet, HookSlot, TransferRecord};

pub use crate::stack::{Done, ResolutionStatus, Sequencer, Signal};

pub use crate::effects::{DamageEvent, PopulationRegistry};

pub use crate::zones::{Seat, Table};

pub use crate::view::{DeferredPresenter, InstantPresenter, Presenter, SpeedRate};

pub use crate::rules::{Arena, Board, Player};
