//! Card system: kinds, instances, traits and classification.
//!
//! ## Key Types
//!
//! - `KindId` / `KindDefinition`: a creature kind and what its cards start with
//! - `KindRegistry`: kind lookup and the nominal parent chain
//! - `Card`: one combatant with its own power, traits and hooks
//! - `Trait` / `TraitSet`: structural capability tags
//! - `Classifier`: structural + nominal classification by fixed priority
//!
//! There is no class hierarchy: a kind is data, and what a card does is
//! decided by the hooks it currently owns.

pub mod classify;
pub mod definition;
pub mod instance;
pub mod registry;
pub mod traits;

pub use classify::{matches_nominally, matches_structurally, Category, Classifier};
pub use definition::{KindDefinition, KindId};
pub use instance::Card;
pub use registry::KindRegistry;
pub use traits::{Trait, TraitSet};
