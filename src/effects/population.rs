//! Population bonus registry.
//!
//! Counts live in-play instances per creature kind. Kinds whose power
//! scales with their numbers read [`PopulationRegistry::bonus`] from their
//! damage hooks each time they run, so every instance sees the same value
//! and a change is visible to the very next resolution.
//!
//! The registry tracks *which* cards are counted, not just how many, so
//! the exactly-once rule for lifecycle edges is checked rather than
//! trusted: a second increment for the same card, or a decrement for a
//! card never counted, is an error.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::cards::KindId;
use crate::core::{CombatError, CombatResult, EntityId};

/// `n * (n + 1) / 2`: each extra member adds one more than the last.
///
/// ```
/// use ccg_combat::effects::triangular;
///
/// let bonuses: Vec<_> = (0..5).map(triangular).collect();
/// assert_eq!(bonuses, vec![0, 1, 3, 6, 10]);
/// ```
#[must_use]
pub const fn triangular(n: u32) -> i64 {
    let n = n as i64;
    n * (n + 1) / 2
}

/// Live in-play members per kind.
#[derive(Clone, Debug, Default)]
pub struct PopulationRegistry {
    members: FxHashMap<KindId, FxHashSet<EntityId>>,
}

impl PopulationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `card` as a live member of `kind`. Returns the new count.
    pub fn increment(&mut self, kind: KindId, card: EntityId) -> CombatResult<u32> {
        let members = self.members.entry(kind).or_default();
        if !members.insert(card) {
            return Err(CombatError::DoublePopulationEntry { kind, card });
        }
        Ok(members.len() as u32)
    }

    /// Stop counting `card` as a member of `kind`. Returns the new count.
    pub fn decrement(&mut self, kind: KindId, card: EntityId) -> CombatResult<u32> {
        let removed = self
            .members
            .get_mut(&kind)
            .is_some_and(|members| members.remove(&card));
        if !removed {
            return Err(CombatError::PopulationUnderflow { kind, card });
        }
        Ok(self.count(kind))
    }

    /// Live members of `kind`.
    #[must_use]
    pub fn count(&self, kind: KindId) -> u32 {
        self.members.get(&kind).map_or(0, |m| m.len() as u32)
    }

    /// Triangular bonus for the current count of `kind`.
    #[must_use]
    pub fn bonus(&self, kind: KindId) -> i64 {
        triangular(self.count(kind))
    }

    /// Check whether `card` is counted for `kind`.
    #[must_use]
    pub fn is_member(&self, kind: KindId, card: EntityId) -> bool {
        self.members.get(&kind).is_some_and(|m| m.contains(&card))
    }
}
