//! Kind registry.
//!
//! Stores every creature kind of a game and answers the one question
//! nominal classification needs: is kind `A` the same as, or a
//! descendant of, kind `B`? Registration also resolves inheritance, so a
//! stored definition already carries its ancestors' traits and hooks.

use rustc_hash::FxHashMap;

use super::definition::{KindDefinition, KindId};
use crate::core::{CombatError, CombatResult};

/// Registry of kind definitions.
///
/// A parent must be registered before its children, so the parent graph
/// is always a forest and descendant checks terminate.
///
/// ```
/// use ccg_combat::cards::{KindDefinition, KindId, KindRegistry};
///
/// let creature = KindId::new(0);
/// let dog = KindId::new(1);
/// let trasher = KindId::new(2);
///
/// let mut kinds = KindRegistry::new();
/// kinds.register(KindDefinition::new(creature, "Creature", 1)).unwrap();
/// kinds.register(KindDefinition::new(dog, "Dog", 3).with_parent(creature)).unwrap();
/// kinds.register(KindDefinition::new(trasher, "Trasher", 5).with_parent(dog)).unwrap();
///
/// assert!(kinds.is_descendant(trasher, dog));
/// assert!(!kinds.is_descendant(dog, trasher));
/// ```
#[derive(Clone, Debug, Default)]
pub struct KindRegistry {
    kinds: FxHashMap<KindId, KindDefinition>,
}

impl KindRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind definition, inheriting from its parent.
    pub fn register(&mut self, def: KindDefinition) -> CombatResult<()> {
        if self.kinds.contains_key(&def.id) {
            return Err(CombatError::DuplicateKind(def.id));
        }
        let def = match def.parent {
            Some(parent) => {
                let parent = self.kinds.get(&parent).ok_or(CombatError::UnknownKind(parent))?;
                def.inherit_from(parent)
            }
            None => def,
        };
        self.kinds.insert(def.id, def);
        Ok(())
    }

    /// Get a kind definition.
    pub fn get(&self, id: KindId) -> CombatResult<&KindDefinition> {
        self.kinds.get(&id).ok_or(CombatError::UnknownKind(id))
    }

    /// Check if a kind is registered.
    #[must_use]
    pub fn contains(&self, id: KindId) -> bool {
        self.kinds.contains_key(&id)
    }

    /// Check whether `kind` equals `ancestor` or descends from it.
    #[must_use]
    pub fn is_descendant(&self, kind: KindId, ancestor: KindId) -> bool {
        let mut current = Some(kind);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.kinds.get(&id).and_then(|def| def.parent);
        }
        false
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
