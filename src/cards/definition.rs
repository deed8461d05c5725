//! Creature kind definitions.
//!
//! A `KindDefinition` holds what every card of a kind starts with: name,
//! power, traits and default hooks. Registering a kind under a parent
//! merges in the parent's traits and puts the parent's hooks in the
//! inherited layer. Cards copy all of this at creation. The hook set is a
//! persistent map, so the copy is cheap and a later ability transfer
//! touches one card only, never the definition.

use serde::{Deserialize, Serialize};

use super::traits::{Trait, TraitSet};
use crate::hooks::{Hook, HookSet};

/// Identifier of a creature kind.
///
/// Games define their own kinds; the engine only knows the parent chain
/// recorded in the `KindRegistry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KindId(pub u32);

impl KindId {
    /// Create a new kind ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for KindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Kind({})", self.0)
    }
}

/// Static kind definition.
///
/// ```
/// use ccg_combat::cards::{KindDefinition, KindId, Trait};
///
/// const CREATURE: KindId = KindId::new(0);
/// const DUCK: KindId = KindId::new(1);
///
/// let duck = KindDefinition::new(DUCK, "Peaceful Duck", 2)
///     .with_parent(CREATURE)
///     .with_trait(Trait::new("quacks"))
///     .with_trait(Trait::new("swims"));
///
/// assert_eq!(duck.max_power, 2);
/// assert_eq!(duck.traits.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct KindDefinition {
    pub id: KindId,

    /// Default card name.
    pub name: String,

    /// Parent kind for nominal classification. `None` for a root kind.
    pub parent: Option<KindId>,

    /// Upper power bound; cards start at full power.
    pub max_power: i64,

    /// Display image reference.
    pub image: Option<String>,

    /// Structural traits every card of this kind starts with.
    pub traits: TraitSet,

    /// Default hooks every card of this kind starts with. The kind's own
    /// hooks, over those inherited from its ancestors once registered.
    pub hooks: HookSet,
}

impl KindDefinition {
    #[must_use]
    pub fn new(id: KindId, name: impl Into<String>, max_power: i64) -> Self {
        assert!(max_power > 0, "Kinds must have positive power");
        Self {
            id,
            name: name.into(),
            parent: None,
            max_power,
            image: None,
            traits: TraitSet::new(),
            hooks: HookSet::new(),
        }
    }

    /// Set the parent kind (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent: KindId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Add a trait (builder pattern).
    #[must_use]
    pub fn with_trait(mut self, t: Trait) -> Self {
        self.traits.insert(t);
        self
    }

    /// Add a default hook (builder pattern). Replaces any hook already in
    /// the same slot.
    #[must_use]
    pub fn with_hook(mut self, hook: Hook) -> Self {
        self.hooks.insert(hook);
        self
    }

    /// Merge in what `parent` passes down: its traits ahead of ours, and
    /// every hook it has in effect as our inherited layer.
    pub(crate) fn inherit_from(mut self, parent: &KindDefinition) -> Self {
        let mut traits = parent.traits.clone();
        for t in self.traits.iter() {
            traits.insert(t.clone());
        }
        self.traits = traits;
        self.hooks = self.hooks.with_base(&parent.hooks);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookSlot;

    #[test]
    fn test_kind_id() {
        let id = KindId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Kind(7)");
    }

    #[test]
    fn test_builder() {
        let def = KindDefinition::new(KindId::new(4), "Trasher", 5)
            .with_parent(KindId::new(2))
            .with_image("trasher.png")
            .with_hook(Hook::modify_taken_damage(|_, _, value, k| {
                k.resume(value - 1);
                Ok(())
            }));

        assert_eq!(def.parent, Some(KindId::new(2)));
        assert_eq!(def.image.as_deref(), Some("trasher.png"));
        assert!(def.hooks.owns(HookSlot::ModifyTakenDamage));
        assert!(!def.hooks.owns(HookSlot::PerformAttack));
    }

    #[test]
    #[should_panic(expected = "Kinds must have positive power")]
    fn test_zero_power_rejected() {
        let _ = KindDefinition::new(KindId::new(1), "Ghost", 0);
    }

    #[test]
    fn test_inherit_from_parent() {
        let parent = KindDefinition::new(KindId::new(1), "Duck", 2)
            .with_trait(Trait::new("quacks"))
            .with_hook(Hook::modify_taken_damage(|_, _, value, k| {
                k.resume(value - 1);
                Ok(())
            }));
        let child = KindDefinition::new(KindId::new(2), "Mallard", 3)
            .with_parent(KindId::new(1))
            .with_trait(Trait::new("flies"))
            .inherit_from(&parent);

        let names: Vec<_> = child.traits.iter().map(Trait::name).collect();
        assert_eq!(names, vec!["quacks", "flies"]);
        assert!(child.hooks.inherits(HookSlot::ModifyTakenDamage));
        assert_eq!(child.max_power, 3);
    }
}
