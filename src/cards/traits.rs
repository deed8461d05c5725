//! Capability tags.
//!
//! A `Trait` is a structural capability a card exposes ("quacks",
//! "swims"). Traits are independent of the card's declared kind: a Dog
//! that quacks and swims still quacks and swims. Structural
//! classification looks only at traits.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A structural capability tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Trait(pub Cow<'static, str>);

impl Trait {
    /// Create a trait from a static name. Usable in constants.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a trait from a runtime name.
    pub fn named(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The trait name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Trait {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for Trait {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered trait set. Declaration order is kept; duplicates are not.
///
/// Most cards carry zero to two traits, so the set lives inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSet(SmallVec<[Trait; 4]>);

impl TraitSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trait. Returns `false` if it was already present.
    pub fn insert(&mut self, t: Trait) -> bool {
        if self.contains(&t) {
            return false;
        }
        self.0.push(t);
        true
    }

    /// Remove a trait. Returns `false` if it was absent.
    pub fn remove(&mut self, t: &Trait) -> bool {
        match self.0.iter().position(|x| x == t) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Check for a trait.
    #[must_use]
    pub fn contains(&self, t: &Trait) -> bool {
        self.0.iter().any(|x| x == t)
    }

    /// Check that every trait in `required` is present.
    #[must_use]
    pub fn contains_all(&self, required: &[Trait]) -> bool {
        required.iter().all(|t| self.contains(t))
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Trait> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Trait> for TraitSet {
    fn from_iter<I: IntoIterator<Item = Trait>>(iter: I) -> Self {
        let mut set = TraitSet::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}
