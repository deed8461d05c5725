//! Capability classifier.
//!
//! Two independent ways to decide what a card "is":
//!
//! - **Structural**: the card exposes every trait a category requires,
//!   whatever its declared kind.
//! - **Nominal**: the card's declared kind is the category's kind or a
//!   descendant of it.
//!
//! A `Classifier` pairs one category of each flavour and labels a card by
//! fixed priority: both, then structural, then nominal, then the default.
//! Classification always reads the card's current traits and kind, so
//! traits gained by ability transfer count.

use super::definition::KindId;
use super::instance::Card;
use super::registry::KindRegistry;
use super::traits::Trait;

/// Check whether `card` exposes every trait in `required`.
#[must_use]
pub fn matches_structurally(card: &Card, required: &[Trait]) -> bool {
    card.traits.contains_all(required)
}

/// Check whether `card` is declared as `kind` or one of its descendants.
#[must_use]
pub fn matches_nominally(card: &Card, kind: KindId, kinds: &KindRegistry) -> bool {
    kinds.is_descendant(card.kind, kind)
}

/// Outcome of classification, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Matches both the structural and the nominal category.
    Compound,
    /// Matches only the structural category.
    Structural,
    /// Matches only the nominal category.
    Nominal,
    /// Matches neither.
    Default,
}

/// A category defined by required traits.
#[derive(Clone, Debug)]
pub struct StructuralCategory {
    pub label: String,
    pub required: Vec<Trait>,
}

/// A category defined by a kind and its descendants.
#[derive(Clone, Debug)]
pub struct NominalCategory {
    pub label: String,
    pub kind: KindId,
}

/// Classifier combining one structural and one nominal category.
///
/// ```
/// use ccg_combat::cards::{Category, Classifier, KindId, Trait};
///
/// let classifier = Classifier::new(
///     ("Duck", vec![Trait::new("quacks"), Trait::new("swims")]),
///     ("Dog", KindId::new(2)),
/// )
/// .with_compound_label("Duck-Dog")
/// .with_default_label("Creature");
///
/// assert_eq!(classifier.label(Category::Compound), "Duck-Dog");
/// assert_eq!(classifier.label(Category::Default), "Creature");
/// ```
#[derive(Clone, Debug)]
pub struct Classifier {
    structural: StructuralCategory,
    nominal: NominalCategory,
    compound_label: String,
    default_label: String,
}

impl Classifier {
    /// Create a classifier from a structural and a nominal category.
    ///
    /// The compound label defaults to `"<structural>-<nominal>"`.
    #[must_use]
    pub fn new(
        structural: (impl Into<String>, Vec<Trait>),
        nominal: (impl Into<String>, KindId),
    ) -> Self {
        let structural = StructuralCategory {
            label: structural.0.into(),
            required: structural.1,
        };
        let nominal = NominalCategory {
            label: nominal.0.into(),
            kind: nominal.1,
        };
        let compound_label = format!("{}-{}", structural.label, nominal.label);

        Self {
            structural,
            nominal,
            compound_label,
            default_label: "Creature".to_string(),
        }
    }

    /// Set the label for cards matching both categories (builder pattern).
    #[must_use]
    pub fn with_compound_label(mut self, label: impl Into<String>) -> Self {
        self.compound_label = label.into();
        self
    }

    /// Set the label for cards matching neither category (builder pattern).
    #[must_use]
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    #[must_use]
    pub fn structural(&self) -> &StructuralCategory {
        &self.structural
    }

    #[must_use]
    pub fn nominal(&self) -> &NominalCategory {
        &self.nominal
    }

    /// Structural test for this classifier's structural category.
    #[must_use]
    pub fn is_structural(&self, card: &Card) -> bool {
        matches_structurally(card, &self.structural.required)
    }

    /// Nominal test for this classifier's nominal category.
    #[must_use]
    pub fn is_nominal(&self, card: &Card, kinds: &KindRegistry) -> bool {
        matches_nominally(card, self.nominal.kind, kinds)
    }

    /// Classify a card.
    #[must_use]
    pub fn classify(&self, card: &Card, kinds: &KindRegistry) -> Category {
        match (self.is_structural(card), self.is_nominal(card, kinds)) {
            (true, true) => Category::Compound,
            (true, false) => Category::Structural,
            (false, true) => Category::Nominal,
            (false, false) => Category::Default,
        }
    }

    /// Human-readable label for a category.
    #[must_use]
    pub fn label(&self, category: Category) -> &str {
        match category {
            Category::Compound => &self.compound_label,
            Category::Structural => &self.structural.label,
            Category::Nominal => &self.nominal.label,
            Category::Default => &self.default_label,
        }
    }

    /// Classify and label in one go.
    #[must_use]
    pub fn describe(&self, card: &Card, kinds: &KindRegistry) -> &str {
        self.label(self.classify(card, kinds))
    }
}
