//! Tables: one side's ordered roster of cards in play.
//!
//! A table is a row of slots. Slot order is targeting order: a default
//! attack hits the opposing card in the same slot, and multi-target
//! attacks walk the opposing table from slot 0 upward. A card leaving
//! play empties its slot without shifting the others, so positions stay
//! stable for the rest of a resolution.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};

/// Where a card sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub player: PlayerId,
    pub position: usize,
}

impl Seat {
    #[must_use]
    pub const fn new(player: PlayerId, position: usize) -> Self {
        Self { player, position }
    }
}

/// Ordered slots holding the cards one side has in play.
///
/// ```
/// use ccg_combat::core::EntityId;
/// use ccg_combat::zones::Table;
///
/// let mut table = Table::new(Some(3));
/// assert_eq!(table.place(EntityId(2)), Some(0));
/// assert_eq!(table.place(EntityId(3)), Some(1));
///
/// table.vacate(EntityId(2));
/// assert_eq!(table.get(0), None);
/// assert_eq!(table.place(EntityId(4)), Some(0)); // first empty slot
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    slots: Vector<Option<EntityId>>,
    capacity: Option<usize>,
}

impl Table {
    /// Create an empty table. `None` capacity means unlimited.
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            slots: Vector::new(),
            capacity,
        }
    }

    /// Put a card in the first empty slot, growing the row if there is
    /// none. Returns the slot, or `None` when the table is full.
    pub fn place(&mut self, card: EntityId) -> Option<usize> {
        if let Some(position) = self.slots.iter().position(Option::is_none) {
            self.slots.set(position, Some(card));
            return Some(position);
        }
        if self.capacity.is_some_and(|cap| self.slots.len() >= cap) {
            return None;
        }
        self.slots.push_back(Some(card));
        Some(self.slots.len() - 1)
    }

    /// Empty the slot holding `card`. Returns the slot it was in.
    pub fn vacate(&mut self, card: EntityId) -> Option<usize> {
        let position = self.position_of(card)?;
        self.slots.set(position, None);
        Some(position)
    }

    /// Card in slot `position`, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<EntityId> {
        self.slots.get(position).copied().flatten()
    }

    #[must_use]
    pub fn position_of(&self, card: EntityId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(card))
    }

    /// Number of slots, occupied or not.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Cards in slot order, skipping empty slots.
    pub fn cards(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.cards().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_in_order() {
        let mut table = Table::new(None);
        for i in 0..4 {
            assert_eq!(table.place(EntityId(10 + i)), Some(i as usize));
        }
        let cards: Vec<_> = table.cards().collect();
        assert_eq!(cards, vec![EntityId(10), EntityId(11), EntityId(12), EntityId(13)]);
    }

    #[test]
    fn test_capacity() {
        let mut table = Table::new(Some(2));
        table.place(EntityId(1));
        table.place(EntityId(2));
        assert_eq!(table.place(EntityId(3)), None);
        assert_eq!(table.capacity(), Some(2));
    }

    #[test]
    fn test_vacate_keeps_positions() {
        let mut table = Table::new(None);
        table.place(EntityId(1));
        table.place(EntityId(2));
        table.place(EntityId(3));

        assert_eq!(table.vacate(EntityId(2)), Some(1));
        assert_eq!(table.get(1), None);
        assert_eq!(table.get(2), Some(EntityId(3)));
        assert_eq!(table.slot_count(), 3);
        assert_eq!(table.occupied(), 2);
        assert_eq!(table.vacate(EntityId(2)), None);
    }

    #[test]
    fn test_full_table_reuses_holes() {
        let mut table = Table::new(Some(2));
        table.place(EntityId(1));
        table.place(EntityId(2));
        table.vacate(EntityId(1));
        assert_eq!(table.place(EntityId(3)), Some(0));
    }

    #[test]
    fn test_empty() {
        let mut table = Table::new(None);
        assert!(table.is_empty());
        table.place(EntityId(1));
        table.vacate(EntityId(1));
        assert!(table.is_empty());
        assert_eq!(table.get(7), None);
    }
}
