//! Ability transfer.
//!
//! Moves owned hooks (or traits) from one card to another at runtime.
//! Only what the source card owns moves; a requested slot the source does
//! not own, including one it merely inherits from its kind's ancestors, is
//! left alone on both cards. Lifecycle hooks never move: population
//! bookkeeping belongs to the card that entered play. Every transfer is
//! appended to the board's audit log.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::HookSlot;
use crate::cards::Trait;
use crate::core::{CombatError, CombatResult, EntityId};
use crate::rules::Board;

/// Audit record of one transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub from: EntityId,
    pub to: EntityId,
    /// Slots that moved from `from` to `to`.
    pub moved: Vec<HookSlot>,
    /// Requested slots `from` did not own (absent or only inherited); untouched.
    pub skipped: Vec<HookSlot>,
    /// Traits that moved from `from` to `to`.
    pub traits: Vec<Trait>,
}

impl TransferRecord {
    fn new(from: EntityId, to: EntityId) -> Self {
        Self {
            from,
            to,
            moved: Vec::new(),
            skipped: Vec::new(),
            traits: Vec::new(),
        }
    }

    /// Check if anything actually moved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.traits.is_empty()
    }
}

/// Move the hooks in `slots` that `from` owns onto `to`.
///
/// A moved hook replaces whatever `to` owned in that slot. Requesting a
/// lifecycle slot, or a slot that neither card defines, is a contract
/// violation and nothing moves.
///
/// This does not notify observers; `Arena::transfer_abilities` wraps it
/// with a view refresh.
pub fn transfer(
    board: &mut Board,
    slots: &[HookSlot],
    from: EntityId,
    to: EntityId,
) -> CombatResult<TransferRecord> {
    if from == to {
        return Err(CombatError::SelfTransfer(from));
    }

    let mut record = TransferRecord::new(from, to);
    {
        let source = board.card(from)?;
        let target = board.card(to)?;
        for &slot in slots {
            if slot.is_lifecycle() {
                return Err(CombatError::LifecycleTransfer { slot, from });
            }
            if source.hooks.owns(slot) {
                record.moved.push(slot);
            } else if source.hooks.defines(slot) || target.hooks.defines(slot) {
                record.skipped.push(slot);
            } else {
                return Err(CombatError::HookNotDefined { slot, from, to });
            }
        }
    }

    let mut taken = Vec::with_capacity(record.moved.len());
    let source = board.card_mut(from)?;
    for &slot in &record.moved {
        if let Some(hook) = source.hooks.remove(slot) {
            taken.push(hook);
        }
    }
    let target = board.card_mut(to)?;
    for hook in taken {
        target.hooks.insert(hook);
    }

    info!(
        from = %from,
        to = %to,
        moved = ?record.moved,
        skipped = ?record.skipped,
        "abilities transferred"
    );
    board.record_transfer(record.clone());
    Ok(record)
}

/// Move the traits in `traits` that `from` has onto `to`.
///
/// Traits `from` lacks are ignored. Classification reads current traits,
/// so a card can change category through this.
pub fn transfer_traits(
    board: &mut Board,
    traits: &[Trait],
    from: EntityId,
    to: EntityId,
) -> CombatResult<TransferRecord> {
    if from == to {
        return Err(CombatError::SelfTransfer(from));
    }
    board.card(to)?;

    let mut record = TransferRecord::new(from, to);
    let source = board.card_mut(from)?;
    for t in traits {
        if source.traits.remove(t) {
            record.traits.push(t.clone());
        }
    }
    let target = board.card_mut(to)?;
    for t in &record.traits {
        target.traits.insert(t.clone());
    }

    info!(from = %from, to = %to, traits = ?record.traits, "traits transferred");
    board.record_transfer(record.clone());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{KindDefinition, KindId};
    use crate::games::ducks;
    use crate::CombatConfig;

    fn board() -> Board {
        ducks::board(CombatConfig::default())
    }

    #[test]
    fn test_moved_hook_replaces_target_slot() {
        let mut board = board();
        let first = board.create_card(ducks::TRASHER).unwrap();
        let second = board.create_card(ducks::LAD).unwrap();

        let record = transfer(&mut board, &[HookSlot::ModifyTakenDamage], first, second).unwrap();
        assert_eq!(record.moved, vec![HookSlot::ModifyTakenDamage]);

        let texts: Vec<_> = board.card(second).unwrap().hooks.texts().map(str::to_string).collect();
        assert!(texts.contains(&ducks::TRASHER_TEXT.to_string()));
        assert!(!texts.contains(&ducks::LAD_TAKEN_TEXT.to_string()));
    }

    #[test]
    fn test_unknown_card() {
        let mut board = board();
        let trasher = board.create_card(ducks::TRASHER).unwrap();

        assert_eq!(
            transfer(&mut board, &[HookSlot::ModifyTakenDamage], trasher, EntityId(99)),
            Err(CombatError::UnknownCard(EntityId(99)))
        );
        assert!(board.card(trasher).unwrap().hooks.owns(HookSlot::ModifyTakenDamage));
    }

    #[test]
    fn test_empty_request_is_logged() {
        let mut board = board();
        let a = board.create_card(ducks::DOG).unwrap();
        let b = board.create_card(ducks::DOG).unwrap();

        let record = transfer(&mut board, &[], a, b).unwrap();
        assert!(record.is_empty());
        assert_eq!(board.transfers().len(), 1);
    }

    #[test]
    fn test_missing_traits_are_ignored() {
        let mut board = board();
        let duck = board.create_card(ducks::DUCK).unwrap();
        let dog = board.create_card(ducks::DOG).unwrap();

        let record = transfer_traits(&mut board, &[ducks::SWIMS, Trait::new("barks")], duck, dog).unwrap();
        assert_eq!(record.traits, vec![ducks::SWIMS]);
        assert!(board.card(dog).unwrap().has_trait(&ducks::SWIMS));
        assert!(board.card(duck).unwrap().has_trait(&ducks::QUACKS));
    }

    #[test]
    fn test_trait_self_transfer() {
        let mut board = board();
        let duck = board.create_card(ducks::DUCK).unwrap();
        assert_eq!(
            transfer_traits(&mut board, &[ducks::SWIMS], duck, duck),
            Err(CombatError::SelfTransfer(duck))
        );
    }

    #[test]
    fn test_lifecycle_slots_rejected() {
        let mut board = board();
        let lad = board.create_card(ducks::LAD).unwrap();
        let dog = board.create_card(ducks::DOG).unwrap();

        assert_eq!(
            transfer(&mut board, &[HookSlot::ModifyTakenDamage, HookSlot::OnLeavePlay], lad, dog),
            Err(CombatError::LifecycleTransfer {
                slot: HookSlot::OnLeavePlay,
                from: lad,
            })
        );
        let card = board.card(lad).unwrap();
        assert!(card.hooks.owns(HookSlot::OnLeavePlay));
        assert!(card.hooks.owns(HookSlot::ModifyTakenDamage));
        assert!(board.transfers().is_empty());
    }

    #[test]
    fn test_inherited_hook_stays() {
        let mut kinds = ducks::kind_registry();
        kinds
            .register(KindDefinition::new(KindId::new(40), "Big Trasher", 7).with_parent(ducks::TRASHER))
            .unwrap();
        let mut board = Board::new(CombatConfig::default(), kinds, ducks::classifier());
        let big = board.create_card(KindId::new(40)).unwrap();
        let dog = board.create_card(ducks::DOG).unwrap();

        let record = transfer(&mut board, &[HookSlot::ModifyTakenDamage], big, dog).unwrap();
        assert!(record.moved.is_empty());
        assert_eq!(record.skipped, vec![HookSlot::ModifyTakenDamage]);
        assert!(board.card(big).unwrap().hooks.inherits(HookSlot::ModifyTakenDamage));
        assert!(!board.card(dog).unwrap().hooks.defines(HookSlot::ModifyTakenDamage));
    }
}
