//! Combat errors.
//!
//! Every variant is a contract violation: a caller asked the core for
//! something that cannot be true of a well-formed game. Resolution stops
//! at the first one. Missing hooks are not errors and never show up here.

use crate::cards::KindId;
use crate::hooks::HookSlot;

use super::entity::EntityId;
use super::player::PlayerId;

/// Errors surfaced by combat resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("unknown card: {0}")]
    UnknownCard(EntityId),

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown creature kind: {0}")]
    UnknownKind(KindId),

    #[error("creature kind {0} is already registered")]
    DuplicateKind(KindId),

    #[error("no free slot on the table of {0}")]
    TableFull(PlayerId),

    #[error("card {0} is not on a table")]
    NotOnTable(EntityId),

    #[error("card {0} is already on a table")]
    AlreadyOnTable(EntityId),

    #[error("population of {kind} would drop below zero: {card} was never counted")]
    PopulationUnderflow { kind: KindId, card: EntityId },

    #[error("population of {kind} already counts {card}")]
    DoublePopulationEntry { kind: KindId, card: EntityId },

    #[error("hook {slot} is defined by neither {from} nor {to}")]
    HookNotDefined {
        slot: HookSlot,
        from: EntityId,
        to: EntityId,
    },

    #[error("lifecycle hook {slot} of {from} cannot be transferred")]
    LifecycleTransfer { slot: HookSlot, from: EntityId },

    #[error("ability transfer from {0} to itself")]
    SelfTransfer(EntityId),

    #[error("{abandoned} step(s) dropped their completion signal without firing it")]
    StalledStep { abandoned: usize },
}

/// Result alias used throughout the crate.
pub type CombatResult<T> = Result<T, CombatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CombatError::PopulationUnderflow {
            kind: KindId::new(3),
            card: EntityId(9),
        };
        assert_eq!(
            err.to_string(),
            "population of Kind(3) would drop below zero: Entity(9) was never counted"
        );

        let err = CombatError::HookNotDefined {
            slot: HookSlot::ModifyTakenDamage,
            from: EntityId(2),
            to: EntityId(3),
        };
        assert_eq!(
            err.to_string(),
            "hook modifyTakenDamage is defined by neither Entity(2) nor Entity(3)"
        );
    }
}
