//! Power changes other than damage.

use tracing::info;

use crate::core::{CombatResult, EntityId};
use crate::rules::Arena;

/// Raise a card's power cap by `grow` and restore up to `heal` power.
///
/// Plays the heal signal and refreshes the view. Returns the power
/// actually restored.
pub fn empower(arena: &mut Arena, card: EntityId, grow: i64, heal: i64) -> CombatResult<i64> {
    let target = arena.board_mut().card_mut(card)?;
    target.grow_max(grow);
    let restored = target.heal(heal);
    let (power, max) = (target.current_power, target.max_power);

    info!(card = %card, grow, restored, power, max, "card empowered");
    arena.signal_heal(card);
    arena.update_view();
    Ok(restored)
}

/// Restore up to `amount` power without changing the cap.
pub fn heal(arena: &mut Arena, card: EntityId, amount: i64) -> CombatResult<i64> {
    empower(arena, card, 0, amount)
}
