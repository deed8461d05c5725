//! Hooks: the named extension points a card can own.
//!
//! A card participates in lifecycle and damage resolution only through
//! the hooks it currently owns. Absence of a hook is the identity
//! behaviour (pass the damage through, use the default attack), never an
//! error.
//!
//! ## Key Types
//!
//! - [`HookSlot`]: the six extension points
//! - [`Hook`]: one slot's implementation plus optional descriptive text
//! - [`HookSet`]: the hooks one card owns, keyed by slot
//!
//! Hook implementations are reference-counted closures. A `HookSet` is a
//! persistent map, so cards created from the same kind share the closures
//! but never the map: moving a hook off one card leaves every other card
//! of that kind untouched.

mod transfer;

pub use transfer::{transfer, transfer_traits, TransferRecord};

use std::borrow::Cow;
use std::rc::Rc;

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::{CombatResult, GameContext};
use crate::effects::DamageEvent;
use crate::rules::Arena;
use crate::stack::{Done, Signal};

/// Named extension points.
///
/// Ordering is the order descriptions list hook texts in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HookSlot {
    PerformAttack,
    ModifyDealtDamageToCreature,
    ModifyDealtDamageToPlayer,
    ModifyTakenDamage,
    OnEnterPlay,
    OnLeavePlay,
}

impl HookSlot {
    /// Every slot, in description order.
    pub const ALL: [HookSlot; 6] = [
        HookSlot::PerformAttack,
        HookSlot::ModifyDealtDamageToCreature,
        HookSlot::ModifyDealtDamageToPlayer,
        HookSlot::ModifyTakenDamage,
        HookSlot::OnEnterPlay,
        HookSlot::OnLeavePlay,
    ];

    /// The slots that adjust a damage number.
    pub const DAMAGE_MODIFIERS: [HookSlot; 3] = [
        HookSlot::ModifyDealtDamageToCreature,
        HookSlot::ModifyDealtDamageToPlayer,
        HookSlot::ModifyTakenDamage,
    ];

    /// Canonical hook name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HookSlot::PerformAttack => "performAttack",
            HookSlot::ModifyDealtDamageToCreature => "modifyDealtDamageToCreature",
            HookSlot::ModifyDealtDamageToPlayer => "modifyDealtDamageToPlayer",
            HookSlot::ModifyTakenDamage => "modifyTakenDamage",
            HookSlot::OnEnterPlay => "onEnterPlay",
            HookSlot::OnLeavePlay => "onLeavePlay",
        }
    }

    #[must_use]
    pub const fn is_lifecycle(self) -> bool {
        matches!(self, HookSlot::OnEnterPlay | HookSlot::OnLeavePlay)
    }

    #[must_use]
    pub const fn is_damage_modifier(self) -> bool {
        matches!(
            self,
            HookSlot::ModifyDealtDamageToCreature
                | HookSlot::ModifyDealtDamageToPlayer
                | HookSlot::ModifyTakenDamage
        )
    }
}

impl std::fmt::Display for HookSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `onEnterPlay` / `onLeavePlay`: must fire `done` exactly once.
pub type LifecycleFn = dyn Fn(&mut Arena, &GameContext, Done) -> CombatResult<()>;

/// Damage modifiers: receive the running amount, resume with the adjusted one.
pub type ModifierFn = dyn Fn(&mut Arena, &DamageEvent, i64, Signal<i64>) -> CombatResult<()>;

/// `performAttack`: runs the whole attack, then fires `done`.
pub type AttackFn = dyn Fn(&mut Arena, &GameContext, Done) -> CombatResult<()>;

/// The implementation behind a hook.
#[derive(Clone)]
pub enum Behavior {
    Lifecycle(Rc<LifecycleFn>),
    Modifier(Rc<ModifierFn>),
    Attack(Rc<AttackFn>),
}

/// One hook: the slot it fills, what it does, and how it describes itself.
///
/// Constructors tie each slot to the behaviour shape it needs, so a
/// modifier can never end up in a lifecycle slot.
#[derive(Clone)]
pub struct Hook {
    slot: HookSlot,
    text: Option<Cow<'static, str>>,
    behavior: Behavior,
}

impl Hook {
    pub fn on_enter_play(
        f: impl Fn(&mut Arena, &GameContext, Done) -> CombatResult<()> + 'static,
    ) -> Self {
        Self::new(HookSlot::OnEnterPlay, Behavior::Lifecycle(Rc::new(f)))
    }

    pub fn on_leave_play(
        f: impl Fn(&mut Arena, &GameContext, Done) -> CombatResult<()> + 'static,
    ) -> Self {
        Self::new(HookSlot::OnLeavePlay, Behavior::Lifecycle(Rc::new(f)))
    }

    pub fn modify_dealt_damage_to_creature(
        f: impl Fn(&mut Arena, &DamageEvent, i64, Signal<i64>) -> CombatResult<()> + 'static,
    ) -> Self {
        Self::new(
            HookSlot::ModifyDealtDamageToCreature,
            Behavior::Modifier(Rc::new(f)),
        )
    }

    pub fn modify_dealt_damage_to_player(
        f: impl Fn(&mut Arena, &DamageEvent, i64, Signal<i64>) -> CombatResult<()> + 'static,
    ) -> Self {
        Self::new(
            HookSlot::ModifyDealtDamageToPlayer,
            Behavior::Modifier(Rc::new(f)),
        )
    }

    pub fn modify_taken_damage(
        f: impl Fn(&mut Arena, &DamageEvent, i64, Signal<i64>) -> CombatResult<()> + 'static,
    ) -> Self {
        Self::new(HookSlot::ModifyTakenDamage, Behavior::Modifier(Rc::new(f)))
    }

    pub fn perform_attack(
        f: impl Fn(&mut Arena, &GameContext, Done) -> CombatResult<()> + 'static,
    ) -> Self {
        Self::new(HookSlot::PerformAttack, Behavior::Attack(Rc::new(f)))
    }

    fn new(slot: HookSlot, behavior: Behavior) -> Self {
        Self {
            slot,
            text: None,
            behavior,
        }
    }

    /// Attach descriptive text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn slot(&self) -> HookSlot {
        self.slot
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }
}

impl std::fmt::Debug for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("slot", &self.slot)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

/// The hooks one card carries.
///
/// Two layers: hooks the card owns, and a base layer inherited from its
/// kind's ancestors. Lookup prefers an owned hook and falls back to the
/// base. Only owned hooks can be inserted, removed or transferred.
#[derive(Clone, Debug, Default)]
pub struct HookSet {
    own: OrdMap<HookSlot, Hook>,
    base: OrdMap<HookSlot, Hook>,
}

impl HookSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the inherited layer (builder pattern).
    #[must_use]
    pub fn with_base(mut self, base: &HookSet) -> Self {
        self.base = base.resolved();
        self
    }

    /// Both layers flattened, owned hooks winning.
    fn resolved(&self) -> OrdMap<HookSlot, Hook> {
        self.own.clone().union(self.base.clone())
    }

    /// Install an owned hook in its slot, returning the owned one it replaced.
    pub fn insert(&mut self, hook: Hook) -> Option<Hook> {
        self.own.insert(hook.slot, hook)
    }

    /// Remove and return the owned hook in `slot`. An inherited hook in
    /// the same slot becomes visible again.
    pub fn remove(&mut self, slot: HookSlot) -> Option<Hook> {
        self.own.remove(&slot)
    }

    /// The hook in effect for `slot`.
    #[must_use]
    pub fn get(&self, slot: HookSlot) -> Option<&Hook> {
        self.own.get(&slot).or_else(|| self.base.get(&slot))
    }

    /// Check whether this card owns a hook in `slot`.
    #[must_use]
    pub fn owns(&self, slot: HookSlot) -> bool {
        self.own.contains_key(&slot)
    }

    /// Check whether `slot` is only inherited.
    #[must_use]
    pub fn inherits(&self, slot: HookSlot) -> bool {
        !self.owns(slot) && self.base.contains_key(&slot)
    }

    /// Check whether any hook, owned or inherited, fills `slot`.
    #[must_use]
    pub fn defines(&self, slot: HookSlot) -> bool {
        self.get(slot).is_some()
    }

    /// Lifecycle implementation in effect for `slot`.
    #[must_use]
    pub fn lifecycle(&self, slot: HookSlot) -> Option<Rc<LifecycleFn>> {
        match self.get(slot).map(Hook::behavior) {
            Some(Behavior::Lifecycle(f)) => Some(Rc::clone(f)),
            _ => None,
        }
    }

    /// Modifier implementation in effect for `slot`.
    #[must_use]
    pub fn modifier(&self, slot: HookSlot) -> Option<Rc<ModifierFn>> {
        match self.get(slot).map(Hook::behavior) {
            Some(Behavior::Modifier(f)) => Some(Rc::clone(f)),
            _ => None,
        }
    }

    /// Attack implementation in effect.
    #[must_use]
    pub fn attack(&self) -> Option<Rc<AttackFn>> {
        match self.get(HookSlot::PerformAttack).map(Hook::behavior) {
            Some(Behavior::Attack(f)) => Some(Rc::clone(f)),
            _ => None,
        }
    }

    /// Owned slots, in description order.
    pub fn slots(&self) -> impl Iterator<Item = HookSlot> + '_ {
        self.own.keys().copied()
    }

    /// Descriptive texts of the hooks in effect, in description order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        HookSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot))
            .filter_map(Hook::text)
    }

    /// Number of owned hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.own.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.own.is_empty()
    }
}
