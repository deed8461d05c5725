//! Board state: every side, every card, shared counters.
//!
//! The `Board` owns all combat state. Cards live in one map keyed by
//! `EntityId` whether they are on a table or not; tables only hold IDs.
//! The population registry is the single piece of state shared between
//! cards, and it lives here rather than in any global.

use std::rc::Rc;

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::cards::{Card, Category, Classifier, KindDefinition, KindId, KindRegistry};
use crate::core::{CombatConfig, CombatError, CombatResult, EntityId, PlayerId, PlayerMap};
use crate::effects::PopulationRegistry;
use crate::hooks::{AttackFn, HookSlot, LifecycleFn, ModifierFn, TransferRecord};
use crate::zones::{Seat, Table};

/// One side of the table.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub power: i64,
    pub table: Table,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, power: i64, table_slots: Option<usize>) -> Self {
        Self {
            name: name.into(),
            power,
            table: Table::new(table_slots),
        }
    }

    /// Lower power by `amount`, stopping at zero. Returns the new power.
    pub fn lose_power(&mut self, amount: i64) -> i64 {
        self.power = (self.power - amount.max(0)).max(0);
        self.power
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.power <= 0
    }
}

/// All combat state.
#[derive(Clone, Debug)]
pub struct Board {
    config: CombatConfig,
    kinds: KindRegistry,
    classifier: Classifier,
    players: PlayerMap<Player>,
    cards: FxHashMap<EntityId, Card>,
    population: PopulationRegistry,
    transfers: Vector<TransferRecord>,
    next_card: u32,
}

impl Board {
    /// Create a board with empty tables.
    ///
    /// Panics if `config` is invalid.
    #[must_use]
    pub fn new(config: CombatConfig, kinds: KindRegistry, classifier: Classifier) -> Self {
        let problems = config.validate();
        assert!(problems.is_empty(), "Invalid combat config: {problems:?}");

        let players = PlayerMap::new(config.player_count, |p| {
            Player::new(p.to_string(), config.player_power, config.table_slots)
        });
        let next_card = EntityId::first_card(config.player_count);

        Self {
            config,
            kinds,
            classifier,
            players,
            cards: FxHashMap::default(),
            population: PopulationRegistry::new(),
            transfers: Vector::new(),
            next_card,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    #[must_use]
    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    // === Players ===

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> CombatResult<&Player> {
        self.players.try_get(id).ok_or(CombatError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> CombatResult<&mut Player> {
        self.players
            .try_get_mut(id)
            .ok_or(CombatError::UnknownPlayer(id))
    }

    /// Rename a side (builder pattern).
    #[must_use]
    pub fn with_player_name(mut self, id: PlayerId, name: impl Into<String>) -> Self {
        if let Some(player) = self.players.try_get_mut(id) {
            player.name = name.into();
        }
        self
    }

    #[must_use]
    pub fn is_player(&self, entity: EntityId) -> bool {
        entity.is_player(self.config.player_count)
    }

    #[must_use]
    pub fn as_player(&self, entity: EntityId) -> Option<PlayerId> {
        entity.as_player(self.config.player_count)
    }

    /// The side that faces `player`.
    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> PlayerId {
        player.next(self.config.player_count)
    }

    // === Cards ===

    /// Create a card of a registered kind. It starts off the table.
    pub fn create_card(&mut self, kind: KindId) -> CombatResult<EntityId> {
        let def = self.kinds.get(kind)?.clone();
        Ok(self.create_card_from(&def))
    }

    /// Create a card from an ad-hoc definition.
    pub fn create_card_from(&mut self, def: &KindDefinition) -> EntityId {
        let id = EntityId(self.next_card);
        self.next_card += 1;
        self.cards.insert(id, Card::from_kind(id, def));
        id
    }

    pub fn card(&self, id: EntityId) -> CombatResult<&Card> {
        self.cards.get(&id).ok_or(CombatError::UnknownCard(id))
    }

    pub fn card_mut(&mut self, id: EntityId) -> CombatResult<&mut Card> {
        self.cards.get_mut(&id).ok_or(CombatError::UnknownCard(id))
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cards.contains_key(&id)
    }

    // === Tables ===

    pub fn table(&self, player: PlayerId) -> CombatResult<&Table> {
        Ok(&self.player(player)?.table)
    }

    /// Card in slot `position` of `player`'s table.
    #[must_use]
    pub fn card_at(&self, player: PlayerId, position: usize) -> Option<EntityId> {
        self.players.try_get(player)?.table.get(position)
    }

    /// Cards on `player`'s table, in slot order.
    pub fn cards_on_table(&self, player: PlayerId) -> CombatResult<Vec<EntityId>> {
        Ok(self.table(player)?.cards().collect())
    }

    /// Cards on every table, sides in seating order, slots in order.
    #[must_use]
    pub fn cards_in_play(&self) -> Vec<EntityId> {
        self.players
            .iter()
            .flat_map(|(_, p)| p.table.cards())
            .collect()
    }

    /// Seat a card in the first empty slot of `player`'s table.
    pub fn place(&mut self, player: PlayerId, card: EntityId) -> CombatResult<Seat> {
        if self.card(card)?.is_in_play() {
            return Err(CombatError::AlreadyOnTable(card));
        }
        let position = self
            .player_mut(player)?
            .table
            .place(card)
            .ok_or(CombatError::TableFull(player))?;
        let seat = Seat::new(player, position);
        self.card_mut(card)?.set_seat(Some(seat));
        Ok(seat)
    }

    /// Take a card off its table. Returns the seat it had.
    pub fn unseat(&mut self, card: EntityId) -> CombatResult<Seat> {
        let seat = self.card(card)?.seat().ok_or(CombatError::NotOnTable(card))?;
        self.player_mut(seat.player)?.table.vacate(card);
        self.card_mut(card)?.set_seat(None);
        info!(card = %card, player = %seat.player, position = seat.position, "card left the table");
        Ok(seat)
    }

    // === Hooks ===

    /// Modifier hook `card` owns in `slot`. `None` for unknown cards.
    #[must_use]
    pub fn modifier_hook(&self, card: EntityId, slot: HookSlot) -> Option<Rc<ModifierFn>> {
        self.cards.get(&card)?.hooks.modifier(slot)
    }

    #[must_use]
    pub fn lifecycle_hook(&self, card: EntityId, slot: HookSlot) -> Option<Rc<LifecycleFn>> {
        self.cards.get(&card)?.hooks.lifecycle(slot)
    }

    #[must_use]
    pub fn attack_hook(&self, card: EntityId) -> Option<Rc<AttackFn>> {
        self.cards.get(&card)?.hooks.attack()
    }

    // === Classification ===

    pub fn classify(&self, card: EntityId) -> CombatResult<Category> {
        Ok(self.classifier.classify(self.card(card)?, &self.kinds))
    }

    /// Description lines: each owned hook's text, then the category label.
    pub fn describe(&self, card: EntityId) -> CombatResult<Vec<String>> {
        let card = self.card(card)?;
        let mut lines: Vec<String> = card.hooks.texts().map(str::to_string).collect();
        lines.push(self.classifier.describe(card, &self.kinds).to_string());
        Ok(lines)
    }

    // === Shared state ===

    #[must_use]
    pub fn population(&self) -> &PopulationRegistry {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut PopulationRegistry {
        &mut self.population
    }

    /// Ability transfers so far, oldest first.
    #[must_use]
    pub fn transfers(&self) -> &Vector<TransferRecord> {
        &self.transfers
    }

    pub(crate) fn record_transfer(&mut self, record: TransferRecord) {
        self.transfers.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ducks;

    fn board() -> Board {
        ducks::board(CombatConfig::default().with_table_slots(Some(2)))
    }

    #[test]
    fn test_card_ids_start_after_players() {
        let mut board = board();
        let first = board.create_card(ducks::DUCK).unwrap();
        let second = board.create_card(ducks::DOG).unwrap();
        assert_eq!(first, EntityId(2));
        assert_eq!(second, EntityId(3));
        assert!(!board.is_player(first));
        assert!(board.is_player(EntityId(1)));
    }

    #[test]
    fn test_unknown_kind() {
        let mut board = board();
        assert_eq!(
            board.create_card(KindId::new(999)),
            Err(CombatError::UnknownKind(KindId::new(999)))
        );
    }

    #[test]
    fn test_place_and_unseat() {
        let mut board = board();
        let p0 = PlayerId::new(0);
        let a = board.create_card(ducks::DUCK).unwrap();
        let b = board.create_card(ducks::DUCK).unwrap();
        let c = board.create_card(ducks::DUCK).unwrap();

        assert_eq!(board.place(p0, a).unwrap(), Seat::new(p0, 0));
        assert_eq!(board.place(p0, a), Err(CombatError::AlreadyOnTable(a)));
        assert_eq!(board.place(p0, b).unwrap().position, 1);
        assert_eq!(board.place(p0, c), Err(CombatError::TableFull(p0)));

        assert_eq!(board.unseat(a).unwrap().position, 0);
        assert_eq!(board.card_at(p0, 0), None);
        assert_eq!(board.unseat(a), Err(CombatError::NotOnTable(a)));
        assert_eq!(board.place(p0, c).unwrap().position, 0);
        assert_eq!(board.cards_on_table(p0).unwrap(), vec![c, b]);
    }

    #[test]
    fn test_player_lookup() {
        let board = board();
        assert_eq!(board.player(PlayerId::new(1)).unwrap().power, 10);
        assert!(matches!(
            board.player(PlayerId::new(4)),
            Err(CombatError::UnknownPlayer(_))
        ));
        assert_eq!(board.opponent_of(PlayerId::new(1)), PlayerId::new(0));
    }

    #[test]
    fn test_player_power_floors_at_zero() {
        let mut player = Player::new("Sheriff", 3, None);
        assert_eq!(player.lose_power(5), 0);
        assert!(player.is_defeated());
    }

    #[test]
    fn test_describe_puts_hook_text_first() {
        let mut board = board();
        let trasher = board.create_card(ducks::TRASHER).unwrap();
        let lines = board.describe(trasher).unwrap();
        assert_eq!(lines, vec![ducks::TRASHER_TEXT.to_string(), "Dog".to_string()]);
    }

    #[test]
    #[should_panic(expected = "Invalid combat config")]
    fn test_invalid_config_panics() {
        let _ = ducks::board(CombatConfig::default().with_player_count(1));
    }
}
