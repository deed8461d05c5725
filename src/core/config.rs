//! Combat configuration.
//!
//! Games configure the combat core at startup with a `CombatConfig`.
//! Nothing in resolution hardcodes table sizes, power floors or
//! player health; all of it is read from here.

use serde::{Deserialize, Serialize};

/// Configuration for a combat board.
///
/// ```
/// use ccg_combat::core::CombatConfig;
///
/// let config = CombatConfig::default()
///     .with_player_power(12)
///     .with_table_slots(Some(4));
///
/// assert_eq!(config.player_count, 2);
/// assert_eq!(config.player_power, 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Number of sides at the table.
    pub player_count: usize,

    /// Power floor. A card whose power reaches it leaves play.
    pub min_power: i64,

    /// Starting power of every player.
    pub player_power: i64,

    /// Slots per table. `None` for unlimited.
    pub table_slots: Option<usize>,

    /// Damage a default attack deals to the opposing player when the
    /// opposing slot is empty.
    pub player_damage: i64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            min_power: 0,
            player_power: 10,
            table_slots: Some(5),
            player_damage: 1,
        }
    }
}

impl CombatConfig {
    /// Set the number of sides (builder pattern).
    #[must_use]
    pub fn with_player_count(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Set the power floor (builder pattern).
    #[must_use]
    pub fn with_min_power(mut self, min_power: i64) -> Self {
        self.min_power = min_power;
        self
    }

    /// Set the starting player power (builder pattern).
    #[must_use]
    pub fn with_player_power(mut self, power: i64) -> Self {
        self.player_power = power;
        self
    }

    /// Set the table size (builder pattern).
    #[must_use]
    pub fn with_table_slots(mut self, slots: Option<usize>) -> Self {
        self.table_slots = slots;
        self
    }

    /// Set the damage dealt to an undefended player (builder pattern).
    #[must_use]
    pub fn with_player_damage(mut self, damage: i64) -> Self {
        self.player_damage = damage;
        self
    }

    /// Validate the configuration.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.player_count < 2 {
            errors.push("Combat needs at least 2 sides".to_string());
        }
        if self.player_count > 255 {
            errors.push("At most 255 sides supported".to_string());
        }
        if self.table_slots == Some(0) {
            errors.push("Tables must have at least one slot".to_string());
        }
        if self.player_damage < 0 {
            errors.push("Player damage cannot be negative".to_string());
        }

        errors
    }

    /// Check if the configuration is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
