//! Card locations during combat.
//!
//! ## Key Types
//!
//! - `Table`: one side's ordered slots of cards in play
//! - `Seat`: a card's (player, slot) address

pub mod table;

pub use table::{Seat, Table};
