//! Concrete games built on the combat core.
//!
//! - `ducks`: Ducks vs Dogs, the reference roster

pub mod ducks;
