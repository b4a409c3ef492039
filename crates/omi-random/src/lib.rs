//! Stateless randomizers for the omikuji chat plugin.
//!
//! Provides a picker for user-supplied options, a weighted lot draw, and a
//! single die with a chosen maximum. Nothing here is persisted.

pub mod choice;
pub mod dice;
pub mod error;
pub mod lot;

pub use choice::{parse_options, pick_one};
pub use dice::{DEFAULT_DICE_MAX, DiceRoll, roll_dice};
pub use error::{RandomError, RandomResult};
pub use lot::{LOTS, Lot, draw_lot};
