//! Single-die rolls with a user-chosen maximum.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{RandomError, RandomResult};

/// Maximum used when the user gives none.
pub const DEFAULT_DICE_MAX: i64 = 100;

/// The result of rolling one die.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// Highest possible value.
    pub max: u64,
    /// The value rolled (1 to `max`).
    pub value: u64,
}

/// Roll a value in `1..=max`.
pub fn roll_dice(max: i64, rng: &mut StdRng) -> RandomResult<DiceRoll> {
    let max = u64::try_from(max)
        .ok()
        .filter(|m| *m > 0)
        .ok_or(RandomError::NonPositiveMax(max))?;
    Ok(DiceRoll {
        max,
        value: rng.random_range(1..=max),
    })
}
