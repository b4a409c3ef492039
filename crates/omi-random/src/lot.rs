//! Weighted lot drawing.
//!
//! Seven lots from 大吉 (great blessing) down to 大凶 (great misfortune).
//! Weights are relative and favour the middle of the table.

use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;

use crate::error::{RandomError, RandomResult};

/// One entry of a lot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lot {
    /// Short label, e.g. 大吉.
    pub label: &'static str,
    /// One-line reading.
    pub description: &'static str,
    /// Relative weight.
    pub weight: u32,
}

/// The label in brackets, then the reading on its own line.
impl std::fmt::Display for Lot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "【{}】\n{}", self.label, self.description)
    }
}

/// The built-in lot table.
pub const LOTS: [Lot; 7] = [
    Lot {
        label: "大吉",
        description: "万事皆宜，心想事成！",
        weight: 10,
    },
    Lot {
        label: "中吉",
        description: "运势不错，继续努力。",
        weight: 20,
    },
    Lot {
        label: "小吉",
        description: "小有收获，知足常乐。",
        weight: 25,
    },
    Lot {
        label: "吉",
        description: "平平安安，顺顺利利。",
        weight: 25,
    },
    Lot {
        label: "末吉",
        description: "否极泰来，静待花开。",
        weight: 10,
    },
    Lot {
        label: "凶",
        description: "诸事不宜，谨慎行事。",
        weight: 8,
    },
    Lot {
        label: "大凶",
        description: "今日不宜出门，在家躺平。",
        weight: 2,
    },
];

/// Draw one lot from `table` in proportion to the weights.
pub fn draw_from<'a>(table: &'a [Lot], rng: &mut StdRng) -> RandomResult<&'a Lot> {
    let index = WeightedIndex::new(table.iter().map(|lot| lot.weight))
        .map_err(|e| RandomError::InvalidWeights(e.to_string()))?;
    Ok(&table[index.sample(rng)])
}

/// Draw one lot from the built-in table.
pub fn draw_lot(rng: &mut StdRng) -> RandomResult<&'static Lot> {
    draw_from(&LOTS, rng)
}
