//! Configuration for a plugin instance.

use std::path::{Path, PathBuf};

use omi_daily::fortune::DEFAULT_BAR_LENGTH;
use omi_daily::ledger::DEFAULT_RANK_LIMIT;
use omi_random::DEFAULT_DICE_MAX;

/// Configuration for a [`FunPlugin`](crate::FunPlugin).
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Directory holding the data file, created on first run.
    pub data_dir: PathBuf,
    /// Name of the data file inside `data_dir`.
    pub file_name: String,
    /// Width of the fortune score bars.
    pub bar_length: usize,
    /// Number of entries shown by the ranking.
    pub rank_limit: usize,
    /// Dice maximum when the user gives none.
    pub default_dice_max: i64,
    /// Fixed seed for the picker, lots and dice. Entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_name: "plugin_data.json".to_string(),
            bar_length: DEFAULT_BAR_LENGTH,
            rank_limit: DEFAULT_RANK_LIMIT,
            default_dice_max: DEFAULT_DICE_MAX,
            rng_seed: None,
        }
    }
}

impl PluginConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the data file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Set the fortune bar width (at least 1).
    pub fn with_bar_length(mut self, length: usize) -> Self {
        self.bar_length = length.max(1);
        self
    }

    /// Set the ranking size (at least 1).
    pub fn with_rank_limit(mut self, limit: usize) -> Self {
        self.rank_limit = limit.max(1);
        self
    }

    /// Set the default dice maximum.
    pub fn with_default_dice_max(mut self, max: i64) -> Self {
        self.default_dice_max = max;
        self
    }

    /// Fix the randomizer seed.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Full path of the data file.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}
