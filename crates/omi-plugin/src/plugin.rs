//! The plugin instance: lifecycle hooks and command dispatch.
//!
//! `FunPlugin` owns the document store and the randomizer state. The host
//! calls [`FunPlugin::initialize`] once, [`FunPlugin::handle`] for every
//! chat event (possibly concurrently) and [`FunPlugin::terminate`] on
//! unload.

use std::num::IntErrorKind;
use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use omi_core::{DocumentStore, LoadOutcome};
use omi_daily::{CheckInLedger, FortuneOracle};
use omi_random::{draw_lot, parse_options, pick_one, roll_dice};

use crate::clock::{Clock, LocalClock};
use crate::command::{Command, parse_command};
use crate::config::PluginConfig;
use crate::error::{PluginError, PluginResult};
use crate::message::{ChatEvent, resolve_target};
use crate::reply::{self, Reply};

/// Registration details reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginMeta {
    /// Registered plugin name.
    pub name: &'static str,
    /// Author shown by the host.
    pub author: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Plugin version.
    pub version: &'static str,
}

/// Metadata of this plugin.
pub const META: PluginMeta = PluginMeta {
    name: "fun_utilities",
    author: "omikuji",
    description: "包含群聊签到、每日运势、随机决策等功能的实用工具集",
    version: env!("CARGO_PKG_VERSION"),
};

/// Check-in, fortune and randomizer commands for a chat bot.
pub struct FunPlugin<C: Clock = LocalClock> {
    config: PluginConfig,
    store: DocumentStore,
    rng: Mutex<StdRng>,
    clock: C,
}

impl FunPlugin<LocalClock> {
    /// A plugin using the local wall clock.
    pub fn new(config: PluginConfig) -> Self {
        Self::with_clock(config, LocalClock)
    }
}

impl<C: Clock> FunPlugin<C> {
    /// A plugin reading dates from `clock`.
    pub fn with_clock(config: PluginConfig, clock: C) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store: DocumentStore::new(config.data_file()),
            rng: Mutex::new(rng),
            config,
            clock,
        }
    }

    /// Registration details.
    pub fn meta(&self) -> PluginMeta {
        META
    }

    /// The plugin configuration.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// The document store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The clock supplying today's date.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Create the data directory and load persisted state.
    pub async fn initialize(&self) -> LoadOutcome {
        if let Err(e) = tokio::fs::create_dir_all(&self.config.data_dir).await {
            error!(dir = %self.config.data_dir.display(), "cannot create data directory: {e}");
        }
        let outcome = self.store.load().await;
        info!(plugin = META.name, ?outcome, "plugin initialized");
        outcome
    }

    /// Save state one last time before unload.
    pub async fn terminate(&self) {
        if self.store.persist().await {
            info!(plugin = META.name, "plugin data saved on shutdown");
        }
    }

    /// Handle one chat event. `None` when the message is not a command of
    /// this plugin.
    pub async fn handle(&self, event: &ChatEvent) -> Option<Reply> {
        let command = parse_command(&event.message)?;
        debug!(user_id = %event.sender_id, command = command.name(), "dispatching command");
        let text = match self.dispatch(command, event).await {
            Ok(text) => text,
            Err(err) => {
                debug!(user_id = %event.sender_id, "rejected input: {err}");
                reply::prompt(&err)
            }
        };
        Some(Reply::new(text))
    }

    async fn dispatch(&self, command: Command, event: &ChatEvent) -> PluginResult<String> {
        match command {
            Command::CheckIn => Ok(self.do_check_in(event).await),
            Command::Rank => Ok(self.do_rank().await),
            Command::Fortune => Ok(self.do_fortune(event).await),
            Command::Choose { args } => self.do_choose(&args),
            Command::DrawLot => self.do_draw(event),
            Command::Roll { args } => self.do_roll(&args),
            Command::Help => Ok(reply::help()),
        }
    }

    async fn do_check_in(&self, event: &ChatEvent) -> String {
        let outcome = CheckInLedger::new(&self.store)
            .check_in(&event.sender_id, &event.sender_name, self.clock.today())
            .await;
        reply::check_in(&outcome)
    }

    async fn do_rank(&self) -> String {
        let ranking = CheckInLedger::new(&self.store)
            .rank(self.config.rank_limit)
            .await;
        reply::rank(&ranking, self.config.rank_limit)
    }

    async fn do_fortune(&self, event: &ChatEvent) -> String {
        let target = resolve_target(event);
        let today = self.clock.today();
        let reading = FortuneOracle::new(&self.store)
            .get_fortune(&target.user_id, &target.display_name, today)
            .await;
        reply::fortune(&reading, today, self.config.bar_length)
    }

    fn do_choose(&self, args: &str) -> PluginResult<String> {
        if args.trim().is_empty() {
            return Err(PluginError::MissingOptions);
        }
        let options = parse_options(args);
        let pick = pick_one(&options, &mut self.rng())?;
        Ok(reply::choice(&pick))
    }

    fn do_draw(&self, event: &ChatEvent) -> PluginResult<String> {
        let lot = draw_lot(&mut self.rng())?;
        Ok(reply::lot(&event.sender_name, lot))
    }

    fn do_roll(&self, args: &str) -> PluginResult<String> {
        let max = dice_max(args, self.config.default_dice_max);
        let roll = roll_dice(max, &mut self.rng())?;
        Ok(reply::roll(&roll))
    }

    fn rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The die maximum requested by a roll argument.
///
/// Integers too large for `i64` saturate; anything that is not an integer
/// falls back to `default`.
fn dice_max(args: &str, default: i64) -> i64 {
    match args.trim().parse::<i64>() {
        Ok(max) => max,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => default,
        },
    }
}
