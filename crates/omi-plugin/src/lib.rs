//! Chat command plugin with daily check-in, fortune, and randomizers.
//!
//! The host runtime delivers [`ChatEvent`]s to [`FunPlugin::handle`] and
//! sends back the returned [`Reply`]. Persistent state lives in one JSON
//! file managed by [`omi_core::DocumentStore`].

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod message;
pub mod plugin;
pub mod reply;

pub use clock::{Clock, FixedClock, LocalClock};
pub use command::{Command, parse_command};
pub use config::PluginConfig;
pub use error::{PluginError, PluginResult};
pub use message::{ChatEvent, Segment, Target, resolve_target};
pub use plugin::{FunPlugin, META, PluginMeta};
pub use reply::Reply;
