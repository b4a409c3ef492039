//! Daily features of the omikuji chat plugin.
//!
//! The check-in [`ledger`] tracks streaks and points per user; the
//! [`fortune`] oracle hands out one reproducible reading per user per day.
//! Both operate on the shared [`omi_core::DocumentStore`].

pub mod fortune;
pub mod ledger;

pub use fortune::{FortuneOracle, FortuneReading, render_bar};
pub use ledger::{CheckInLedger, CheckInOutcome, CheckInReceipt, RankEntry, Ranking};
