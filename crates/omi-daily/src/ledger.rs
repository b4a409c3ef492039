//! Daily check-in ledger.
//!
//! A user may check in once per calendar day. Each check-in extends or
//! resets the user's streak and awards a fixed base plus a streak bonus
//! capped at [`MAX_STREAK_BONUS`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use omi_core::{CheckInRecord, DocumentStore};

/// Points awarded for every check-in.
pub const BASE_POINTS: u64 = 10;

/// Upper bound of the streak bonus.
pub const MAX_STREAK_BONUS: u32 = 10;

/// Default number of entries in a ranking.
pub const DEFAULT_RANK_LIMIT: usize = 10;

/// Details of a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInReceipt {
    /// The name the user checked in under.
    pub display_name: String,
    /// Streak length after this check-in.
    pub continuous_days: u32,
    /// Total days checked in after this check-in.
    pub total_days: u32,
    /// Points gained by this check-in.
    pub gained: u64,
    /// The base part of `gained`.
    pub base_points: u64,
    /// The streak bonus part of `gained`.
    pub bonus: u64,
    /// The user's points after this check-in.
    pub total_points: u64,
}

/// Result of a check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// The check-in was recorded.
    CheckedIn(CheckInReceipt),
    /// The user already checked in today; nothing changed.
    AlreadyCheckedIn {
        /// The name the user tried to check in under.
        display_name: String,
    },
}

impl CheckInOutcome {
    /// Whether this attempt changed the ledger.
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::CheckedIn(_))
    }
}

/// One line of a ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    /// 1-based position.
    pub position: usize,
    /// The ranked user.
    pub user_id: String,
    /// Last observed display name.
    pub display_name: String,
    /// Accumulated points.
    pub points: u64,
    /// Current streak length.
    pub continuous_days: u32,
}

/// Result of a ranking query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ranking {
    /// Nobody has checked in yet.
    Empty,
    /// The top entries, highest points first.
    Top(Vec<RankEntry>),
}

/// Streak length after checking in on `today`.
///
/// Continues the streak only when the previous check-in was exactly the day
/// before; any gap, a first check-in, or a previous date in the future
/// starts over at 1.
pub fn next_streak(last: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
    match last {
        Some(last) if today.signed_duration_since(last).num_days() == 1 => current + 1,
        _ => 1,
    }
}

/// Streak bonus for a streak of `continuous_days`.
pub fn streak_bonus(continuous_days: u32) -> u64 {
    u64::from(continuous_days.min(MAX_STREAK_BONUS))
}

/// Record a check-in for `user_id` in the `signin` mapping.
///
/// Leaves the mapping untouched when the user already checked in today.
pub fn apply_check_in(
    signin: &mut BTreeMap<String, CheckInRecord>,
    user_id: &str,
    display_name: &str,
    today: NaiveDate,
) -> CheckInOutcome {
    if signin
        .get(user_id)
        .is_some_and(|r| r.last_signin_date == Some(today))
    {
        return CheckInOutcome::AlreadyCheckedIn {
            display_name: display_name.to_string(),
        };
    }

    let record = signin
        .entry(user_id.to_string())
        .or_insert_with(|| CheckInRecord::new(display_name));

    record.continuous_days = next_streak(record.last_signin_date, record.continuous_days, today);
    let bonus = streak_bonus(record.continuous_days);
    let gained = BASE_POINTS + bonus;

    record.total_days += 1;
    record.last_signin_date = Some(today);
    record.points += gained;
    record.display_name = display_name.to_string();

    CheckInOutcome::CheckedIn(CheckInReceipt {
        display_name: record.display_name.clone(),
        continuous_days: record.continuous_days,
        total_days: record.total_days,
        gained,
        base_points: BASE_POINTS,
        bonus,
        total_points: record.points,
    })
}

/// The top `limit` records by points, highest first.
///
/// Ties keep the mapping's order (ascending user id).
pub fn rank_records(signin: &BTreeMap<String, CheckInRecord>, limit: usize) -> Ranking {
    if signin.is_empty() {
        return Ranking::Empty;
    }
    let mut sorted: Vec<(&String, &CheckInRecord)> = signin.iter().collect();
    sorted.sort_by(|a, b| b.1.points.cmp(&a.1.points));
    let entries = sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (user_id, record))| RankEntry {
            position: i + 1,
            user_id: user_id.clone(),
            display_name: record.display_name.clone(),
            points: record.points,
            continuous_days: record.continuous_days,
        })
        .collect();
    Ranking::Top(entries)
}

/// Check-in operations bound to a [`DocumentStore`].
#[derive(Debug, Clone, Copy)]
pub struct CheckInLedger<'a> {
    store: &'a DocumentStore,
}

impl<'a> CheckInLedger<'a> {
    /// Operate on the `signin` mapping of `store`.
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Check `user_id` in for `today` and persist the document.
    ///
    /// A duplicate check-in neither mutates nor saves.
    pub async fn check_in(
        &self,
        user_id: &str,
        display_name: &str,
        today: NaiveDate,
    ) -> CheckInOutcome {
        let mut doc = self.store.lock().await;
        let outcome = apply_check_in(&mut doc.signin, user_id, display_name, today);
        match &outcome {
            CheckInOutcome::CheckedIn(receipt) => {
                info!(
                    user_id,
                    streak = receipt.continuous_days,
                    gained = receipt.gained,
                    "check-in recorded"
                );
                doc.persist().await;
            }
            CheckInOutcome::AlreadyCheckedIn { .. } => {
                debug!(user_id, %today, "duplicate check-in ignored");
            }
        }
        outcome
    }

    /// The top `limit` users by points.
    pub async fn rank(&self, limit: usize) -> Ranking {
        let doc = self.store.lock().await;
        rank_records(&doc.signin, limit)
    }
}
