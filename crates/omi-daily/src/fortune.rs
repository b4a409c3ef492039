//! Seeded daily fortune readings.
//!
//! A user's fortune is drawn from a generator seeded by the day and the user
//! id, so the same pair always yields the same reading. The draw order is
//! love, wealth, career, then the quote; reordering it changes every
//! reading ever produced.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use tracing::info;

use omi_core::{DocumentStore, FortuneRecord};

/// Quotes a fortune can carry, in draw order.
pub const QUOTES: [&str; 10] = [
    "今天是充满希望的一天！",
    "宜：代码，忌：摸鱼。",
    "好运正在向你奔来。",
    "相信自己，你就是最棒的！",
    "今天的努力是明天的铺垫。",
    "保持微笑，运气不会差。",
    "记得喝水，保持健康。",
    "代码一次过，Bug 远离我。",
    "出门可能会遇到小惊喜哦。",
    "适合学习新知识的一天。",
];

/// Default width of a rendered score bar.
pub const DEFAULT_BAR_LENGTH: usize = 10;

const FILLED: char = '█';
const EMPTY: char = '░';

/// The seed string for a `(today, user_id)` pair.
pub fn seed_string(today: NaiveDate, user_id: &str) -> String {
    format!("{}-{user_id}", today.format("%Y-%m-%d"))
}

/// The generator for a `(today, user_id)` pair.
///
/// Seeded with the SHA-256 digest of [`seed_string`].
pub fn fortune_rng(today: NaiveDate, user_id: &str) -> ChaCha20Rng {
    let seed: [u8; 32] = Sha256::digest(seed_string(today, user_id).as_bytes()).into();
    ChaCha20Rng::from_seed(seed)
}

/// Draw the fortune of `user_id` for `today`.
pub fn generate_fortune(today: NaiveDate, user_id: &str) -> FortuneRecord {
    let mut rng = fortune_rng(today, user_id);
    let love: u8 = rng.random_range(0..=100);
    let wealth: u8 = rng.random_range(0..=100);
    let career: u8 = rng.random_range(0..=100);
    let quote = QUOTES[rng.random_range(0..QUOTES.len())];
    FortuneRecord {
        date: today,
        love,
        wealth,
        career,
        lucky_index: lucky_index(love, wealth, career),
        quote: quote.to_string(),
    }
}

/// Floor of the mean of three scores.
pub fn lucky_index(love: u8, wealth: u8, career: u8) -> u8 {
    let sum = u32::from(love) + u32::from(wealth) + u32::from(career);
    // the mean of three values <= 255 fits in a u8
    (sum / 3) as u8
}

/// Render a 0-100 score as a bar `length` glyphs wide.
pub fn render_bar(value: u8, length: usize) -> String {
    let filled = (usize::from(value) * length / 100).min(length);
    let mut bar = String::with_capacity(length * FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, length - filled));
    bar
}

/// Return today's record for `user_id`, generating and storing a fresh one
/// when none exists or the stored one is stale.
///
/// The flag is `true` when a new record was written into the mapping.
pub fn fortune_for(
    fortune: &mut BTreeMap<String, FortuneRecord>,
    user_id: &str,
    today: NaiveDate,
) -> (FortuneRecord, bool) {
    if let Some(record) = fortune.get(user_id).filter(|r| r.is_valid_on(today)) {
        return (record.clone(), false);
    }
    let record = generate_fortune(today, user_id);
    fortune.insert(user_id.to_string(), record.clone());
    (record, true)
}

/// A fortune ready to be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneReading {
    /// Whose fortune this is.
    pub user_id: String,
    /// Name to show for the user.
    pub display_name: String,
    /// The day's record.
    pub record: FortuneRecord,
    /// Whether the record was generated by this request.
    pub fresh: bool,
}

impl FortuneReading {
    /// The love, wealth and career bars, in that order.
    pub fn bars(&self, length: usize) -> [String; 3] {
        [
            render_bar(self.record.love, length),
            render_bar(self.record.wealth, length),
            render_bar(self.record.career, length),
        ]
    }
}

/// Fortune operations bound to a [`DocumentStore`].
#[derive(Debug, Clone, Copy)]
pub struct FortuneOracle<'a> {
    store: &'a DocumentStore,
}

impl<'a> FortuneOracle<'a> {
    /// Operate on the `fortune` mapping of `store`.
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// The fortune of `user_id` for `today`.
    ///
    /// Only a freshly generated record triggers a save.
    pub async fn get_fortune(
        &self,
        user_id: &str,
        display_name: &str,
        today: NaiveDate,
    ) -> FortuneReading {
        let mut doc = self.store.lock().await;
        let (record, fresh) = fortune_for(&mut doc.fortune, user_id, today);
        if fresh {
            info!(user_id, %today, lucky_index = record.lucky_index, "fortune generated");
            doc.persist().await;
        }
        FortuneReading {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            record,
            fresh,
        }
    }
}
