//! Reply text for each command.

use chrono::NaiveDate;

use omi_daily::{CheckInOutcome, FortuneReading, Ranking};
use omi_random::{DiceRoll, Lot, RandomError};

use crate::error::PluginError;

/// A plain-text reply to send back through the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The reply text.
    pub text: String,
}

impl Reply {
    /// Wrap reply text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Reply to a check-in attempt.
pub fn check_in(outcome: &CheckInOutcome) -> String {
    match outcome {
        CheckInOutcome::CheckedIn(r) => format!(
            "✅ 签到成功！\n👤 用户：{}\n📅 连续签到：{} 天\n💰 获得积分：{} (基础{} + 连签{})\n💎 当前总积分：{}",
            r.display_name, r.continuous_days, r.gained, r.base_points, r.bonus, r.total_points
        ),
        CheckInOutcome::AlreadyCheckedIn { display_name } => {
            format!("📅 {display_name}，你今天已经签到过了哦！明天再来吧~")
        }
    }
}

/// Reply listing the ranking.
pub fn rank(ranking: &Ranking, limit: usize) -> String {
    let entries = match ranking {
        Ranking::Empty => return "📊 暂时还没有人签到哦，快来抢沙发吧！".to_string(),
        Ranking::Top(entries) => entries,
    };
    let mut lines = vec![format!("🏆 签到积分排行榜 TOP {limit} 🏆"), String::new()];
    for entry in entries {
        let icon = match entry.position {
            1 => "🥇".to_string(),
            2 => "🥈".to_string(),
            3 => "🥉".to_string(),
            n => format!("{n}."),
        };
        lines.push(format!(
            "{icon} {}: {} 分 (连签 {} 天)",
            entry.display_name, entry.points, entry.continuous_days
        ));
    }
    lines.join("\n")
}

/// Reply showing a fortune.
pub fn fortune(reading: &FortuneReading, today: NaiveDate, bar_length: usize) -> String {
    let rec = &reading.record;
    let [love, wealth, career] = reading.bars(bar_length);
    [
        format!("🔮 {} 的今日运势 🔮", reading.display_name),
        format!("📅 日期：{}", today.format("%Y-%m-%d")),
        String::new(),
        format!("❤️ 爱情运：{love} {}", rec.love),
        format!("💰 财运：　{wealth} {}", rec.wealth),
        format!("💼 事业运：{career} {}", rec.career),
        String::new(),
        format!("🍀 综合幸运指数：{}", rec.lucky_index),
        format!("📝 今日寄语：{}", rec.quote),
    ]
    .join("\n")
}

/// Reply announcing the picked option.
pub fn choice(pick: &str) -> String {
    format!("🤔 经过深思熟虑，我建议你选择：\n✨ {pick} ✨")
}

/// Reply announcing a drawn lot.
pub fn lot(sender_name: &str, lot: &Lot) -> String {
    format!("🏷️ {sender_name} 的抽签结果：\n\n{lot}")
}

/// Reply announcing a dice roll.
pub fn roll(roll: &DiceRoll) -> String {
    format!("🎲 掷骰子 (1-{}) 结果：\n\n👉 {}", roll.max, roll.value)
}

/// Usage of every command.
pub fn help() -> String {
    [
        "📖 可用指令：",
        "/签到：每日签到，获取积分",
        "/签到排行：查看签到积分排行榜",
        "/运势 [@某人]：查看今日运势",
        "/选择 选项1 选项2 ...：帮你做决定",
        "/抽签：随机抽签",
        "/roll [最大值]：掷骰子，默认 1-100",
    ]
    .join("\n")
}

/// Corrective prompt for invalid input.
pub fn prompt(err: &PluginError) -> String {
    match err {
        PluginError::MissingOptions => {
            "❓ 请输入选项，用空格分隔。例如：/选择 吃饭 睡觉 打豆豆".to_string()
        }
        PluginError::Random(RandomError::TooFewOptions(_)) => {
            "❓ 至少需要两个选项才能帮你做决定哦！".to_string()
        }
        PluginError::Random(RandomError::NonPositiveMax(_)) => "❓ 最大值必须大于 0".to_string(),
        PluginError::Random(RandomError::InvalidWeights(_)) => {
            "❓ 签筒出了点问题，请稍后再试".to_string()
        }
    }
}
