//! End-to-end tests driving the plugin through chat events.

use chrono::NaiveDate;
use tempfile::TempDir;

use omi_core::LoadOutcome;
use omi_plugin::{ChatEvent, FixedClock, FunPlugin, PluginConfig, Segment};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("omi=debug")
        .try_init();
}

/// A plugin with its data directory in a fresh temp dir.
async fn test_plugin() -> (TempDir, FunPlugin<FixedClock>) {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let config = PluginConfig::default()
        .with_data_dir(dir.path().join("data"))
        .with_rng_seed(42);
    let plugin = FunPlugin::with_clock(config, FixedClock::new(start_date()));
    assert_eq!(plugin.initialize().await, LoadOutcome::Created);
    (dir, plugin)
}

async fn say(plugin: &FunPlugin<FixedClock>, id: &str, name: &str, text: &str) -> String {
    plugin
        .handle(&ChatEvent::new(id, name, text))
        .await
        .expect("command should produce a reply")
        .text
}

// ---------------------------------------------------------------------------
// lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initialize_creates_data_file() {
    let (dir, plugin) = test_plugin().await;
    let path = dir.path().join("data").join("plugin_data.json");
    assert!(path.exists());
    assert_eq!(plugin.store().path(), path.as_path());
    assert_eq!(plugin.meta().name, "fun_utilities");
}

#[tokio::test]
async fn terminate_saves_and_restart_restores() {
    let (dir, plugin) = test_plugin().await;
    say(&plugin, "1", "Alice", "/签到").await;
    plugin.terminate().await;

    let config = PluginConfig::default().with_data_dir(dir.path().join("data"));
    let restarted = FunPlugin::with_clock(config, FixedClock::new(start_date()));
    assert_eq!(restarted.initialize().await, LoadOutcome::Loaded);
    let reply = say(&restarted, "1", "Alice", "/签到").await;
    assert!(reply.contains("已经签到过了"));
}

#[tokio::test]
async fn corrupt_file_degrades_to_empty_state() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("plugin_data.json"), "[1, 2").unwrap();

    let plugin = FunPlugin::with_clock(
        PluginConfig::default().with_data_dir(&data_dir),
        FixedClock::new(start_date()),
    );
    assert_eq!(plugin.initialize().await, LoadOutcome::Recovered);
    let reply = say(&plugin, "1", "Alice", "/签到").await;
    assert!(reply.starts_with("✅"));

    // the next successful save repairs the file
    let raw = std::fs::read_to_string(data_dir.join("plugin_data.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["signin"]["1"]["points"], 11);
}

// ---------------------------------------------------------------------------
// check-in and rank
// ---------------------------------------------------------------------------

#[tokio::test]
async fn check_in_streak_over_days() {
    let (_dir, plugin) = test_plugin().await;

    let first = say(&plugin, "1", "Alice", "/签到").await;
    assert!(first.contains("连续签到：1 天"));
    assert!(first.contains("获得积分：11 (基础10 + 连签1)"));

    let dup = say(&plugin, "1", "Alice", "/签到").await;
    assert_eq!(dup, "📅 Alice，你今天已经签到过了哦！明天再来吧~");

    plugin.clock().advance_days(1);
    let second = say(&plugin, "1", "Alice", "signin").await;
    assert!(second.contains("连续签到：2 天"));
    assert!(second.contains("当前总积分：23"));

    plugin.clock().advance_days(2);
    let after_gap = say(&plugin, "1", "Alice", "/签到").await;
    assert!(after_gap.contains("连续签到：1 天"));
    assert!(after_gap.contains("当前总积分：34"));
}

#[tokio::test]
async fn rank_lists_users_by_points() {
    let (_dir, plugin) = test_plugin().await;
    assert!(say(&plugin, "9", "Zed", "/签到排行").await.contains("还没有人签到"));

    say(&plugin, "1", "Alice", "/签到").await;
    say(&plugin, "2", "Bob", "/签到").await;
    plugin.clock().advance_days(1);
    say(&plugin, "2", "Bobby", "/签到").await;

    let text = say(&plugin, "9", "Zed", "/签到排行").await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "🏆 签到积分排行榜 TOP 10 🏆");
    assert_eq!(lines[2], "🥇 Bobby: 23 分 (连签 2 天)");
    assert_eq!(lines[3], "🥈 Alice: 11 分 (连签 1 天)");
}

#[tokio::test]
async fn concurrent_check_ins_are_all_kept() {
    let (dir, plugin) = test_plugin().await;
    let plugin = std::sync::Arc::new(plugin);

    let mut handles = Vec::new();
    for i in 0..20 {
        let plugin = plugin.clone();
        handles.push(tokio::spawn(async move {
            plugin
                .handle(&ChatEvent::new(i.to_string(), format!("user{i}"), "/签到"))
                .await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_some());
    }

    let raw = std::fs::read_to_string(dir.path().join("data").join("plugin_data.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["signin"].as_object().unwrap().len(), 20);
}

// ---------------------------------------------------------------------------
// fortune
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fortune_is_stable_within_a_day() {
    let (_dir, plugin) = test_plugin().await;
    let first = say(&plugin, "1", "Alice", "/运势").await;
    let second = say(&plugin, "1", "Alice", "/运势").await;
    assert_eq!(first, second);
    assert!(first.starts_with("🔮 Alice 的今日运势 🔮"));
    assert!(first.contains("📅 日期：2024-09-01"));
    assert!(first.contains("🍀 综合幸运指数："));
}

#[tokio::test]
async fn fortune_for_mentioned_user() {
    let (_dir, plugin) = test_plugin().await;
    let event = ChatEvent::new("1", "Alice", "/运势").with_segment(Segment::mention("2"));
    let reply = plugin.handle(&event).await.unwrap().text;
    assert!(reply.starts_with("🔮 用户(2) 的今日运势 🔮"));

    let doc = plugin.store().snapshot().await;
    assert!(doc.fortune.contains_key("2"));
    assert!(!doc.fortune.contains_key("1"));

    // the mentioned user's own request shows the same numbers
    let own = say(&plugin, "2", "Bob", "/运势").await;
    let strip = |s: &str| s.lines().skip(1).collect::<Vec<_>>().join("\n");
    assert_eq!(strip(&own), strip(&reply));
}

#[tokio::test]
async fn fortune_bars_follow_config() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let plugin = FunPlugin::with_clock(
        PluginConfig::default()
            .with_data_dir(dir.path())
            .with_bar_length(20),
        FixedClock::new(start_date()),
    );
    plugin.initialize().await;
    let reply = say(&plugin, "1", "Alice", "fortune").await;
    let love_line = reply.lines().find(|l| l.contains("爱情运")).unwrap();
    let bar_len = love_line
        .chars()
        .filter(|c| *c == '█' || *c == '░')
        .count();
    assert_eq!(bar_len, 20);
}

// ---------------------------------------------------------------------------
// randomizers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn choose_validates_options() {
    let (_dir, plugin) = test_plugin().await;
    assert!(say(&plugin, "1", "A", "/选择").await.contains("请输入选项"));
    assert!(say(&plugin, "1", "A", "/选择 只有一个").await.contains("至少需要两个选项"));

    let reply = say(&plugin, "1", "A", "/选择 吃饭,睡觉").await;
    assert!(reply.contains("✨ 吃饭 ✨") || reply.contains("✨ 睡觉 ✨"));
}

#[tokio::test]
async fn draw_names_sender_and_lot() {
    let (_dir, plugin) = test_plugin().await;
    let reply = say(&plugin, "1", "Alice", "/抽签").await;
    assert!(reply.starts_with("🏷️ Alice 的抽签结果："));
    assert!(omi_random::LOTS.iter().any(|lot| reply.contains(&format!("【{}】", lot.label))));
}

#[tokio::test]
async fn roll_arguments() {
    let (_dir, plugin) = test_plugin().await;
    assert!(say(&plugin, "1", "A", "/roll").await.contains("(1-100)"));
    assert!(say(&plugin, "1", "A", "/roll 6").await.contains("(1-6)"));
    assert!(say(&plugin, "1", "A", "/roll abc").await.contains("(1-100)"));
    assert_eq!(say(&plugin, "1", "A", "/roll 0").await, "❓ 最大值必须大于 0");
    assert_eq!(say(&plugin, "1", "A", "/roll -5").await, "❓ 最大值必须大于 0");
    assert!(say(&plugin, "1", "A", "/roll 1").await.ends_with("👉 1"));
    let huge = say(&plugin, "1", "A", "/roll 99999999999999999999").await;
    assert!(huge.contains(&format!("(1-{})", i64::MAX)), "{huge}");
    assert_eq!(
        say(&plugin, "1", "A", "/roll -99999999999999999999").await,
        "❓ 最大值必须大于 0"
    );
}

#[tokio::test]
async fn unknown_commands_are_ignored() {
    let (_dir, plugin) = test_plugin().await;
    assert!(plugin.handle(&ChatEvent::new("1", "A", "hello")).await.is_none());
    assert!(plugin.handle(&ChatEvent::new("1", "A", "/unknown")).await.is_none());
    assert!(say(&plugin, "1", "A", "/help").await.contains("/签到"));
}

#[tokio::test]
async fn randomizers_do_not_touch_the_store() {
    let (dir, plugin) = test_plugin().await;
    let path = dir.path().join("data").join("plugin_data.json");
    let before = std::fs::read_to_string(&path).unwrap();
    say(&plugin, "1", "A", "/选择 a b").await;
    say(&plugin, "1", "A", "/抽签").await;
    say(&plugin, "1", "A", "/roll").await;
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}
