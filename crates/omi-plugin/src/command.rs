//! Command parsing for chat input.

/// A parsed plugin command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Daily check-in.
    CheckIn,
    /// Check-in points ranking.
    Rank,
    /// Today's fortune of the sender or a mentioned user.
    Fortune,
    /// Pick one of the given options.
    Choose {
        /// Everything after the command name.
        args: String,
    },
    /// Draw a lot.
    DrawLot,
    /// Roll a die.
    Roll {
        /// Everything after the command name.
        args: String,
    },
    /// List the commands.
    Help,
}

impl Command {
    /// The primary name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckIn => "签到",
            Self::Rank => "签到排行",
            Self::Fortune => "运势",
            Self::Choose { .. } => "选择",
            Self::DrawLot => "抽签",
            Self::Roll { .. } => "roll",
            Self::Help => "帮助",
        }
    }
}

const CHECK_IN_NAMES: &[&str] = &["签到", "signin", "checkin"];
const RANK_NAMES: &[&str] = &["签到排行", "rank"];
const FORTUNE_NAMES: &[&str] = &["运势", "fortune"];
const CHOOSE_NAMES: &[&str] = &["选择", "choose"];
const DRAW_NAMES: &[&str] = &["抽签", "draw"];
const ROLL_NAMES: &[&str] = &["roll", "dice"];
const HELP_NAMES: &[&str] = &["帮助", "help"];

/// Parse a chat message into a command.
///
/// The leading `/` is optional and English names are case-insensitive.
/// Returns `None` for anything that is not one of this plugin's commands.
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    let input = input.strip_prefix('/').unwrap_or(input).trim_start();
    let (name, rest) = match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    };
    let name = name.to_lowercase();
    let is = |names: &[&str]| names.contains(&name.as_str());

    if is(CHECK_IN_NAMES) {
        Some(Command::CheckIn)
    } else if is(RANK_NAMES) {
        Some(Command::Rank)
    } else if is(FORTUNE_NAMES) {
        Some(Command::Fortune)
    } else if is(CHOOSE_NAMES) {
        Some(Command::Choose {
            args: rest.to_string(),
        })
    } else if is(DRAW_NAMES) {
        Some(Command::DrawLot)
    } else if is(ROLL_NAMES) {
        Some(Command::Roll {
            args: rest.to_string(),
        })
    } else if is(HELP_NAMES) {
        Some(Command::Help)
    } else {
        None
    }
}
