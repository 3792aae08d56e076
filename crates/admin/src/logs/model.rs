use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Synthetic action vocabulary, always unioned into a batch's action set so
/// consumers can enumerate every possible action even when a batch saw none.
pub const LOG_ACTIONS: [&str; 20] = [
    "DISCONNECTED",
    "CHAT[Allies]",
    "CHAT[Axis]",
    "CHAT[Allies][Unit]",
    "KILL",
    "CONNECTED",
    "CHAT[Allies][Team]",
    "CHAT[Axis][Team]",
    "CHAT[Axis][Unit]",
    "CHAT",
    "VOTE COMPLETED",
    "VOTE STARTED",
    "VOTE",
    "TEAMSWITCH",
    "TK",
    "TK KICKED",
    "TK BANNED FOR 2 HOURS",
    "MATCH",
    "MATCH START",
    "MATCH ENDED",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Allies,
    Axis,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Allies => "Allies",
            Side::Axis => "Axis",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Allies" => Some(Side::Allies),
            "Axis" => Some(Side::Axis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChatScope {
    Team,
    Unit,
}

impl ChatScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatScope::Team => "Team",
            ChatScope::Unit => "Unit",
        }
    }
}

/// Closed vocabulary of event classifications.
///
/// The rendered form (`Display`) is what filters match against and what the
/// batch's action set carries, e.g. `KILL`, `CHAT[Axis][Team]`,
/// `TK BANNED FOR 2 HOURS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connected,
    Disconnected,
    Kill,
    TeamKill,
    Chat {
        side: Side,
        scope: Option<ChatScope>,
    },
    Vote,
    VoteStarted,
    VoteCompleted,
    Camera,
    TeamSwitch,
    TkKicked,
    TkBanned,
    MatchStart,
    MatchEnded,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Connected => f.write_str("CONNECTED"),
            Action::Disconnected => f.write_str("DISCONNECTED"),
            Action::Kill => f.write_str("KILL"),
            Action::TeamKill => f.write_str("TEAM KILL"),
            Action::Chat { side, scope } => match scope {
                Some(scope) => write!(f, "CHAT[{}][{}]", side.as_str(), scope.as_str()),
                None => write!(f, "CHAT[{}]", side.as_str()),
            },
            Action::Vote => f.write_str("VOTE"),
            Action::VoteStarted => f.write_str("VOTE STARTED"),
            Action::VoteCompleted => f.write_str("VOTE COMPLETED"),
            Action::Camera => f.write_str("CAMERA"),
            Action::TeamSwitch => f.write_str("TEAMSWITCH"),
            Action::TkKicked => f.write_str("TK KICKED"),
            Action::TkBanned => f.write_str("TK BANNED FOR 2 HOURS"),
            Action::MatchStart => f.write_str("MATCH START"),
            Action::MatchEnded => f.write_str("MATCH ENDED"),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One parsed log line. Value record, never mutated after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Absolute time decoded from the epoch token in the line's time field.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Signed offset from "now" at parse time; negative for past events.
    pub relative_time_ms: i64,
    /// Verbatim line, for audit and debugging.
    pub raw: String,
    pub line_without_time: String,
    pub action: Action,
    /// Primary actor (e.g. the killer, the connecting player).
    pub player: Option<String>,
    pub steam_id_64_1: Option<String>,
    /// Secondary actor (e.g. the victim).
    pub player2: Option<String>,
    pub steam_id_64_2: Option<String>,
    /// Present only for kill-type events.
    pub weapon: Option<String>,
    /// Free-text payload; meaning depends on the action.
    pub message: String,
    pub sub_content: Option<String>,
}

/// A line the parser had to drop, with the reason. Diagnostics only, never
/// surfaced as a call failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: String,
    pub reason: String,
}

/// Parser output: events ordered most-recent-first, the distinct player
/// names observed, the action vocabulary, and per-line skip diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct LogBatch {
    pub events: Vec<Event>,
    pub players: BTreeSet<String>,
    pub actions: BTreeSet<String>,
    pub skipped: Vec<SkippedLine>,
}
