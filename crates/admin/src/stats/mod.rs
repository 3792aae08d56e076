//! Derived analytics: pure functions of a parsed [`LogBatch`](crate::logs::LogBatch).

pub mod scoreboard;
pub mod teamkills;

pub use scoreboard::{scoreboard, ScoreboardEntry, ScoreboardSort};
pub use teamkills::{teamkill_board, TeamkillEntry, TeamkillSort};
