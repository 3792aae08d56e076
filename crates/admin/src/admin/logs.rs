//! Structured log fetches and the derived analytics boards.

use std::sync::Arc;

use super::Admin;
use crate::cache::CacheValue;
use crate::channel::{commands, ChannelError};
use crate::error::AdminResult;
use crate::invalidation::ReadSlot;
use crate::logs::model::LogBatch;
use crate::logs::parser;
use crate::stats::{
    scoreboard, teamkill_board, ScoreboardEntry, ScoreboardSort, TeamkillEntry, TeamkillSort,
};

impl CacheValue for LogBatch {}

impl Admin {
    /// Event log for the trailing window, parsed into a [`LogBatch`].
    ///
    /// The server hangs instead of answering when no events match the
    /// window, so a transport timeout is treated as an empty log, not a
    /// failure.
    pub fn get_structured_logs(
        &self,
        since_min_ago: u32,
        filter_action: Option<&str>,
        filter_player: Option<&str>,
    ) -> AdminResult<Arc<LogBatch>> {
        let minutes = since_min_ago.to_string();
        let args = [
            minutes.as_str(),
            filter_action.unwrap_or(""),
            filter_player.unwrap_or(""),
        ];
        self.cached_with_args(ReadSlot::StructuredLogs, &args, true, || {
            let raw = match self.execute(commands::SHOW_LOG, &[minutes.as_str()]) {
                Ok(raw) => raw,
                Err(crate::error::AdminError::Channel(ChannelError::Timeout)) => String::new(),
                Err(err) => return Err(err),
            };
            Ok(parser::parse(&raw, filter_action, filter_player))
        })
    }

    /// Kill/death board over the lookback window (config default when
    /// `minutes` is `None`).
    pub fn get_scoreboard(
        &self,
        minutes: Option<u32>,
        sort: ScoreboardSort,
    ) -> AdminResult<Arc<Vec<ScoreboardEntry>>> {
        let minutes = minutes.unwrap_or(self.config.log_lookback_minutes);
        let window = minutes.to_string();
        self.cached_with_args(ReadSlot::Scoreboard, &[window.as_str(), sort.as_str()], true, || {
            let batch = self.get_structured_logs(minutes, Some("KILL"), None)?;
            Ok(scoreboard(&batch, sort))
        })
    }

    /// Teamkill board over the configured lookback window.
    pub fn get_teamkills_boards(
        &self,
        sort: TeamkillSort,
    ) -> AdminResult<Arc<Vec<TeamkillEntry>>> {
        let minutes = self.config.log_lookback_minutes;
        self.cached_with_args(ReadSlot::TeamkillBoard, &[sort.as_str()], true, || {
            let batch = self.get_structured_logs(minutes, None, None)?;
            Ok(teamkill_board(&batch, sort))
        })
    }
}
