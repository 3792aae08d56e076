use std::cmp::Ordering;

use serde::Serialize;

use crate::logs::model::{Action, LogBatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamkillSort {
    Teamkills,
    DeathsByTeamkill,
    PlayMinutes,
    #[default]
    Rate,
}

impl TeamkillSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamkillSort::Teamkills => "teamkills",
            TeamkillSort::DeathsByTeamkill => "deaths_by_teamkill",
            TeamkillSort::PlayMinutes => "play_minutes",
            TeamkillSort::Rate => "rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamkillEntry {
    pub player: String,
    pub teamkills: u32,
    pub deaths_by_teamkill: u32,
    /// Whole minutes between the first and last event involving the player.
    pub play_minutes: i64,
    /// Team kills per estimated play minute, denominator floored at 1.
    pub rate: f64,
}

impl TeamkillEntry {
    pub fn rate_display(&self) -> String {
        format!("{:.2}", self.rate)
    }
}

/// Team-kill board over an unfiltered batch.
///
/// The play-time window comes from every event involving the player in
/// either actor slot, not just team kills; the TK counts come from
/// `TEAM KILL` events alone. Players with neither a team kill nor a death
/// by team kill are excluded.
pub fn teamkill_board(batch: &LogBatch, sort: TeamkillSort) -> Vec<TeamkillEntry> {
    let mut rows = Vec::new();
    for player in &batch.players {
        let mut first_ms = i64::MAX;
        let mut last_ms = i64::MIN;
        let mut teamkills = 0u32;
        let mut deaths = 0u32;

        for event in &batch.events {
            let as_actor = event.player.as_deref() == Some(player);
            let as_victim = event.player2.as_deref() == Some(player);
            if as_actor || as_victim {
                let ms = event.timestamp.timestamp_millis();
                first_ms = first_ms.min(ms);
                last_ms = last_ms.max(ms);
            }
            if event.action == Action::TeamKill {
                if as_actor {
                    teamkills += 1;
                } else if as_victim {
                    deaths += 1;
                }
            }
        }
        if teamkills == 0 && deaths == 0 {
            continue;
        }

        let play_minutes = (last_ms - first_ms) / 1000 / 60;
        rows.push(TeamkillEntry {
            player: player.clone(),
            teamkills,
            deaths_by_teamkill: deaths,
            play_minutes,
            rate: f64::from(teamkills) / play_minutes.max(1) as f64,
        });
    }

    match sort {
        TeamkillSort::Teamkills => rows.sort_by(|a, b| b.teamkills.cmp(&a.teamkills)),
        TeamkillSort::DeathsByTeamkill => {
            rows.sort_by(|a, b| b.deaths_by_teamkill.cmp(&a.deaths_by_teamkill))
        }
        TeamkillSort::PlayMinutes => rows.sort_by(|a, b| b.play_minutes.cmp(&a.play_minutes)),
        TeamkillSort::Rate => {
            rows.sort_by(|a, b| b.rate.partial_cmp(&a.rate).unwrap_or(Ordering::Equal))
        }
    }
    rows
}
