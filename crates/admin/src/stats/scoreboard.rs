use std::cmp::Ordering;

use serde::Serialize;

use crate::logs::model::LogBatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreboardSort {
    Kills,
    Deaths,
    #[default]
    Ratio,
}

impl ScoreboardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreboardSort::Kills => "kills",
            ScoreboardSort::Deaths => "deaths",
            ScoreboardSort::Ratio => "ratio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreboardEntry {
    pub player: String,
    pub kills: u32,
    pub deaths: u32,
    pub ratio: f64,
}

impl ScoreboardEntry {
    /// Ratio rendered to two decimals, the display contract of the board.
    pub fn ratio_display(&self) -> String {
        format!("{:.2}", self.ratio)
    }
}

/// Kill/death board over a batch already filtered to `KILL` events.
///
/// Credits the primary actor with a kill and the secondary with a death;
/// players with neither are excluded. Ratio is `kills / max(deaths, 1)`.
/// Descending, stable sort by the requested key.
pub fn scoreboard(batch: &LogBatch, sort: ScoreboardSort) -> Vec<ScoreboardEntry> {
    let mut rows = Vec::new();
    for player in &batch.players {
        let mut kills = 0u32;
        let mut deaths = 0u32;
        for event in &batch.events {
            if event.player.as_deref() == Some(player) {
                kills += 1;
            } else if event.player2.as_deref() == Some(player) {
                deaths += 1;
            }
        }
        if kills == 0 && deaths == 0 {
            continue;
        }
        rows.push(ScoreboardEntry {
            player: player.clone(),
            kills,
            deaths,
            ratio: f64::from(kills) / f64::from(deaths.max(1)),
        });
    }

    match sort {
        ScoreboardSort::Kills => rows.sort_by(|a, b| b.kills.cmp(&a.kills)),
        ScoreboardSort::Deaths => rows.sort_by(|a, b| b.deaths.cmp(&a.deaths)),
        ScoreboardSort::Ratio => {
            rows.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).unwrap_or(Ordering::Equal))
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::parser::parse_at;
    use chrono::{TimeZone, Utc};

    const KILLS: &str = "\
[10 min (1606998100)] KILL: Alice(Allies/1) -> Bob(Axis/2) with M1 Garand
[9 min (1606998160)] KILL: Alice(Allies/1) -> Carol(Axis/3) with M1 Garand
[8 min (1606998220)] KILL: Bob(Axis/2) -> Alice(Allies/1) with MP40
[7 min (1606998280)] KILL: Alice(Allies/1) -> Bob(Axis/2) with M1 Garand
";

    fn board(sort: ScoreboardSort) -> Vec<ScoreboardEntry> {
        let now = Utc.timestamp_opt(1_607_000_000, 0).unwrap();
        scoreboard(&parse_at(KILLS, Some("KILL"), None, now), sort)
    }

    #[test]
    fn ratio_law_holds_for_every_row() {
        for entry in board(ScoreboardSort::Ratio) {
            assert_eq!(
                entry.ratio,
                f64::from(entry.kills) / f64::from(entry.deaths.max(1))
            );
        }
    }

    #[test]
    fn counts_and_default_order() {
        let rows = board(ScoreboardSort::Ratio);
        assert_eq!(rows[0].player, "Alice");
        assert_eq!(rows[0].kills, 3);
        assert_eq!(rows[0].deaths, 1);
        assert_eq!(rows[0].ratio_display(), "3.00");

        let bob = rows.iter().find(|r| r.player == "Bob").unwrap();
        assert_eq!(bob.kills, 1);
        assert_eq!(bob.deaths, 2);
        assert_eq!(bob.ratio_display(), "0.50");
    }

    #[test]
    fn deathless_victim_still_appears() {
        // Carol never killed anyone but died once, so she has a row.
        let rows = board(ScoreboardSort::Deaths);
        let carol = rows.iter().find(|r| r.player == "Carol").unwrap();
        assert_eq!(carol.kills, 0);
        assert_eq!(carol.ratio_display(), "0.00");
    }

    #[test]
    fn uninvolved_players_are_excluded() {
        let now = Utc.timestamp_opt(1_607_000_000, 0).unwrap();
        let blob = format!("{KILLS}[6 min (1606998340)] CONNECTED Lurker\n");
        // The batch is KILL-filtered, so Lurker contributes no counted event.
        let rows = scoreboard(&parse_at(&blob, Some("KILL"), None, now), ScoreboardSort::Ratio);
        assert!(rows.iter().all(|r| r.player != "Lurker"));
    }

    #[test]
    fn sort_by_kills() {
        let rows = board(ScoreboardSort::Kills);
        assert_eq!(rows[0].player, "Alice");
        assert!(rows[0].kills >= rows[1].kills);
    }
}
