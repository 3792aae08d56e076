//! Orchestrator for the live event log: splits the raw blob into lines,
//! decodes the bracketed time field, dispatches each body through the
//! grammar table and assembles the batch.
//!
//! Per-line failures are soft: the line is dropped, recorded as a diagnostic
//! and logged; a bad line never fails the call.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::logs::lines;
use crate::logs::model::{Event, LogBatch, SkippedLine, LOG_ACTIONS};

/// Parse a raw multi-line log blob into a [`LogBatch`].
///
/// `filter_action` is a prefix match against the rendered action,
/// `filter_player` a substring match against the raw line. Filters narrow the
/// emitted event list only; the discovered player and action sets always
/// cover every parsed line, so consumers can enumerate the full population
/// regardless of the filter.
pub fn parse(raw: &str, filter_action: Option<&str>, filter_player: Option<&str>) -> LogBatch {
    parse_at(raw, filter_action, filter_player, Utc::now())
}

/// [`parse`] with an explicit "now", making the relative offsets (and thus
/// the whole batch) a pure function of its inputs.
pub fn parse_at(
    raw: &str,
    filter_action: Option<&str>,
    filter_player: Option<&str>,
    now: DateTime<Utc>,
) -> LogBatch {
    let mut events = Vec::new();
    let mut players = BTreeSet::new();
    let mut actions = BTreeSet::new();
    let mut skipped = Vec::new();

    for line in raw.split('\n') {
        if line.is_empty() {
            continue;
        }

        let Some((time_field, rest)) = split_time_field(line) else {
            note_skip(&mut skipped, line, "no bracketed time field".to_string());
            continue;
        };
        let Some(timestamp) = decode_epoch(time_field) else {
            note_skip(
                &mut skipped,
                line,
                format!("no epoch token in time field {time_field:?}"),
            );
            continue;
        };
        let Some(grammar) = lines::dispatch(rest) else {
            note_skip(&mut skipped, line, "unrecognized line shape".to_string());
            continue;
        };
        let fields = match grammar.extract(rest) {
            Ok(fields) => fields,
            Err(e) => {
                note_skip(&mut skipped, line, e.to_string());
                continue;
            }
        };

        if let Some(p) = &fields.player {
            players.insert(p.clone());
        }
        if let Some(p) = &fields.player2 {
            players.insert(p.clone());
        }
        let label = fields.action.to_string();
        actions.insert(label.clone());

        // Filters narrow the emitted list only, after discovery.
        if let Some(prefix) = filter_action {
            if !label.starts_with(prefix) {
                continue;
            }
        }
        if let Some(needle) = filter_player {
            if !line.contains(needle) {
                continue;
            }
        }

        events.push(Event {
            timestamp,
            relative_time_ms: (timestamp - now).num_milliseconds(),
            raw: line.to_string(),
            line_without_time: rest.to_string(),
            action: fields.action,
            player: fields.player,
            steam_id_64_1: fields.steam_id_64_1,
            player2: fields.player2,
            steam_id_64_2: fields.steam_id_64_2,
            weapon: fields.weapon,
            message: fields.message,
            sub_content: fields.sub_content,
        });
    }

    // Most recent line first.
    events.reverse();

    for action in LOG_ACTIONS {
        actions.insert(action.to_string());
    }

    LogBatch {
        events,
        players,
        actions,
        skipped,
    }
}

fn note_skip(skipped: &mut Vec<SkippedLine>, line: &str, reason: String) {
    tracing::warn!(line, %reason, "skipping unparseable log line");
    skipped.push(SkippedLine {
        line: line.to_string(),
        reason,
    });
}

/// Split `[<time field>] <rest>` at the first `"] "`.
fn split_time_field(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix('[')?;
    body.split_once("] ")
}

/// Decode the last parenthesized integer in the time field as Unix epoch
/// seconds, e.g. `15:49 min (1606998428)`.
fn decode_epoch(time_field: &str) -> Option<DateTime<Utc>> {
    for (idx, _) in time_field.rmatch_indices('(') {
        let tail = &time_field[idx + 1..];
        let Some(close) = tail.find(')') else { continue };
        let token = &tail[..close];
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        if let Ok(secs) = token.parse::<i64>() {
            if let Some(ts) = DateTime::<Utc>::from_timestamp(secs, 0) {
                return Some(ts);
            }
        }
    }
    None
}
