//! Structured parsers for raw RCON reply text.
//!
//! Everything here is a pure function from reply text to a typed value.
//! A reply that does not match the documented shape is a
//! [`AdminError::MalformedResponse`] carrying the offending text, never a
//! silently coerced value.

use serde::Serialize;

use crate::error::{AdminError, AdminResult};

/// Upper bound on a plausible server name. Longer replies are treated as
/// garbage from a desynced connection.
pub const MAX_SERVER_NAME_LEN: usize = 1024;

/// Splits a count-prefixed, tab-delimited list reply into its entries.
///
/// The first field is the entry count; a trailing tab produces an empty
/// last field which is dropped. A count that does not match the number of
/// entries is a malformed reply.
pub fn parse_list(raw: &str) -> AdminResult<Vec<String>> {
    let mut parts = raw.split('\t');
    let head = parts
        .next()
        .ok_or_else(|| AdminError::malformed("list count", raw.to_owned()))?;
    let count: usize = head
        .trim()
        .parse()
        .map_err(|_| AdminError::malformed("list count", raw.to_owned()))?;

    let mut entries: Vec<String> = parts.map(str::to_owned).collect();
    while entries.last().is_some_and(|e| e.is_empty()) {
        entries.pop();
    }
    if entries.len() != count {
        return Err(AdminError::malformed("list length", raw.to_owned()));
    }
    Ok(entries)
}

/// Parses a `"<name> : <steam_id>"` pair from the player id list.
pub fn parse_player_id(entry: &str) -> AdminResult<(String, String)> {
    let (name, id) = entry
        .rsplit_once(" : ")
        .ok_or_else(|| AdminError::malformed("player id pair", entry.to_owned()))?;
    Ok((name.to_owned(), id.to_owned()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminEntry {
    pub steam_id_64: String,
    pub role: String,
    pub name: String,
}

/// Parses an admin list entry: `<steam_id> <role> "<name>"`.
pub fn parse_admin_entry(entry: &str) -> AdminResult<AdminEntry> {
    let mut parts = entry.splitn(3, ' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(steam_id_64), Some(role), Some(name)) if !name.is_empty() => Ok(AdminEntry {
            steam_id_64: steam_id_64.to_owned(),
            role: role.to_owned(),
            name: strip_quotes(name).to_owned(),
        }),
        _ => Err(AdminError::malformed("admin entry", entry.to_owned())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VipEntry {
    pub steam_id_64: String,
    pub name: String,
}

/// Parses a VIP list entry: `<steam_id> "<name>"`. The name may contain
/// spaces; quotes and stray newlines are stripped.
pub fn parse_vip_entry(entry: &str) -> AdminResult<VipEntry> {
    let (steam_id_64, name) = entry
        .split_once(' ')
        .ok_or_else(|| AdminError::malformed("vip entry", entry.to_owned()))?;
    let name = name.replace(['"', '\n'], "");
    Ok(VipEntry {
        steam_id_64: steam_id_64.to_owned(),
        name: name.trim().to_owned(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BanKind {
    Temp,
    Perma,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BanEntry {
    #[serde(rename = "type")]
    pub kind: BanKind,
    pub steam_id_64: String,
    pub name: Option<String>,
    pub ban_time: Option<String>,
    pub reason: Option<String>,
    pub by: Option<String>,
    /// Verbatim ban log line, required by the unban commands.
    pub raw: String,
}

/// Parses a ban log line, e.g.
/// `76561197984877751 : nickname "Dr.WeeD" banned for 2 hours on
/// 2020.12.03-12.40.08 for "None" by admin "test"`.
///
/// Only the steam id is mandatory; nickname, date, reason and admin are
/// extracted when present so that older or truncated ban formats still
/// round-trip through [`BanEntry::raw`].
pub fn parse_ban_entry(entry: &str, kind: BanKind) -> AdminResult<BanEntry> {
    let (steam_id_64, rest) = entry
        .split_once(" :")
        .ok_or_else(|| AdminError::malformed("ban entry", entry.to_owned()))?;

    let name = rest
        .split_once(" nickname \"")
        .and_then(|(_, tail)| tail.split_once("\" banned"))
        .map(|(name, _)| name.to_owned());

    let (ban_time, reason) = match find_ban_date(entry) {
        Some((start, end)) => {
            let date = entry[start..end].to_owned();
            let reason = entry[end..].strip_prefix(' ').map(str::to_owned);
            (Some(date), reason)
        }
        None => (None, None),
    };

    let by = entry
        .rsplit_once(" by admin ")
        .map(|(_, who)| who.replace('"', ""));

    Ok(BanEntry {
        kind,
        steam_id_64: steam_id_64.to_owned(),
        name,
        ban_time,
        reason,
        by,
        raw: entry.to_owned(),
    })
}

/// Locates the last `YYYY.MM.DD-HH.MM.SS` token, returning its byte range.
fn find_ban_date(entry: &str) -> Option<(usize, usize)> {
    const LEN: usize = "2020.12.03-12.40.08".len();
    let bytes = entry.as_bytes();
    for (i, _) in entry.rmatch_indices('-') {
        if i < 10 || i + 9 > bytes.len() {
            continue;
        }
        let start = i - 10;
        let end = i + 9;
        debug_assert_eq!(end - start, LEN);
        if entry.get(start..end).is_some_and(is_ban_date) {
            return Some((start, end));
        }
    }
    None
}

fn is_ban_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 19
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 | 13 | 16 => *c == b'.',
            10 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub combat: i64,
    pub offense: i64,
    pub defense: i64,
    pub support: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerDetail {
    pub name: String,
    pub steam_id_64: Option<String>,
    /// Absent when the server reports `Team: None`.
    pub team: Option<String>,
    pub role: Option<String>,
    pub unit_id: Option<i64>,
    pub unit_name: Option<String>,
    pub loadout: Option<String>,
    pub kills: Option<i64>,
    pub deaths: Option<i64>,
    pub score: Option<ScoreBreakdown>,
    pub level: Option<i64>,
}

/// Parses a detailed `playerinfo` block:
///
/// ```text
/// Name: T17 Scott
/// steamID64: 01234567890123456
/// Team: Allies
/// Role: Officer
/// Unit: 0 - Able
/// Loadout: NCO
/// Kills: 0 - Deaths: 0
/// Score: C 50, O 0, D 40, S 10
/// Level: 34
/// ```
///
/// `Team: None` means no team; `Unit` and `Loadout` lines are absent in
/// that case. Lines without a `": "` separator are ignored.
pub fn parse_player_detail(raw: &str, player: &str) -> AdminResult<PlayerDetail> {
    let mut detail = PlayerDetail {
        name: player.to_owned(),
        ..PlayerDetail::default()
    };

    for line in raw.split('\n') {
        let Some((key, val)) = line.split_once(": ") else {
            continue;
        };
        match key.to_ascii_lowercase().as_str() {
            "steamid64" => detail.steam_id_64 = Some(val.to_owned()),
            "team" => {
                detail.team = match val {
                    "None" => None,
                    team => Some(team.to_owned()),
                }
            }
            "role" => detail.role = Some(val.to_ascii_lowercase()),
            "loadout" => detail.loadout = Some(val.to_ascii_lowercase()),
            "unit" => {
                let (id, unit_name) = val
                    .split_once(" - ")
                    .ok_or_else(|| AdminError::malformed("unit field", line.to_owned()))?;
                detail.unit_id = Some(parse_int("unit id", id)?);
                detail.unit_name = Some(unit_name.to_ascii_lowercase());
            }
            "kills" => {
                let (kills, other) = val
                    .split_once(" - ")
                    .ok_or_else(|| AdminError::malformed("kills field", line.to_owned()))?;
                detail.kills = Some(parse_int("kills", kills)?);
                let deaths = other
                    .to_ascii_lowercase()
                    .strip_prefix("deaths: ")
                    .map(str::to_owned)
                    .ok_or_else(|| AdminError::malformed("deaths field", line.to_owned()))?;
                detail.deaths = Some(parse_int("deaths", &deaths)?);
            }
            "score" => detail.score = Some(parse_score(val)?),
            "level" => detail.level = Some(parse_int("level", val)?),
            _ => {}
        }
    }

    Ok(detail)
}

fn parse_score(val: &str) -> AdminResult<ScoreBreakdown> {
    let mut score = ScoreBreakdown::default();
    for pair in val.split(", ") {
        let Some((key, num)) = pair.split_once(' ') else {
            return Err(AdminError::malformed("score pair", pair.to_owned()));
        };
        let num = parse_int("score value", num)?;
        match key {
            "C" => score.combat = num,
            "O" => score.offense = num,
            "D" => score.defense = num,
            "S" => score.support = num,
            _ => {}
        }
    }
    Ok(score)
}

fn parse_int(context: &'static str, val: &str) -> AdminResult<i64> {
    val.trim()
        .parse()
        .map_err(|_| AdminError::malformed(context, val.to_owned()))
}

/// Validates a slot count reply of the shape `N/M` (1-3 digits over
/// 2-3 digits).
pub fn check_slots(raw: &str) -> AdminResult<()> {
    let valid = raw.split_once('/').is_some_and(|(used, total)| {
        (1..=3).contains(&used.len())
            && (2..=3).contains(&total.len())
            && used.bytes().all(|b| b.is_ascii_digit())
            && total.bytes().all(|b| b.is_ascii_digit())
    });
    if valid {
        Ok(())
    } else {
        Err(AdminError::malformed("slots", raw.to_owned()))
    }
}

/// Validates a map name: word characters and underscores only.
pub fn check_map_name(raw: &str) -> AdminResult<()> {
    if !raw.is_empty() && raw.chars().all(|c| c.is_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(AdminError::malformed("map name", raw.to_owned()))
    }
}

/// Rejects implausibly long server names.
pub fn check_server_name(raw: &str) -> AdminResult<()> {
    if raw.len() <= MAX_SERVER_NAME_LEN {
        Ok(())
    } else {
        Err(AdminError::malformed("server name", raw.to_owned()))
    }
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}
