//! Player reads and the kick/ban mutations.

use std::sync::Arc;

use serde::Serialize;

use super::Admin;
use crate::cache::CacheValue;
use crate::channel::{commands, ChannelError};
use crate::error::{AdminError, AdminResult};
use crate::invalidation::{rules, ReadSlot};
use crate::response::{self, PlayerDetail};

/// Identity and reputation data for one player, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerInfo {
    pub name: String,
    pub steam_id_64: String,
    pub country: Option<String>,
    pub has_bans: Option<bool>,
}

/// One entry of the online player list. Info fields are `None` when the
/// player left between the list fetch and the per-player lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: String,
    pub steam_id_64: Option<String>,
    pub country: Option<String>,
    pub has_bans: Option<bool>,
}

impl CacheValue for PlayerDetail {}

impl Admin {
    /// Raw online player names, never cached.
    pub(crate) fn raw_player_names(&self) -> AdminResult<Vec<String>> {
        response::parse_list(&self.execute(commands::GET_PLAYERS, &[])?)
    }

    /// `(name, steam_id)` pairs for everyone online, never cached.
    pub fn get_player_ids(&self) -> AdminResult<Vec<(String, String)>> {
        response::parse_list(&self.execute(commands::GET_PLAYER_IDS, &[])?)?
            .iter()
            .map(|entry| response::parse_player_id(entry))
            .collect()
    }

    /// Online player list with identity and reputation merged in.
    pub fn get_players(&self) -> AdminResult<Arc<Vec<Player>>> {
        self.cached(ReadSlot::PlayerList, true, || {
            let names = self.raw_player_names()?;
            let mut players = Vec::with_capacity(names.len());
            for name in names {
                let info = self.get_player_info(&name)?;
                players.push(match info.as_ref() {
                    Some(info) => Player {
                        name,
                        steam_id_64: Some(info.steam_id_64.clone()),
                        country: info.country.clone(),
                        has_bans: info.has_bans,
                    },
                    None => Player {
                        name,
                        steam_id_64: None,
                        country: None,
                        has_bans: None,
                    },
                });
            }
            Ok(players)
        })
    }

    /// Identity and reputation for one player. Lookup failures and
    /// identity mismatches degrade to `Ok(None)`; missing data is not
    /// cached so a later retry hits the server again. Transport-level
    /// failures still surface: a dead socket is not an unknown player.
    pub fn get_player_info(&self, player: &str) -> AdminResult<Arc<Option<PlayerInfo>>> {
        self.cached_with_args(ReadSlot::PlayerInfo, &[player], false, || {
            match self.fetch_player_info(player) {
                Ok(info) => Ok(Some(info)),
                Err(
                    err @ AdminError::Channel(
                        ChannelError::Transport(_) | ChannelError::Timeout,
                    ),
                ) => Err(err),
                Err(err) => {
                    tracing::warn!(player, %err, "no player info");
                    Ok(None)
                }
            }
        })
    }

    fn fetch_player_info(&self, player: &str) -> AdminResult<PlayerInfo> {
        let (name, steam_id_64) = match self.execute(commands::PLAYER_INFO, &[player]) {
            Ok(raw) => {
                let mut lines = raw.split('\n');
                let name = field_value(lines.next().unwrap_or_default());
                let id = field_value(lines.next().unwrap_or_default());
                if id.is_empty() {
                    return Err(AdminError::malformed("player info head", raw.clone()));
                }
                (name, id)
            }
            // Only a declined command warrants the id-list fallback; a
            // transport failure would hit the fallback call just the same.
            Err(AdminError::Channel(ChannelError::CommandFailed(reply))) => {
                tracing::debug!(player, reply, "playerinfo failed, falling back to the id list");
                let id = self
                    .get_player_ids()?
                    .into_iter()
                    .find_map(|(name, id)| (name == player).then_some(id))
                    .ok_or(AdminError::Precondition(format!(
                        "player {player:?} is not online"
                    )))?;
                (player.to_owned(), id)
            }
            Err(err) => return Err(err),
        };

        if name != player {
            return Err(AdminError::IdentityMismatch {
                requested: player.to_owned(),
                returned: name,
            });
        }

        let (country, has_bans) = match &self.reputation {
            Some(reputation) => (
                reputation.country_code(&steam_id_64),
                reputation.has_bans(&steam_id_64),
            ),
            None => (None, None),
        };

        Ok(PlayerInfo {
            name,
            steam_id_64,
            country,
            has_bans,
        })
    }

    /// Full `playerinfo` block: team, role, unit, loadout, scores, level.
    pub fn get_detailed_player_info(&self, player: &str) -> AdminResult<Arc<PlayerDetail>> {
        self.cached_with_args(ReadSlot::PlayerDetail, &[player], true, || {
            let raw = self.execute(commands::PLAYER_INFO, &[player])?;
            response::parse_player_detail(&raw, player)
        })
    }

    /// How many of the online players hold VIP slots.
    pub fn get_vips_count(&self) -> AdminResult<usize> {
        let players = self.get_player_ids()?;
        let vips: std::collections::HashSet<String> = self
            .get_vip_ids()?
            .iter()
            .map(|vip| vip.steam_id_64.clone())
            .collect();
        Ok(players
            .into_iter()
            .filter(|(_, steam_id)| vips.contains(steam_id))
            .count())
    }

    /// Names of online players who hold console admin access.
    pub fn get_online_console_admins(&self) -> AdminResult<Vec<String>> {
        let admin_ids: std::collections::HashSet<String> = self
            .get_admin_ids()?
            .iter()
            .map(|admin| admin.steam_id_64.clone())
            .collect();
        Ok(self
            .get_players()?
            .iter()
            .filter(|player| {
                player
                    .steam_id_64
                    .as_ref()
                    .is_some_and(|id| admin_ids.contains(id))
            })
            .map(|player| player.name.clone())
            .collect())
    }

    pub fn do_kick(&self, player: &str, reason: &str) -> AdminResult<()> {
        self.mutate(rules::KICK, || {
            self.execute_ok(commands::KICK, &[player, reason])
        })
    }

    pub fn do_temp_ban(
        &self,
        player: Option<&str>,
        steam_id_64: Option<&str>,
        duration_hours: u32,
        reason: &str,
        admin_name: &str,
    ) -> AdminResult<()> {
        let target = self.ban_target(player, steam_id_64)?;
        let duration = duration_hours.to_string();
        self.mutate(rules::TEMP_BAN, || {
            self.execute_ok(
                commands::TEMP_BAN,
                &[target.as_str(), duration.as_str(), reason, admin_name],
            )
        })
    }

    pub fn do_perma_ban(
        &self,
        player: Option<&str>,
        steam_id_64: Option<&str>,
        reason: &str,
        admin_name: &str,
    ) -> AdminResult<()> {
        let target = self.ban_target(player, steam_id_64)?;
        self.mutate(rules::PERMA_BAN, || {
            self.execute_ok(commands::PERMA_BAN, &[target.as_str(), reason, admin_name])
        })
    }

    /// A ban on a currently connected player only takes effect immediately
    /// when issued by name, so the name wins over the steam id while the
    /// player is online.
    fn ban_target(
        &self,
        player: Option<&str>,
        steam_id_64: Option<&str>,
    ) -> AdminResult<String> {
        if let Some(name) = player {
            if steam_id_64.is_none() || self.raw_player_names()?.iter().any(|n| n == name) {
                return Ok(name.to_owned());
            }
        }
        steam_id_64
            .or(player)
            .map(str::to_owned)
            .ok_or(AdminError::Precondition(
                "a ban needs a player name or a steam id".to_owned(),
            ))
    }
}

fn field_value(line: &str) -> String {
    line.split_once(": ")
        .map(|(_, value)| value)
        .unwrap_or(line)
        .to_owned()
}
