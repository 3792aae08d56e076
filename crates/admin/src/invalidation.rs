//! The cache-consistency contract: every cached read identity with its
//! freshness window, and the static map from each mutating operation to the
//! reads it must purge.
//!
//! Eviction happens only after the remote mutation reports success; a
//! failed mutation leaves every cache entry untouched (see
//! [`Admin::mutate`](crate::admin::Admin)).

use std::time::Duration;

use crate::admin::settings::Setting;
use crate::cache::CacheKey;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

/// Every cached read the layer serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSlot {
    PlayerList,
    PlayerInfo,
    PlayerDetail,
    AdminList,
    VipList,
    TempBans,
    PermaBans,
    CurrentMap,
    MapList,
    MapRotation,
    NextMap,
    ServerName,
    Slots,
    Status,
    StructuredLogs,
    Scoreboard,
    TeamkillBoard,
    Profanities,
    Setting(Setting),
}

impl ReadSlot {
    /// Stable operation identity used as the cache-key namespace.
    pub const fn op(&self) -> &'static str {
        match self {
            ReadSlot::PlayerList => "get_players",
            ReadSlot::PlayerInfo => "get_player_info",
            ReadSlot::PlayerDetail => "get_detailed_player_info",
            ReadSlot::AdminList => "get_admin_ids",
            ReadSlot::VipList => "get_vip_ids",
            ReadSlot::TempBans => "get_temp_bans",
            ReadSlot::PermaBans => "get_perma_bans",
            ReadSlot::CurrentMap => "get_map",
            ReadSlot::MapList => "get_maps",
            ReadSlot::MapRotation => "get_map_rotation",
            ReadSlot::NextMap => "get_next_map",
            ReadSlot::ServerName => "get_name",
            ReadSlot::Slots => "get_slots",
            ReadSlot::Status => "get_status",
            ReadSlot::StructuredLogs => "get_structured_logs",
            ReadSlot::Scoreboard => "get_scoreboard",
            ReadSlot::TeamkillBoard => "get_teamkills_boards",
            ReadSlot::Profanities => "get_profanities",
            ReadSlot::Setting(setting) => setting.getter_op(),
        }
    }

    /// Freshness window for this read.
    pub const fn ttl(&self) -> Duration {
        let secs = match self {
            ReadSlot::PlayerList => 5,
            ReadSlot::PlayerInfo => DAY,
            ReadSlot::PlayerDetail => MINUTE,
            ReadSlot::AdminList => DAY,
            ReadSlot::VipList => HOUR,
            ReadSlot::TempBans => MINUTE,
            ReadSlot::PermaBans => MINUTE,
            ReadSlot::CurrentMap => 10,
            ReadSlot::MapList => DAY,
            ReadSlot::MapRotation => 5 * MINUTE,
            ReadSlot::NextMap => MINUTE,
            ReadSlot::ServerName => HOUR,
            ReadSlot::Slots => 20,
            ReadSlot::Status => 5,
            ReadSlot::StructuredLogs => 2,
            ReadSlot::Scoreboard => 2 * MINUTE,
            ReadSlot::TeamkillBoard => 2 * MINUTE,
            ReadSlot::Profanities => HOUR,
            ReadSlot::Setting(_) => HOUR,
        };
        Duration::from_secs(secs)
    }

    /// Cache key for the argument-less form of this read.
    pub fn key(&self) -> CacheKey {
        CacheKey::of(self.op())
    }
}

/// Which cached reads each mutator purges on success. Settings are absent
/// here on purpose: they are independent, each setter purges only its own
/// getter via [`setting_rule`].
pub mod rules {
    use super::ReadSlot;

    pub const ADD_ADMIN: &[ReadSlot] = &[ReadSlot::AdminList];
    pub const REMOVE_ADMIN: &[ReadSlot] = &[ReadSlot::AdminList];
    pub const ADD_VIP: &[ReadSlot] = &[ReadSlot::VipList];
    pub const REMOVE_VIP: &[ReadSlot] = &[ReadSlot::VipList];
    pub const KICK: &[ReadSlot] = &[ReadSlot::PlayerList];
    pub const TEMP_BAN: &[ReadSlot] = &[ReadSlot::PlayerList, ReadSlot::TempBans];
    pub const PERMA_BAN: &[ReadSlot] = &[ReadSlot::PlayerList, ReadSlot::PermaBans];
    pub const REMOVE_TEMP_BAN: &[ReadSlot] = &[ReadSlot::TempBans];
    pub const REMOVE_PERMA_BAN: &[ReadSlot] = &[ReadSlot::PermaBans];
    pub const SET_MAP: &[ReadSlot] = &[ReadSlot::CurrentMap];
    pub const ROTATION_CHANGE: &[ReadSlot] = &[ReadSlot::MapRotation];
    pub const PROFANITY_CHANGE: &[ReadSlot] = &[ReadSlot::Profanities];
}

/// Rule for a named-setting setter: its own cached getter, nothing else.
pub fn setting_rule(setting: Setting) -> [ReadSlot; 1] {
    [ReadSlot::Setting(setting)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vip_mutations_purge_only_the_vip_list() {
        assert_eq!(rules::ADD_VIP, &[ReadSlot::VipList]);
        assert_eq!(rules::REMOVE_VIP, &[ReadSlot::VipList]);
    }

    #[test]
    fn bans_purge_the_player_list_and_their_own_ban_list() {
        assert!(rules::TEMP_BAN.contains(&ReadSlot::PlayerList));
        assert!(rules::TEMP_BAN.contains(&ReadSlot::TempBans));
        assert!(!rules::TEMP_BAN.contains(&ReadSlot::PermaBans));
        assert!(rules::PERMA_BAN.contains(&ReadSlot::PermaBans));
        assert!(!rules::PERMA_BAN.contains(&ReadSlot::TempBans));
    }

    #[test]
    fn setting_setters_purge_only_their_own_getter() {
        let [slot] = setting_rule(Setting::QueueLength);
        assert_eq!(slot, ReadSlot::Setting(Setting::QueueLength));
        assert_ne!(slot, ReadSlot::Setting(Setting::VipSlotsNum));
    }

    #[test]
    fn slot_ops_are_distinct() {
        let slots = [
            ReadSlot::PlayerList,
            ReadSlot::PlayerInfo,
            ReadSlot::PlayerDetail,
            ReadSlot::AdminList,
            ReadSlot::VipList,
            ReadSlot::TempBans,
            ReadSlot::PermaBans,
            ReadSlot::CurrentMap,
            ReadSlot::MapList,
            ReadSlot::MapRotation,
            ReadSlot::NextMap,
            ReadSlot::ServerName,
            ReadSlot::Slots,
            ReadSlot::Status,
            ReadSlot::StructuredLogs,
            ReadSlot::Scoreboard,
            ReadSlot::TeamkillBoard,
            ReadSlot::Profanities,
            ReadSlot::Setting(Setting::QueueLength),
        ];
        for (i, a) in slots.iter().enumerate() {
            for b in &slots[i + 1..] {
                assert_ne!(a.op(), b.op());
            }
        }
    }
}
