//! Server identity and occupancy reads.

use std::sync::Arc;

use serde::Serialize;

use super::Admin;
use crate::cache::CacheValue;
use crate::channel::commands;
use crate::error::{AdminError, AdminResult};
use crate::invalidation::{rules, ReadSlot};
use crate::response;

/// Snapshot of the server's public identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub name: String,
    pub map: String,
    /// Raw `used/total` slot reply.
    pub slots: String,
    pub short_name: String,
    pub player_count: u32,
}

impl CacheValue for Status {
    fn is_empty_value(&self) -> bool {
        self.name.is_empty()
    }
}

impl Admin {
    /// Server display name, validated for plausible length.
    pub fn get_name(&self) -> AdminResult<Arc<String>> {
        self.cached(ReadSlot::ServerName, true, || {
            let name = self.execute(commands::GET_NAME, &[])?;
            response::check_server_name(&name)?;
            Ok(name)
        })
    }

    /// Occupancy as the raw `used/total` string.
    pub fn get_slots(&self) -> AdminResult<Arc<String>> {
        self.cached(ReadSlot::Slots, true, || {
            let slots = self.execute(commands::GET_SLOTS, &[])?;
            response::check_slots(&slots)?;
            Ok(slots)
        })
    }

    /// Currently running map, validated against the map-name shape.
    pub fn get_map(&self) -> AdminResult<Arc<String>> {
        self.cached(ReadSlot::CurrentMap, true, || {
            let map = self.execute(commands::GET_MAP, &[])?;
            response::check_map_name(&map)?;
            Ok(map)
        })
    }

    /// All maps the server can rotate to.
    pub fn get_maps(&self) -> AdminResult<Arc<Vec<String>>> {
        self.cached(ReadSlot::MapList, true, || {
            response::parse_list(&self.execute(commands::GET_MAPS, &[])?)
        })
    }

    /// Aggregate status summary. Built from the individually cached reads,
    /// so a hot status poll costs no extra remote calls.
    pub fn get_status(&self) -> AdminResult<Arc<Status>> {
        self.cached(ReadSlot::Status, false, || {
            let slots = self.get_slots()?;
            let player_count = slots
                .split('/')
                .next()
                .and_then(|used| used.parse().ok())
                .ok_or_else(|| AdminError::malformed("slots", slots.as_str().to_owned()))?;
            Ok(Status {
                name: self.get_name()?.as_str().to_owned(),
                map: self.get_map()?.as_str().to_owned(),
                slots: slots.as_str().to_owned(),
                short_name: self.config.server_short_name.clone(),
                player_count,
            })
        })
    }

    /// Switches the running map.
    pub fn set_map(&self, map_name: &str) -> AdminResult<()> {
        self.mutate(rules::SET_MAP, || {
            self.execute_ok(commands::SET_MAP, &[map_name])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MockCommandChannel;
    use crate::config::AdminConfig;

    fn admin(channel: MockCommandChannel) -> Admin {
        Admin::new(Arc::new(channel), AdminConfig::default())
    }

    #[test]
    fn name_is_cached_across_reads() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_NAME)
            .times(1)
            .returning(|_, _| Ok("My Server".to_owned()));
        let admin = admin(channel);
        assert_eq!(admin.get_name().unwrap().as_str(), "My Server");
        assert_eq!(admin.get_name().unwrap().as_str(), "My Server");
    }

    #[test]
    fn absurd_name_is_rejected() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .returning(|_, _| Ok("x".repeat(2000)));
        assert!(admin(channel).get_name().is_err());
    }

    #[test]
    fn garbage_slots_are_rejected() {
        let mut channel = MockCommandChannel::new();
        channel.expect_execute().returning(|_, _| Ok("CRAP".to_owned()));
        assert!(admin(channel).get_slots().is_err());
    }

    #[test]
    fn status_aggregates_the_cached_reads() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_SLOTS)
            .times(1)
            .returning(|_, _| Ok("64/100".to_owned()));
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_NAME)
            .times(1)
            .returning(|_, _| Ok("My Server".to_owned()));
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_MAP)
            .times(1)
            .returning(|_, _| Ok("foy_warfare".to_owned()));

        let admin = admin(channel);
        let status = admin.get_status().unwrap();
        assert_eq!(status.player_count, 64);
        assert_eq!(status.map, "foy_warfare");
        assert_eq!(status.short_name, "Game Rcon");
        // second poll is served entirely from cache
        let again = admin.get_status().unwrap();
        assert_eq!(*again, *status);
    }

    #[test]
    fn set_map_invalidates_the_current_map() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_MAP)
            .times(2)
            .returning(|_, _| Ok("foy_warfare".to_owned()));
        channel
            .expect_execute()
            .withf(|cmd, args| cmd == commands::SET_MAP && args == ["utahbeach_warfare"])
            .times(1)
            .returning(|_, _| Ok("SUCCESS".to_owned()));

        let admin = admin(channel);
        admin.get_map().unwrap();
        admin.set_map("utahbeach_warfare").unwrap();
        admin.get_map().unwrap();
    }

    #[test]
    fn rejected_map_switch_keeps_the_cache() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_MAP)
            .times(1)
            .returning(|_, _| Ok("foy_warfare".to_owned()));
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::SET_MAP)
            .returning(|_, _| Ok("FAIL invalid map".to_owned()));

        let admin = admin(channel);
        admin.get_map().unwrap();
        assert!(admin.set_map("nonsense").is_err());
        // still served from cache, no second GET_MAP
        assert_eq!(admin.get_map().unwrap().as_str(), "foy_warfare");
    }
}
