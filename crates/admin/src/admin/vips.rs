//! VIP and console-admin list management.

use std::sync::Arc;

use super::Admin;
use crate::channel::commands;
use crate::error::AdminResult;
use crate::invalidation::{rules, ReadSlot};
use crate::response::{self, AdminEntry, VipEntry};

impl Admin {
    /// VIP roster, sorted by name.
    pub fn get_vip_ids(&self) -> AdminResult<Arc<Vec<VipEntry>>> {
        self.cached(ReadSlot::VipList, true, || {
            let mut vips = response::parse_list(&self.execute(commands::GET_VIP_IDS, &[])?)?
                .iter()
                .map(|entry| response::parse_vip_entry(entry))
                .collect::<AdminResult<Vec<_>>>()?;
            vips.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(vips)
        })
    }

    pub fn do_add_vip(&self, name: &str, steam_id_64: &str) -> AdminResult<()> {
        self.mutate(rules::ADD_VIP, || {
            self.execute_ok(commands::VIP_ADD, &[steam_id_64, name])
        })
    }

    pub fn do_remove_vip(&self, steam_id_64: &str) -> AdminResult<()> {
        self.mutate(rules::REMOVE_VIP, || {
            self.execute_ok(commands::VIP_DEL, &[steam_id_64])
        })
    }

    /// Clears the whole VIP roster, one entry at a time.
    pub fn do_remove_all_vips(&self) -> AdminResult<()> {
        let vips = self.get_vip_ids()?;
        for vip in vips.iter() {
            self.do_remove_vip(&vip.steam_id_64)?;
        }
        Ok(())
    }

    /// Console admin roster.
    pub fn get_admin_ids(&self) -> AdminResult<Arc<Vec<AdminEntry>>> {
        self.cached(ReadSlot::AdminList, true, || {
            response::parse_list(&self.execute(commands::GET_ADMIN_IDS, &[])?)?
                .iter()
                .map(|entry| response::parse_admin_entry(entry))
                .collect()
        })
    }

    pub fn do_add_admin(&self, steam_id_64: &str, role: &str, name: &str) -> AdminResult<()> {
        self.mutate(rules::ADD_ADMIN, || {
            self.execute_ok(commands::ADMIN_ADD, &[steam_id_64, role, name])
        })
    }

    pub fn do_remove_admin(&self, steam_id_64: &str) -> AdminResult<()> {
        self.mutate(rules::REMOVE_ADMIN, || {
            self.execute_ok(commands::ADMIN_DEL, &[steam_id_64])
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
    fn vip_roster_is_sorted_by_name() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_VIP_IDS)
            .times(1)
            .returning(|_, _| Ok("2\t2 \"zed\"\t1 \"alice\"".to_owned()));
        let vips = admin(channel).get_vip_ids().unwrap();
        assert_eq!(vips[0].name, "alice");
        assert_eq!(vips[1].name, "zed");
    }

    #[test]
    fn adding_a_vip_refreshes_the_roster() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_VIP_IDS)
            .times(2)
            .returning(|_, _| Ok("1\t1 \"alice\"".to_owned()));
        channel
            .expect_execute()
            .withf(|cmd, args| cmd == commands::VIP_ADD && args == ["2", "bob"])
            .times(1)
            .returning(|_, _| Ok("SUCCESS".to_owned()));

        let admin = admin(channel);
        admin.get_vip_ids().unwrap();
        admin.do_add_vip("bob", "2").unwrap();
        admin.get_vip_ids().unwrap();
    }

    #[test]
    fn remove_all_vips_walks_the_roster() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_VIP_IDS)
            .times(1)
            .returning(|_, _| Ok("2\t1 \"alice\"\t2 \"bob\"".to_owned()));
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::VIP_DEL)
            .times(2)
            .returning(|_, _| Ok("SUCCESS".to_owned()));

        admin(channel).do_remove_all_vips().unwrap();
    }

    #[test]
    fn admin_roster_parses_roles_and_names() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_ADMIN_IDS)
            .returning(|_, _| Ok("1\t7656119 owner \"Dr.WeeD\"".to_owned()));
        let admins = admin(channel).get_admin_ids().unwrap();
        assert_eq!(admins[0].role, "owner");
        assert_eq!(admins[0].name, "Dr.WeeD");
    }
}
