//! Ban list reads and pardon operations.

use std::sync::Arc;

use super::Admin;
use crate::channel::commands;
use crate::error::AdminResult;
use crate::invalidation::{rules, ReadSlot};
use crate::response::{self, BanEntry, BanKind};

impl Admin {
    /// Raw temp ban log lines, exactly as the server renders them.
    pub fn get_temp_bans(&self) -> AdminResult<Arc<Vec<String>>> {
        self.cached(ReadSlot::TempBans, true, || {
            response::parse_list(&self.execute(commands::GET_TEMP_BANS, &[])?)
        })
    }

    /// Raw perma ban log lines.
    pub fn get_perma_bans(&self) -> AdminResult<Arc<Vec<String>>> {
        self.cached(ReadSlot::PermaBans, true, || {
            response::parse_list(&self.execute(commands::GET_PERMA_BANS, &[])?)
        })
    }

    /// Both ban lists, structured. Temp bans first, perma bans reversed so
    /// the most recent come first.
    pub fn get_bans(&self) -> AdminResult<Vec<BanEntry>> {
        let mut bans = self
            .get_temp_bans()?
            .iter()
            .map(|line| response::parse_ban_entry(line, BanKind::Temp))
            .collect::<AdminResult<Vec<_>>>()?;
        let mut perma = self
            .get_perma_bans()?
            .iter()
            .map(|line| response::parse_ban_entry(line, BanKind::Perma))
            .collect::<AdminResult<Vec<_>>>()?;
        perma.reverse();
        bans.extend(perma);
        Ok(bans)
    }

    /// Every ban held against one steam id.
    pub fn get_ban(&self, steam_id_64: &str) -> AdminResult<Vec<BanEntry>> {
        Ok(self
            .get_bans()?
            .into_iter()
            .filter(|ban| ban.steam_id_64 == steam_id_64)
            .collect())
    }

    /// Pardons require the verbatim ban log line.
    pub fn do_remove_temp_ban(&self, ban_log: &str) -> AdminResult<()> {
        self.mutate(rules::REMOVE_TEMP_BAN, || {
            self.execute_ok(commands::PARDON_TEMP_BAN, &[ban_log])
        })
    }

    pub fn do_remove_perma_ban(&self, ban_log: &str) -> AdminResult<()> {
        self.mutate(rules::REMOVE_PERMA_BAN, || {
            self.execute_ok(commands::PARDON_PERMA_BAN, &[ban_log])
        })
    }

    /// Lifts every ban held against the steam id, temp and perma alike.
    pub fn do_unban(&self, steam_id_64: &str) -> AdminResult<()> {
        for ban in self.get_ban(steam_id_64)? {
            match ban.kind {
                BanKind::Temp => self.do_remove_temp_ban(&ban.raw)?,
                BanKind::Perma => self.do_remove_perma_ban(&ban.raw)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MockCommandChannel;
    use crate::config::AdminConfig;

    const TEMP: &str = "1 : nickname \"a\" banned for 2 hours on 2020.12.03-12.40.08 for \"tk\" by admin \"mod\"";
    const PERMA_OLD: &str = "2 : banned on 2019.01.01-00.00.00";
    const PERMA_NEW: &str = "3 : banned on 2021.01.01-00.00.00";

    fn admin(channel: MockCommandChannel) -> Admin {
        Admin::new(Arc::new(channel), AdminConfig::default())
    }

    fn with_ban_lists() -> MockCommandChannel {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_TEMP_BANS)
            .returning(|_, _| Ok(format!("1\t{TEMP}")));
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_PERMA_BANS)
            .returning(|_, _| Ok(format!("2\t{PERMA_OLD}\t{PERMA_NEW}")));
        channel
    }

    #[test]
    fn merged_bans_put_recent_perma_first() {
        let bans = admin(with_ban_lists()).get_bans().unwrap();
        assert_eq!(bans.len(), 3);
        assert_eq!(bans[0].kind, BanKind::Temp);
        assert_eq!(bans[1].raw, PERMA_NEW);
        assert_eq!(bans[2].raw, PERMA_OLD);
    }

    #[test]
    fn get_ban_filters_by_steam_id() {
        let bans = admin(with_ban_lists()).get_ban("2").unwrap();
        assert_eq!(bans.len(), 1);
        assert_eq!(bans[0].raw, PERMA_OLD);
    }

    #[test]
    fn unban_dispatches_on_ban_kind() {
        let mut channel = with_ban_lists();
        channel
            .expect_execute()
            .withf(|cmd, args| cmd == commands::PARDON_TEMP_BAN && args == [TEMP])
            .times(1)
            .returning(|_, _| Ok("SUCCESS".to_owned()));
        admin(channel).do_unban("1").unwrap();
    }

    #[test]
    fn pardon_refreshes_the_matching_list_only() {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_TEMP_BANS)
            .times(2)
            .returning(|_, _| Ok(format!("1\t{TEMP}")));
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::GET_PERMA_BANS)
            .times(1)
            .returning(|_, _| Ok("0".to_owned()));
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::PARDON_TEMP_BAN)
            .times(1)
            .returning(|_, _| Ok("SUCCESS".to_owned()));

        let admin = admin(channel);
        admin.get_temp_bans().unwrap();
        admin.get_perma_bans().unwrap();
        admin.do_remove_temp_ban(TEMP).unwrap();
        admin.get_temp_bans().unwrap();
        admin.get_perma_bans().unwrap();
    }
}
