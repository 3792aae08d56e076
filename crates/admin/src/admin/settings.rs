//! Named server settings and the profanity filter.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::Admin;
use crate::channel::{commands, ChannelError};
use crate::error::{AdminError, AdminResult};
use crate::invalidation::{rules, setting_rule, ReadSlot};
use crate::response;

/// The nine tunable settings the server console exposes by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    TeamSwitchCooldown,
    AutobalanceThreshold,
    IdleAutokickTime,
    MaxPingAutokick,
    QueueLength,
    VipSlotsNum,
    AutobalanceEnabled,
    VotekickEnabled,
    VotekickThreshold,
}

impl Setting {
    pub const ALL: [Setting; 9] = [
        Setting::TeamSwitchCooldown,
        Setting::AutobalanceThreshold,
        Setting::IdleAutokickTime,
        Setting::MaxPingAutokick,
        Setting::QueueLength,
        Setting::VipSlotsNum,
        Setting::AutobalanceEnabled,
        Setting::VotekickEnabled,
        Setting::VotekickThreshold,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Setting::TeamSwitchCooldown => "team_switch_cooldown",
            Setting::AutobalanceThreshold => "autobalance_threshold",
            Setting::IdleAutokickTime => "idle_autokick_time",
            Setting::MaxPingAutokick => "max_ping_autokick",
            Setting::QueueLength => "queue_length",
            Setting::VipSlotsNum => "vip_slots_num",
            Setting::AutobalanceEnabled => "autobalance_enabled",
            Setting::VotekickEnabled => "votekick_enabled",
            Setting::VotekickThreshold => "votekick_threshold",
        }
    }

    /// Cache-key namespace of this setting's getter.
    pub const fn getter_op(&self) -> &'static str {
        match self {
            Setting::TeamSwitchCooldown => "get_team_switch_cooldown",
            Setting::AutobalanceThreshold => "get_autobalance_threshold",
            Setting::IdleAutokickTime => "get_idle_autokick_time",
            Setting::MaxPingAutokick => "get_max_ping_autokick",
            Setting::QueueLength => "get_queue_length",
            Setting::VipSlotsNum => "get_vip_slots_num",
            Setting::AutobalanceEnabled => "get_autobalance_enabled",
            Setting::VotekickEnabled => "get_votekick_enabled",
            Setting::VotekickThreshold => "get_votekick_threshold",
        }
    }

    const fn getter_cmd(&self) -> &'static str {
        match self {
            Setting::TeamSwitchCooldown => "get teamswitchcooldown",
            Setting::AutobalanceThreshold => "get autobalancethreshold",
            Setting::IdleAutokickTime => "get idletime",
            Setting::MaxPingAutokick => "get highping",
            Setting::QueueLength => "get maxqueuedplayers",
            Setting::VipSlotsNum => "get numvipslots",
            Setting::AutobalanceEnabled => "get autobalanceenabled",
            Setting::VotekickEnabled => "get votekickenabled",
            Setting::VotekickThreshold => "get votekickthreshold",
        }
    }

    const fn setter_cmd(&self) -> &'static str {
        match self {
            Setting::TeamSwitchCooldown => "setteamswitchcooldown",
            Setting::AutobalanceThreshold => "setautobalancethreshold",
            Setting::IdleAutokickTime => "setkickidletime",
            Setting::MaxPingAutokick => "sethighping",
            Setting::QueueLength => "setmaxqueuedplayers",
            Setting::VipSlotsNum => "setnumvipslots",
            Setting::AutobalanceEnabled => "setautobalanceenabled",
            Setting::VotekickEnabled => "setvotekickenabled",
            Setting::VotekickThreshold => "setvotekickthreshold",
        }
    }
}

/// Typed value for [`Admin::save_setting`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Int(u32),
    Bool(bool),
    Text(String),
}

/// Snapshot of all nine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub team_switch_cooldown: u32,
    pub autobalance_threshold: u32,
    pub idle_autokick_time: u32,
    pub max_ping_autokick: u32,
    pub queue_length: u32,
    pub vip_slots_num: u32,
    pub autobalance_enabled: bool,
    pub votekick_enabled: bool,
    pub votekick_threshold: String,
}

impl Admin {
    fn setting_int(&self, setting: Setting) -> AdminResult<Arc<u32>> {
        self.cached(ReadSlot::Setting(setting), true, || {
            let raw = self.execute(setting.getter_cmd(), &[])?;
            raw.trim()
                .parse()
                .map_err(|_| AdminError::malformed(setting.name(), raw))
        })
    }

    fn setting_bool(&self, setting: Setting) -> AdminResult<Arc<bool>> {
        self.cached(ReadSlot::Setting(setting), true, || {
            Ok(self.execute(setting.getter_cmd(), &[])?.trim() == "on")
        })
    }

    fn save_int_setting(&self, setting: Setting, value: u32) -> AdminResult<()> {
        self.mutate(&setting_rule(setting), || {
            self.execute(setting.setter_cmd(), &[value.to_string().as_str()])?;
            Ok(())
        })
    }

    fn save_bool_setting(&self, setting: Setting, value: bool) -> AdminResult<()> {
        self.mutate(&setting_rule(setting), || {
            let flag = if value { "on" } else { "off" };
            self.execute(setting.setter_cmd(), &[flag])?;
            Ok(())
        })
    }

    pub fn get_team_switch_cooldown(&self) -> AdminResult<Arc<u32>> {
        self.setting_int(Setting::TeamSwitchCooldown)
    }

    pub fn set_team_switch_cooldown(&self, minutes: u32) -> AdminResult<()> {
        self.save_int_setting(Setting::TeamSwitchCooldown, minutes)
    }

    pub fn get_autobalance_threshold(&self) -> AdminResult<Arc<u32>> {
        self.setting_int(Setting::AutobalanceThreshold)
    }

    pub fn set_autobalance_threshold(&self, max_diff: u32) -> AdminResult<()> {
        self.save_int_setting(Setting::AutobalanceThreshold, max_diff)
    }

    pub fn get_idle_autokick_time(&self) -> AdminResult<Arc<u32>> {
        self.setting_int(Setting::IdleAutokickTime)
    }

    pub fn set_idle_autokick_time(&self, minutes: u32) -> AdminResult<()> {
        self.save_int_setting(Setting::IdleAutokickTime, minutes)
    }

    pub fn get_max_ping_autokick(&self) -> AdminResult<Arc<u32>> {
        self.setting_int(Setting::MaxPingAutokick)
    }

    pub fn set_max_ping_autokick(&self, max_ms: u32) -> AdminResult<()> {
        self.save_int_setting(Setting::MaxPingAutokick, max_ms)
    }

    pub fn get_queue_length(&self) -> AdminResult<Arc<u32>> {
        self.setting_int(Setting::QueueLength)
    }

    pub fn set_queue_length(&self, num: u32) -> AdminResult<()> {
        self.save_int_setting(Setting::QueueLength, num)
    }

    pub fn get_vip_slots_num(&self) -> AdminResult<Arc<u32>> {
        self.setting_int(Setting::VipSlotsNum)
    }

    pub fn set_vip_slots_num(&self, num: u32) -> AdminResult<()> {
        self.save_int_setting(Setting::VipSlotsNum, num)
    }

    pub fn get_autobalance_enabled(&self) -> AdminResult<Arc<bool>> {
        self.setting_bool(Setting::AutobalanceEnabled)
    }

    pub fn set_autobalance_enabled(&self, enabled: bool) -> AdminResult<()> {
        self.save_bool_setting(Setting::AutobalanceEnabled, enabled)
    }

    pub fn get_votekick_enabled(&self) -> AdminResult<Arc<bool>> {
        self.setting_bool(Setting::VotekickEnabled)
    }

    pub fn set_votekick_enabled(&self, enabled: bool) -> AdminResult<()> {
        self.save_bool_setting(Setting::VotekickEnabled, enabled)
    }

    /// Threshold pairs in the console's own `players,votes` text form.
    pub fn get_votekick_threshold(&self) -> AdminResult<Arc<String>> {
        self.cached(ReadSlot::Setting(Setting::VotekickThreshold), true, || {
            Ok(self
                .execute(Setting::VotekickThreshold.getter_cmd(), &[])?
                .trim()
                .to_owned())
        })
    }

    /// The console acknowledges a bad threshold with an `error`-prefixed
    /// reply instead of a failure, so the reply text is checked here.
    pub fn set_votekick_threshold(&self, threshold_pairs: &str) -> AdminResult<()> {
        self.mutate(&setting_rule(Setting::VotekickThreshold), || {
            let reply = self.execute(
                Setting::VotekickThreshold.setter_cmd(),
                &[threshold_pairs],
            )?;
            if reply.to_ascii_lowercase().starts_with("error") {
                tracing::error!(reply, "votekick threshold rejected");
                return Err(ChannelError::CommandFailed(reply).into());
            }
            Ok(())
        })
    }

    pub fn do_reset_votekick_threshold(&self) -> AdminResult<()> {
        self.mutate(&setting_rule(Setting::VotekickThreshold), || {
            self.execute(commands::RESET_VOTEKICK_THRESHOLD, &[])?;
            Ok(())
        })
    }

    /// All nine settings in one snapshot.
    pub fn get_server_settings(&self) -> AdminResult<ServerSettings> {
        Ok(ServerSettings {
            team_switch_cooldown: *self.get_team_switch_cooldown()?,
            autobalance_threshold: *self.get_autobalance_threshold()?,
            idle_autokick_time: *self.get_idle_autokick_time()?,
            max_ping_autokick: *self.get_max_ping_autokick()?,
            queue_length: *self.get_queue_length()?,
            vip_slots_num: *self.get_vip_slots_num()?,
            autobalance_enabled: *self.get_autobalance_enabled()?,
            votekick_enabled: *self.get_votekick_enabled()?,
            votekick_threshold: self.get_votekick_threshold()?.as_str().to_owned(),
        })
    }

    /// Dispatches a typed value to the matching setter. A value of the
    /// wrong type for the named setting is a precondition failure.
    pub fn save_setting(&self, setting: Setting, value: SettingValue) -> AdminResult<()> {
        match (setting, value) {
            (Setting::TeamSwitchCooldown, SettingValue::Int(v)) => {
                self.set_team_switch_cooldown(v)
            }
            (Setting::AutobalanceThreshold, SettingValue::Int(v)) => {
                self.set_autobalance_threshold(v)
            }
            (Setting::IdleAutokickTime, SettingValue::Int(v)) => self.set_idle_autokick_time(v),
            (Setting::MaxPingAutokick, SettingValue::Int(v)) => self.set_max_ping_autokick(v),
            (Setting::QueueLength, SettingValue::Int(v)) => self.set_queue_length(v),
            (Setting::VipSlotsNum, SettingValue::Int(v)) => self.set_vip_slots_num(v),
            (Setting::AutobalanceEnabled, SettingValue::Bool(v)) => {
                self.set_autobalance_enabled(v)
            }
            (Setting::VotekickEnabled, SettingValue::Bool(v)) => self.set_votekick_enabled(v),
            (Setting::VotekickThreshold, SettingValue::Text(v)) => {
                self.set_votekick_threshold(&v)
            }
            (setting, value) => Err(AdminError::Precondition(format!(
                "{value:?} is not a valid value for {}",
                setting.name()
            ))),
        }
    }

    /// Words the chat filter censors.
    pub fn get_profanities(&self) -> AdminResult<Arc<Vec<String>>> {
        self.cached(ReadSlot::Profanities, true, || {
            response::parse_list(&self.execute(commands::GET_PROFANITIES, &[])?)
        })
    }

    pub fn do_ban_profanities(&self, words: &[String]) -> AdminResult<()> {
        self.mutate(rules::PROFANITY_CHANGE, || {
            self.execute(commands::BAN_PROFANITY, &[words.join(",").as_str()])?;
            Ok(())
        })
    }

    pub fn do_unban_profanities(&self, words: &[String]) -> AdminResult<()> {
        self.mutate(rules::PROFANITY_CHANGE, || {
            self.execute(commands::UNBAN_PROFANITY, &[words.join(",").as_str()])?;
            Ok(())
        })
    }

    /// Converges the censored word list to exactly `words` by diffing
    /// against the live list.
    pub fn set_profanities(&self, words: &[String]) -> AdminResult<()> {
        let current = self.get_profanities()?;
        let current: HashSet<&String> = current.iter().collect();
        let desired: HashSet<&String> = words.iter().collect();

        let removed: Vec<String> = current
            .difference(&desired)
            .map(|w| (*w).clone())
            .collect();
        let added: Vec<String> = desired
            .difference(&current)
            .map(|w| (*w).clone())
            .collect();

        if !removed.is_empty() {
            self.do_unban_profanities(&removed)?;
        }
        if !added.is_empty() {
            self.do_ban_profanities(&added)?;
        }
        Ok(())
    }
}
