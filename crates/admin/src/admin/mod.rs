//! Admin facade: every game-server operation behind one struct.
//!
//! `Admin` owns the command channel, the TTL cache and the optional
//! reputation/store seams. Domain operations are split across sibling
//! files: `status`, `players`, `vips`, `bans`, `rotation`, `settings`,
//! `messages`, `logs`. Each cached read is registered in
//! [`invalidation::ReadSlot`](crate::invalidation::ReadSlot); each mutation
//! goes through [`Admin::mutate`] so dependent reads are purged only after
//! the server acknowledged the change.

mod bans;
mod logs;
mod messages;
mod players;
mod rotation;
pub mod settings;
mod status;
mod vips;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheKey, CacheValue, TtlCache};
use crate::channel::CommandChannel;
use crate::config::AdminConfig;
use crate::error::AdminResult;
use crate::invalidation::ReadSlot;
use crate::reputation::ReputationLookup;
use crate::store::KeyValueStore;

pub use players::{Player, PlayerInfo};
pub use settings::{ServerSettings, Setting, SettingValue};
pub use status::Status;

pub struct Admin {
    channel: Arc<dyn CommandChannel>,
    cache: TtlCache,
    config: AdminConfig,
    reputation: Option<Arc<dyn ReputationLookup>>,
    store: Option<Arc<dyn KeyValueStore>>,
    // In-memory copies served when the message store is unreachable.
    last_welcome: Mutex<Option<String>>,
    last_broadcast: Mutex<Option<String>>,
}

impl Admin {
    pub fn new(channel: Arc<dyn CommandChannel>, config: AdminConfig) -> Self {
        Self {
            channel,
            cache: TtlCache::new(),
            config,
            reputation: None,
            store: None,
            last_welcome: Mutex::new(None),
            last_broadcast: Mutex::new(None),
        }
    }

    /// Enables reputation enrichment of player info.
    pub fn with_reputation(mut self, reputation: Arc<dyn ReputationLookup>) -> Self {
        self.reputation = Some(reputation);
        self
    }

    /// Enables the external message store for welcome/broadcast text.
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub(crate) fn execute(&self, command: &str, args: &[&str]) -> AdminResult<String> {
        Ok(self.channel.execute(command, args)?)
    }

    /// Remote call that must come back as the literal success marker.
    pub(crate) fn execute_ok(&self, command: &str, args: &[&str]) -> AdminResult<()> {
        let reply = self.execute(command, args)?;
        if reply == "SUCCESS" {
            Ok(())
        } else {
            Err(crate::channel::ChannelError::CommandFailed(reply).into())
        }
    }

    /// Cached read for an argument-less operation.
    pub(crate) fn cached<T, F>(
        &self,
        slot: ReadSlot,
        cache_empty: bool,
        compute: F,
    ) -> AdminResult<Arc<T>>
    where
        T: CacheValue,
        F: FnOnce() -> AdminResult<T>,
    {
        self.cache
            .get_or_compute(slot.key(), slot.ttl(), cache_empty, compute)
    }

    /// Cached read keyed by operation arguments.
    pub(crate) fn cached_with_args<T, F>(
        &self,
        slot: ReadSlot,
        args: &[&str],
        cache_empty: bool,
        compute: F,
    ) -> AdminResult<Arc<T>>
    where
        T: CacheValue,
        F: FnOnce() -> AdminResult<T>,
    {
        let key = CacheKey::with_args(slot.op(), args);
        self.cache
            .get_or_compute(key, slot.ttl(), cache_empty, compute)
    }

    /// Runs a mutation and purges dependent cached reads once it succeeded.
    /// A failed mutation leaves the cache untouched.
    pub(crate) fn mutate<T, F>(&self, slots: &[ReadSlot], mutation: F) -> AdminResult<T>
    where
        F: FnOnce() -> AdminResult<T>,
    {
        let out = mutation()?;
        for slot in slots {
            self.cache.invalidate_op(slot.op());
        }
        Ok(out)
    }
}
