//! Welcome and broadcast message handling.
//!
//! The server never echoes these texts back, so the last written value is
//! kept in the external store (with an expiry from the config) and, when
//! the store is unreachable, in an in-memory copy on the facade.

use super::Admin;
use crate::channel::commands;
use crate::error::AdminResult;
use crate::store::KeyValueStore;

const WELCOME_KEY: &str = "WELCOME_MESSAGE";
const BROADCAST_KEY: &str = "BROADCAST_MESSAGE";

impl Admin {
    /// Last stored welcome message, if any.
    pub fn get_welcome_message(&self) -> Option<String> {
        self.stored_message(WELCOME_KEY, &self.last_welcome)
    }

    /// Pushes a new welcome message and returns the previous one.
    pub fn set_welcome_message(&self, message: &str) -> AdminResult<Option<String>> {
        let previous = self.swap_message(
            WELCOME_KEY,
            &self.last_welcome,
            message,
            self.config.welcome_message_expiry_secs,
        );
        self.execute(commands::SET_WELCOME_MESSAGE, &[message])?;
        Ok(previous)
    }

    /// Last stored broadcast message, if any.
    pub fn get_broadcast_message(&self) -> Option<String> {
        self.stored_message(BROADCAST_KEY, &self.last_broadcast)
    }

    /// Pushes a broadcast and returns the previous message.
    pub fn set_broadcast(&self, message: &str) -> AdminResult<Option<String>> {
        let previous = self.swap_message(
            BROADCAST_KEY,
            &self.last_broadcast,
            message,
            self.config.broadcast_message_expiry_secs,
        );
        self.execute(commands::BROADCAST, &[message])?;
        Ok(previous)
    }

    fn stored_message(
        &self,
        key: &str,
        fallback: &parking_lot::Mutex<Option<String>>,
    ) -> Option<String> {
        if let Some(store) = &self.store {
            match store.get(key) {
                Ok(message) => return message,
                Err(err) => {
                    tracing::warn!(key, %err, "message store unavailable, using in-memory copy");
                }
            }
        }
        fallback.lock().clone()
    }

    /// Stores the new text and hands back the old one. Store failures are
    /// logged, not surfaced: losing message history must not block the
    /// actual server command.
    fn swap_message(
        &self,
        key: &str,
        fallback: &parking_lot::Mutex<Option<String>>,
        message: &str,
        expiry_secs: u64,
    ) -> Option<String> {
        let mut in_memory = fallback.lock();
        let from_store = match &self.store {
            Some(store) => match store_swap(store.as_ref(), key, message, expiry_secs) {
                Ok(previous) => Some(previous),
                Err(err) => {
                    tracing::warn!(key, %err, "message store unavailable, keeping in-memory copy only");
                    None
                }
            },
            None => None,
        };
        let in_memory_previous = in_memory.replace(message.to_owned());
        from_store.unwrap_or(in_memory_previous)
    }
}

fn store_swap(
    store: &dyn KeyValueStore,
    key: &str,
    message: &str,
    expiry_secs: u64,
) -> Result<Option<String>, crate::store::StoreError> {
    let previous = store.get_and_set(key, message)?;
    store.set_expiry(key, expiry_secs)?;
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::channel::MockCommandChannel;
    use crate::config::AdminConfig;
    use crate::store::{MockKeyValueStore, StoreError};

    fn welcome_channel() -> MockCommandChannel {
        let mut channel = MockCommandChannel::new();
        channel
            .expect_execute()
            .withf(|cmd, _| cmd == commands::SET_WELCOME_MESSAGE)
            .returning(|_, _| Ok("SUCCESS".to_owned()));
        channel
    }

    #[test]
    fn welcome_round_trips_through_the_store() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get_and_set()
            .withf(|key, value| key == WELCOME_KEY && value == "hello")
            .returning(|_, _| Ok(Some("old".to_owned())));
        store
            .expect_set_expiry()
            .withf(|key, secs| key == WELCOME_KEY && *secs == 7 * 24 * 3600)
            .returning(|_, _| Ok(()));
        store
            .expect_get()
            .returning(|_| Ok(Some("hello".to_owned())));

        let admin = Admin::new(Arc::new(welcome_channel()), AdminConfig::default())
            .with_store(Arc::new(store));
        let previous = admin.set_welcome_message("hello").unwrap();
        assert_eq!(previous.as_deref(), Some("old"));
        assert_eq!(admin.get_welcome_message().as_deref(), Some("hello"));
    }

    #[test]
    fn store_failure_falls_back_to_the_in_memory_copy() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get_and_set()
            .returning(|_, _| Err(StoreError::Unavailable("down".to_owned())));
        store
            .expect_get()
            .returning(|_| Err(StoreError::Unavailable("down".to_owned())));

        let admin = Admin::new(Arc::new(welcome_channel()), AdminConfig::default())
            .with_store(Arc::new(store));
        admin.set_welcome_message("first").unwrap();
        let previous = admin.set_welcome_message("second").unwrap();
        assert_eq!(previous.as_deref(), Some("first"));
        assert_eq!(admin.get_welcome_message().as_deref(), Some("second"));
    }

    #[test]
    fn works_without_any_store() {
        let admin = Admin::new(Arc::new(welcome_channel()), AdminConfig::default());
        assert_eq!(admin.get_welcome_message(), None);
        admin.set_welcome_message("hi").unwrap();
        assert_eq!(admin.get_welcome_message().as_deref(), Some("hi"));
    }
}
