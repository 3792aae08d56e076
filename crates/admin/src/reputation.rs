//! Third-party reputation lookups for a player identity.
//!
//! Lookup failures are absent data, never an error: implementations return
//! `None` when the upstream service is unavailable or knows nothing.

#[cfg_attr(test, mockall::automock)]
pub trait ReputationLookup: Send + Sync {
    /// ISO country code for the account, when known.
    fn country_code(&self, steam_id_64: &str) -> Option<String>;

    /// Whether the account has a recorded ban history elsewhere.
    fn has_bans(&self, steam_id_64: &str) -> Option<bool>;
}
