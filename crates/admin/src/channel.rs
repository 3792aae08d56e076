//! Remote command seam, the one boundary to the game server's RCON socket.
//!
//! Command framing, reconnection and wire-level timeouts live behind this
//! trait; the admin layer never interprets transport errors beyond the
//! variants of [`ChannelError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    /// The server replied, but with a non-success result.
    #[error("remote command failed: {0}")]
    CommandFailed(String),

    /// The remote call timed out. The log-fetch path treats this as an
    /// empty reply (the server hangs when no events match the window);
    /// every other caller surfaces it as a transient failure.
    #[error("remote call timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),
}

/// Synchronous request/response channel to the game server.
///
/// Calls may block on network I/O; callers are expected to invoke admin
/// operations from their own worker threads. Each logical caller owns its
/// own sequence of remote calls; there is no fan-out inside this layer.
#[cfg_attr(test, mockall::automock)]
pub trait CommandChannel: Send + Sync {
    // The inner lifetime is named so the mock derive can expand over the
    // nested reference.
    fn execute<'a>(&self, command: &str, args: &[&'a str]) -> Result<String, ChannelError>;
}

/// Wire command vocabulary understood by the server console.
pub mod commands {
    pub const GET_NAME: &str = "get name";
    pub const GET_SLOTS: &str = "get slots";
    pub const GET_MAP: &str = "get map";
    pub const GET_MAPS: &str = "get mapsforrotation";
    pub const SET_MAP: &str = "map";
    pub const ROT_LIST: &str = "rotlist";
    pub const ROT_ADD: &str = "rotadd";
    pub const ROT_DEL: &str = "rotdel";
    pub const GET_PLAYERS: &str = "get players";
    pub const GET_PLAYER_IDS: &str = "get playerids";
    pub const PLAYER_INFO: &str = "playerinfo";
    pub const GET_ADMIN_IDS: &str = "get adminids";
    pub const ADMIN_ADD: &str = "adminadd";
    pub const ADMIN_DEL: &str = "admindel";
    pub const GET_VIP_IDS: &str = "get vipids";
    pub const VIP_ADD: &str = "vipadd";
    pub const VIP_DEL: &str = "vipdel";
    pub const KICK: &str = "kick";
    pub const TEMP_BAN: &str = "tempban";
    pub const PERMA_BAN: &str = "permaban";
    pub const PARDON_TEMP_BAN: &str = "pardontempban";
    pub const PARDON_PERMA_BAN: &str = "pardonpermaban";
    pub const GET_TEMP_BANS: &str = "get tempbans";
    pub const GET_PERMA_BANS: &str = "get permabans";
    pub const SHOW_LOG: &str = "showlog";
    pub const GET_PROFANITIES: &str = "get profanity";
    pub const BAN_PROFANITY: &str = "banprofanity";
    pub const UNBAN_PROFANITY: &str = "unbanprofanity";
    pub const SET_WELCOME_MESSAGE: &str = "setwelcomemessage";
    pub const BROADCAST: &str = "broadcast";
    pub const RESET_VOTEKICK_THRESHOLD: &str = "resetvotekickthreshold";
}
