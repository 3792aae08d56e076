// Domain-driven module structure for the RCON admin layer.

// Core infrastructure
pub mod cache;
pub mod channel;
pub mod config;
pub mod error;

// External seams
pub mod reputation;
pub mod store;

// Domain modules
pub mod admin;
pub mod invalidation;
pub mod logs;
pub mod response;
pub mod rotation;
pub mod stats;

// Re-export commonly used types
pub use admin::{Admin, Player, PlayerInfo, ServerSettings, Setting, Status};
pub use channel::{ChannelError, CommandChannel};
pub use config::AdminConfig;
pub use error::{AdminError, AdminResult};
pub use logs::model::{Action, Event, LogBatch};
pub use rotation::{RotationOp, RotationPlan};
