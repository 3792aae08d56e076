//! One micro-grammar per line family, dispatched through a priority-ordered
//! table. Each grammar owns a cheap prefix test and a field extractor; the
//! families are independent; there is no shared state machine.

use thiserror::Error;

use crate::logs::model::{Action, Side};

mod camera;
mod chat;
mod connect;
mod kill;
mod match_event;
mod teamkick;
mod teamswitch;
mod vote;

pub use camera::CameraGrammar;
pub use chat::ChatGrammar;
pub use connect::ConnectGrammar;
pub use kill::KillGrammar;
pub use match_event::MatchGrammar;
pub use teamkick::TeamKickGrammar;
pub use teamswitch::TeamSwitchGrammar;
pub use vote::VoteGrammar;

/// A required sub-field failed to extract; the line is dropped and recorded
/// as a diagnostic, never surfaced to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ExtractError(pub String);

pub(crate) fn extract_err(msg: impl Into<String>) -> ExtractError {
    ExtractError(msg.into())
}

/// Typed fields pulled out of the line body (everything after the time field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFields {
    pub action: Action,
    pub player: Option<String>,
    pub steam_id_64_1: Option<String>,
    pub player2: Option<String>,
    pub steam_id_64_2: Option<String>,
    pub weapon: Option<String>,
    pub message: String,
    pub sub_content: Option<String>,
}

impl LineFields {
    pub(crate) fn new(action: Action, message: impl Into<String>) -> Self {
        Self {
            action,
            player: None,
            steam_id_64_1: None,
            player2: None,
            steam_id_64_2: None,
            weapon: None,
            message: message.into(),
            sub_content: None,
        }
    }
}

pub trait LineGrammar: Send + Sync {
    /// Cheap prefix/keyword test deciding whether this grammar owns the line.
    fn matches(&self, rest: &str) -> bool;

    /// Extract typed fields from the line body.
    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError>;
}

// Order matters: checked first to last, first match wins.
static GRAMMARS: [&dyn LineGrammar; 8] = [
    &ConnectGrammar,
    &KillGrammar,
    &ChatGrammar,
    &VoteGrammar,
    &CameraGrammar,
    &TeamSwitchGrammar,
    &TeamKickGrammar,
    &MatchGrammar,
];

/// Find the grammar owning this line body, if any.
pub fn dispatch(rest: &str) -> Option<&'static dyn LineGrammar> {
    GRAMMARS.iter().copied().find(|g| g.matches(rest))
}

/// Parse an actor block of the shape `name(Allies/76561198..)`.
///
/// The side/id group is anchored at the last opening parenthesis, so names
/// containing parentheses stay intact.
pub(crate) fn parse_actor(block: &str) -> Option<(String, Side, String)> {
    let body = block.strip_suffix(')')?;
    let open = body.rfind('(')?;
    let name = body[..open].to_string();
    let (side, id) = body[open + 1..].split_once('/')?;
    let side = Side::from_token(side)?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((name, side, id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_block_roundtrip() {
        let (name, side, id) = parse_actor("T17 Scott(Allies/76561198012345678)").unwrap();
        assert_eq!(name, "T17 Scott");
        assert_eq!(side, Side::Allies);
        assert_eq!(id, "76561198012345678");
    }

    #[test]
    fn actor_block_with_parens_in_name() {
        let (name, side, id) = parse_actor("xX(war)Xx(Axis/111)").unwrap();
        assert_eq!(name, "xX(war)Xx");
        assert_eq!(side, Side::Axis);
        assert_eq!(id, "111");
    }

    #[test]
    fn actor_block_rejects_bad_side_or_id() {
        assert!(parse_actor("name(Neutral/123)").is_none());
        assert!(parse_actor("name(Allies/12a)").is_none());
        assert!(parse_actor("name(Allies/)").is_none());
        assert!(parse_actor("no block at all").is_none());
    }

    #[test]
    fn dispatch_priority_is_first_match() {
        // "KILL: .." and "TEAM KILL: .." both route to the kill grammar.
        assert!(dispatch("KILL: a(Allies/1) -> b(Axis/2) with M1 GARAND").is_some());
        assert!(dispatch("something else entirely").is_none());
    }
}
