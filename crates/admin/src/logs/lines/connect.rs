use crate::logs::lines::{extract_err, ExtractError, LineFields, LineGrammar};
use crate::logs::model::Action;

/// `CONNECTED <name>` / `DISCONNECTED <name>`.
///
/// The remainder after the keyword has no further structure; the whole of it
/// is the player name.
pub struct ConnectGrammar;

impl LineGrammar for ConnectGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.starts_with("DISCONNECTED") || rest.starts_with("CONNECTED")
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        let (keyword, remainder) = rest
            .split_once(' ')
            .ok_or_else(|| extract_err("connection line without a player name"))?;
        let action = match keyword {
            "CONNECTED" => Action::Connected,
            "DISCONNECTED" => Action::Disconnected,
            other => return Err(extract_err(format!("unexpected keyword {other:?}"))),
        };
        let mut fields = LineFields::new(action, remainder);
        fields.player = Some(remainder.to_string());
        Ok(fields)
    }
}
