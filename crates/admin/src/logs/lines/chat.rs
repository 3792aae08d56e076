use crate::logs::lines::{extract_err, parse_actor, ExtractError, LineFields, LineGrammar};
use crate::logs::model::{Action, ChatScope};

/// `CHAT[Team][<name>(<side>/<id>)]: <message>`. The scope segment
/// (`Team`/`Unit`) is optional; scope-less lines classify as `CHAT[<side>]`.
pub struct ChatGrammar;

impl LineGrammar for ChatGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.starts_with("CHAT")
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        let body = rest
            .strip_prefix("CHAT")
            .and_then(|b| b.strip_prefix('['))
            .ok_or_else(|| extract_err("chat line without bracketed segments"))?;

        let (scope, body) = if let Some(b) = body.strip_prefix("Team][") {
            (Some(ChatScope::Team), b)
        } else if let Some(b) = body.strip_prefix("Unit][") {
            (Some(ChatScope::Unit), b)
        } else {
            (None, body)
        };

        // body: <name>(<side>/<id>)]: <message>. The split anchors on the
        // rightmost "]: " preceded by a valid actor block, so "]: " inside
        // player names survives.
        let mut parsed = None;
        for (idx, _) in body.rmatch_indices("]: ") {
            if let Some(actor) = parse_actor(&body[..idx]) {
                parsed = Some((actor, &body[idx + 3..]));
                break;
            }
        }
        let ((player, side, steam_id), message) =
            parsed.ok_or_else(|| extract_err("chat line without an actor block"))?;

        let mut fields = LineFields::new(
            Action::Chat { side, scope },
            format!("{player}: {message} ({steam_id})"),
        );
        fields.sub_content = Some(message.to_string());
        fields.player = Some(player);
        fields.steam_id_64_1 = Some(steam_id);
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::model::Side;

    #[test]
    fn team_chat() {
        let fields = ChatGrammar
            .extract("CHAT[Team][jonzie(Axis/76561198034392093)]: back up in 5")
            .unwrap();
        assert_eq!(
            fields.action,
            Action::Chat {
                side: Side::Axis,
                scope: Some(ChatScope::Team)
            }
        );
        assert_eq!(fields.player.as_deref(), Some("jonzie"));
        assert_eq!(fields.steam_id_64_1.as_deref(), Some("76561198034392093"));
        assert_eq!(fields.sub_content.as_deref(), Some("back up in 5"));
        assert_eq!(fields.message, "jonzie: back up in 5 (76561198034392093)");
    }

    #[test]
    fn unit_chat() {
        let fields = ChatGrammar
            .extract("CHAT[Unit][Karl(Allies/123)]: on me")
            .unwrap();
        assert_eq!(
            fields.action,
            Action::Chat {
                side: Side::Allies,
                scope: Some(ChatScope::Unit)
            }
        );
    }

    #[test]
    fn scopeless_chat_classifies_by_side_only() {
        let fields = ChatGrammar.extract("CHAT[Karl(Axis/123)]: hello").unwrap();
        assert_eq!(
            fields.action,
            Action::Chat {
                side: Side::Axis,
                scope: None
            }
        );
        assert_eq!(fields.action.to_string(), "CHAT[Axis]");
    }

    #[test]
    fn bracket_colon_in_message_keeps_the_actor_anchor() {
        let fields = ChatGrammar
            .extract("CHAT[Team][a(Allies/1)]: see [map]: north")
            .unwrap();
        assert_eq!(fields.player.as_deref(), Some("a"));
        assert_eq!(fields.sub_content.as_deref(), Some("see [map]: north"));
    }

    #[test]
    fn garbled_chat_is_an_extraction_failure() {
        assert!(ChatGrammar.extract("CHAT nonsense").is_err());
        assert!(ChatGrammar.extract("CHAT[Team][no actor]: hi").is_err());
    }
}
