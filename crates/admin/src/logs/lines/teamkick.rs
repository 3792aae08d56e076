use crate::logs::lines::{extract_err, ExtractError, LineFields, LineGrammar};
use crate::logs::model::Action;

const KICKED_SUFFIX: &str = " FOR TEAM KILLING!]";

/// Automatic team-kill discipline:
/// `KICK: [<player>] has been kicked. [KICKED FOR TEAM KILLING!]` or the
/// `BANNED FOR 2 HOURS` variant.
pub struct TeamKickGrammar;

impl LineGrammar for TeamKickGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.get(..4)
            .is_some_and(|head| head.eq_ignore_ascii_case("KICK"))
            && rest.contains("FOR TEAM KILLING")
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        let body = rest
            .strip_prefix("KICK: [")
            .ok_or_else(|| extract_err("team-kick line without a player"))?;
        let split = body
            .rfind("] has been kicked. [")
            .ok_or_else(|| extract_err("team-kick line without the kick notice"))?;
        let player = &body[..split];
        let tail = &body[split + "] has been kicked. [".len()..];
        let end = tail
            .find(KICKED_SUFFIX)
            .ok_or_else(|| extract_err("team-kick line without the closing tag"))?;
        let action = match &tail[..end] {
            "KICKED" => Action::TkKicked,
            "BANNED FOR 2 HOURS" => Action::TkBanned,
            other => return Err(extract_err(format!("unknown team-kick tag {other:?}"))),
        };

        let mut fields = LineFields::new(action, rest);
        fields.player = Some(player.to_string());
        fields.sub_content = Some(format!("has been kicked. [{}{}", &tail[..end], KICKED_SUFFIX));
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tk_kick() {
        let fields = TeamKickGrammar
            .extract("KICK: [Johnny] has been kicked. [KICKED FOR TEAM KILLING!]")
            .unwrap();
        assert_eq!(fields.action, Action::TkKicked);
        assert_eq!(fields.player.as_deref(), Some("Johnny"));
        assert_eq!(
            fields.sub_content.as_deref(),
            Some("has been kicked. [KICKED FOR TEAM KILLING!]")
        );
    }

    #[test]
    fn tk_ban() {
        let fields = TeamKickGrammar
            .extract("KICK: [[UMC] Milk] has been kicked. [BANNED FOR 2 HOURS FOR TEAM KILLING!]")
            .unwrap();
        assert_eq!(fields.action, Action::TkBanned);
        assert_eq!(fields.player.as_deref(), Some("[UMC] Milk"));
    }

    #[test]
    fn ordinary_kick_is_not_matched() {
        assert!(!TeamKickGrammar.matches("KICK: [Johnny] has been kicked. [Being rude]"));
    }

    #[test]
    fn unknown_tag_is_an_extraction_failure() {
        assert!(TeamKickGrammar
            .extract("KICK: [Johnny] has been kicked. [WARNED FOR TEAM KILLING!]")
            .is_err());
    }
}
