use crate::logs::lines::{extract_err, ExtractError, LineFields, LineGrammar};
use crate::logs::model::Action;

/// `TEAMSWITCH <player> (<from> > <to>)`.
pub struct TeamSwitchGrammar;

impl LineGrammar for TeamSwitchGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.get(..10)
            .is_some_and(|head| head.eq_ignore_ascii_case("TEAMSWITCH"))
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        let body = rest
            .strip_prefix("TEAMSWITCH ")
            .and_then(|b| b.strip_suffix(')'))
            .ok_or_else(|| extract_err("teamswitch line without a transition"))?;
        let open = body
            .rfind(" (")
            .ok_or_else(|| extract_err("teamswitch line without a transition"))?;
        let transition = &body[open + 2..];
        if !transition.contains(" > ") {
            return Err(extract_err("teamswitch transition without ' > '"));
        }

        let mut fields = LineFields::new(Action::TeamSwitch, rest);
        fields.player = Some(body[..open].to_string());
        fields.sub_content = Some(transition.to_string());
        Ok(fields)
    }
}
