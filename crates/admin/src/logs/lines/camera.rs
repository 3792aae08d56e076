use crate::logs::lines::{extract_err, ExtractError, LineFields, LineGrammar};
use crate::logs::model::Action;

/// Admin-camera lines: `Player [<name> (<id>)] Entered Admin Camera`. The
/// `Player` keyword arrives in mixed case.
pub struct CameraGrammar;

impl LineGrammar for CameraGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.get(..6)
            .is_some_and(|head| head.eq_ignore_ascii_case("PLAYER"))
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        let (_, content) = rest
            .split_once(' ')
            .ok_or_else(|| extract_err("camera line without a payload"))?;

        // content: [<name> (<id>)] <free text>; the id group anchors on the
        // rightmost " (digits)]" so parentheses in names survive.
        let body = content
            .strip_prefix('[')
            .ok_or_else(|| extract_err("camera line without a bracketed observer"))?;
        let mut observer = None;
        for (idx, _) in body.rmatch_indices(")]") {
            let head = &body[..idx];
            if let Some(space) = head.rfind(" (") {
                let digits = &head[space + 2..];
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                    observer = Some((head[..space].to_string(), digits.to_string()));
                    break;
                }
            }
        }
        let (player, steam_id) =
            observer.ok_or_else(|| extract_err("camera line without an observer block"))?;

        let mut fields = LineFields::new(Action::Camera, content);
        fields.sub_content = content.rfind(']').map(|i| content[i + 1..].to_string());
        fields.player = Some(player);
        fields.steam_id_64_1 = Some(steam_id);
        Ok(fields)
    }
}
