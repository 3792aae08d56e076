use crate::logs::lines::{extract_err, ExtractError, LineFields, LineGrammar};
use crate::logs::model::Action;

/// The vote family. Bracketed names are extracted greedily from the right so
/// clan tags containing brackets survive:
///
/// - `VOTE Player [<initiator>] Started a vote .. against [<target>]. VoteID: [N]`
/// - `VOTE Player [<voter>] voted ..`
/// - anything mentioning "completed"
/// - `VOTE Vote Kick {<target>} ..`
/// - any other `VOTE ..` line, as a bare vote event
pub struct VoteGrammar;

impl LineGrammar for VoteGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.starts_with("VOTE")
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        // Payload equals the text after the last "VOTE" keyword.
        let tail = rest.rsplit("VOTE").next().unwrap_or(rest).to_string();
        let lower = rest.to_lowercase();

        let mut fields = LineFields::new(Action::Vote, tail.clone());
        fields.sub_content = Some(tail);

        if rest.starts_with("VOTE Player") && lower.contains(" against ") {
            fields.action = Action::VoteStarted;
            let body = rest
                .strip_prefix("VOTE Player [")
                .ok_or_else(|| extract_err("vote-start line without initiator"))?;
            let against = body
                .rfind(" against [")
                .ok_or_else(|| extract_err("vote-start line without target"))?;
            let left = &body[..against];
            let close = left
                .rfind(']')
                .ok_or_else(|| extract_err("unterminated initiator name"))?;
            let right = &body[against + " against [".len()..];
            let vote_id = right
                .rfind("]. VoteID: [")
                .ok_or_else(|| extract_err("vote-start line without a vote id"))?;
            fields.player = Some(left[..close].to_string());
            fields.player2 = Some(right[..vote_id].to_string());
        } else if rest.starts_with("VOTE Player") && lower.contains("voted") {
            let body = rest
                .strip_prefix("VOTE Player [")
                .ok_or_else(|| extract_err("vote line without voter"))?;
            let close = body
                .rfind("] voted")
                .ok_or_else(|| extract_err("unterminated voter name"))?;
            fields.player = Some(body[..close].to_string());
        } else if lower.contains("completed") {
            fields.action = Action::VoteCompleted;
        } else if lower.contains("kick") {
            fields.action = Action::VoteCompleted;
            let body = rest
                .strip_prefix("VOTE Vote Kick {")
                .ok_or_else(|| extract_err("vote-kick line without target"))?;
            let close = body
                .rfind('}')
                .ok_or_else(|| extract_err("unterminated vote-kick target"))?;
            fields.player = Some(body[..close].to_string());
        }

        Ok(fields)
    }
}
