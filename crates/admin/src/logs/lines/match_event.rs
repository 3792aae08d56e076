use crate::logs::lines::{extract_err, ExtractError, LineFields, LineGrammar};
use crate::logs::model::Action;

/// Match lifecycle markers: `MATCH START <map/mode>` and
/// `MATCH ENDED <result text>`.
pub struct MatchGrammar;

impl LineGrammar for MatchGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.get(..11).is_some_and(|head| {
            head.eq_ignore_ascii_case("MATCH START") || head.eq_ignore_ascii_case("MATCH ENDED")
        })
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        let (action, payload) = if let Some(p) = rest.strip_prefix("MATCH START ") {
            (Action::MatchStart, p)
        } else if let Some(p) = rest.strip_prefix("MATCH ENDED ") {
            (Action::MatchEnded, p)
        } else {
            return Err(extract_err("match marker without a payload"));
        };

        let mut fields = LineFields::new(action, rest);
        fields.sub_content = Some(payload.to_string());
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_start_captures_map_text() {
        let fields = MatchGrammar
            .extract("MATCH START SAINTE-MÈRE-ÉGLISE Warfare")
            .unwrap();
        assert_eq!(fields.action, Action::MatchStart);
        assert_eq!(fields.sub_content.as_deref(), Some("SAINTE-MÈRE-ÉGLISE Warfare"));
    }

    #[test]
    fn match_ended_captures_result_text() {
        let fields = MatchGrammar
            .extract("MATCH ENDED `SAINTE-MÈRE-ÉGLISE Warfare` ALLIED (2 - 3) AXIS")
            .unwrap();
        assert_eq!(fields.action, Action::MatchEnded);
        assert_eq!(
            fields.sub_content.as_deref(),
            Some("`SAINTE-MÈRE-ÉGLISE Warfare` ALLIED (2 - 3) AXIS")
        );
        assert_eq!(fields.message, "MATCH ENDED `SAINTE-MÈRE-ÉGLISE Warfare` ALLIED (2 - 3) AXIS");
    }

    #[test]
    fn payloadless_marker_is_an_extraction_failure() {
        assert!(MatchGrammar.extract("MATCH START").is_err());
    }
}
