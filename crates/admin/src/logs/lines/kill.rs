use crate::logs::lines::{extract_err, parse_actor, ExtractError, LineFields, LineGrammar};
use crate::logs::model::Action;

/// `KILL: <killer>(<side>/<id>) -> <victim>(<side>/<id>) with <weapon>`
/// and the `TEAM KILL:` variant.
pub struct KillGrammar;

impl LineGrammar for KillGrammar {
    fn matches(&self, rest: &str) -> bool {
        rest.starts_with("KILL") || rest.starts_with("TEAM KILL")
    }

    fn extract(&self, rest: &str) -> Result<LineFields, ExtractError> {
        let (keyword, content) = rest
            .split_once(": ")
            .ok_or_else(|| extract_err("kill line without ': ' separator"))?;
        let action = match keyword {
            "KILL" => Action::Kill,
            "TEAM KILL" => Action::TeamKill,
            other => return Err(extract_err(format!("unexpected keyword {other:?}"))),
        };

        // The killer block is everything before the first " -> " whose left
        // side parses as an actor, so arrows inside player names don't split.
        let mut parsed = None;
        for (idx, _) in content.match_indices(" -> ") {
            if let Some(actor) = parse_actor(&content[..idx]) {
                parsed = Some((actor, &content[idx + 4..]));
                break;
            }
        }
        let ((killer, _, killer_id), right) =
            parsed.ok_or_else(|| extract_err("kill line without a killer block"))?;

        // Rightmost " with " whose left side is a complete actor block; this
        // keeps both " with " in victim names and in weapon names intact.
        let mut victim_split = None;
        for (idx, _) in right.rmatch_indices(" with ") {
            if let Some(actor) = parse_actor(&right[..idx]) {
                victim_split = Some((actor, &right[idx + 6..]));
                break;
            }
        }
        let ((victim, _, victim_id), weapon) =
            victim_split.ok_or_else(|| extract_err("kill line without a victim block"))?;

        let mut fields = LineFields::new(action, content);
        fields.player = Some(killer);
        fields.steam_id_64_1 = Some(killer_id);
        fields.player2 = Some(victim);
        fields.steam_id_64_2 = Some(victim_id);
        fields.weapon = Some(weapon.to_string());
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kill_extracts_both_actors_and_weapon() {
        let fields = KillGrammar
            .extract("KILL: Alice(Allies/111) -> Bob(Axis/222) with M1 Garand")
            .unwrap();
        assert_eq!(fields.action, Action::Kill);
        assert_eq!(fields.player.as_deref(), Some("Alice"));
        assert_eq!(fields.steam_id_64_1.as_deref(), Some("111"));
        assert_eq!(fields.player2.as_deref(), Some("Bob"));
        assert_eq!(fields.steam_id_64_2.as_deref(), Some("222"));
        assert_eq!(fields.weapon.as_deref(), Some("M1 Garand"));
        assert_eq!(fields.message, "Alice(Allies/111) -> Bob(Axis/222) with M1 Garand");
    }

    #[test]
    fn team_kill_variant() {
        let fields = KillGrammar
            .extract("TEAM KILL: Karl(Axis/333) -> Hans(Axis/444) with MP40")
            .unwrap();
        assert_eq!(fields.action, Action::TeamKill);
        assert_eq!(fields.player.as_deref(), Some("Karl"));
        assert_eq!(fields.player2.as_deref(), Some("Hans"));
    }

    #[test]
    fn arrow_inside_killer_name_does_not_split_early() {
        let fields = KillGrammar
            .extract("KILL: a -> b(Allies/1) -> victim(Axis/2) with Satchel")
            .unwrap();
        assert_eq!(fields.player.as_deref(), Some("a -> b"));
        assert_eq!(fields.player2.as_deref(), Some("victim"));
    }

    #[test]
    fn weapon_split_is_rightmost() {
        // "with" inside the victim name must not truncate the weapon.
        let fields = KillGrammar
            .extract("KILL: a(Allies/1) -> man with plan(Axis/2) with M1903 with scope")
            .unwrap();
        assert_eq!(fields.weapon.as_deref(), Some("M1903 with scope"));
        assert_eq!(fields.player2.as_deref(), Some("man with plan"));
    }

    #[test]
    fn missing_victim_is_an_extraction_failure() {
        assert!(KillGrammar.extract("KILL: Alice(Allies/111) with Luger").is_err());
    }
}
