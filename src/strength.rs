use std::collections::HashMap;

use chrono::DateTime;

use crate::error::{Diagnostic, PipelineError};
use crate::records::{FixtureRecord, RawFixtureStat, Team};

/// Join opponent strength onto one player's raw gameweek history and coerce
/// the text-encoded stats, producing fully numeric [`FixtureRecord`]s.
///
/// `was_home` is recorded from the subject player's perspective, so the
/// attached strength must reflect the opponent's role in the same fixture:
/// subject away => opponent was at home => opponent's *home* strengths;
/// subject home => opponent's *away* strengths.
///
/// An opponent id missing from the team collection aborts the run. A missing
/// home/away flag or an uncoercible stat excludes just that fixture, with a
/// diagnostic; it is never defaulted.
pub fn attach_opponent_strength(
    player_id: u32,
    history: &[RawFixtureStat],
    teams: &HashMap<u32, Team>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<FixtureRecord>, PipelineError> {
    let mut out = Vec::with_capacity(history.len());
    for raw in history {
        let Some(opponent) = teams.get(&raw.opponent_team) else {
            return Err(PipelineError::UnresolvedReference {
                entity: "fixture",
                id: raw.fixture,
                referenced: "team",
                referenced_id: raw.opponent_team,
            });
        };

        let Some(was_home) = raw.was_home else {
            diagnostics.push(Diagnostic::IndeterminateHomeAway {
                player_id,
                fixture_id: raw.fixture,
            });
            continue;
        };

        let (opp_att_strength, opp_def_strength) = if was_home {
            (opponent.strength_attack_away, opponent.strength_defence_away)
        } else {
            (opponent.strength_attack_home, opponent.strength_defence_home)
        };

        match coerce_record(player_id, raw, was_home, opp_att_strength, opp_def_strength) {
            Ok(record) => out.push(record),
            Err(diag) => diagnostics.push(diag),
        }
    }
    Ok(out)
}

fn coerce_record(
    player_id: u32,
    raw: &RawFixtureStat,
    was_home: bool,
    opp_att_strength: f64,
    opp_def_strength: f64,
) -> Result<FixtureRecord, Diagnostic> {
    let coerce = |field: &'static str, value: &str| {
        parse_decimal(value).ok_or_else(|| Diagnostic::NumericCoercion {
            player_id,
            fixture_id: raw.fixture,
            field,
            raw: value.to_string(),
        })
    };

    Ok(FixtureRecord {
        player_id,
        fixture_id: raw.fixture,
        round: raw.round,
        kickoff_utc: raw.kickoff_time.as_deref().and_then(parse_kickoff),
        opponent_id: raw.opponent_team,
        was_home,
        total_points: f64::from(raw.total_points),
        minutes: f64::from(raw.minutes),
        goals_scored: f64::from(raw.goals_scored),
        assists: f64::from(raw.assists),
        clean_sheets: f64::from(raw.clean_sheets),
        goals_conceded: f64::from(raw.goals_conceded),
        own_goals: f64::from(raw.own_goals),
        saves: f64::from(raw.saves),
        bonus: f64::from(raw.bonus),
        bps: f64::from(raw.bps),
        influence: coerce("influence", &raw.influence)?,
        creativity: coerce("creativity", &raw.creativity)?,
        threat: coerce("threat", &raw.threat)?,
        ict_index: coerce("ict_index", &raw.ict_index)?,
        expected_goals: coerce("expected_goals", &raw.expected_goals)?,
        expected_assists: coerce("expected_assists", &raw.expected_assists)?,
        expected_goal_involvements: coerce(
            "expected_goal_involvements",
            &raw.expected_goal_involvements,
        )?,
        expected_goals_conceded: coerce("expected_goals_conceded", &raw.expected_goals_conceded)?,
        opp_att_strength,
        opp_def_strength,
    })
}

/// Parse a text-encoded decimal stat ("34.2"). Empty or non-numeric text is
/// a coercion failure, not zero.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_kickoff(raw: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.timestamp())
}
