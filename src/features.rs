use std::collections::{BTreeMap, HashMap};

use log::debug;
use rayon::prelude::*;

use crate::error::Diagnostic;
use crate::records::{FeatureVector, FixtureRecord, Player};

pub const DEFAULT_WINDOW: usize = 5;

/// Collapse each player's fixture history into one [`FeatureVector`]: the
/// arithmetic mean of every tracked stat over the trailing `window` fixtures.
///
/// Players with fewer than `window` fixtures use all they have; there is no
/// padding. Players with zero usable fixtures are skipped with an
/// [`Diagnostic::InsufficientHistory`] entry. The computation is independent
/// per player and runs as a parallel map; output is sorted by player id so
/// re-runs on the same snapshot are byte-identical.
pub fn build_feature_vectors(
    players: &BTreeMap<u32, Player>,
    records_by_player: &HashMap<u32, Vec<FixtureRecord>>,
    window: usize,
) -> (Vec<FeatureVector>, Vec<Diagnostic>) {
    let window = window.max(1);

    let results: Vec<Result<FeatureVector, Diagnostic>> = players
        .par_iter()
        .map(|(id, player)| {
            let records = records_by_player.get(id).map(Vec::as_slice).unwrap_or(&[]);
            player_features(player, records, window)
                .ok_or(Diagnostic::InsufficientHistory { player_id: *id })
        })
        .collect();

    let mut vectors = Vec::new();
    let mut diagnostics = Vec::new();
    for result in results {
        match result {
            Ok(v) => vectors.push(v),
            Err(d) => {
                debug!("{d}");
                diagnostics.push(d);
            }
        }
    }
    // par_iter over a BTreeMap already yields key order; keep it explicit.
    vectors.sort_by_key(|v| v.player_id);
    (vectors, diagnostics)
}

fn player_features(player: &Player, records: &[FixtureRecord], window: usize) -> Option<FeatureVector> {
    if records.is_empty() {
        return None;
    }

    let mut ordered: Vec<&FixtureRecord> = records.iter().collect();
    // The builder depends on oldest-to-newest order; enforce it instead of
    // trusting the source. Round is always present, so it leads; kickoff
    // orders double gameweeks within a round. A record with an unparseable
    // kickoff keeps its round position instead of jumping to the end.
    ordered.sort_by_key(|r| (r.round, r.kickoff_utc.unwrap_or(i64::MIN)));

    let used = window.min(ordered.len());
    let tail = &ordered[ordered.len() - used..];
    let n = used as f64;
    let mean = |pick: fn(&FixtureRecord) -> f64| tail.iter().map(|r| pick(r)).sum::<f64>() / n;

    Some(FeatureVector {
        player_id: player.id,
        full_name: player.full_name.clone(),
        team_name: player.team_name.clone(),
        position: player.position,
        fixtures_used: used,
        mean_points: mean(|r| r.total_points),
        mean_minutes: mean(|r| r.minutes),
        mean_goals_scored: mean(|r| r.goals_scored),
        mean_assists: mean(|r| r.assists),
        mean_clean_sheets: mean(|r| r.clean_sheets),
        mean_goals_conceded: mean(|r| r.goals_conceded),
        mean_own_goals: mean(|r| r.own_goals),
        mean_saves: mean(|r| r.saves),
        mean_bonus: mean(|r| r.bonus),
        mean_bps: mean(|r| r.bps),
        mean_influence: mean(|r| r.influence),
        mean_creativity: mean(|r| r.creativity),
        mean_threat: mean(|r| r.threat),
        mean_ict_index: mean(|r| r.ict_index),
        mean_xg: mean(|r| r.expected_goals),
        mean_xa: mean(|r| r.expected_assists),
        mean_xgi: mean(|r| r.expected_goal_involvements),
        mean_xgc: mean(|r| r.expected_goals_conceded),
        mean_opp_att_strength: mean(|r| r.opp_att_strength),
        mean_opp_def_strength: mean(|r| r.opp_def_strength),
    })
}
