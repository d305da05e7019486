use std::collections::HashMap;

use crate::error::{Diagnostic, PipelineError};
use crate::features::{self, DEFAULT_WINDOW};
use crate::rank::{self, DEFAULT_TOP_N, ScoringModel};
use crate::records::{
    FixtureRecord, Position, PredictedRow, RawFixtureStat, RawPlayer, RawPositionKind, RawTeam,
    TopScorerRow,
};
use crate::strength;
use crate::top_scorers::{self, DEFAULT_SCORERS_TOP_N};

#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    /// Trailing fixtures averaged per player.
    pub window: usize,
    /// Rows kept in the predicted table.
    pub rank_top_n: usize,
    /// Rows kept per position in the top-scorer table.
    pub scorers_top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            rank_top_n: DEFAULT_TOP_N,
            scorers_top_n: DEFAULT_SCORERS_TOP_N,
        }
    }
}

/// A complete, already-materialized input snapshot. Fetching is the caller's
/// concern; the pipeline itself does no I/O.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub players: Vec<RawPlayer>,
    pub teams: Vec<RawTeam>,
    pub positions: Vec<RawPositionKind>,
    /// Per-fixture history keyed by player id, oldest to newest. Ordering is
    /// re-checked downstream, not assumed.
    pub histories: HashMap<u32, Vec<RawFixtureStat>>,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Predicted top-N for the ranked position, descending by score.
    pub rankings: Vec<PredictedRow>,
    /// Top scorers per position over full history, concatenated.
    pub top_scorers: Vec<TopScorerRow>,
    /// Per-record/per-player conditions collected along the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// One batch pass over a snapshot: normalize, join strength, build rolling
/// features, rank `position` with `model`, and aggregate top scorers.
///
/// Per-record problems land in `diagnostics`; only structural problems
/// (unresolved references, empty inputs) return `Err`. Output ordering is
/// fully deterministic, so re-running on the same snapshot reproduces the
/// same tables byte for byte.
pub fn run(
    snapshot: &Snapshot,
    config: &PipelineConfig,
    position: Position,
    model: &dyn ScoringModel,
) -> Result<RunOutput, PipelineError> {
    if snapshot.histories.is_empty() {
        return Err(PipelineError::EmptyInput("fixture histories"));
    }
    let normalized =
        crate::normalize::normalize_entities(&snapshot.players, &snapshot.teams, &snapshot.positions)?;

    let mut diagnostics = Vec::new();
    let mut records_by_player: HashMap<u32, Vec<FixtureRecord>> =
        HashMap::with_capacity(normalized.players.len());
    for id in normalized.players.keys() {
        let history = snapshot.histories.get(id).map(Vec::as_slice).unwrap_or(&[]);
        let records =
            strength::attach_opponent_strength(*id, history, &normalized.teams, &mut diagnostics)?;
        records_by_player.insert(*id, records);
    }

    let (vectors, feature_diags) =
        features::build_feature_vectors(&normalized.players, &records_by_player, config.window);
    diagnostics.extend(feature_diags);

    let scored = rank::rank_position(&vectors, position, model, config.rank_top_n, &mut diagnostics);
    let rankings = scored
        .into_iter()
        .map(|s| PredictedRow {
            name: s.full_name,
            team: s.team_name,
            position: s.position,
            predicted: s.score,
        })
        .collect();

    // The aggregator reads the raw normalized history, not the strength
    // join's output: a fixture excluded above still counts its points here.
    let top_scorers = top_scorers::top_scorers_by_position(
        &normalized.players,
        &snapshot.histories,
        config.scorers_top_n,
    );

    Ok(RunOutput {
        rankings,
        top_scorers,
        diagnostics,
    })
}
