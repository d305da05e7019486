use std::cmp::Ordering;

use anyhow::Result;
use log::warn;

use crate::error::Diagnostic;
use crate::records::{FeatureVector, Position, ScoredPlayer};

pub const DEFAULT_TOP_N: usize = 10;

/// The external scoring capability: a pure function from a fixed-shape
/// numeric feature subset to a real-valued score. How the function was
/// produced (fitted model, rule table, remote service) is not the core's
/// concern; implementations are injected at the boundary.
pub trait ScoringModel: Sync {
    /// The named feature subset this model consumes, in argument order.
    fn feature_names(&self) -> &[String];

    fn score(&self, features: &[f64]) -> Result<f64>;
}

/// Score every feature vector of one position and keep the top `top_n`.
///
/// Output is sorted strictly descending by score, ties broken by ascending
/// player id, and truncated to `min(top_n, eligible)`. A scoring failure or
/// a non-finite score excludes that player with a diagnostic; it never
/// aborts the rest of the position group.
pub fn rank_position(
    vectors: &[FeatureVector],
    position: Position,
    model: &dyn ScoringModel,
    top_n: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<ScoredPlayer> {
    let names = model.feature_names();
    let mut scored = Vec::new();

    'vectors: for fv in vectors.iter().filter(|fv| fv.position == position) {
        let mut subset = Vec::with_capacity(names.len());
        for name in names {
            let Some(value) = fv.feature(name) else {
                push_failure(
                    diagnostics,
                    fv.player_id,
                    format!("model requests unknown feature {name:?}"),
                );
                continue 'vectors;
            };
            subset.push(value);
        }

        match model.score(&subset) {
            Ok(score) if score.is_finite() => scored.push(ScoredPlayer {
                player_id: fv.player_id,
                full_name: fv.full_name.clone(),
                team_name: fv.team_name.clone(),
                position: fv.position,
                score,
            }),
            Ok(score) => push_failure(
                diagnostics,
                fv.player_id,
                format!("model returned non-finite score {score}"),
            ),
            Err(err) => push_failure(diagnostics, fv.player_id, format!("{err:#}")),
        }
    }

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.player_id.cmp(&b.player_id))
    });
    scored.truncate(top_n);
    scored
}

fn push_failure(diagnostics: &mut Vec<Diagnostic>, player_id: u32, detail: String) {
    let diag = Diagnostic::ScoringFailure { player_id, detail };
    warn!("{diag}");
    diagnostics.push(diag);
}
