use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::rank::ScoringModel;

/// Env var pointing at a scoring artifact on disk; overrides the bundled one.
pub const MODEL_PATH_ENV: &str = "FPL_FORM_MODEL_PATH";

/// A fitted linear scorer, serialized as JSON: standardize each feature with
/// the stored mean/std, multiply by its coefficient, add the intercept. This
/// is the concrete stand-in for "an externally trained model"; anything else
/// implementing [`ScoringModel`] can be injected instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearScoringArtifact {
    pub version: u32,
    /// Position short label this model was fitted for, e.g. "MID".
    pub position: String,
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub feature_means: Vec<f64>,
    #[serde(default)]
    pub feature_stds: Vec<f64>,
    pub coeffs: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

#[derive(Debug, Clone)]
pub struct LinearScoringModel {
    artifact: LinearScoringArtifact,
}

impl LinearScoringModel {
    pub fn from_artifact(artifact: LinearScoringArtifact) -> Result<Self> {
        if artifact.feature_names.is_empty() {
            bail!("scoring artifact declares no features");
        }
        if artifact.coeffs.len() != artifact.feature_names.len() {
            bail!(
                "scoring artifact has {} coeffs for {} features",
                artifact.coeffs.len(),
                artifact.feature_names.len()
            );
        }
        Ok(Self { artifact })
    }

    pub fn position_label(&self) -> &str {
        &self.artifact.position
    }

    fn standardized(&self, idx: usize, x: f64) -> f64 {
        let mean = self.artifact.feature_means.get(idx).copied().unwrap_or(0.0);
        let std = self
            .artifact
            .feature_stds
            .get(idx)
            .copied()
            .unwrap_or(1.0)
            .max(1e-6);
        (x - mean) / std
    }
}

impl ScoringModel for LinearScoringModel {
    fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    fn score(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.artifact.coeffs.len() {
            bail!(
                "expected {} features, got {}",
                self.artifact.coeffs.len(),
                features.len()
            );
        }
        let mut sum = self.artifact.intercept;
        for (idx, (c, x)) in self.artifact.coeffs.iter().zip(features).enumerate() {
            sum += c * self.standardized(idx, *x);
        }
        Ok(sum)
    }
}

/// Load the midfield scoring model: an env-var path override first, then the
/// bundled artifact.
pub fn load_midfield_model() -> Result<LinearScoringModel> {
    if let Some(path) = model_path_override() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read scoring artifact {}", path.display()))?;
        let artifact = serde_json::from_str::<LinearScoringArtifact>(&raw)
            .with_context(|| format!("parse scoring artifact {}", path.display()))?;
        return LinearScoringModel::from_artifact(artifact);
    }

    let raw = include_str!("../assets/mid_points_model_v1.json");
    let artifact = serde_json::from_str::<LinearScoringArtifact>(raw)
        .context("parse bundled mid_points_model_v1 artifact")?;
    LinearScoringModel::from_artifact(artifact)
}

fn model_path_override() -> Option<PathBuf> {
    env::var(MODEL_PATH_ENV)
        .ok()
        .map(|s| PathBuf::from(s.trim()))
        .filter(|p| !p.as_os_str().is_empty())
}
