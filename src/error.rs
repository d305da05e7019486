use thiserror::Error;

/// Structural failures. Any of these aborts the whole run: a partially
/// joined dataset would corrupt every downstream aggregate without signal.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{entity} {id} references unknown {referenced} {referenced_id}")]
    UnresolvedReference {
        entity: &'static str,
        id: u32,
        referenced: &'static str,
        referenced_id: u32,
    },
    #[error("position {id} has unrecognized label {label:?}")]
    UnknownPositionLabel { id: u32, label: String },
    #[error("empty input collection: {0}")]
    EmptyInput(&'static str),
}

/// Per-record / per-player conditions. These are isolated and collected;
/// the run continues and the output tables stay best-effort complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("player {player_id} fixture {fixture_id}: home/away flag is indeterminate, record excluded")]
    IndeterminateHomeAway { player_id: u32, fixture_id: u32 },
    #[error("player {player_id} fixture {fixture_id}: {field} = {raw:?} is not numeric, record excluded")]
    NumericCoercion {
        player_id: u32,
        fixture_id: u32,
        field: &'static str,
        raw: String,
    },
    #[error("player {player_id}: no usable fixture history, skipped")]
    InsufficientHistory { player_id: u32 },
    #[error("player {player_id}: scoring failed ({detail}), excluded from ranking")]
    ScoringFailure { player_id: u32, detail: String },
}

impl Diagnostic {
    pub fn player_id(&self) -> u32 {
        match self {
            Diagnostic::IndeterminateHomeAway { player_id, .. }
            | Diagnostic::NumericCoercion { player_id, .. }
            | Diagnostic::InsufficientHistory { player_id }
            | Diagnostic::ScoringFailure { player_id, .. } => *player_id,
        }
    }

    /// Skips are expected (e.g. a player yet to feature); failures are not.
    pub fn is_skip(&self) -> bool {
        matches!(self, Diagnostic::InsufficientHistory { .. })
    }
}
