pub mod api_fetch;
pub mod error;
pub mod features;
pub mod http_client;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod records;
pub mod strength;
pub mod top_scorers;

pub use error::{Diagnostic, PipelineError};
pub use pipeline::{PipelineConfig, RunOutput, Snapshot};
pub use rank::ScoringModel;
pub use records::{FeatureVector, Player, Position, PredictedRow, ScoredPlayer, Team, TopScorerRow};
