use serde::{Deserialize, Serialize};

/// The four FPL position categories (`element_types` in the API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    pub fn from_short_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "GKP" | "GK" => Some(Position::Goalkeeper),
            "DEF" => Some(Position::Defender),
            "MID" => Some(Position::Midfielder),
            "FWD" => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

/// One row of `elements` from bootstrap-static. Extra API fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlayer {
    pub id: u32,
    pub first_name: String,
    pub second_name: String,
    /// Team id, resolved against `RawTeam.id`.
    pub team: u32,
    /// Position id, resolved against `RawPositionKind.id`.
    pub element_type: u32,
    /// Price in tenths of a million; the canonical record divides by 10.
    #[serde(default)]
    pub now_cost: u32,
}

/// One row of `teams` from bootstrap-static.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTeam {
    pub id: u32,
    pub name: String,
    pub strength_attack_home: u32,
    pub strength_attack_away: u32,
    pub strength_defence_home: u32,
    pub strength_defence_away: u32,
}

/// One row of `element_types` from bootstrap-static.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPositionKind {
    pub id: u32,
    pub singular_name_short: String,
}

/// One gameweek row of `history` from element-summary, as the API sends it.
/// The expected-stats family and the ICT columns arrive as text-encoded
/// decimals; coercion happens when the `FixtureRecord` is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFixtureStat {
    /// Player id (the API calls it `element`).
    pub element: u32,
    pub fixture: u32,
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub kickoff_time: Option<String>,
    pub opponent_team: u32,
    /// A missing flag is an error condition, never a default side.
    #[serde(default)]
    pub was_home: Option<bool>,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub goals_scored: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub clean_sheets: u32,
    #[serde(default)]
    pub goals_conceded: u32,
    #[serde(default)]
    pub own_goals: u32,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub bonus: u32,
    #[serde(default)]
    pub bps: i32,
    #[serde(default)]
    pub influence: String,
    #[serde(default)]
    pub creativity: String,
    #[serde(default)]
    pub threat: String,
    #[serde(default)]
    pub ict_index: String,
    #[serde(default)]
    pub expected_goals: String,
    #[serde(default)]
    pub expected_assists: String,
    #[serde(default)]
    pub expected_goal_involvements: String,
    #[serde(default)]
    pub expected_goals_conceded: String,
}

/// Canonical player with team and position already resolved.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    pub full_name: String,
    pub team_id: u32,
    pub team_name: String,
    pub position: Position,
    /// True price in millions (API value / 10).
    pub price: f64,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub strength_attack_home: f64,
    pub strength_attack_away: f64,
    pub strength_defence_home: f64,
    pub strength_defence_away: f64,
}

/// Fully numeric per-fixture record with opponent strength attached.
/// Immutable once built; later stages only derive from it.
#[derive(Debug, Clone)]
pub struct FixtureRecord {
    pub player_id: u32,
    pub fixture_id: u32,
    pub round: u32,
    /// Parsed kickoff, unix seconds. Used to enforce chronological order.
    pub kickoff_utc: Option<i64>,
    pub opponent_id: u32,
    pub was_home: bool,
    pub total_points: f64,
    pub minutes: f64,
    pub goals_scored: f64,
    pub assists: f64,
    pub clean_sheets: f64,
    pub goals_conceded: f64,
    pub own_goals: f64,
    pub saves: f64,
    pub bonus: f64,
    pub bps: f64,
    pub influence: f64,
    pub creativity: f64,
    pub threat: f64,
    pub ict_index: f64,
    pub expected_goals: f64,
    pub expected_assists: f64,
    pub expected_goal_involvements: f64,
    pub expected_goals_conceded: f64,
    pub opp_att_strength: f64,
    pub opp_def_strength: f64,
}

pub const FEATURE_NAMES: [&str; 20] = [
    "mean_points",
    "mean_minutes",
    "mean_goals_scored",
    "mean_assists",
    "mean_clean_sheets",
    "mean_goals_conceded",
    "mean_own_goals",
    "mean_saves",
    "mean_bonus",
    "mean_bps",
    "mean_influence",
    "mean_creativity",
    "mean_threat",
    "mean_ict_index",
    "mean_xg",
    "mean_xa",
    "mean_xgi",
    "mean_xgc",
    "mean_opp_att_strength",
    "mean_opp_def_strength",
];

/// Per-player rolling summary over the trailing window.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    pub player_id: u32,
    pub full_name: String,
    pub team_name: String,
    pub position: Position,
    /// How many fixtures the means were taken over: `min(window, history)`.
    pub fixtures_used: usize,
    pub mean_points: f64,
    pub mean_minutes: f64,
    pub mean_goals_scored: f64,
    pub mean_assists: f64,
    pub mean_clean_sheets: f64,
    pub mean_goals_conceded: f64,
    pub mean_own_goals: f64,
    pub mean_saves: f64,
    pub mean_bonus: f64,
    pub mean_bps: f64,
    pub mean_influence: f64,
    pub mean_creativity: f64,
    pub mean_threat: f64,
    pub mean_ict_index: f64,
    pub mean_xg: f64,
    pub mean_xa: f64,
    pub mean_xgi: f64,
    pub mean_xgc: f64,
    pub mean_opp_att_strength: f64,
    pub mean_opp_def_strength: f64,
}

impl FeatureVector {
    /// Look a feature up by its published name (see [`FEATURE_NAMES`]).
    pub fn feature(&self, name: &str) -> Option<f64> {
        let v = match name {
            "mean_points" => self.mean_points,
            "mean_minutes" => self.mean_minutes,
            "mean_goals_scored" => self.mean_goals_scored,
            "mean_assists" => self.mean_assists,
            "mean_clean_sheets" => self.mean_clean_sheets,
            "mean_goals_conceded" => self.mean_goals_conceded,
            "mean_own_goals" => self.mean_own_goals,
            "mean_saves" => self.mean_saves,
            "mean_bonus" => self.mean_bonus,
            "mean_bps" => self.mean_bps,
            "mean_influence" => self.mean_influence,
            "mean_creativity" => self.mean_creativity,
            "mean_threat" => self.mean_threat,
            "mean_ict_index" => self.mean_ict_index,
            "mean_xg" => self.mean_xg,
            "mean_xa" => self.mean_xa,
            "mean_xgi" => self.mean_xgi,
            "mean_xgc" => self.mean_xgc,
            "mean_opp_att_strength" => self.mean_opp_att_strength,
            "mean_opp_def_strength" => self.mean_opp_def_strength,
            _ => return None,
        };
        Some(v)
    }
}

/// One ranking-pass result; lives only as long as the pass.
#[derive(Debug, Clone)]
pub struct ScoredPlayer {
    pub player_id: u32,
    pub full_name: String,
    pub team_name: String,
    pub position: Position,
    pub score: f64,
}

/// Row of the predicted top-N table handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedRow {
    pub name: String,
    pub team: String,
    pub position: Position,
    pub predicted: f64,
}

/// Row of the per-position top-scorer table.
#[derive(Debug, Clone, PartialEq)]
pub struct TopScorerRow {
    pub player_id: u32,
    pub name: String,
    pub position: Position,
    pub total_points: f64,
}
