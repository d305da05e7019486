use anyhow::{Context, Result};
use serde::Deserialize;

use crate::http_client::http_client;
use crate::records::{RawFixtureStat, RawPlayer, RawPositionKind, RawTeam};

const FPL_API_BASE: &str = "https://fantasy.premierleague.com/api";

/// The bootstrap-static collections the pipeline consumes.
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    pub players: Vec<RawPlayer>,
    pub teams: Vec<RawTeam>,
    pub positions: Vec<RawPositionKind>,
}

/// External capability: the chronologically ordered gameweek history for one
/// player id. Implemented over HTTP below and over a plain map in tests.
pub trait HistorySource {
    fn fixture_history(&self, player_id: u32) -> Result<Vec<RawFixtureStat>>;
}

impl HistorySource for std::collections::HashMap<u32, Vec<RawFixtureStat>> {
    fn fixture_history(&self, player_id: u32) -> Result<Vec<RawFixtureStat>> {
        Ok(self.get(&player_id).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct BootstrapEnvelope {
    #[serde(default)]
    elements: Vec<RawPlayer>,
    #[serde(default)]
    teams: Vec<RawTeam>,
    #[serde(default)]
    element_types: Vec<RawPositionKind>,
}

#[derive(Debug, Deserialize)]
struct ElementSummaryEnvelope {
    #[serde(default)]
    history: Vec<RawFixtureStat>,
}

pub fn parse_bootstrap_json(raw: &str) -> Result<Bootstrap> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Bootstrap::default());
    }
    let envelope: BootstrapEnvelope =
        serde_json::from_str(trimmed).context("invalid bootstrap-static json")?;
    Ok(Bootstrap {
        players: envelope.elements,
        teams: envelope.teams,
        positions: envelope.element_types,
    })
}

pub fn parse_element_summary_json(raw: &str) -> Result<Vec<RawFixtureStat>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let envelope: ElementSummaryEnvelope =
        serde_json::from_str(trimmed).context("invalid element-summary json")?;
    Ok(envelope.history)
}

/// Live FPL API client. All methods block; call from a worker, not a UI loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct FplApi;

impl FplApi {
    pub fn fetch_bootstrap(&self) -> Result<Bootstrap> {
        let body = get_text(&format!("{FPL_API_BASE}/bootstrap-static/"))
            .context("bootstrap-static request failed")?;
        parse_bootstrap_json(&body)
    }
}

impl HistorySource for FplApi {
    fn fixture_history(&self, player_id: u32) -> Result<Vec<RawFixtureStat>> {
        let body = get_text(&format!("{FPL_API_BASE}/element-summary/{player_id}/"))
            .with_context(|| format!("element-summary request failed for player {player_id}"))?;
        parse_element_summary_json(&body)
    }
}

fn get_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    Ok(body)
}
