use std::collections::HashMap;

use anyhow::{Context, Result};
use log::warn;
use rayon::prelude::*;

use fpl_form::api_fetch::{FplApi, HistorySource};
use fpl_form::features::DEFAULT_WINDOW;
use fpl_form::rank::DEFAULT_TOP_N;
use fpl_form::records::{Position, RawFixtureStat};
use fpl_form::top_scorers::DEFAULT_SCORERS_TOP_N;
use fpl_form::{PipelineConfig, RunOutput, Snapshot, model, pipeline};

fn main() -> Result<()> {
    env_logger::init();

    let config = PipelineConfig {
        window: env_usize("FPL_FORM_WINDOW", DEFAULT_WINDOW),
        rank_top_n: env_usize("FPL_FORM_TOP_N", DEFAULT_TOP_N),
        scorers_top_n: env_usize("FPL_FORM_SCORERS_TOP_N", DEFAULT_SCORERS_TOP_N),
    };

    let api = FplApi;
    let bootstrap = api.fetch_bootstrap().context("fetch bootstrap-static")?;
    eprintln!(
        "fetched {} players, {} teams; pulling gameweek histories...",
        bootstrap.players.len(),
        bootstrap.teams.len()
    );

    let histories: HashMap<u32, Vec<RawFixtureStat>> = bootstrap
        .players
        .par_iter()
        .filter_map(|p| match api.fixture_history(p.id) {
            Ok(history) => Some((p.id, history)),
            Err(err) => {
                warn!("history fetch failed for player {}: {err:#}", p.id);
                None
            }
        })
        .collect();

    let snapshot = Snapshot {
        players: bootstrap.players,
        teams: bootstrap.teams,
        positions: bootstrap.positions,
        histories,
    };

    let mid_model = model::load_midfield_model().context("load midfield scoring model")?;
    let output = pipeline::run(&snapshot, &config, Position::Midfielder, &mid_model)?;

    print_tables(&output, &config);
    Ok(())
}

fn print_tables(output: &RunOutput, config: &PipelineConfig) {
    println!(
        "\nPredicted next-gameweek points, midfielders (last {} fixtures)\n",
        config.window
    );
    println!("{:<30} {:<18} {:<4} {:>9}", "name", "team", "pos", "predicted");
    for row in &output.rankings {
        println!(
            "{:<30} {:<18} {:<4} {:>9.2}",
            row.name,
            row.team,
            row.position.short_label(),
            row.predicted
        );
    }

    println!("\nTop {} scorers per position, full season\n", config.scorers_top_n);
    println!("{:<8} {:<30} {:<4} {:>6}", "id", "name", "pos", "points");
    for row in &output.top_scorers {
        println!(
            "{:<8} {:<30} {:<4} {:>6.0}",
            row.player_id,
            row.name,
            row.position.short_label(),
            row.total_points
        );
    }

    let (skips, failures): (Vec<_>, Vec<_>) =
        output.diagnostics.iter().partition(|d| d.is_skip());
    eprintln!(
        "\n{} players skipped (no history), {} records/players excluded:",
        skips.len(),
        failures.len()
    );
    for diag in failures {
        eprintln!("  {diag}");
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
        .max(1)
}
