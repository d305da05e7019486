use std::collections::{BTreeMap, HashMap};
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use fpl_form::features::build_feature_vectors;
use fpl_form::model::{LinearScoringArtifact, LinearScoringModel};
use fpl_form::rank::rank_position;
use fpl_form::records::{FixtureRecord, Player, Position};

const PLAYERS: u32 = 600;
const FIXTURES_PER_PLAYER: u32 = 12;

fn synthetic_player(id: u32) -> Player {
    let position = match id % 4 {
        0 => Position::Goalkeeper,
        1 => Position::Defender,
        2 => Position::Midfielder,
        _ => Position::Forward,
    };
    Player {
        id,
        full_name: format!("Player {id}"),
        team_id: 1 + id % 20,
        team_name: format!("Team {}", 1 + id % 20),
        position,
        price: 4.0 + f64::from(id % 80) / 10.0,
    }
}

fn synthetic_record(player_id: u32, round: u32) -> FixtureRecord {
    let seed = f64::from((player_id * 31 + round * 7) % 13);
    FixtureRecord {
        player_id,
        fixture_id: player_id * 100 + round,
        round,
        kickoff_utc: Some(1_755_000_000 + i64::from(round) * 604_800),
        opponent_id: 1 + (player_id + round) % 20,
        was_home: round % 2 == 0,
        total_points: seed,
        minutes: 90.0,
        goals_scored: seed / 10.0,
        assists: seed / 12.0,
        clean_sheets: 0.0,
        goals_conceded: 1.0,
        own_goals: 0.0,
        saves: 0.0,
        bonus: 0.0,
        bps: seed * 3.0,
        influence: seed * 4.0,
        creativity: seed * 3.0,
        threat: seed * 5.0,
        ict_index: seed,
        expected_goals: seed / 20.0,
        expected_assists: seed / 25.0,
        expected_goal_involvements: seed / 11.0,
        expected_goals_conceded: 1.2,
        opp_att_strength: 1000.0 + seed * 20.0,
        opp_def_strength: 1050.0 + seed * 15.0,
    }
}

fn synthetic_inputs() -> (BTreeMap<u32, Player>, HashMap<u32, Vec<FixtureRecord>>) {
    let mut players = BTreeMap::new();
    let mut histories = HashMap::new();
    for id in 1..=PLAYERS {
        players.insert(id, synthetic_player(id));
        let records: Vec<FixtureRecord> = (1..=FIXTURES_PER_PLAYER)
            .map(|round| synthetic_record(id, round))
            .collect();
        histories.insert(id, records);
    }
    (players, histories)
}

fn midfield_model() -> LinearScoringModel {
    LinearScoringModel::from_artifact(LinearScoringArtifact {
        version: 1,
        position: "MID".to_string(),
        feature_names: vec!["mean_ict_index".to_string(), "mean_xgi".to_string()],
        feature_means: vec![4.12, 0.38],
        feature_stds: vec![2.64, 0.29],
        coeffs: vec![1.87, 1.21],
        intercept: 3.35,
    })
    .expect("artifact is well-formed")
}

fn bench_feature_build(c: &mut Criterion) {
    let (players, histories) = synthetic_inputs();
    c.bench_function("feature_build", |b| {
        b.iter(|| {
            let (vectors, diags) =
                build_feature_vectors(black_box(&players), black_box(&histories), 5);
            black_box((vectors.len(), diags.len()));
        })
    });
}

fn bench_rank(c: &mut Criterion) {
    let (players, histories) = synthetic_inputs();
    let (vectors, _) = build_feature_vectors(&players, &histories, 5);
    let model = midfield_model();
    c.bench_function("rank_midfielders", |b| {
        b.iter(|| {
            let mut diags = Vec::new();
            let top = rank_position(
                black_box(&vectors),
                Position::Midfielder,
                &model,
                10,
                &mut diags,
            );
            black_box(top.len());
        })
    });
}

criterion_group!(perf, bench_feature_build, bench_rank);
criterion_main!(perf);
