use std::collections::{BTreeMap, HashMap};

use crate::records::{Player, Position, RawFixtureStat, TopScorerRow};

pub const DEFAULT_SCORERS_TOP_N: usize = 20;

/// Sum `total_points` per player over the full recorded history, partitioned
/// by position, and keep the top `top_n` per partition. Partitions are
/// concatenated in fixed position order and never mixed; within a partition
/// rows are sorted descending by sum, ties broken by ascending player id.
///
/// This consumes the raw normalized history directly: it is independent of
/// the rolling window, of the ranker, and of the strength join, so a fixture
/// excluded there (indeterminate flag, coercion failure) still counts its
/// recorded points here.
pub fn top_scorers_by_position(
    players: &BTreeMap<u32, Player>,
    histories: &HashMap<u32, Vec<RawFixtureStat>>,
    top_n: usize,
) -> Vec<TopScorerRow> {
    let mut out = Vec::new();
    for position in Position::ALL {
        let mut partition: Vec<TopScorerRow> = players
            .values()
            .filter(|p| p.position == position)
            .filter_map(|p| {
                let history = histories.get(&p.id)?;
                if history.is_empty() {
                    return None;
                }
                Some(TopScorerRow {
                    player_id: p.id,
                    name: p.full_name.clone(),
                    position,
                    total_points: history.iter().map(|h| f64::from(h.total_points)).sum(),
                })
            })
            .collect();

        partition.sort_by(|a, b| {
            b.total_points
                .total_cmp(&a.total_points)
                .then(a.player_id.cmp(&b.player_id))
        });
        partition.truncate(top_n);
        out.extend(partition);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, position: Position) -> Player {
        Player {
            id,
            full_name: format!("Player {id}"),
            team_id: 1,
            team_name: "Test FC".to_string(),
            position,
            price: 5.0,
        }
    }

    fn stat(player_id: u32, fixture: u32, points: i32) -> RawFixtureStat {
        RawFixtureStat {
            element: player_id,
            fixture,
            round: fixture,
            kickoff_time: Some("2025-08-16T14:00:00Z".to_string()),
            opponent_team: 2,
            was_home: Some(true),
            total_points: points,
            minutes: 90,
            goals_scored: 0,
            assists: 0,
            clean_sheets: 0,
            goals_conceded: 0,
            own_goals: 0,
            saves: 0,
            bonus: 0,
            bps: 0,
            influence: "10.0".to_string(),
            creativity: "10.0".to_string(),
            threat: "10.0".to_string(),
            ict_index: "5.0".to_string(),
            expected_goals: "0.10".to_string(),
            expected_assists: "0.10".to_string(),
            expected_goal_involvements: "0.20".to_string(),
            expected_goals_conceded: "1.00".to_string(),
        }
    }

    #[test]
    fn twenty_five_keepers_yield_exactly_the_top_twenty() {
        let mut players = BTreeMap::new();
        let mut histories = HashMap::new();
        // Distinct sums: keeper i totals 2*i points across two fixtures.
        for i in 1..=25u32 {
            players.insert(i, player(i, Position::Goalkeeper));
            histories.insert(i, vec![stat(i, 1, i as i32), stat(i, 2, i as i32)]);
        }

        let rows = top_scorers_by_position(&players, &histories, 20);
        assert_eq!(rows.len(), 20);
        assert_eq!(rows[0].player_id, 25);
        assert_eq!(rows[0].total_points, 50.0);
        assert_eq!(rows[19].player_id, 6);
        assert!(rows.iter().all(|r| r.position == Position::Goalkeeper));
    }

    #[test]
    fn partitions_never_mix_and_follow_position_order() {
        let mut players = BTreeMap::new();
        let mut histories = HashMap::new();
        players.insert(1, player(1, Position::Forward));
        histories.insert(1, vec![stat(1, 1, 50)]);
        players.insert(2, player(2, Position::Goalkeeper));
        histories.insert(2, vec![stat(2, 1, 3)]);
        players.insert(3, player(3, Position::Midfielder));
        histories.insert(3, vec![stat(3, 1, 10)]);

        let rows = top_scorers_by_position(&players, &histories, 20);
        let positions: Vec<Position> = rows.iter().map(|r| r.position).collect();
        // Forward scored most overall but still comes last: partitions are
        // concatenated in enum order, not globally re-sorted.
        assert_eq!(
            positions,
            vec![Position::Goalkeeper, Position::Midfielder, Position::Forward]
        );
    }

    #[test]
    fn ties_break_by_ascending_player_id() {
        let mut players = BTreeMap::new();
        let mut histories = HashMap::new();
        for id in [8u32, 2, 5] {
            players.insert(id, player(id, Position::Defender));
            histories.insert(id, vec![stat(id, 1, 12)]);
        }
        let rows = top_scorers_by_position(&players, &histories, 20);
        let ids: Vec<u32> = rows.iter().map(|r| r.player_id).collect();
        assert_eq!(ids, vec![2, 5, 8]);
    }

    #[test]
    fn players_without_history_do_not_appear() {
        let mut players = BTreeMap::new();
        players.insert(1, player(1, Position::Midfielder));
        players.insert(2, player(2, Position::Midfielder));
        let histories = HashMap::from([(1, vec![stat(1, 1, 4)]), (2, Vec::new())]);

        let rows = top_scorers_by_position(&players, &histories, 20);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_id, 1);
    }

    #[test]
    fn sums_cover_full_history_not_a_window() {
        let mut players = BTreeMap::new();
        players.insert(1, player(1, Position::Midfielder));
        let history: Vec<RawFixtureStat> = (1..=10).map(|i| stat(1, i, 2)).collect();
        let histories = HashMap::from([(1, history)]);

        let rows = top_scorers_by_position(&players, &histories, 20);
        assert_eq!(rows[0].total_points, 20.0);
    }

    #[test]
    fn fixtures_unusable_for_the_strength_join_still_count_their_points() {
        // An indeterminate flag or an uncoercible stat keeps a fixture out of
        // the feature pipeline, but its recorded points belong in the season
        // sum regardless.
        let mut players = BTreeMap::new();
        players.insert(1, player(1, Position::Forward));

        let mut flagless = stat(1, 1, 9);
        flagless.was_home = None;
        let mut garbled = stat(1, 2, 5);
        garbled.ict_index = "n/a".to_string();
        let clean = stat(1, 3, 4);

        let histories = HashMap::from([(1, vec![flagless, garbled, clean])]);
        let rows = top_scorers_by_position(&players, &histories, 20);
        assert_eq!(rows[0].total_points, 18.0);
    }
}
