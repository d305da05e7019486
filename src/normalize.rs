use std::collections::{BTreeMap, HashMap};

use crate::error::PipelineError;
use crate::records::{Player, Position, RawPlayer, RawPositionKind, RawTeam, Team};

/// Output of the entity join: canonical players keyed by id (ordered, so
/// every later stage iterates deterministically) plus the team lookup the
/// strength joiner needs.
#[derive(Debug, Clone)]
pub struct NormalizedEntities {
    pub players: BTreeMap<u32, Player>,
    pub teams: HashMap<u32, Team>,
}

/// Join raw players against teams and position kinds into canonical records.
///
/// An unresolvable team or position id aborts the run. Dropping the row
/// instead would silently shift every downstream aggregate.
pub fn normalize_entities(
    players: &[RawPlayer],
    teams: &[RawTeam],
    positions: &[RawPositionKind],
) -> Result<NormalizedEntities, PipelineError> {
    if players.is_empty() {
        return Err(PipelineError::EmptyInput("players"));
    }
    if teams.is_empty() {
        return Err(PipelineError::EmptyInput("teams"));
    }
    if positions.is_empty() {
        return Err(PipelineError::EmptyInput("positions"));
    }

    let team_map: HashMap<u32, Team> = teams
        .iter()
        .map(|t| {
            (
                t.id,
                Team {
                    id: t.id,
                    name: t.name.clone(),
                    strength_attack_home: f64::from(t.strength_attack_home),
                    strength_attack_away: f64::from(t.strength_attack_away),
                    strength_defence_home: f64::from(t.strength_defence_home),
                    strength_defence_away: f64::from(t.strength_defence_away),
                },
            )
        })
        .collect();

    let mut position_map: HashMap<u32, Position> = HashMap::with_capacity(positions.len());
    for kind in positions {
        let Some(pos) = Position::from_short_label(&kind.singular_name_short) else {
            return Err(PipelineError::UnknownPositionLabel {
                id: kind.id,
                label: kind.singular_name_short.clone(),
            });
        };
        position_map.insert(kind.id, pos);
    }

    let mut out = BTreeMap::new();
    for raw in players {
        let Some(team) = team_map.get(&raw.team) else {
            return Err(PipelineError::UnresolvedReference {
                entity: "player",
                id: raw.id,
                referenced: "team",
                referenced_id: raw.team,
            });
        };
        let Some(position) = position_map.get(&raw.element_type).copied() else {
            return Err(PipelineError::UnresolvedReference {
                entity: "player",
                id: raw.id,
                referenced: "position",
                referenced_id: raw.element_type,
            });
        };
        out.insert(
            raw.id,
            Player {
                id: raw.id,
                full_name: format!("{} {}", raw.first_name.trim(), raw.second_name.trim()),
                team_id: team.id,
                team_name: team.name.clone(),
                position,
                // API prices are 10x the true value.
                price: f64::from(raw.now_cost) / 10.0,
            },
        );
    }

    Ok(NormalizedEntities {
        players: out,
        teams: team_map,
    })
}
