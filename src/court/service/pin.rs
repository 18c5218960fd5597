//! C8: Manual Pin & Force-Bench.

use std::collections::HashSet;

use crate::court::domain::model::{Court, Player, PlayerId, Team};
use crate::court::service::history::HistoryTracker;
use crate::court::service::team_split::choose_team_split;

/// A user-pinned selection for court 1. Ignored entirely when the
/// cardinality is outside `[2, 4]` (§4.8); absent players are filtered out
/// before that check.
#[derive(Debug, Clone)]
pub struct ManualPin {
    pub players: Vec<Player>,
}

pub struct PinOutcome {
    /// `Some` only when the pin was valid; court 1, pre-placed.
    pub court: Option<Court>,
    /// The on-court players left over after removing the pin.
    pub residual_present: Vec<Player>,
}

/// Filters absent players from the pin, ignores it if the remaining
/// cardinality isn't 2-4, and otherwise builds court 1 (§4.8). Pinned ids
/// are removed from `present` regardless of whether the pin was honored, to
/// match "filter and proceed" for the `InputIgnored` case only when the
/// filtered set is itself usable — an ignored pin leaves `present` as-is.
pub fn apply_manual_pin(
    history: &HistoryTracker,
    present: &[Player],
    pin: Option<&ManualPin>,
    cost_weights: crate::court::config::CostWeights,
) -> PinOutcome {
    let Some(pin) = pin else {
        return PinOutcome {
            court: None,
            residual_present: present.to_vec(),
        };
    };

    let present_ids: HashSet<&PlayerId> = present.iter().map(|p| &p.id).collect();
    let filtered: Vec<Player> = pin
        .players
        .iter()
        .filter(|p| present_ids.contains(&p.id))
        .cloned()
        .collect();

    if filtered.len() < 2 || filtered.len() > 4 {
        tracing::debug!(count = filtered.len(), "manual pin ignored: wrong cardinality");
        return PinOutcome {
            court: None,
            residual_present: present.to_vec(),
        };
    }

    let pinned_ids: HashSet<&PlayerId> = filtered.iter().map(|p| &p.id).collect();
    let residual_present: Vec<Player> = present
        .iter()
        .filter(|p| !pinned_ids.contains(&p.id))
        .cloned()
        .collect();

    let court = Some(build_pinned_court(history, &filtered, cost_weights));

    PinOutcome {
        court,
        residual_present,
    }
}

fn build_pinned_court(
    history: &HistoryTracker,
    pinned: &[Player],
    weights: crate::court::config::CostWeights,
) -> Court {
    match pinned.len() {
        2 => {
            let a = pinned[0].id.clone();
            let b = pinned[1].id.clone();
            Court {
                court_number: 1,
                players: vec![a.clone(), b.clone()],
                team1: Team::singles(a),
                team2: Team::singles(b),
                waiting: None,
                winner: None,
                was_manually_assigned: true,
            }
        }
        3 => {
            let a = pinned[0].id.clone();
            let b = pinned[1].id.clone();
            let waiting = pinned[2].id.clone();
            Court {
                court_number: 1,
                players: vec![a.clone(), b.clone(), waiting.clone()],
                team1: Team::singles(a),
                team2: Team::singles(b),
                waiting: Some(waiting),
                winner: None,
                was_manually_assigned: true,
            }
        }
        4 => {
            let ids: [PlayerId; 4] = [
                pinned[0].id.clone(),
                pinned[1].id.clone(),
                pinned[2].id.clone(),
                pinned[3].id.clone(),
            ];
            let split = choose_team_split(history, &ids, weights);
            Court {
                court_number: 1,
                players: ids.to_vec(),
                team1: split.team1,
                team2: split.team2,
                waiting: None,
                winner: None,
                was_manually_assigned: true,
            }
        }
        _ => unreachable!("caller validated cardinality is 2..=4"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::config::CostWeights;

    fn player(id: &str) -> Player {
        Player::new(id, id)
    }

    #[test]
    fn wrong_cardinality_is_ignored() {
        let history = HistoryTracker::new();
        let present = vec![player("p0"), player("p1")];
        let pin = ManualPin { players: vec![player("p0")] };
        let outcome = apply_manual_pin(&history, &present, Some(&pin), CostWeights::default());
        assert!(outcome.court.is_none());
        assert_eq!(outcome.residual_present.len(), 2);
    }

    #[test]
    fn singles_pin_builds_court_one() {
        let history = HistoryTracker::new();
        let present: Vec<Player> = (0..8).map(|i| player(&format!("p{i}"))).collect();
        let pin = ManualPin { players: vec![player("p0"), player("p1")] };
        let outcome = apply_manual_pin(&history, &present, Some(&pin), CostWeights::default());
        let court = outcome.court.expect("pin should be honored");
        assert_eq!(court.players, vec!["p0", "p1"]);
        assert!(court.was_manually_assigned);
        assert_eq!(outcome.residual_present.len(), 6);
    }

    #[test]
    fn absent_pinned_players_are_filtered_before_checking_cardinality() {
        let history = HistoryTracker::new();
        let present = vec![player("p0"), player("p1"), player("p2")];
        // p9 is not present; after filtering only 2 remain, which is valid.
        let pin = ManualPin { players: vec![player("p0"), player("p1"), player("p9")] };
        let outcome = apply_manual_pin(&history, &present, Some(&pin), CostWeights::default());
        let court = outcome.court.expect("filtered pin should still be valid");
        assert_eq!(court.players, vec!["p0", "p1"]);
    }
}
