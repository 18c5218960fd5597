//! C9: Winner Update Logic.
//!
//! State machine per court (NoWinner, Team1Won, Team2Won), driven entirely
//! by [`update_winner`]: every transition reverses the previous winner's
//! contribution (if any) before applying the new one, which makes repeated
//! or reverted calls idempotent (§4.9, P5).

use crate::court::domain::model::{Round, Winner};
use crate::court::service::history::HistoryTracker;

/// Applies, changes, or clears a court's winner. `court_number` must be a
/// positive court number that exists in `round`; a nonexistent one is a
/// silent no-op per §7 ("nothing to do" conditions never error).
pub fn update_winner(
    history: &mut HistoryTracker,
    round: &mut Round,
    court_number: u32,
    new_winner: Option<Winner>,
) {
    debug_assert!(court_number >= 1, "court numbers start at 1");

    let Some(court) = round.court_mut(court_number) else {
        return;
    };

    let prev_winner = court.winner;
    if prev_winner == new_winner {
        return;
    }

    if let Some(prev) = prev_winner {
        history.reverse_specific(court_number, prev);
    }

    if let Some(winner) = new_winner {
        let (winning_ids, losing_ids) = match winner {
            Winner::Team1 => (court.team1.players.clone(), court.team2.players.clone()),
            Winner::Team2 => (court.team2.players.clone(), court.team1.players.clone()),
        };
        if !winning_ids.is_empty() && !losing_ids.is_empty() {
            history.apply_winner(court_number, winner, winning_ids, losing_ids);
        }
    }

    court.winner = new_winner;
    history.notify_after_winner_change();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::domain::model::{Court, Team};

    fn round_with_one_court() -> Round {
        Round {
            courts: vec![Court {
                court_number: 1,
                players: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                team1: Team::doubles("a".into(), "b".into()),
                team2: Team::doubles("c".into(), "d".into()),
                waiting: None,
                winner: None,
                was_manually_assigned: false,
            }],
            bench: vec![],
        }
    }

    #[test]
    fn applying_a_winner_updates_counts() {
        let mut history = HistoryTracker::new();
        let mut round = round_with_one_court();
        update_winner(&mut history, &mut round, 1, Some(Winner::Team1));
        assert_eq!(history.win_count("a"), 1);
        assert_eq!(history.win_count("b"), 1);
        assert_eq!(history.loss_count("c"), 1);
        assert_eq!(history.loss_count("d"), 1);
        assert_eq!(round.court(1).unwrap().winner, Some(Winner::Team1));
    }

    #[test]
    fn toggling_to_none_reverses_the_contribution() {
        let mut history = HistoryTracker::new();
        let mut round = round_with_one_court();
        update_winner(&mut history, &mut round, 1, Some(Winner::Team1));
        update_winner(&mut history, &mut round, 1, None);
        assert_eq!(history.win_count("a"), 0);
        assert_eq!(history.loss_count("c"), 0);
        assert!(round.court(1).unwrap().winner.is_none());
    }

    #[test]
    fn switching_winner_reverses_then_reapplies() {
        let mut history = HistoryTracker::new();
        let mut round = round_with_one_court();
        update_winner(&mut history, &mut round, 1, Some(Winner::Team1));
        update_winner(&mut history, &mut round, 1, Some(Winner::Team2));
        assert_eq!(history.win_count("a"), 0);
        assert_eq!(history.loss_count("b"), 0);
        assert_eq!(history.win_count("c"), 1);
        assert_eq!(history.loss_count("a"), 1);
    }

    #[test]
    fn duplicate_toggle_is_a_no_op() {
        let mut history = HistoryTracker::new();
        let mut round = round_with_one_court();
        update_winner(&mut history, &mut round, 1, Some(Winner::Team1));
        update_winner(&mut history, &mut round, 1, Some(Winner::Team1));
        assert_eq!(history.win_count("a"), 1);
    }

    #[test]
    fn unknown_court_number_is_a_silent_no_op() {
        let mut history = HistoryTracker::new();
        let mut round = round_with_one_court();
        update_winner(&mut history, &mut round, 99, Some(Winner::Team1));
        assert_eq!(history.win_count("a"), 0);
    }
}
