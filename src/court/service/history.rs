//! C1 (pair keys & count maps) and C2 (the History Tracker).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::court::domain::model::{Court, MatchRecord, PlayerId, Winner};

/// An unordered pair of player ids, canonicalized so that
/// `pair_key(a, b) == pair_key(b, a)`.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}|{b}")
    } else {
        format!("{b}|{a}")
    }
}

/// A sparse, saturating counter map keyed by player id or [`pair_key`].
pub type CountMap = HashMap<String, u32>;

pub fn get(map: &CountMap, key: &str) -> u32 {
    map.get(key).copied().unwrap_or(0)
}

pub fn increment(map: &mut CountMap, key: &str, delta: u32) {
    *map.entry(key.to_string()).or_insert(0) += delta;
}

pub fn decrement(map: &mut CountMap, key: &str, delta: u32) {
    if let Some(v) = map.get_mut(key) {
        *v = v.saturating_sub(delta);
    }
}

/// The six count maps, JSON-serializable for `prepare_state_for_saving` /
/// `load_state`. Unknown fields are ignored on load; missing fields default
/// to empty maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub engine_type: Option<String>,
    #[serde(default)]
    pub bench_count_map: CountMap,
    #[serde(default)]
    pub single_count_map: CountMap,
    #[serde(default)]
    pub teammate_count_map: CountMap,
    #[serde(default)]
    pub opponent_count_map: CountMap,
    #[serde(default)]
    pub win_count_map: CountMap,
    #[serde(default)]
    pub loss_count_map: CountMap,
}

/// A token returned by [`HistoryTracker::on_state_change`] that can be
/// passed to [`HistoryTracker::unsubscribe`]. Unlike a closure-returning
/// unsubscribe, this token survives being stored independently of the
/// tracker's borrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the six history maps, the listener registry, and the current
/// session's match records.
///
/// All operations are total: missing keys read as zero, decrements saturate
/// at zero. See the spec's failure model in §4.2.
#[derive(Default)]
pub struct HistoryTracker {
    bench_count: CountMap,
    single_count: CountMap,
    teammate_count: CountMap,
    opponent_count: CountMap,
    win_count: CountMap,
    loss_count: CountMap,
    session_records: Vec<MatchRecord>,
    listeners: Vec<(SubscriptionId, Box<dyn Fn() + Send + Sync>)>,
    next_subscription: u64,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener, called synchronously after every mutation that
    /// changes observable state. Returns a token for [`Self::unsubscribe`].
    pub fn on_state_change<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener();
        }
    }

    /// Clears all six maps and the current-session records; notifies.
    pub fn reset_history(&mut self) {
        self.bench_count.clear();
        self.single_count.clear();
        self.teammate_count.clear();
        self.opponent_count.clear();
        self.win_count.clear();
        self.loss_count.clear();
        self.session_records.clear();
        tracing::info!("history reset");
        self.notify();
    }

    /// Clears only the current-session match records, used at the start of
    /// `generate`.
    pub fn clear_current_session(&mut self) {
        self.session_records.clear();
    }

    pub fn bench_count(&self, id: &str) -> u32 {
        get(&self.bench_count, id)
    }

    pub fn single_count(&self, id: &str) -> u32 {
        get(&self.single_count, id)
    }

    pub fn teammate_count(&self, a: &str, b: &str) -> u32 {
        get(&self.teammate_count, &pair_key(a, b))
    }

    pub fn opponent_count(&self, a: &str, b: &str) -> u32 {
        get(&self.opponent_count, &pair_key(a, b))
    }

    pub fn win_count(&self, id: &str) -> u32 {
        get(&self.win_count, id)
    }

    pub fn loss_count(&self, id: &str) -> u32 {
        get(&self.loss_count, id)
    }

    pub fn get_win_counts(&self) -> CountMap {
        self.win_count.clone()
    }

    pub fn get_bench_counts(&self) -> CountMap {
        self.bench_count.clone()
    }

    pub fn bump_bench(&mut self, id: &str) {
        increment(&mut self.bench_count, id, 1);
    }

    pub fn bump_single(&mut self, id: &str) {
        increment(&mut self.single_count, id, 1);
    }

    pub fn bump_teammate(&mut self, a: &str, b: &str) {
        increment(&mut self.teammate_count, &pair_key(a, b), 1);
    }

    pub fn bump_opponent(&mut self, a: &str, b: &str) {
        increment(&mut self.opponent_count, &pair_key(a, b), 1);
    }

    /// Commits the per-round count increments (bench/single/teammate/
    /// opponent) for every court, then notifies. A court's `waiting` player
    /// (the sat-out third player on a manually pinned singles-plus-one
    /// court) is excluded from `single_count`: only `team1`/`team2` actually
    /// played.
    pub fn commit_round(&mut self, courts: &[Court], bench: &[PlayerId]) {
        for court in courts {
            for pair in pairs(&court.team1.players) {
                self.bump_teammate(&pair.0, &pair.1);
            }
            for pair in pairs(&court.team2.players) {
                self.bump_teammate(&pair.0, &pair.1);
            }
            for a in &court.team1.players {
                for b in &court.team2.players {
                    self.bump_opponent(a, b);
                }
            }
            if court.team1.players.len() == 1 {
                for id in court.team1.players.iter().chain(&court.team2.players) {
                    self.bump_single(id);
                }
            }
        }
        for id in bench {
            self.bump_bench(id);
        }
        self.notify();
    }

    /// For every court with a defined winner and both teams present,
    /// increments `win_count` for the winning team and `loss_count` for the
    /// losing team, and pushes a [`MatchRecord`] onto the current session.
    pub fn record_wins(&mut self, courts: &[Court]) {
        for court in courts {
            let (Some(winner), Some(winning), Some(losing)) =
                (court.winner, court.winning_team(), court.losing_team())
            else {
                continue;
            };
            if winning.players.is_empty() || losing.players.is_empty() {
                continue;
            }
            let already_recorded = self.session_records.iter().any(|r| {
                r.court_number == court.court_number && r.winner == winner
            });
            if already_recorded {
                continue;
            }
            for id in &winning.players {
                increment(&mut self.win_count, id, 1);
            }
            for id in &losing.players {
                increment(&mut self.loss_count, id, 1);
            }
            self.session_records.push(MatchRecord {
                court_number: court.court_number,
                winner,
                winning_player_ids: winning.players.clone(),
                losing_player_ids: losing.players.clone(),
            });
        }
        self.notify();
    }

    /// Reverses a recorded win/loss contribution for the given winner and
    /// player lists, without touching the session-record ring (callers that
    /// also need to drop the record use [`Self::take_match_record`]).
    fn reverse_contribution(&mut self, winning: &[PlayerId], losing: &[PlayerId]) {
        for id in winning {
            decrement(&mut self.win_count, id, 1);
        }
        for id in losing {
            decrement(&mut self.loss_count, id, 1);
        }
    }

    /// Locates the most recent [`MatchRecord`] for `court_number`, removes
    /// it, and returns it. Fails silently (returns `None`) when absent.
    fn take_match_record(&mut self, court_number: u32) -> Option<MatchRecord> {
        let pos = self
            .session_records
            .iter()
            .rposition(|r| r.court_number == court_number)?;
        Some(self.session_records.remove(pos))
    }

    /// Locates the most recent MatchRecord for `court_number`, decrements
    /// `win_count`/`loss_count` accordingly, and removes the record. No-op
    /// when no record exists.
    pub fn reverse_win_for_court(&mut self, court_number: u32) {
        if let Some(record) = self.take_match_record(court_number) {
            self.reverse_contribution(&record.winning_player_ids, &record.losing_player_ids);
            self.notify();
        }
    }

    /// Reverses the contribution of `prev_winner` for `court`, if one was
    /// recorded, returning whether a reversal happened. Used by the winner
    /// update state machine (C9) so it can reverse without guessing which
    /// side was which from the court's *current* team assignment.
    pub fn reverse_specific(&mut self, court_number: u32, prev_winner: Winner) -> bool {
        let Some(pos) = self
            .session_records
            .iter()
            .rposition(|r| r.court_number == court_number && r.winner == prev_winner)
        else {
            return false;
        };
        let record = self.session_records.remove(pos);
        self.reverse_contribution(&record.winning_player_ids, &record.losing_player_ids);
        true
    }

    /// Increments win/loss counts for a fresh winner assignment and pushes
    /// the corresponding [`MatchRecord`].
    pub fn apply_winner(
        &mut self,
        court_number: u32,
        winner: Winner,
        winning_player_ids: Vec<PlayerId>,
        losing_player_ids: Vec<PlayerId>,
    ) {
        for id in &winning_player_ids {
            increment(&mut self.win_count, id, 1);
        }
        for id in &losing_player_ids {
            increment(&mut self.loss_count, id, 1);
        }
        self.session_records.push(MatchRecord {
            court_number,
            winner,
            winning_player_ids,
            losing_player_ids,
        });
    }

    pub fn notify_after_winner_change(&self) {
        self.notify();
    }

    pub fn prepare_state_for_saving(&self) -> StateSnapshot {
        StateSnapshot {
            engine_type: None,
            bench_count_map: self.bench_count.clone(),
            single_count_map: self.single_count.clone(),
            teammate_count_map: self.teammate_count.clone(),
            opponent_count_map: self.opponent_count.clone(),
            win_count_map: self.win_count.clone(),
            loss_count_map: self.loss_count.clone(),
        }
    }

    pub fn load_state(&mut self, snapshot: StateSnapshot) {
        self.bench_count = snapshot.bench_count_map;
        self.single_count = snapshot.single_count_map;
        self.teammate_count = snapshot.teammate_count_map;
        self.opponent_count = snapshot.opponent_count_map;
        self.win_count = snapshot.win_count_map;
        self.loss_count = snapshot.loss_count_map;
        self.notify();
    }
}

fn pairs(players: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let mut out = Vec::new();
    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            out.push((players[i].clone(), players[j].clone()));
        }
    }
    out
}
