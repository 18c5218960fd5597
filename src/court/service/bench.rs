//! C3: the Bench Selector.

use std::collections::HashSet;

use crate::court::domain::model::{Player, PlayerId};
use crate::court::rng::EngineRng;
use crate::court::service::history::HistoryTracker;

/// Selects who sits out this round from `present`, to equalize historical
/// bench counts while guaranteeing an even on-court count (§4.3).
///
/// `present` must already have any force-benched or pinned ids removed; the
/// caller unions the result with those ids separately (§4.8).
pub fn select_bench(
    history: &HistoryTracker,
    rng: &mut EngineRng,
    present: &[Player],
    number_of_courts: u32,
) -> Vec<PlayerId> {
    let capacity = number_of_courts as usize * 4;
    let mut bench_size = present.len().saturating_sub(capacity);
    if (present.len() - bench_size) % 2 == 1 {
        bench_size += 1;
    }
    bench_size = bench_size.clamp(0, present.len());

    // Sort by ascending bench count; within a tie, draw a random key from
    // the engine RNG so the order is reproducible under a seeded RNG but not
    // fixed by id order.
    let mut with_keys: Vec<(u32, u32, &Player)> = present
        .iter()
        .map(|p| (history.bench_count(&p.id), rng.gen_range(0, u32::MAX), p))
        .collect();
    with_keys.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    with_keys
        .into_iter()
        .take(bench_size)
        .map(|(_, _, p)| p.id.clone())
        .collect()
}

/// Splits `present` into the on-court pool and the combined bench (computed
/// bench ∪ `force_bench`), per §4.8's "force-bench is unioned with the
/// §4.3-computed bench set".
pub fn select_on_court_and_bench(
    history: &HistoryTracker,
    rng: &mut EngineRng,
    present: &[Player],
    number_of_courts: u32,
    force_bench: &HashSet<PlayerId>,
) -> (Vec<Player>, Vec<PlayerId>) {
    let forced: Vec<Player> = present
        .iter()
        .filter(|p| force_bench.contains(&p.id))
        .cloned()
        .collect();
    let remaining: Vec<Player> = present
        .iter()
        .filter(|p| !force_bench.contains(&p.id))
        .cloned()
        .collect();

    let computed_bench = select_bench(history, rng, &remaining, number_of_courts);
    let computed_bench_set: HashSet<&PlayerId> = computed_bench.iter().collect();

    let on_court: Vec<Player> = remaining
        .iter()
        .filter(|p| !computed_bench_set.contains(&p.id))
        .cloned()
        .collect();

    let mut bench: Vec<PlayerId> = forced.into_iter().map(|p| p.id).collect();
    bench.extend(computed_bench);

    (on_court, bench)
}
