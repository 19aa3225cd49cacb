//! Round-robin pairing: every team meets every other team once, nobody plays more
//! than two pairings in a row unless the schedule would otherwise deadlock.

use rand::seq::SliceRandom;
use std::collections::HashSet;

/// How the generated schedule is ordered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScheduleOptions {
    /// Shuffle the pairs after generation. The fatigue bound no longer holds when set.
    pub shuffle: bool,
}

/// Generated schedule: pairs in playing order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Schedule<T> {
    pub pairs: Vec<(T, T)>,
    /// Output indices whose pair was picked right after the fatigue counters were reset.
    /// Empty when shuffled, since the order no longer reflects generation.
    pub relaxed_at: Vec<usize>,
}

/// Per-team bookkeeping while scheduling. Indexed by position in the input list.
#[derive(Clone, Debug, Default)]
struct Tally {
    total: u32,
    consecutive: u32,
    opponents: HashSet<usize>,
}

/// Most pairings a team may play back to back.
const MAX_CONSECUTIVE: u32 = 2;

/// All `n*(n-1)/2` pairs of `teams`, in greedy fairness order.
pub fn generate_pairings<T: Clone>(teams: &[T]) -> Vec<(T, T)> {
    generate_schedule(teams, ScheduleOptions::default()).pairs
}

/// Generate the full round-robin schedule for `teams`.
///
/// Each step takes the unplayed pairs where neither team has played the last two
/// pairings, prefers pairs of teams that have not played at all, and picks the pair
/// whose busier team has played least. Ties go to input order. When no pair passes
/// the fatigue rule, fatigue counters are cleared and the step is retried once; the
/// retry always finds a pair while unplayed pairs remain, so the loop runs exactly
/// `n*(n-1)/2` steps.
pub fn generate_schedule<T: Clone>(teams: &[T], options: ScheduleOptions) -> Schedule<T> {
    let n = teams.len();
    if n < 2 {
        return Schedule {
            pairs: Vec::new(),
            relaxed_at: Vec::new(),
        };
    }
    let pair_count = n * (n - 1) / 2;
    let mut tallies = vec![Tally::default(); n];
    let mut order: Vec<(usize, usize)> = Vec::with_capacity(pair_count);
    let mut relaxed_at = Vec::new();

    for step in 0..pair_count {
        let pick = match pick_pair(&tallies) {
            Some(pick) => pick,
            None => {
                log::debug!("pairing step {}: every open pair is fatigued, resetting streaks", step);
                for t in &mut tallies {
                    t.consecutive = 0;
                }
                relaxed_at.push(step);
                match pick_pair(&tallies) {
                    Some(pick) => pick,
                    // Unreachable while step < pair_count: some pair is still unplayed.
                    None => break,
                }
            }
        };
        record_pair(&mut tallies, pick);
        order.push(pick);
    }

    let mut pairs: Vec<(T, T)> = order
        .into_iter()
        .map(|(a, b)| (teams[a].clone(), teams[b].clone()))
        .collect();
    if options.shuffle {
        pairs.shuffle(&mut rand::thread_rng());
        relaxed_at.clear();
    }
    log::info!(
        "Generated {} pairings for {} teams ({} fatigue resets)",
        pairs.len(),
        n,
        relaxed_at.len()
    );
    Schedule { pairs, relaxed_at }
}

/// Best legal pair for the next slot, or None if no unplayed pair passes the fatigue rule.
fn pick_pair(tallies: &[Tally]) -> Option<(usize, usize)> {
    let n = tallies.len();
    let candidates: Vec<(usize, usize)> = (0..n)
        .flat_map(|a| (a + 1..n).map(move |b| (a, b)))
        .filter(|&(a, b)| {
            !tallies[a].opponents.contains(&b)
                && tallies[a].consecutive < MAX_CONSECUTIVE
                && tallies[b].consecutive < MAX_CONSECUTIVE
        })
        .collect();

    let fresh: Vec<(usize, usize)> = candidates
        .iter()
        .copied()
        .filter(|&(a, b)| tallies[a].total == 0 && tallies[b].total == 0)
        .collect();
    let pool = if fresh.is_empty() { candidates } else { fresh };

    // min_by_key keeps the first of equal keys, i.e. input order.
    pool.into_iter()
        .min_by_key(|&(a, b)| tallies[a].total.max(tallies[b].total))
}

fn record_pair(tallies: &mut [Tally], (a, b): (usize, usize)) {
    for (i, t) in tallies.iter_mut().enumerate() {
        if i == a || i == b {
            t.total += 1;
            t.consecutive += 1;
        } else {
            t.consecutive = 0;
        }
    }
    tallies[a].opponents.insert(b);
    tallies[b].opponents.insert(a);
}
