//! Integration tests for round-robin pairing and match shell generation.

use court_tournament::{
    build_match_shells, generate_pairings, generate_schedule, Format, Group, MatchStatus,
    ScheduleOptions, StageRules, Team,
};
use std::collections::HashSet;

fn unordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

#[test]
fn fewer_than_two_teams_yields_nothing() {
    assert!(generate_pairings::<usize>(&[]).is_empty());
    assert!(generate_pairings(&[7usize]).is_empty());
}

#[test]
fn two_teams_play_once() {
    assert_eq!(generate_pairings(&["A", "B"]), vec![("A", "B")]);
}

#[test]
fn every_pair_appears_exactly_once() {
    for n in 2..=12 {
        let teams: Vec<usize> = (0..n).collect();
        let pairs = generate_pairings(&teams);
        assert_eq!(pairs.len(), n * (n - 1) / 2, "n = {n}");

        let mut seen = HashSet::new();
        for &(a, b) in &pairs {
            assert_ne!(a, b, "team paired with itself, n = {n}");
            assert!(seen.insert(unordered(a, b)), "pair {a}-{b} repeated, n = {n}");
        }
    }
}

#[test]
fn no_team_plays_three_in_a_row_between_resets() {
    for n in 2..=12 {
        let teams: Vec<usize> = (0..n).collect();
        let schedule = generate_schedule(&teams, ScheduleOptions::default());
        let resets: HashSet<usize> = schedule.relaxed_at.iter().copied().collect();

        for team in 0..n {
            let mut streak = 0;
            for (i, &(a, b)) in schedule.pairs.iter().enumerate() {
                if resets.contains(&i) {
                    streak = 0;
                }
                if a == team || b == team {
                    streak += 1;
                    assert!(streak <= 2, "team {team} plays a third pairing in a row at {i}, n = {n}");
                } else {
                    streak = 0;
                }
            }
        }
    }
}

#[test]
fn teams_all_play_before_anyone_plays_twice() {
    let teams: Vec<usize> = (0..6).collect();
    let pairs = generate_pairings(&teams);
    let opening: HashSet<usize> = pairs[..3].iter().flat_map(|&(a, b)| [a, b]).collect();
    assert_eq!(opening.len(), 6);
}

#[test]
fn greedy_order_is_deterministic() {
    let teams = ["A", "B", "C", "D"];
    assert_eq!(
        generate_pairings(&teams),
        vec![("A", "B"), ("C", "D"), ("A", "C"), ("B", "D"), ("A", "D"), ("B", "C")]
    );
    assert_eq!(generate_pairings(&teams), generate_pairings(&teams));
}

#[test]
fn shuffled_schedule_keeps_the_same_pairs() {
    let teams: Vec<usize> = (0..8).collect();
    let plain: HashSet<(usize, usize)> = generate_pairings(&teams)
        .into_iter()
        .map(|(a, b)| unordered(a, b))
        .collect();
    let shuffled = generate_schedule(&teams, ScheduleOptions { shuffle: true });
    let shuffled_set: HashSet<(usize, usize)> = shuffled
        .pairs
        .iter()
        .map(|&(a, b)| unordered(a, b))
        .collect();
    assert_eq!(shuffled.pairs.len(), 28);
    assert_eq!(plain, shuffled_set);
    assert!(shuffled.relaxed_at.is_empty());
}

#[test]
fn match_shells_follow_schedule_order() {
    let format = Format::with_group_rules(StageRules::default()).unwrap();
    let group = Group::new(format.id, "Group A", 4);
    let teams: Vec<Team> = ["Ann", "Ben", "Cat", "Dan"]
        .iter()
        .map(|name| Team::new(group.id, *name, None))
        .collect();
    let pairs = generate_pairings(&teams);
    let matches = build_match_shells(&format, &group, &pairs);

    assert_eq!(matches.len(), 6);
    for (m, (t1, t2)) in matches.iter().zip(&pairs) {
        assert_eq!(m.format_id, format.id);
        assert_eq!(m.group_id, group.id);
        assert_eq!(m.team1_id, t1.id);
        assert_eq!(m.team2_id, t2.id);
        assert_eq!(m.result, MatchStatus::Pending);
        assert!(m.umpire_id.is_none());
        assert!(m.winner_id.is_none());
        assert!(m.games.is_empty());
    }
    let ids: HashSet<_> = matches.iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 6);
}
