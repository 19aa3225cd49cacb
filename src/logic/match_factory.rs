//! Turn scheduled pairings into pending match shells.

use crate::models::{Format, Group, Match, Team};

/// Pending match for one pairing of `group`, played under `format`.
pub fn build_match_shell(format: &Format, group: &Group, pairing: &(Team, Team)) -> Match {
    let (team1, team2) = pairing;
    Match::new(format.id, group.id, team1.id, team2.id)
}

/// Match shells for a whole schedule, in schedule order.
pub fn build_match_shells(format: &Format, group: &Group, pairs: &[(Team, Team)]) -> Vec<Match> {
    pairs
        .iter()
        .map(|pairing| build_match_shell(format, group, pairing))
        .collect()
}
