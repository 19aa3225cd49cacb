//! Group stage: schedule a group's round robin and produce its match shells.

use crate::logic::match_factory::build_match_shells;
use crate::logic::pairing::{generate_schedule, ScheduleOptions};
use crate::models::{Format, Group, GroupId, Match, MatchError, Result, Team};

/// Source of the teams belonging to a group, in registration order.
pub trait TeamRegistry {
    fn teams_in_group(&self, group_id: GroupId) -> Result<Vec<Team>>;
}

/// Generate all round-robin match shells for `group`, in schedule order.
///
/// Fewer than two teams yields no matches.
pub fn generate_group_matches(
    registry: &impl TeamRegistry,
    format: &Format,
    group: &Group,
    options: ScheduleOptions,
) -> Result<Vec<Match>> {
    if group.format_id != format.id {
        return Err(MatchError::FormatMismatch {
            group: group.id,
            expected: group.format_id,
            given: format.id,
        });
    }
    let teams = registry.teams_in_group(group.id)?;
    if teams.len() != group.team_count {
        log::warn!(
            "Group {} declares {} teams but has {} registered",
            group.name,
            group.team_count,
            teams.len()
        );
    }
    let schedule = generate_schedule(&teams, options);
    let matches = build_match_shells(format, group, &schedule.pairs);
    log::info!("Scheduled {} matches for group {}", matches.len(), group.name);
    Ok(matches)
}
