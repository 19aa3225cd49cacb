//! In-memory persistence for formats, groups, teams and matches.
//!
//! Each match lives behind its own mutex: operations on one match are serialized,
//! different matches never contend.

use crate::logic::{
    assign_umpire, declare_outcome, generate_group_matches, record_point, set_serve,
    undo_last_point, update_final_score, PointOutcome, ScheduleOptions, TeamEntry, TeamRegistry,
};
use crate::models::{
    Format, FormatId, Group, GroupId, Match, MatchError, MatchId, MatchStatus, Result, Serve, Side,
    Team, TeamId, UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type MatchSlot = Arc<Mutex<Match>>;

#[derive(Debug, Default)]
pub struct TournamentStore {
    formats: RwLock<HashMap<FormatId, Format>>,
    groups: RwLock<HashMap<GroupId, Group>>,
    teams: RwLock<HashMap<TeamId, Team>>,
    /// Team ids per group, in registration order.
    group_teams: RwLock<HashMap<GroupId, Vec<TeamId>>>,
    /// Match ids per group, in schedule order.
    schedules: RwLock<HashMap<GroupId, Vec<MatchId>>>,
    matches: RwLock<HashMap<MatchId, MatchSlot>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl TournamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_format(&self, format: Format) -> FormatId {
        let id = format.id;
        write(&self.formats).insert(id, format);
        id
    }

    pub fn format(&self, id: FormatId) -> Result<Format> {
        read(&self.formats)
            .get(&id)
            .cloned()
            .ok_or(MatchError::FormatNotFound(id))
    }

    pub fn group(&self, id: GroupId) -> Result<Group> {
        read(&self.groups)
            .get(&id)
            .cloned()
            .ok_or(MatchError::GroupNotFound(id))
    }

    pub fn team(&self, id: TeamId) -> Result<Team> {
        read(&self.teams)
            .get(&id)
            .cloned()
            .ok_or(MatchError::TeamNotFound(id))
    }

    /// Save a group with its teams and generate its round-robin match shells.
    ///
    /// Returns the group and its matches in schedule order.
    pub fn save_group(
        &self,
        format_id: FormatId,
        name: impl Into<String>,
        entries: Vec<TeamEntry>,
        options: ScheduleOptions,
    ) -> Result<(Group, Vec<Match>)> {
        let format = self.format(format_id)?;
        for (i, entry) in entries.iter().enumerate() {
            entry.check(&format!("team {}", i + 1))?;
        }
        let group = Group::new(format_id, name, entries.len());
        let teams: Vec<Team> = entries
            .into_iter()
            .map(|e| Team::new(group.id, e.player1_name, e.player2_name))
            .collect();

        write(&self.group_teams).insert(group.id, teams.iter().map(|t| t.id).collect());
        {
            let mut all_teams = write(&self.teams);
            for team in teams {
                all_teams.insert(team.id, team);
            }
        }
        write(&self.groups).insert(group.id, group.clone());

        let matches = generate_group_matches(self, &format, &group, options)?;
        write(&self.schedules).insert(group.id, matches.iter().map(|m| m.id).collect());
        {
            let mut all_matches = write(&self.matches);
            for m in &matches {
                all_matches.insert(m.id, Arc::new(Mutex::new(m.clone())));
            }
        }
        Ok((group, matches))
    }

    /// Snapshot of a match.
    pub fn get_match(&self, id: MatchId) -> Result<Match> {
        self.with_match(id, |m| Ok(m.clone()))
    }

    /// Matches of a group in schedule order.
    pub fn group_matches(&self, group_id: GroupId) -> Result<Vec<Match>> {
        let ids = read(&self.schedules)
            .get(&group_id)
            .cloned()
            .ok_or(MatchError::GroupNotFound(group_id))?;
        ids.into_iter().map(|id| self.get_match(id)).collect()
    }

    /// Run `f` with exclusive access to one match. `f` must leave the match
    /// unchanged when it returns an error.
    pub fn with_match<R>(&self, id: MatchId, f: impl FnOnce(&mut Match) -> Result<R>) -> Result<R> {
        let slot = read(&self.matches)
            .get(&id)
            .cloned()
            .ok_or(MatchError::MatchNotFound(id))?;
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    /// Run `f` on a match together with its format.
    fn with_match_and_format<R>(
        &self,
        id: MatchId,
        f: impl FnOnce(&mut Match, &Format) -> Result<R>,
    ) -> Result<R> {
        self.with_match(id, |m| {
            let format = self.format(m.format_id)?;
            f(m, &format)
        })
    }

    pub fn assign_umpire(&self, id: MatchId, umpire_id: UserId) -> Result<bool> {
        self.with_match(id, |m| assign_umpire(m, umpire_id))
    }

    pub fn set_serve(&self, id: MatchId, caller: UserId, serve: Serve) -> Result<Match> {
        self.with_match(id, |m| {
            set_serve(m, caller, serve)?;
            Ok(m.clone())
        })
    }

    pub fn record_point(&self, id: MatchId, caller: UserId, side: Side) -> Result<(Match, PointOutcome)> {
        self.with_match_and_format(id, |m, format| {
            let outcome = record_point(m, &format.group, caller, side)?;
            Ok((m.clone(), outcome))
        })
    }

    pub fn undo_last_point(&self, id: MatchId, caller: UserId) -> Result<Match> {
        self.with_match(id, |m| {
            undo_last_point(m, caller)?;
            Ok(m.clone())
        })
    }

    pub fn update_final_score(
        &self,
        id: MatchId,
        caller: UserId,
        team1_score: u32,
        team2_score: u32,
        result: MatchStatus,
    ) -> Result<Match> {
        self.with_match_and_format(id, |m, format| {
            update_final_score(m, &format.group, caller, team1_score, team2_score, result)?;
            Ok(m.clone())
        })
    }

    pub fn declare_outcome(&self, id: MatchId, caller: UserId, status: MatchStatus) -> Result<Match> {
        self.with_match(id, |m| {
            declare_outcome(m, caller, status)?;
            Ok(m.clone())
        })
    }
}

impl TeamRegistry for TournamentStore {
    fn teams_in_group(&self, group_id: GroupId) -> Result<Vec<Team>> {
        let ids = read(&self.group_teams)
            .get(&group_id)
            .cloned()
            .ok_or(MatchError::GroupNotFound(group_id))?;
        let teams = read(&self.teams);
        ids.into_iter()
            .map(|id| teams.get(&id).cloned().ok_or(MatchError::TeamNotFound(id)))
            .collect()
    }
}
