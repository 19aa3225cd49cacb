//! Match (two teams, a sequence of games) and MatchStatus.

use crate::models::format::FormatId;
use crate::models::game::{Game, Side};
use crate::models::team::{GroupId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Authenticated user identity (umpires).
pub type UserId = Uuid;

/// Status of a match. Numeric codes are stable for persistence.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Cancelled,
    Team1Wins,
    Team2Wins,
    Team1Retires,
    Team2Retires,
    Team1Absent,
    Team2Absent,
}

impl MatchStatus {
    pub fn code(self) -> u8 {
        use MatchStatus::*;
        match self {
            Pending => 0,
            InProgress => 1,
            Cancelled => 2,
            Team1Wins => 3,
            Team2Wins => 4,
            Team1Retires => 5,
            Team2Retires => 6,
            Team1Absent => 7,
            Team2Absent => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        use MatchStatus::*;
        Some(match code {
            0 => Pending,
            1 => InProgress,
            2 => Cancelled,
            3 => Team1Wins,
            4 => Team2Wins,
            5 => Team1Retires,
            6 => Team2Retires,
            7 => Team1Absent,
            8 => Team2Absent,
            _ => return None,
        })
    }

    /// A result has been reached (win, retirement or absence).
    pub fn is_decided(self) -> bool {
        use MatchStatus::*;
        matches!(
            self,
            Team1Wins | Team2Wins | Team1Retires | Team2Retires | Team1Absent | Team2Absent
        )
    }

    /// No further transitions: decided or cancelled.
    pub fn is_terminal(self) -> bool {
        self.is_decided() || self == MatchStatus::Cancelled
    }

    /// Side credited with the match, if any. A retiring or absent team loses.
    pub fn winning_side(self) -> Option<Side> {
        use MatchStatus::*;
        match self {
            Team1Wins | Team2Retires | Team2Absent => Some(Side::Team1),
            Team2Wins | Team1Retires | Team1Absent => Some(Side::Team2),
            Pending | InProgress | Cancelled => None,
        }
    }
}

/// A match between two teams of a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub format_id: FormatId,
    pub group_id: GroupId,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    /// None until an umpire claims the match.
    pub umpire_id: Option<UserId>,
    pub court_num: Option<String>,
    pub result: MatchStatus,
    /// None until decided.
    pub winner_id: Option<TeamId>,
    /// Games won (or points, for a best-of-one override) once decided.
    pub team1_final_score: Option<u32>,
    pub team2_final_score: Option<u32>,
    /// Ordered games; the last one is the one being played.
    pub games: Vec<Game>,
    pub started_at: Option<DateTime<Utc>>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Match {
    /// A pending match shell with no umpire, no games and no result.
    pub fn new(format_id: FormatId, group_id: GroupId, team1_id: TeamId, team2_id: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            format_id,
            group_id,
            team1_id,
            team2_id,
            umpire_id: None,
            court_num: None,
            result: MatchStatus::Pending,
            winner_id: None,
            team1_final_score: None,
            team2_final_score: None,
            games: Vec::new(),
            started_at: None,
            decided_at: None,
        }
    }

    pub fn team_id(&self, side: Side) -> TeamId {
        match side {
            Side::Team1 => self.team1_id,
            Side::Team2 => self.team2_id,
        }
    }

    /// The game being played (the last one).
    pub fn current_game_mut(&mut self) -> Option<&mut Game> {
        self.games.last_mut()
    }
}
