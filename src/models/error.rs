//! Errors for scheduling and scoring operations.

use crate::models::format::FormatId;
use crate::models::game_match::{MatchId, MatchStatus, UserId};
use crate::models::team::{GroupId, TeamId};
use thiserror::Error;

/// Broad class of a [`MatchError`], used by callers to decide how to surface it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed or constraint-violating input.
    Validation,
    /// The operation is not allowed in the match's current state.
    Precondition,
    /// Caller is not the umpire pinned to the match.
    Authorization,
    /// A referenced record does not exist.
    NotFound,
}

/// Errors that can occur while scheduling or scoring matches.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum MatchError {
    #[error("invalid scoring rules: {0}")]
    InvalidRules(String),

    #[error("invalid serve selection: {0}")]
    InvalidServe(String),

    #[error("declared result {declared:?} does not match the scores {team1_score}-{team2_score}")]
    ResultMismatch {
        declared: MatchStatus,
        team1_score: u32,
        team2_score: u32,
    },

    #[error("{0:?} is not a decisive result")]
    NotDecisive(MatchStatus),

    #[error("{0:?} cannot be declared administratively")]
    NotAdministrative(MatchStatus),

    #[error("group {group} belongs to format {expected}, not {given}")]
    FormatMismatch {
        group: GroupId,
        expected: FormatId,
        given: FormatId,
    },

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("match is {0:?}, scores can only change while it is in progress")]
    NotInProgress(MatchStatus),

    #[error("match is already decided ({0:?})")]
    AlreadyDecided(MatchStatus),

    #[error("no point recorded in the current game")]
    NothingToUndo,

    #[error("user {caller} is not the umpire of this match")]
    NotUmpire { caller: UserId },

    #[error("format not found: {0}")]
    FormatNotFound(FormatId),

    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("match not found: {0}")]
    MatchNotFound(MatchId),
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        use MatchError::*;
        match self {
            InvalidRules(_) | InvalidServe(_) | ResultMismatch { .. } | NotDecisive(_)
            | NotAdministrative(_) | FormatMismatch { .. } | InvalidRoster(_) => {
                ErrorKind::Validation
            }
            NotInProgress(_) | AlreadyDecided(_) | NothingToUndo => ErrorKind::Precondition,
            NotUmpire { .. } => ErrorKind::Authorization,
            FormatNotFound(_) | GroupNotFound(_) | TeamNotFound(_) | MatchNotFound(_) => {
                ErrorKind::NotFound
            }
        }
    }
}

pub type Result<T, E = MatchError> = std::result::Result<T, E>;
