//! Data structures for the tournament: formats, groups, teams, matches and games.

mod error;
mod format;
mod game;
mod game_match;
mod team;

pub use error::{ErrorKind, MatchError, Result};
pub use format::{BestOf, Format, FormatId, FormatType, PlayoffFormat, StageRules, WinCondition};
pub use game::{Game, PlayerSlot, ScoreSnapshot, Serve, Side};
pub use game_match::{Match, MatchId, MatchStatus, UserId};
pub use team::{Group, GroupId, Team, TeamId};
