//! Court sport tournament organizer: library with models, round-robin scheduling and
//! live match scoring.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    assign_umpire, build_match_shell, build_match_shells, declare_outcome, finished_game_winner,
    game_winner, games_won, generate_group_matches, generate_pairings, generate_schedule,
    is_game_decided, is_match_decided, read_roster, record_point, set_serve, undo_last_point,
    update_final_score, PointOutcome, Schedule, ScheduleOptions, TeamEntry, TeamRegistry,
};
pub use models::{
    BestOf, ErrorKind, Format, FormatId, FormatType, Game, Group, GroupId, Match, MatchError,
    MatchId, MatchStatus, PlayerSlot, PlayoffFormat, Result, ScoreSnapshot, Serve, Side,
    StageRules, Team, TeamId, UserId, WinCondition,
};
pub use store::TournamentStore;
