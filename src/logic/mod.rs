//! Tournament business logic: round-robin scheduling, match shells, scoring, umpiring.

mod group_stage;
mod match_factory;
mod pairing;
mod roster;
mod scoring;
mod umpire;

pub use group_stage::{generate_group_matches, TeamRegistry};
pub use match_factory::{build_match_shell, build_match_shells};
pub use pairing::{generate_pairings, generate_schedule, Schedule, ScheduleOptions};
pub use roster::{read_roster, TeamEntry};
pub use scoring::{finished_game_winner, game_winner, games_won, is_game_decided, is_match_decided};
pub use umpire::{
    assign_umpire, declare_outcome, record_point, set_serve, undo_last_point, update_final_score,
    PointOutcome,
};
