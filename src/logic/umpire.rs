//! Live match control: umpire claim, point scoring, undo, and result overrides.
//!
//! Every scoring operation checks the caller against the umpire pinned at assignment
//! and only runs while the match is in progress. Checks happen before any mutation, so
//! a rejected call leaves the match untouched.

use crate::logic::scoring::{game_winner, games_won, is_game_decided, is_match_decided};
use crate::models::{
    BestOf, Game, Match, MatchError, MatchStatus, Result, Serve, Side, StageRules, UserId,
};
use chrono::Utc;
use serde::Serialize;

/// What a recorded point did to the match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PointOutcome {
    /// The point finished the game it was scored in.
    pub game_decided: bool,
    /// Winner of that game, when finished.
    pub game_winner: Option<Side>,
    /// Final result, when the point also finished the match.
    pub result: Option<MatchStatus>,
}

/// Claim a pending match for `umpire_id` and start it.
///
/// Returns `Ok(false)` when the match already has an umpire; the first claim wins and
/// is never overwritten.
pub fn assign_umpire(game_match: &mut Match, umpire_id: UserId) -> Result<bool> {
    if game_match.umpire_id.is_some() {
        log::info!("Match {} already claimed, rejecting {}", game_match.id, umpire_id);
        return Ok(false);
    }
    if game_match.result.is_terminal() {
        return Err(MatchError::AlreadyDecided(game_match.result));
    }
    game_match.umpire_id = Some(umpire_id);
    game_match.result = MatchStatus::InProgress;
    game_match.started_at = Some(Utc::now());
    if game_match.games.is_empty() {
        game_match.games.push(Game::new());
    }
    log::info!("Umpire {} claimed match {}", umpire_id, game_match.id);
    Ok(true)
}

/// The match must be in progress and the caller must be its umpire.
fn authorize(game_match: &Match, caller: UserId) -> Result<()> {
    if game_match.result != MatchStatus::InProgress || game_match.umpire_id.is_none() {
        return Err(MatchError::NotInProgress(game_match.result));
    }
    if game_match.umpire_id != Some(caller) {
        log::warn!("User {} tried to score match {} without being its umpire", caller, game_match.id);
        return Err(MatchError::NotUmpire { caller });
    }
    Ok(())
}

fn current_game(game_match: &mut Match) -> &mut Game {
    if game_match.games.is_empty() {
        game_match.games.push(Game::new());
    }
    let last = game_match.games.len() - 1;
    &mut game_match.games[last]
}

/// Set the server and receiver for the coming rally in the current game.
pub fn set_serve(game_match: &mut Match, caller: UserId, serve: Serve) -> Result<()> {
    authorize(game_match, caller)?;
    if serve.server.side == serve.receiver.side {
        return Err(MatchError::InvalidServe(
            "server and receiver must be on opposite sides".to_string(),
        ));
    }
    for slot in [serve.server, serve.receiver] {
        if !(1..=2).contains(&slot.player) {
            return Err(MatchError::InvalidServe(format!(
                "player {} does not exist, expected 1 or 2",
                slot.player
            )));
        }
    }
    current_game(game_match).serve = Some(serve);
    Ok(())
}

/// Score one point for `side` in the current game.
///
/// A finished game opens a fresh 0-0 game unless the match is now decided, in which
/// case the result, winner and final game counts are set and no game is added.
pub fn record_point(
    game_match: &mut Match,
    rules: &StageRules,
    caller: UserId,
    side: Side,
) -> Result<PointOutcome> {
    authorize(game_match, caller)?;

    let game = current_game(game_match);
    game.add_point(side);
    let (team1_score, team2_score) = (game.team1_score, game.team2_score);
    let game_decided = is_game_decided(team1_score, team2_score, rules);
    log::debug!(
        "Match {}: point {:?}, game {} at {}-{}",
        game_match.id,
        side,
        game_match.games.len(),
        team1_score,
        team2_score
    );

    let result = is_match_decided(&game_match.games, rules);
    match result {
        Some(status) => {
            let (team1_games, team2_games) = games_won(&game_match.games, rules);
            decide(game_match, status, team1_games, team2_games);
        }
        None if game_decided => {
            game_match.games.push(Game::new());
            log::debug!("Match {}: starting game {}", game_match.id, game_match.games.len());
        }
        None => {}
    }

    Ok(PointOutcome {
        game_decided,
        game_winner: if game_decided {
            game_winner(team1_score, team2_score)
        } else {
            None
        },
        result,
    })
}

/// Revert the last point of the current game, restoring its score and serve.
///
/// Only the game being played can be undone; an empty history (including a game that
/// was just opened after the previous one finished) is rejected.
pub fn undo_last_point(game_match: &mut Match, caller: UserId) -> Result<()> {
    authorize(game_match, caller)?;
    let reverted = game_match
        .current_game_mut()
        .map(Game::revert_point)
        .unwrap_or(false);
    if !reverted {
        return Err(MatchError::NothingToUndo);
    }
    log::debug!("Match {}: undid last point", game_match.id);
    Ok(())
}

/// Accept a final score entered directly by the umpire, if it supports `result`.
///
/// For best-of-one the scores are game points and must be a finished game won by the
/// declared side; the match then holds that single game. For longer matches they are
/// games won: the declared side must have exactly enough games while the other has
/// fewer, and neither count may be below the games that side already won live. An
/// unfinished current game is dropped.
pub fn update_final_score(
    game_match: &mut Match,
    rules: &StageRules,
    caller: UserId,
    team1_score: u32,
    team2_score: u32,
    result: MatchStatus,
) -> Result<()> {
    authorize(game_match, caller)?;
    let declared = match result {
        MatchStatus::Team1Wins => Side::Team1,
        MatchStatus::Team2Wins => Side::Team2,
        other => return Err(MatchError::NotDecisive(other)),
    };

    let consistent = match rules.best_of {
        BestOf::One => {
            is_game_decided(team1_score, team2_score, rules)
                && game_winner(team1_score, team2_score) == Some(declared)
        }
        BestOf::Three | BestOf::Five => {
            let needed = rules.best_of.games_to_win();
            let (winner, loser) = match declared {
                Side::Team1 => (team1_score, team2_score),
                Side::Team2 => (team2_score, team1_score),
            };
            let (live1, live2) = games_won(&game_match.games, rules);
            winner == needed && loser < needed && team1_score >= live1 && team2_score >= live2
        }
    };
    if !consistent {
        return Err(MatchError::ResultMismatch {
            declared: result,
            team1_score,
            team2_score,
        });
    }

    if rules.best_of == BestOf::One {
        game_match.games = vec![Game::with_score(team1_score, team2_score)];
    } else {
        game_match
            .games
            .retain(|g| is_game_decided(g.team1_score, g.team2_score, rules));
    }
    decide(game_match, result, team1_score, team2_score);
    Ok(())
}

/// Administrative result: cancellation, retirement or absence.
///
/// A retiring or absent team loses to the other one; a cancelled match has no winner.
/// Once an umpire has claimed the match, only that umpire may close it.
pub fn declare_outcome(game_match: &mut Match, caller: UserId, status: MatchStatus) -> Result<()> {
    use MatchStatus::*;
    if !matches!(
        status,
        Cancelled | Team1Retires | Team2Retires | Team1Absent | Team2Absent
    ) {
        return Err(MatchError::NotAdministrative(status));
    }
    if game_match.result.is_terminal() {
        return Err(MatchError::AlreadyDecided(game_match.result));
    }
    if game_match.umpire_id.is_some_and(|umpire| umpire != caller) {
        log::warn!("User {} tried to close match {} without being its umpire", caller, game_match.id);
        return Err(MatchError::NotUmpire { caller });
    }
    game_match.result = status;
    game_match.winner_id = status.winning_side().map(|side| game_match.team_id(side));
    game_match.decided_at = Some(Utc::now());
    log::info!(
        "Match {} closed administratively by {}: {:?}",
        game_match.id,
        caller,
        status
    );
    Ok(())
}

fn decide(game_match: &mut Match, status: MatchStatus, team1_score: u32, team2_score: u32) {
    game_match.result = status;
    game_match.winner_id = status.winning_side().map(|side| game_match.team_id(side));
    game_match.team1_final_score = Some(team1_score);
    game_match.team2_final_score = Some(team2_score);
    game_match.decided_at = Some(Utc::now());
    log::info!(
        "Match {} decided: {:?} ({}-{})",
        game_match.id,
        status,
        team1_score,
        team2_score
    );
}
