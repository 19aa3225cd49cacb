//! Pure scoring rules: when a game is over, who won it, and when a match is decided.

use crate::models::{Game, MatchStatus, Side, StageRules, WinCondition};

/// Whether a game with this score is over under `rules`.
///
/// The hard cap always ends the game. Otherwise `Exact` ends it when either side is on
/// the target, and `TwoPointMargin` when the leader is at or past the target and two
/// points clear. A level score is never decided; point-by-point play cannot reach one
/// at the target or cap.
pub fn is_game_decided(team1_score: u32, team2_score: u32, rules: &StageRules) -> bool {
    if team1_score == team2_score {
        return false;
    }
    let leader = team1_score.max(team2_score);
    let trailer = team1_score.min(team2_score);
    if leader >= rules.max_score {
        return true;
    }
    match rules.win_condition {
        WinCondition::Exact => {
            team1_score == rules.target_score || team2_score == rules.target_score
        }
        WinCondition::TwoPointMargin => leader >= rules.target_score && leader - trailer >= 2,
    }
}

/// Side ahead on points, or None when level.
pub fn game_winner(team1_score: u32, team2_score: u32) -> Option<Side> {
    match team1_score.cmp(&team2_score) {
        std::cmp::Ordering::Greater => Some(Side::Team1),
        std::cmp::Ordering::Less => Some(Side::Team2),
        std::cmp::Ordering::Equal => None,
    }
}

/// Winner of a finished game; None while the game is still open.
pub fn finished_game_winner(game: &Game, rules: &StageRules) -> Option<Side> {
    if is_game_decided(game.team1_score, game.team2_score, rules) {
        game_winner(game.team1_score, game.team2_score)
    } else {
        None
    }
}

/// Finished games won by (team 1, team 2).
pub fn games_won(games: &[Game], rules: &StageRules) -> (u32, u32) {
    games
        .iter()
        .filter_map(|g| finished_game_winner(g, rules))
        .fold((0, 0), |(t1, t2), side| match side {
            Side::Team1 => (t1 + 1, t2),
            Side::Team2 => (t1, t2 + 1),
        })
}

/// `Team1Wins`/`Team2Wins` once a side has won enough finished games, else None.
pub fn is_match_decided(games: &[Game], rules: &StageRules) -> Option<MatchStatus> {
    let needed = rules.best_of.games_to_win();
    let (team1, team2) = games_won(games, rules);
    if team1 >= needed {
        Some(MatchStatus::Team1Wins)
    } else if team2 >= needed {
        Some(MatchStatus::Team2Wins)
    } else {
        None
    }
}
