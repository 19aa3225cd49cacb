//! Integration tests for game and match decision rules.

use court_tournament::{
    game_winner, games_won, is_game_decided, is_match_decided, BestOf, Game, MatchStatus, Side,
    StageRules, WinCondition,
};

fn exact_21() -> StageRules {
    StageRules::new(21, 21, WinCondition::Exact, BestOf::One).unwrap()
}

fn margin_21_cap_30(best_of: BestOf) -> StageRules {
    StageRules::new(21, 30, WinCondition::TwoPointMargin, best_of).unwrap()
}

#[test]
fn rules_are_validated() {
    assert!(StageRules::new(0, 21, WinCondition::Exact, BestOf::One).is_err());
    assert!(StageRules::new(21, 20, WinCondition::Exact, BestOf::One).is_err());
    assert!(StageRules::new(21, 21, WinCondition::Exact, BestOf::One).is_ok());
}

#[test]
fn best_of_games_to_win() {
    assert_eq!(BestOf::One.games_to_win(), 1);
    assert_eq!(BestOf::Three.games_to_win(), 2);
    assert_eq!(BestOf::Five.games_to_win(), 3);
}

#[test]
fn exact_game_ends_on_target() {
    let rules = exact_21();
    assert!(is_game_decided(21, 19, &rules));
    assert_eq!(game_winner(21, 19), Some(Side::Team1));
    assert!(is_game_decided(5, 21, &rules));
    assert_eq!(game_winner(5, 21), Some(Side::Team2));
    assert!(!is_game_decided(20, 20, &rules));
    assert!(!is_game_decided(20, 0, &rules));
}

#[test]
fn exact_game_with_higher_cap_still_ends_on_target() {
    let rules = StageRules::new(11, 15, WinCondition::Exact, BestOf::One).unwrap();
    assert!(is_game_decided(11, 10, &rules));
    assert!(!is_game_decided(10, 10, &rules));
}

#[test]
fn margin_game_needs_two_clear() {
    let rules = margin_21_cap_30(BestOf::One);
    assert!(!is_game_decided(21, 20, &rules));
    assert!(is_game_decided(22, 20, &rules));
    assert_eq!(game_winner(22, 20), Some(Side::Team1));
    assert!(is_game_decided(21, 5, &rules));
    assert!(!is_game_decided(20, 10, &rules));
    assert!(!is_game_decided(28, 27, &rules));
}

#[test]
fn cap_ends_game_regardless_of_margin() {
    let rules = margin_21_cap_30(BestOf::One);
    assert!(is_game_decided(30, 29, &rules));
    assert_eq!(game_winner(30, 29), Some(Side::Team1));
    assert!(is_game_decided(29, 30, &rules));
    assert_eq!(game_winner(29, 30), Some(Side::Team2));
}

#[test]
fn decided_game_is_never_tied() {
    let all_rules = [
        exact_21(),
        margin_21_cap_30(BestOf::One),
        StageRules::new(1, 1, WinCondition::Exact, BestOf::One).unwrap(),
        StageRules::new(11, 15, WinCondition::Exact, BestOf::One).unwrap(),
        StageRules::new(15, 15, WinCondition::TwoPointMargin, BestOf::One).unwrap(),
    ];
    for rules in &all_rules {
        for t1 in 0..=35 {
            for t2 in 0..=35 {
                if is_game_decided(t1, t2, rules) {
                    assert!(
                        game_winner(t1, t2).is_some(),
                        "{t1}-{t2} decided without a winner under {rules:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn best_of_three_needs_two_games() {
    let rules = margin_21_cap_30(BestOf::Three);
    let mut games = vec![Game::with_score(21, 15), Game::with_score(19, 21)];
    assert_eq!(is_match_decided(&games, &rules), None);
    assert_eq!(games_won(&games, &rules), (1, 1));

    games.push(Game::with_score(21, 18));
    assert_eq!(is_match_decided(&games, &rules), Some(MatchStatus::Team1Wins));
}

#[test]
fn unfinished_games_do_not_count() {
    let rules = margin_21_cap_30(BestOf::Three);
    let games = vec![
        Game::with_score(15, 21),
        Game::with_score(20, 21),
        Game::with_score(0, 0),
    ];
    assert_eq!(games_won(&games, &rules), (0, 1));
    assert_eq!(is_match_decided(&games, &rules), None);
}

#[test]
fn best_of_five_team2() {
    let rules = StageRules::new(11, 11, WinCondition::Exact, BestOf::Five).unwrap();
    let games = vec![
        Game::with_score(11, 4),
        Game::with_score(9, 11),
        Game::with_score(7, 11),
        Game::with_score(11, 3),
        Game::with_score(10, 11),
    ];
    assert_eq!(is_match_decided(&games, &rules), Some(MatchStatus::Team2Wins));
}

#[test]
fn status_codes_and_predicates() {
    for code in 0..=8u8 {
        let status = MatchStatus::from_code(code).unwrap();
        assert_eq!(status.code(), code);
        assert_eq!(status.is_decided(), code >= 3);
    }
    assert_eq!(MatchStatus::from_code(9), None);
    assert!(MatchStatus::Cancelled.is_terminal());
    assert!(!MatchStatus::InProgress.is_terminal());
    assert_eq!(MatchStatus::Team1Retires.winning_side(), Some(Side::Team2));
    assert_eq!(MatchStatus::Team2Absent.winning_side(), Some(Side::Team1));
    assert_eq!(MatchStatus::Cancelled.winning_side(), None);
}
