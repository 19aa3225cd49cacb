//! Integration tests for CSV roster parsing.

use court_tournament::{read_roster, ErrorKind, TeamEntry};

#[test]
fn reads_singles_and_doubles() {
    let csv = "player1_name,player2_name\nAnna, Ben\nCarl,\nDora\n";
    let teams = read_roster(csv.as_bytes()).unwrap();
    assert_eq!(
        teams,
        vec![
            TeamEntry {
                player1_name: "Anna".to_string(),
                player2_name: Some("Ben".to_string()),
            },
            TeamEntry {
                player1_name: "Carl".to_string(),
                player2_name: None,
            },
            TeamEntry {
                player1_name: "Dora".to_string(),
                player2_name: None,
            },
        ]
    );
}

#[test]
fn header_only_is_empty() {
    assert!(read_roster("player1_name,player2_name\n".as_bytes()).unwrap().is_empty());
}

#[test]
fn empty_first_player_is_rejected() {
    let err = read_roster("player1_name,player2_name\n,Ben\n".as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("row 2"));
}
