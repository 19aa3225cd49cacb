//! Game (one scored game inside a match), Side, and serve tracking.

use serde::{Deserialize, Serialize};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Team1,
    Team2,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

/// A player position on court: which side, and which of its (up to two) players.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub side: Side,
    /// 1 or 2.
    pub player: u8,
}

/// Server and receiver selected for the coming rally.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Serve {
    pub server: PlayerSlot,
    pub receiver: PlayerSlot,
}

/// Score (and serve) before a recorded point; undo restores it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub team1_score: u32,
    pub team2_score: u32,
    pub serve: Option<Serve>,
}

/// A single game. Scores only go up while playing; undo pops the last snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub team1_score: u32,
    pub team2_score: u32,
    pub serve: Option<Serve>,
    #[serde(default)]
    pub history: Vec<ScoreSnapshot>,
}

impl Game {
    /// A fresh 0-0 game.
    pub fn new() -> Self {
        Self::default()
    }

    /// A game with a known final score and no point history (e.g. from an override).
    pub fn with_score(team1_score: u32, team2_score: u32) -> Self {
        Self {
            team1_score,
            team2_score,
            ..Self::default()
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Team1 => self.team1_score,
            Side::Team2 => self.team2_score,
        }
    }

    /// Add one point for `side`, remembering the previous state.
    pub fn add_point(&mut self, side: Side) {
        self.history.push(self.snapshot());
        match side {
            Side::Team1 => self.team1_score += 1,
            Side::Team2 => self.team2_score += 1,
        }
    }

    /// Revert to the state before the last point. Returns false if there is none.
    pub fn revert_point(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.team1_score = prev.team1_score;
                self.team2_score = prev.team2_score;
                self.serve = prev.serve;
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            team1_score: self.team1_score,
            team2_score: self.team2_score,
            serve: self.serve,
        }
    }
}
