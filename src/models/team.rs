//! Team and Group data structures.

use crate::models::format::FormatId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A team registered in one group: one player for singles, two for doubles.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub group_id: GroupId,
    pub player1_name: String,
    pub player2_name: Option<String>,
}

impl Team {
    /// Create a team in `group_id`. Names are trimmed; an empty second name means singles.
    pub fn new(group_id: GroupId, player1_name: impl Into<String>, player2_name: Option<String>) -> Self {
        let player1_name = player1_name.into().trim().to_string();
        let player2_name = player2_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            id: Uuid::new_v4(),
            group_id,
            player1_name,
            player2_name,
        }
    }

    /// Player names in court order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.player1_name.as_str()).chain(self.player2_name.as_deref())
    }

    pub fn is_doubles(&self) -> bool {
        self.player2_name.is_some()
    }
}

/// A pool of teams that play each other once before any elimination stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub format_id: FormatId,
    pub name: String,
    /// Declared number of teams.
    pub team_count: usize,
}

impl Group {
    pub fn new(format_id: FormatId, name: impl Into<String>, team_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            format_id,
            name: name.into(),
            team_count,
        }
    }
}
