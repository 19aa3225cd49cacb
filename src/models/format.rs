//! Format: the scoring and competition ruleset applied to a group's matches.

use crate::models::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a format.
pub type FormatId = Uuid;

/// How a game ends once the target score is reached.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// First to the target score wins.
    #[default]
    Exact,
    /// Target score with a two-point lead, up to the hard cap.
    TwoPointMargin,
}

/// Number of games a match is played over.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BestOf {
    #[default]
    One,
    Three,
    Five,
}

impl BestOf {
    /// Maximum number of games in a match.
    pub fn value(self) -> u32 {
        match self {
            BestOf::One => 1,
            BestOf::Three => 3,
            BestOf::Five => 5,
        }
    }

    /// Games one side must win to take the match.
    pub fn games_to_win(self) -> u32 {
        self.value().div_ceil(2)
    }
}

/// Playoff bracket type. Only stored; bracket generation is not provided.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayoffFormat {
    #[default]
    SingleElimination,
    DoubleElimination,
}

/// Competition category.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    #[default]
    MenSingles,
    WomenSingles,
    MenDoubles,
    WomenDoubles,
    MixedDoubles,
}

/// Scoring rules for one stage (group or playoff).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StageRules {
    /// Score at which a game can end.
    pub target_score: u32,
    /// Hard cap: reaching it ends the game regardless of margin.
    pub max_score: u32,
    pub win_condition: WinCondition,
    pub best_of: BestOf,
}

impl StageRules {
    pub fn new(
        target_score: u32,
        max_score: u32,
        win_condition: WinCondition,
        best_of: BestOf,
    ) -> Result<Self> {
        let rules = Self {
            target_score,
            max_score,
            win_condition,
            best_of,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Check `target_score >= 1` and `max_score >= target_score`.
    pub fn validate(&self) -> Result<()> {
        if self.target_score == 0 {
            return Err(MatchError::InvalidRules(
                "target score must be at least 1".to_string(),
            ));
        }
        if self.max_score < self.target_score {
            return Err(MatchError::InvalidRules(format!(
                "max score {} is below target score {}",
                self.max_score, self.target_score
            )));
        }
        Ok(())
    }
}

impl Default for StageRules {
    /// 21 points, first to 21.
    fn default() -> Self {
        Self {
            target_score: 21,
            max_score: 21,
            win_condition: WinCondition::Exact,
            best_of: BestOf::One,
        }
    }
}

/// Scoring/competition configuration, fixed for the lifetime of a tournament stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Format {
    pub id: FormatId,
    pub format_type: FormatType,
    pub num_of_groups: u32,
    /// Rules for group-stage matches.
    pub group: StageRules,
    /// Rules for playoff matches (stored only).
    pub playoff: StageRules,
    pub playoff_format: PlayoffFormat,
}

impl Format {
    /// Create a format with validated group and playoff rules.
    pub fn new(
        format_type: FormatType,
        num_of_groups: u32,
        group: StageRules,
        playoff: StageRules,
        playoff_format: PlayoffFormat,
    ) -> Result<Self> {
        group.validate()?;
        playoff.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            format_type,
            num_of_groups,
            group,
            playoff,
            playoff_format,
        })
    }

    /// Single-group format with the same rules for both stages.
    pub fn with_group_rules(group: StageRules) -> Result<Self> {
        Self::new(
            FormatType::default(),
            1,
            group,
            group,
            PlayoffFormat::default(),
        )
    }
}
