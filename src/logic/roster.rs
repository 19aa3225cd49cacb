//! CSV team rosters: one team per row, `player1_name,player2_name`.

use crate::models::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A team as entered before it belongs to a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub player1_name: String,
    #[serde(default)]
    pub player2_name: Option<String>,
}

impl TeamEntry {
    /// Reject an entry without a first player; `at` locates it in error messages.
    pub(crate) fn check(&self, at: &str) -> Result<()> {
        if self.player1_name.trim().is_empty() {
            return Err(MatchError::InvalidRoster(format!(
                "{}: first player name is empty",
                at
            )));
        }
        Ok(())
    }
}

/// Parse a roster with a header row. The second column may be missing or empty (singles).
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<TeamEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut entries = Vec::new();
    for (i, record) in rdr.deserialize::<TeamEntry>().enumerate() {
        // Row 1 is the header.
        let row = i + 2;
        let mut entry = record.map_err(|e| MatchError::InvalidRoster(format!("row {}: {}", row, e)))?;
        entry.check(&format!("row {}", row))?;
        entry.player2_name = entry.player2_name.filter(|n| !n.is_empty());
        entries.push(entry);
    }
    Ok(entries)
}
