//! Snapshot module - a serializable view of a level
//!
//! Presentation layers and the headless runner read the level through this
//! plain-data copy instead of holding a borrow of the engine.

use serde::Serialize;

use crate::level::TurnState;
use crate::types::Swap;

/// Serializable view of a level between calls
///
/// `board` holds one string per row, top row first, in the same glyph
/// format as `Grid::from_ascii`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSnapshot {
    pub level: String,
    pub seed: u32,
    pub board: Vec<String>,
    pub score: u32,
    pub target_score: u32,
    pub moves_left: u32,
    pub combo_multiplier: u32,
    pub state: TurnState,
    pub possible_swaps: Vec<Swap>,
}

impl LevelSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::level::Level;

    #[test]
    fn test_snapshot_json_fields() {
        let level = Level::load("Level_2", EngineConfig::default(), 7).unwrap();
        let json = level.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["level"], "Level_2");
        assert_eq!(value["movesLeft"], 20);
        assert_eq!(value["state"]["state"], "awaitingSwap");
        assert_eq!(value["board"].as_array().unwrap().len(), 9);
        // central 3x3 is void
        assert_eq!(&value["board"][4].as_str().unwrap()[3..6], "###");
    }
}
