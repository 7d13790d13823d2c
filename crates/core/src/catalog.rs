//! Level definitions and the level catalog.
//!
//! ## Sources (priority order):
//!   1. `<levels_dir>/<name>.json` when a levels directory is configured
//!   2. Built-in embedded levels `Level_0` .. `Level_4`
//!
//! ## File format:
//!   ```json
//!   { "tiles": [[1, 1, 0, ...], ...], "targetScore": 1000, "moves": 15 }
//!   ```
//!   `tiles` has 9 rows of 9 entries, **top row first**; `1` is playable,
//!   `0` is void.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::LevelLoadError;
use crate::layout::Layout;
use crate::types::{NUM_COLUMNS, NUM_ROWS};

const BUILTIN_LEVELS: [(&str, &str); 5] = [
    ("Level_0", include_str!("../levels/Level_0.json")),
    ("Level_1", include_str!("../levels/Level_1.json")),
    ("Level_2", include_str!("../levels/Level_2.json")),
    ("Level_3", include_str!("../levels/Level_3.json")),
    ("Level_4", include_str!("../levels/Level_4.json")),
];

/// Immutable per-level parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    pub name: String,
    pub layout: Layout,
    pub target_score: u32,
    pub maximum_moves: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawLevel {
    tiles: Vec<Vec<u8>>,
    target_score: u32,
    moves: u32,
}

impl LevelDefinition {
    /// Parse and validate a level file body
    pub fn from_json(name: &str, text: &str) -> Result<Self, LevelLoadError> {
        let raw: RawLevel = serde_json::from_str(text)?;

        if raw.tiles.len() != NUM_ROWS as usize {
            return Err(LevelLoadError::BadMask {
                reason: format!("expected {} rows, found {}", NUM_ROWS, raw.tiles.len()),
            });
        }
        let mut rows = [[false; NUM_COLUMNS as usize]; NUM_ROWS as usize];
        for (i, line) in raw.tiles.iter().enumerate() {
            if line.len() != NUM_COLUMNS as usize {
                return Err(LevelLoadError::BadMask {
                    reason: format!("row {} has {} entries", i, line.len()),
                });
            }
            for (j, cell) in line.iter().enumerate() {
                rows[i][j] = match *cell {
                    0 => false,
                    1 => true,
                    other => {
                        return Err(LevelLoadError::BadMask {
                            reason: format!("tile value {} at row {} column {}", other, i, j),
                        })
                    }
                };
            }
        }

        let layout = Layout::from_rows_top_down(&rows);
        if layout.playable_count() == 0 {
            return Err(LevelLoadError::BadMask {
                reason: "no playable tiles".into(),
            });
        }
        if raw.moves == 0 {
            return Err(LevelLoadError::BadParameter {
                reason: "moves must be positive".into(),
            });
        }
        if raw.target_score == 0 {
            return Err(LevelLoadError::BadParameter {
                reason: "targetScore must be positive".into(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            layout,
            target_score: raw.target_score,
            maximum_moves: raw.moves,
        })
    }
}

/// Resolves level names to definitions
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels_dir: Option<PathBuf>,
}

impl LevelCatalog {
    pub fn new(levels_dir: Option<PathBuf>) -> Self {
        Self { levels_dir }
    }

    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_LEVELS.iter().map(|(name, _)| *name)
    }

    pub fn load(&self, name: &str) -> Result<LevelDefinition, LevelLoadError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(LevelLoadError::UnknownLevel(name.to_string()));
        }

        if let Some(dir) = &self.levels_dir {
            let path = dir.join(format!("{}.json", name));
            if path.is_file() {
                let def = load_file(name, &path)?;
                info!(level = name, path = %path.display(), "loaded level from file");
                return Ok(def);
            }
            debug!(level = name, dir = %dir.display(), "level not in directory, trying built-ins");
        }

        let (_, text) = BUILTIN_LEVELS
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .ok_or_else(|| LevelLoadError::UnknownLevel(name.to_string()))?;
        let def = LevelDefinition::from_json(name, text)?;
        info!(level = name, "loaded built-in level");
        Ok(def)
    }
}

fn load_file(name: &str, path: &Path) -> Result<LevelDefinition, LevelLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    LevelDefinition::from_json(name, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn test_all_builtins_parse() {
        let catalog = LevelCatalog::default();
        for name in LevelCatalog::builtin_names() {
            let def = catalog.load(name).unwrap();
            assert_eq!(def.name, name);
            assert!(def.layout.playable_count() > 0);
            assert!(def.maximum_moves > 0);
        }
    }

    #[test]
    fn test_level_1_corners_are_void() {
        let def = LevelCatalog::default().load("Level_1").unwrap();
        assert!(!def.layout.contains(Position::new(0, 0)));
        assert!(!def.layout.contains(Position::new(0, 8)));
        assert!(def.layout.contains(Position::new(4, 4)));
        assert_eq!(def.target_score, 1500);
        assert_eq!(def.maximum_moves, 20);
    }

    #[test]
    fn test_unknown_level() {
        let catalog = LevelCatalog::default();
        for name in ["Level_99", "", "../Level_0", "Level_0/x"] {
            assert!(matches!(
                catalog.load(name),
                Err(LevelLoadError::UnknownLevel(_))
            ));
        }
    }

    #[test]
    fn test_malformed_levels() {
        let short = r#"{"tiles": [[1,1,1]], "targetScore": 10, "moves": 5}"#;
        assert!(matches!(
            LevelDefinition::from_json("x", short),
            Err(LevelLoadError::BadMask { .. })
        ));

        let row = "[1,1,1,1,1,1,1,1,1]";
        let rows = vec![row; 9].join(",");
        let zero_moves = format!(r#"{{"tiles": [{}], "targetScore": 10, "moves": 0}}"#, rows);
        assert!(matches!(
            LevelDefinition::from_json("x", &zero_moves),
            Err(LevelLoadError::BadParameter { .. })
        ));

        let bad_value = format!(
            r#"{{"tiles": [{},[1,1,1,1,2,1,1,1,1]], "targetScore": 10, "moves": 3}}"#,
            vec![row; 8].join(",")
        );
        assert!(matches!(
            LevelDefinition::from_json("x", &bad_value),
            Err(LevelLoadError::BadMask { .. })
        ));

        let empty = format!(
            r#"{{"tiles": [{}], "targetScore": 10, "moves": 3}}"#,
            vec!["[0,0,0,0,0,0,0,0,0]"; 9].join(",")
        );
        assert!(matches!(
            LevelDefinition::from_json("x", &empty),
            Err(LevelLoadError::BadMask { .. })
        ));

        assert!(matches!(
            LevelDefinition::from_json("x", "not json"),
            Err(LevelLoadError::Json(_))
        ));
    }
}
