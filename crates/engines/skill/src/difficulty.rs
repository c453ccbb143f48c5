//! Difficulty levels: how deep the engine searches and how loosely it
//! picks among the best moves.
//!
//! Tables can be loaded from TOML or JSON:
//!
//! ```toml
//! [[level]]
//! depth = 1
//! randomness = 0.9
//! label = "Beginner"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("difficulty table has no levels")]
    Empty,

    #[error("level {level}: search depth must be at least 1")]
    ZeroDepth { level: usize },

    #[error("level {level}: randomness {randomness} is outside 0..=1")]
    Randomness { level: usize, randomness: f64 },

    #[error("level {level} is weaker than level {}", .level - 1)]
    NotMonotonic { level: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML difficulty table: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON difficulty table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported difficulty table format: {}", .path.display())]
    UnknownFormat { path: PathBuf },
}

/// One selectable skill level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Search depth in plies, at least 1
    pub depth: u8,
    /// 0 = always a best move; above 0.75 = uniformly random legal move
    pub randomness: f64,
    pub label: String,
}

impl DifficultyProfile {
    pub fn new(depth: u8, randomness: f64, label: impl Into<String>) -> Self {
        Self {
            depth,
            randomness,
            label: label.into(),
        }
    }

    /// Check this profile in isolation. `level` is only used in errors.
    pub fn validate(&self, level: usize) -> Result<(), ProfileError> {
        if self.depth == 0 {
            return Err(ProfileError::ZeroDepth { level });
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return Err(ProfileError::Randomness {
                level,
                randomness: self.randomness,
            });
        }
        Ok(())
    }
}

/// Validated, ordered difficulty levels. Level `n` is entry `n - 1`.
///
/// Each level searches at least as deep and plays at most as randomly as
/// the one below it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyTable {
    #[serde(rename = "level")]
    levels: Vec<DifficultyProfile>,
}

#[derive(Deserialize)]
struct TableFile {
    level: Vec<DifficultyProfile>,
}

impl DifficultyTable {
    pub fn new(levels: Vec<DifficultyProfile>) -> Result<Self, ProfileError> {
        if levels.is_empty() {
            return Err(ProfileError::Empty);
        }
        for (i, profile) in levels.iter().enumerate() {
            profile.validate(i + 1)?;
        }
        for (i, pair) in levels.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            if upper.depth < lower.depth || upper.randomness > lower.randomness {
                return Err(ProfileError::NotMonotonic { level: i + 2 });
            }
        }
        Ok(Self { levels })
    }

    /// The five built-in levels, Beginner to Master.
    pub fn standard() -> Self {
        Self {
            levels: vec![
                DifficultyProfile::new(1, 0.9, "Beginner"),
                DifficultyProfile::new(1, 0.35, "Amateur"),
                DifficultyProfile::new(2, 0.15, "Experienced"),
                DifficultyProfile::new(3, 0.05, "Expert"),
                DifficultyProfile::new(3, 0.0, "Master"),
            ],
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ProfileError> {
        let file: TableFile = toml::from_str(text)?;
        Self::new(file.level)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ProfileError> {
        let file: TableFile = serde_json::from_str(text)?;
        Self::new(file.level)
    }

    /// Load a table from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let read = || {
            std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
                path: path.to_path_buf(),
                source,
            })
        };
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&read()?),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&read()?),
            _ => Err(ProfileError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Highest level number.
    pub fn max_level(&self) -> u8 {
        u8::try_from(self.levels.len()).unwrap_or(u8::MAX)
    }

    pub fn contains(&self, level: u8) -> bool {
        (1..=self.max_level()).contains(&level)
    }

    /// The level actually used for `level`: itself if known, otherwise 1.
    pub fn resolve(&self, level: u8) -> u8 {
        if self.contains(level) {
            level
        } else {
            debug!(level, fallback = 1, "unknown difficulty level");
            1
        }
    }

    /// Profile for `level`, falling back to level 1 when it is unknown.
    pub fn profile(&self, level: u8) -> &DifficultyProfile {
        let level = self.resolve(level);
        &self.levels[usize::from(level) - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &DifficultyProfile)> + '_ {
        (1..=self.max_level()).zip(self.levels.iter())
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "difficulty_tests.rs"]
mod difficulty_tests;
