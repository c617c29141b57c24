use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Shape of the weekly slot grid.
///
/// `start` and `end` are `HH:MM` strings; `end` is the start time of the
/// last slot of each day, so the defaults give ten slots from 13:45 to 20:30.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start: String,
    pub end: String,
    pub increment_minutes: u16,
    /// Day indices, 0 = Monday.
    pub days: Vec<u8>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: "13:45".to_string(),
            end: "20:30".to_string(),
            increment_minutes: 45,
            days: (0..7).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub grid: GridConfig,
    /// Appointments allowed to run concurrently in one slot.
    pub max_classrooms: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            max_classrooms: 2,
        }
    }
}

impl PlannerConfig {
    /// Loads a config from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Applies CLI overrides on top of a loaded (or default) config.
    pub fn with_max_classrooms(mut self, max_classrooms: Option<u32>) -> Self {
        if let Some(max) = max_classrooms {
            self.max_classrooms = max;
        }
        self
    }
}
