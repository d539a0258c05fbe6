use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::worksheet_engine::error::{Result, WorksheetError};
use crate::worksheet_engine::normalizer::MAX_CORRECTIONS;

fn default_correction_cap() -> usize {
    MAX_CORRECTIONS
}

fn default_first_day() -> u32 {
    1
}

fn default_last_day() -> u32 {
    150
}

/// Session settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_correction_cap")]
    pub correction_cap: usize,
    #[serde(default = "default_first_day")]
    pub first_day: u32,
    #[serde(default = "default_last_day")]
    pub last_day: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            correction_cap: default_correction_cap(),
            first_day: default_first_day(),
            last_day: default_last_day(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.correction_cap == 0 {
            return Err(WorksheetError::InvalidConfig {
                reason: "correction_cap must be at least 1".to_string(),
            });
        }
        if self.first_day > self.last_day {
            return Err(WorksheetError::InvalidConfig {
                reason: format!(
                    "first_day ({}) is after last_day ({})",
                    self.first_day, self.last_day
                ),
            });
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json).map_err(|e| {
            WorksheetError::InvalidConfig { reason: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WorksheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SessionConfig::from_json_str(&json)
    }

    pub fn contains_day(&self, day: u32) -> bool {
        (self.first_day..=self.last_day).contains(&day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let c = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(c, SessionConfig::default());
        assert_eq!(c.correction_cap, 5);
        assert_eq!((c.first_day, c.last_day), (1, 150));
    }

    #[test]
    fn partial_override() {
        let c = SessionConfig::from_json_str(r#"{"last_day": 30}"#).unwrap();
        assert_eq!(c.last_day, 30);
        assert_eq!(c.first_day, 1);
    }

    #[test]
    fn rejects_zero_cap_and_inverted_range() {
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"correction_cap": 0}"#),
            Err(WorksheetError::InvalidConfig { .. })
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"first_day": 9, "last_day": 3}"#),
            Err(WorksheetError::InvalidConfig { .. })
        ));
        assert!(matches!(
            SessionConfig::from_json_str("not json"),
            Err(WorksheetError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SessionConfig::load_from_file("/definitely/not/here.json"),
            Err(WorksheetError::Io { .. })
        ));
    }
}
