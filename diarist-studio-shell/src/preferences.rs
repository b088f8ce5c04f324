//! Shell preferences persisted next to the client config

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("diarist-studio");
        path.push("preferences.json");
        Some(path)
    }

    /// Load from disk; missing or unreadable files give defaults
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed preferences {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> io::Result<()> {
        let path = Self::path()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert!(!prefs.dark_mode);

        let prefs: Preferences = serde_json::from_str(r#"{"dark_mode":true}"#).unwrap();
        assert!(prefs.dark_mode);
    }
}
