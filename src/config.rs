use crate::model::{ColumnConfig, SortDirection};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Who orders the browser's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortModeSetting {
    /// The table sorts its own items
    #[default]
    Managed,
    /// The browser sorts on the table's request and passes rows in order
    Controlled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset opened when no file is given on the command line
    pub data_path: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Declared columns; empty means one column per field in the data
    pub columns: Vec<ColumnConfig>,
    pub sort_on: Option<String>,
    pub sort_direction: SortDirection,
    pub sort_mode: SortModeSetting,
    pub empty_message: Option<String>,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
    /// Defaults to `cosmos-tui.log` in the config directory
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            title: "Data browser".to_string(),
            description: None,
            columns: Vec::new(),
            sort_on: None,
            sort_direction: SortDirection::Ascending,
            sort_mode: SortModeSetting::Managed,
            empty_message: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".cosmos-tui"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_dir()?)
    }

    /// Read `config.json` from `dir`; a missing file is not an error
    pub fn load_from(dir: &Path) -> Option<Config> {
        let contents = fs::read_to_string(dir.join(CONFIG_FILE)).ok()?;
        Self::from_json(&contents)
    }

    /// Parse a config file; malformed files are reported and ignored
    pub fn from_json(contents: &str) -> Option<Config> {
        match serde_json::from_str(contents) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed config file");
                None
            }
        }
    }

    /// Write the config to the config directory
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let dir = Self::config_dir().context("HOME is not set")?;
        self.save_to(&dir)
    }

    /// Write `config.json` into `dir`, creating it if needed
    pub fn save_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Where the log file goes
    pub fn log_path(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::config_dir().map(|dir| dir.join("cosmos-tui.log")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnWidth;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sort_mode, SortModeSetting::Managed);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_json(
            r#"{
                "data_path": "users.csv",
                "title": "Users",
                "columns": [
                    { "field": "name", "sortable": true },
                    { "field": "bio", "label": "About", "truncating": true, "width": { "length": 20 } }
                ],
                "sort_on": "name",
                "sort_direction": "desc",
                "sort_mode": "controlled",
                "log_file": "/tmp/cosmos.log"
            }"#,
        )
        .unwrap();
        assert_eq!(config.data_path.as_deref(), Some("users.csv"));
        assert_eq!(config.columns.len(), 2);
        assert!(config.columns[0].sortable);
        assert_eq!(config.columns[1].label.as_deref(), Some("About"));
        assert_eq!(config.columns[1].width, ColumnWidth::Length(20));
        assert_eq!(config.sort_direction, SortDirection::Descending);
        assert_eq!(config.sort_mode, SortModeSetting::Controlled);
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/cosmos.log")));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = env::temp_dir().join(format!("cosmos-tui-config-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        assert_eq!(Config::load_from(&dir), None);

        let config = Config {
            title: "Users".to_string(),
            columns: vec![ColumnConfig::new("name").sortable()],
            sort_on: Some("name".to_string()),
            sort_direction: SortDirection::Descending,
            sort_mode: SortModeSetting::Controlled,
            ..Config::default()
        };
        let path = config.save_to(&dir).unwrap();
        assert_eq!(path, dir.join("config.json"));
        assert_eq!(Config::load_from(&dir), Some(config));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_config_is_ignored() {
        assert_eq!(Config::from_json("{ not json"), None);
        assert_eq!(Config::from_json(r#"{ "sort_mode": "sometimes" }"#), None);
    }
}
