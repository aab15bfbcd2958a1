use crate::error::{CheatnoteError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const DB_FILENAME: &str = "cheatnote.db";
pub const DB_ENV_VAR: &str = "CHEATNOTE_DB";

/// Display preferences, stored in `config.json` next to the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheatnoteConfig {
    /// List notes as one-liners by default
    #[serde(default)]
    pub compact: bool,

    /// Print note ids in listings
    #[serde(default = "default_true")]
    pub show_ids: bool,

    /// Colored output when stdout is a terminal
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CheatnoteConfig {
    fn default() -> Self {
        Self {
            compact: false,
            show_ids: true,
            color: true,
        }
    }
}

impl CheatnoteConfig {
    pub const KEYS: [&'static str; 3] = ["compact", "show-ids", "color"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CheatnoteError::Io)?;
        let config: CheatnoteConfig =
            serde_json::from_str(&content).map_err(CheatnoteError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CheatnoteError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CheatnoteError::Serialization)?;
        fs::write(config_path, content).map_err(CheatnoteError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "compact" => Some(self.compact.to_string()),
            "show-ids" => Some(self.show_ids.to_string()),
            "color" => Some(self.color.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let flag = parse_bool(value).ok_or_else(|| format!("Invalid value for {}: {}", key, value))?;
        match key {
            "compact" => self.compact = flag,
            "show-ids" => self.show_ids = flag,
            "color" => self.color = flag,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Picks the database file: explicit override, then the environment, then
/// the platform data directory, then the current directory.
pub fn resolve_db_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    data_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path.to_path_buf();
    }
    if let Some(env_path) = env_value.filter(|v| !v.is_empty()) {
        return PathBuf::from(env_path);
    }
    if let Some(dir) = data_dir {
        return dir.join(DB_FILENAME);
    }
    PathBuf::from(DB_FILENAME)
}

/// [`resolve_db_path`] fed from the process environment.
pub fn db_path(explicit: Option<&Path>) -> PathBuf {
    let data_dir = ProjectDirs::from("", "", "cheatnote").map(|dirs| dirs.data_dir().to_path_buf());
    resolve_db_path(explicit, std::env::var_os(DB_ENV_VAR), data_dir)
}

/// Directory holding `config.json` for a given database path.
pub fn config_dir_for(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CheatnoteConfig::default();
        assert!(!config.compact);
        assert!(config.show_ids);
        assert!(config.color);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = CheatnoteConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, CheatnoteConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested");

        let mut config = CheatnoteConfig::default();
        config.set("compact", "yes").unwrap();
        config.save(&dir).unwrap();

        let loaded = CheatnoteConfig::load(&dir).unwrap();
        assert!(loaded.compact);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), r#"{"color": false}"#).unwrap();
        let config = CheatnoteConfig::load(temp_dir.path()).unwrap();
        assert!(!config.color);
        assert!(config.show_ids);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = CheatnoteConfig::default();
        assert!(config.set("compact", "maybe").is_err());
        assert!(config.set("editor", "true").is_err());
        assert_eq!(config, CheatnoteConfig::default());
    }

    #[test]
    fn test_path_precedence() {
        let data = Some(PathBuf::from("/data/cheatnote"));
        let env = Some(OsString::from("/env/notes.db"));

        assert_eq!(
            resolve_db_path(Some(Path::new("/cli.db")), env.clone(), data.clone()),
            PathBuf::from("/cli.db")
        );
        assert_eq!(
            resolve_db_path(None, env, data.clone()),
            PathBuf::from("/env/notes.db")
        );
        assert_eq!(
            resolve_db_path(None, Some(OsString::new()), data),
            PathBuf::from("/data/cheatnote/cheatnote.db")
        );
        assert_eq!(resolve_db_path(None, None, None), PathBuf::from(DB_FILENAME));
    }

    #[test]
    fn test_config_dir_for() {
        assert_eq!(
            config_dir_for(Path::new("/a/b/notes.db")),
            PathBuf::from("/a/b")
        );
        assert_eq!(config_dir_for(Path::new("notes.db")), PathBuf::from("."));
    }
}
