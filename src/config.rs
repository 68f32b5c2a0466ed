use crate::domain::Mode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const APP_DIR_NAME: &str = ".focusflow";
const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "focusflow.log";

/// User settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mode the timer opens in
    pub start_mode: Mode,
    pub use_emoji: bool,
    /// tracing filter directive, e.g. "info" or "focusflow=debug"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_mode: Mode::Focus,
            use_emoji: true,
            log_level: "info".to_string(),
        }
    }
}

/// Get the app directory - checks for local .focusflow first, then falls back to ~/.focusflow
pub fn get_app_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_app_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(APP_DIR_NAME))
}

/// Find local .focusflow directory by walking up the directory tree
fn find_local_app_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(APP_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Ensure the app directory exists
pub fn ensure_app_dir() -> Result<PathBuf> {
    let dir = get_app_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Create a local .focusflow directory holding a default config.json
pub fn init_local_dir(base: &Path) -> Result<PathBuf> {
    let dir = base.join(APP_DIR_NAME);
    if dir.exists() {
        anyhow::bail!("Directory already exists: {}", dir.display());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    save_config(config_path(&dir), &Config::default())?;
    Ok(dir)
}

pub fn config_path(app_dir: &Path) -> PathBuf {
    app_dir.join(CONFIG_FILE_NAME)
}

/// Load config, falling back to defaults when the file is absent
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json)
}

/// Write through a temp file in the same directory, then rename over the target
fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("Config path has no parent directory")?;

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    temp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config = load_config(temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.start_mode, Mode::Focus);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = Config {
            start_mode: Mode::Break,
            use_emoji: false,
            log_level: "debug".to_string(),
        };
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "start_mode": "break" }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.start_mode, Mode::Break);
        assert!(config.use_emoji);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_mode_in_config_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{ "start_mode": "lunch" }"#).unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_init_local_dir() {
        let temp_dir = tempdir().unwrap();
        let dir = init_local_dir(temp_dir.path()).unwrap();

        assert!(dir.is_dir());
        assert_eq!(load_config(config_path(&dir)).unwrap(), Config::default());
        // Second init refuses to clobber
        assert!(init_local_dir(temp_dir.path()).is_err());
    }

    #[test]
    fn test_find_local_app_dir_walks_up() {
        let temp_dir = tempdir().unwrap();
        let app_dir = temp_dir.path().join(APP_DIR_NAME);
        fs::create_dir_all(&app_dir).unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_app_dir(&nested), Some(app_dir));
    }
}
