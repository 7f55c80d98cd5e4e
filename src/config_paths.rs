//! Where gridpilot keeps its files
//!
//! `$XDG_CONFIG_HOME/gridpilot/` (falling back to `~/.config/gridpilot/`)
//! on Linux and macOS, `%APPDATA%\gridpilot\` on Windows.

use std::io;
use std::path::PathBuf;

const APP_DIR: &str = "gridpilot";

fn config_root() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return dirs::config_dir();
    }
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

pub fn config_dir() -> Option<PathBuf> {
    config_root().map(|root| root.join(APP_DIR))
}

fn in_config_dir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

pub fn config_file() -> Option<PathBuf> {
    in_config_dir("config.yaml")
}

pub fn keymap_file() -> Option<PathBuf> {
    in_config_dir("keymap.yaml")
}

pub fn logs_dir() -> Option<PathBuf> {
    in_config_dir("logs")
}

/// Create the log directory if needed and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    std::fs::create_dir_all(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        let Some(dir) = config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(config_file(), Some(dir.join("config.yaml")));
        assert_eq!(keymap_file(), Some(dir.join("keymap.yaml")));
        assert_eq!(logs_dir(), Some(dir.join("logs")));
    }
}
