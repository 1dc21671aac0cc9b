//! User configuration — display preferences and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/bill-split/config.toml` (default `~/.config/bill-split/config.toml`).

use std::path::PathBuf;

/// Application configuration — the ambient display preference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Prefer the dark palette.  Read once at startup, flipped by the
    /// runtime toggle, persisted on change.
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.trim() == "dark_mode" {
                config.dark_mode = value.trim() == "true";
            }
        }
        config
    }

    fn serialise(&self) -> String {
        [
            "# bill-split configuration".to_string(),
            String::new(),
            format!("dark_mode = {}", self.dark_mode),
            String::new(),
        ]
        .join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/bill-split/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("bill-split").join("config.toml")
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_dark_mode_and_ignores_noise() {
        let config = AppConfig::parse_config(
            "# comment\n\n[section]\ndark_mode = false\nunknown = 7\n",
        );
        assert!(!config.dark_mode);

        let config = AppConfig::parse_config("garbage");
        assert!(config.dark_mode);
    }

    #[test]
    fn serialise_round_trips() {
        let config = AppConfig { dark_mode: false };
        let parsed = AppConfig::parse_config(&config.serialise());
        assert!(!parsed.dark_mode);
    }
}
