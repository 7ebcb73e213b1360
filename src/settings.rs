use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub fire: FireSettings,
}

/// `[fire]` table. Every key is optional; command-line flags win.
#[derive(Debug, Default, Deserialize)]
pub struct FireSettings {
    pub scheme: Option<String>,
    pub fuel: Option<i32>,
    pub fps: Option<u32>,
    pub seed: Option<u64>,
    pub splash: Option<bool>,
    pub mouse: Option<bool>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read settings");
                Self::default()
            }
        }
    }

    /// Parse settings text, falling back to defaults on malformed input
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring malformed settings");
            Self::default()
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("asciifire")
            .join("config.toml")
    }
}
