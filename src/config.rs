use serde::Deserialize;
use std::path::Path;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Environment variable naming an optional TOML overlay.
pub const CONFIG_ENV_VAR: &str = "WISH_CONFIG";

/// Interpreter settings fixed at startup.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Printed before each line in interactive mode.
    pub prompt: String,
    /// Initial search path, in lookup order.
    pub path: Vec<String>,
}

/// User overlay: every key is optional and only present keys override.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    prompt: Option<String>,
    path: Option<Vec<String>>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Embedded defaults, overridden by the file named in `WISH_CONFIG` if
    /// that variable is set and the file parses.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            if let Some(overlay) = Self::load_overlay(Path::new(&path)) {
                config.apply_overlay(overlay);
            }
        }
        config
    }

    fn load_overlay(path: &Path) -> Option<ConfigOverlay> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("config: can't read {}: {e}", path.display());
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                log::warn!("config: parse error in {}: {e}", path.display());
                None
            }
        }
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(prompt) = overlay.prompt {
            self.prompt = prompt;
        }
        if let Some(path) = overlay.path {
            self.path = path;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
