use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Transcript language used when the user asks for `auto`.
pub const DEFAULT_LANGUAGE: &str = "th";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Pastel,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Pastel => Theme::Dark,
            Theme::Dark => Theme::Pastel,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Pastel => "pastel",
            Theme::Dark => "dark",
        }
    }
}

/// User preferences, persisted between sessions.
///
/// Missing keys fall back to [`Config::default`], so an old or hand-written
/// file with only `theme = "dark"` still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interface language code.
    pub language: String,
    pub theme: Theme,
    /// Where saved timestamp files go, one folder per video.
    pub artifacts_dir: PathBuf,
    /// Whether the viewer saves the canonical text when asked to.
    pub save_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            theme: Theme::default(),
            artifacts_dir: PathBuf::from(
                shellexpand::tilde("~/.local/share/vidstamp/artifacts").as_ref(),
            ),
            save_timestamps: false,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded artifacts path
        config.artifacts_dir =
            Self::expand_path(&config.artifacts_dir).unwrap_or(config.artifacts_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loaded config, or defaults when no file exists yet.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/vidstamp");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Switches the interface language. Callers persist with [`Config::save`].
    pub fn set_language(&mut self, language: &str) {
        self.language = language.trim().to_lowercase();
    }

    /// Flips between the light and dark theme and returns the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Transcript language list for a generation request.
///
/// `auto` (any case) means the default language; anything else is lower-cased.
pub fn transcript_languages(requested: &str) -> Vec<String> {
    let requested = requested.trim();
    if requested.is_empty() || requested.eq_ignore_ascii_case("auto") {
        vec![DEFAULT_LANGUAGE.to_string()]
    } else {
        vec![requested.to_lowercase()]
    }
}
