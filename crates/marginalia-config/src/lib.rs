use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

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

    #[error("Failed to read terms file for rule '{rule}' at {terms_path}: {source}")]
    TermsReadError {
        rule: String,
        terms_path: PathBuf,
        source: std::io::Error,
    },
}

/// Canvas slot metrics, in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub token_width: f64,
    pub token_height: f64,
    pub token_gap: f64,
    pub group_width: f64,
    pub collapsed_stack_height: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            token_width: 160.0,
            token_height: 32.0,
            token_gap: 8.0,
            group_width: 176.0,
            collapsed_stack_height: 48.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Enrich {
    Quantity,
    Captures,
}

/// One `[[rules]]` entry. Rules run in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleSettings {
    List {
        id: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        terms: Vec<String>,
        /// One term per line; blank lines and `#` comments are skipped.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        terms_file: Option<PathBuf>,
    },
    Pattern {
        id: String,
        pattern: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enrich: Option<Enrich>,
    },
    Proximity {
        id: String,
        first: String,
        second: String,
        max_distance: usize,
    },
    CoOccurrence {
        id: String,
        rules: Vec<String>,
    },
}

impl RuleSettings {
    pub fn id(&self) -> &str {
        match self {
            RuleSettings::List { id, .. }
            | RuleSettings::Pattern { id, .. }
            | RuleSettings::Proximity { id, .. }
            | RuleSettings::CoOccurrence { id, .. } => id,
        }
    }

    /// Inline terms followed by the contents of `terms_file`. Empty for
    /// rules that are not lists.
    pub fn list_terms(&self) -> Result<Vec<String>, ConfigError> {
        let RuleSettings::List {
            id,
            terms,
            terms_file,
        } = self
        else {
            return Ok(Vec::new());
        };

        let mut all = terms.clone();
        if let Some(path) = terms_file {
            let content =
                std::fs::read_to_string(path).map_err(|source| ConfigError::TermsReadError {
                    rule: id.clone(),
                    terms_path: path.clone(),
                    source,
                })?;
            all.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(String::from),
            );
        }
        Ok(all)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<RuleSettings>,
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

        // Terms files may use ~ and env vars, and are relative to the config file
        let base = config_path.parent().unwrap_or(Path::new("."));
        for rule in &mut config.rules {
            if let RuleSettings::List {
                terms_file: Some(path),
                ..
            } = rule
            {
                let expanded = Self::expand_path(path).unwrap_or_else(|| path.clone());
                *path = base.join(expanded);
            }
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
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
        let config_dir = shellexpand::tilde("~/.config/marginalia");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
