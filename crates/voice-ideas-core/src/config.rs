use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::DEFAULT_USER_ID;
use crate::error::{Result, VoiceIdeasError};

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# voice-ideas configuration file
# Location: ~/.voice-ideas/config.toml

[ingest]
# CSV column delimiter (single character)
# Default: ","
delimiter = ","

# Separator between tags inside the tags column
# JSON-style lists (["a", "b"]) are always accepted as well
# Default: ","
tag_separator = ","

# User id assigned to rows without a user_id column value
# Default: "anonymous"
default_user = "anonymous"

[output]
# Report format: "text" or "json"
# Default: "text"
format = "text"

# Number of tags shown in the text report
# Default: 10
top_tags = 10
"#;

/// Global configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// CSV ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default = "default_tag_separator")]
    pub tag_separator: String,

    #[serde(default = "default_user")]
    pub default_user: String,
}

fn default_delimiter() -> char {
    ','
}

fn default_tag_separator() -> String {
    ",".to_string()
}

fn default_user() -> String {
    DEFAULT_USER_ID.to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            tag_separator: default_tag_separator(),
            default_user: default_user(),
        }
    }
}

impl IngestConfig {
    /// Delimiter as the byte the CSV reader expects
    ///
    /// Only meaningful after [`IngestConfig::validate`]; a non-ASCII char falls back to ','.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }

    /// Check values that `set` would have refused (hand-edited config files)
    pub fn validate(&self) -> Result<()> {
        if let Err(reason) = check_delimiter(self.delimiter) {
            return Err(invalid_value(
                "ingest.delimiter",
                &self.delimiter.to_string(),
                reason,
            ));
        }
        if let Err(reason) = check_tag_separator(&self.tag_separator) {
            return Err(invalid_value(
                "ingest.tag_separator",
                &self.tag_separator,
                reason,
            ));
        }
        if let Err(reason) = check_default_user(&self.default_user) {
            return Err(invalid_value(
                "ingest.default_user",
                &self.default_user,
                reason,
            ));
        }
        Ok(())
    }
}

fn check_delimiter(c: char) -> std::result::Result<char, &'static str> {
    if c.is_ascii() && c != '"' && c != '\n' && c != '\r' {
        Ok(c)
    } else {
        Err("expected a single ASCII character other than a quote or newline")
    }
}

fn check_tag_separator(value: &str) -> std::result::Result<&str, &'static str> {
    if value.is_empty() {
        Err("separator must not be empty")
    } else {
        Ok(value)
    }
}

fn check_default_user(value: &str) -> std::result::Result<&str, &'static str> {
    let user = value.trim();
    if user.is_empty() {
        Err("user id must not be empty")
    } else {
        Ok(user)
    }
}

fn invalid_value(key: &str, value: &str, reason: &str) -> VoiceIdeasError {
    VoiceIdeasError::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err("expected text or json".to_string()),
        }
    }
}

/// Report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_top_tags")]
    pub top_tags: usize,
}

fn default_top_tags() -> usize {
    10
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            top_tags: default_top_tags(),
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| VoiceIdeasError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        config.ingest.validate()?;
        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "ingest.delimiter" => Some(self.ingest.delimiter.to_string()),
            "ingest.tag_separator" => Some(self.ingest.tag_separator.clone()),
            "ingest.default_user" => Some(self.ingest.default_user.clone()),
            "output.format" => Some(self.output.format.to_string()),
            "output.top_tags" => Some(self.output.top_tags.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |reason: &str| invalid_value(key, value, reason);

        match key {
            "ingest.delimiter" => {
                let mut chars = value.chars();
                let c = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(invalid("expected a single ASCII character")),
                };
                self.ingest.delimiter = check_delimiter(c).map_err(invalid)?;
            }
            "ingest.tag_separator" => {
                self.ingest.tag_separator =
                    check_tag_separator(value).map_err(invalid)?.to_string();
            }
            "ingest.default_user" => {
                self.ingest.default_user =
                    check_default_user(value).map_err(invalid)?.to_string();
            }
            "output.format" => {
                self.output.format = value.parse().map_err(|e: String| invalid(&e))?;
            }
            "output.top_tags" => {
                self.output.top_tags = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected a non-negative integer"))?;
            }
            _ => {
                return Err(VoiceIdeasError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }

        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        [
            "ingest.delimiter",
            "ingest.tag_separator",
            "ingest.default_user",
            "output.format",
            "output.top_tags",
        ]
        .iter()
        .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
        .collect()
    }
}
