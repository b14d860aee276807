use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that overrides the API key in the config file.
pub const API_KEY_ENV: &str = "COUNTRYCAST_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_country = "Pakistan"
/// countries = ["Pakistan", "India", "Japan"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WeatherAPI.com credential. [`API_KEY_ENV`] takes precedence.
    pub api_key: Option<String>,

    /// Selection used on startup, before the user picks anything.
    pub default_country: String,

    /// The country table offered by the picker. External data: edit the
    /// config file to change it, nothing is inferred at runtime.
    pub countries: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_country: "Pakistan".to_string(),
            countries: default_countries(),
        }
    }
}

fn default_countries() -> Vec<String> {
    [
        "Pakistan",
        "India",
        "Bangladesh",
        "Sri Lanka",
        "China",
        "Japan",
        "South Korea",
        "Indonesia",
        "Australia",
        "New Zealand",
        "United Kingdom",
        "Ireland",
        "France",
        "Germany",
        "Spain",
        "Italy",
        "Netherlands",
        "Norway",
        "Sweden",
        "Turkey",
        "Egypt",
        "South Africa",
        "Nigeria",
        "Brazil",
        "Argentina",
        "Canada",
        "United States",
        "Mexico",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

impl Config {
    /// Load config from disk, or return the built-in default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return the defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "countrycast", "countrycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store an API key in the config (the file value, not the env override).
    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Resolve the API key: environment first, then the config file.
    pub fn resolve_api_key(&self) -> Result<String> {
        resolve_api_key_from(std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }
}

fn resolve_api_key_from(env_key: Option<String>, file_key: Option<String>) -> Result<String> {
    env_key.filter(|key| !key.is_empty()).or(file_key).ok_or_else(|| {
        anyhow!(
            "No API key configured.\n\
             Hint: set {API_KEY_ENV} or run `countrycast configure` and enter your WeatherAPI.com key."
        )
    })
}
