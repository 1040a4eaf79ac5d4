use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    APP_NAME, DEFAULT_SCRIPTS_FILE, ENV_PREFIX, LOCAL_CONFIG_PATH, MAX_RECOMMENDATIONS,
};
use crate::models::{ModelKind, Priority};
use crate::output::OutputFormat;
use crate::templates::PackageManager;
use crate::utils::MorningPodError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model recommendation defaults
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// Script template settings
    #[serde(default)]
    pub templates: TemplateConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Reject values the recommender cannot honour
    pub fn validate(&self) -> std::result::Result<(), MorningPodError> {
        let limit = self.recommendation.limit;
        if limit == 0 || limit > MAX_RECOMMENDATIONS {
            return Err(MorningPodError::Config(format!(
                "recommendation.limit must be between 1 and {}, got {}",
                MAX_RECOMMENDATIONS, limit
            )));
        }
        if self.templates.config_file.as_os_str().is_empty() {
            return Err(MorningPodError::Config(
                "templates.config_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Recommendation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Priority used when none is given on the command line
    pub default_priority: Priority,
    /// Restrict recommendations to one kind of model
    pub default_kind: Option<ModelKind>,
    /// Number of recommendations to show (at most 3)
    pub limit: usize,
    /// Only recommend providers whose API key is set
    pub only_configured: bool,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::Quality,
            default_kind: None,
            limit: MAX_RECOMMENDATIONS,
            only_configured: false,
        }
    }
}

/// Script template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Scripts file, relative to the project root
    pub config_file: PathBuf,
    /// Package manager assumed when a project names none
    pub fallback_package_manager: PackageManager,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_SCRIPTS_FILE),
            fallback_package_manager: PackageManager::Npm,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,
    /// Colorize text output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Load configuration from the global and local config files plus environment
pub fn load_config() -> Result<Config> {
    let mut files = Vec::new();
    if let Some(global_config) = global_config_path() {
        files.push(global_config);
    }
    files.push(PathBuf::from(LOCAL_CONFIG_PATH));

    load_config_from(&files)
}

/// Load configuration from explicit files, later files overriding earlier ones
///
/// Missing files are skipped. `MORNINGPOD_` environment variables are merged
/// last, with `__` separating nested keys (`MORNINGPOD_RECOMMENDATION__LIMIT=2`).
pub fn load_config_from(files: &[PathBuf]) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    for file in files {
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment
        .extract()
        .context("Failed to load configuration")?;
    config.validate()?;

    Ok(config)
}

/// Path of the global config file, if a config directory can be determined
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the configuration directory, creating it if needed
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join(APP_NAME);
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
///
/// Returns the path and whether a new file was written.
pub fn init_config() -> Result<(PathBuf, bool)> {
    let config_file = get_config_dir()?.join("config.toml");

    if config_file.exists() {
        return Ok((config_file, false));
    }

    save_config(&Config::default(), &config_file)?;
    Ok((config_file, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recommendation.limit, 3);
        assert_eq!(config.templates.fallback_package_manager, PackageManager::Npm);
    }

    #[test]
    fn test_later_files_override_earlier() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let local = temp_dir.path().join("local.toml");

        std::fs::write(
            &global,
            "[recommendation]\ndefault_priority = \"cost\"\nlimit = 2\n",
        )
        .unwrap();
        std::fs::write(&local, "[recommendation]\nlimit = 1\n\n[templates]\nfallback_package_manager = \"pnpm\"\n").unwrap();

        let config = load_config_from(&[global, local, temp_dir.path().join("missing.toml")]).unwrap();
        assert_eq!(config.recommendation.default_priority, Priority::Cost);
        assert_eq!(config.recommendation.limit, 1);
        assert_eq!(config.templates.fallback_package_manager, PackageManager::Pnpm);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_limit_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("config.toml");
        std::fs::write(&file, "[recommendation]\nlimit = 7\n").unwrap();

        assert!(load_config_from(&[file]).is_err());
    }

    #[test]
    fn test_save_round_trips_through_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.recommendation.default_kind = Some(ModelKind::Tts);
        config.output.format = OutputFormat::Markdown;
        save_config(&config, &file).unwrap();

        let loaded = load_config_from(&[file]).unwrap();
        assert_eq!(loaded.recommendation.default_kind, Some(ModelKind::Tts));
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }
}
