use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::DEFAULT_SCRIPTS_FILE;
use crate::utils::{log_warn, MorningPodError, Result};

use super::detector::detect_project_with_fallback;
use super::generator::generate_template;
use super::types::{PackageManager, ProjectDetection, ProjectTemplate};

/// Where the effective template came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum TemplateSource {
    /// Read from the project's scripts file
    File { path: PathBuf },
    /// Generated from project detection
    Generated,
    /// Generated because the scripts file could not be used
    Fallback { reason: String },
}

/// A template together with its origin
#[derive(Debug, Clone, Serialize)]
pub struct LoadedTemplate {
    pub template: ProjectTemplate,
    #[serde(flatten)]
    pub source: TemplateSource,
}

/// Resolves the script template for a project directory
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    config_file: PathBuf,
    fallback_package_manager: PackageManager,
}

impl ConfigLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_file: PathBuf::from(DEFAULT_SCRIPTS_FILE),
            fallback_package_manager: PackageManager::Npm,
        }
    }

    /// Scripts file location, relative to the project root unless absolute
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = config_file.into();
        self
    }

    /// Package manager assumed when nothing in the project names one
    pub fn with_fallback_package_manager(mut self, package_manager: PackageManager) -> Self {
        self.fallback_package_manager = package_manager;
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(&self.config_file)
    }

    pub fn detect(&self) -> ProjectDetection {
        detect_project_with_fallback(&self.root, self.fallback_package_manager)
    }

    /// Load the effective template
    ///
    /// Never fails: an unreadable or malformed scripts file falls back to the
    /// template generated from project detection.
    pub fn load(&self) -> LoadedTemplate {
        let path = self.config_path();

        match read_template(&path) {
            Ok(Some(template)) => {
                debug!("Loaded script template from {}", path.display());
                LoadedTemplate {
                    template,
                    source: TemplateSource::File { path },
                }
            }
            Ok(None) => LoadedTemplate {
                template: generate_template(&self.detect()),
                source: TemplateSource::Generated,
            },
            Err(e) => {
                log_warn("template", format!("Falling back to generated template: {}", e));
                LoadedTemplate {
                    template: generate_template(&self.detect()),
                    source: TemplateSource::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Write a template to the scripts file, creating parent directories
    pub fn save(&self, template: &ProjectTemplate) -> Result<PathBuf> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(template)?;
        fs::write(&path, json)?;
        debug!("Saved script template to {}", path.display());

        Ok(path)
    }

    /// Write the generated template for this project to the scripts file
    ///
    /// Refuses to replace an existing scripts file unless `force` is set.
    pub fn init(&self, force: bool) -> Result<PathBuf> {
        let path = self.config_path();
        if path.exists() && !force {
            return Err(MorningPodError::Template(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        self.save(&generate_template(&self.detect()))
    }
}

/// The generic npm template used when nothing else is known
pub fn default_template() -> ProjectTemplate {
    generate_template(&ProjectDetection::default())
}

/// `Ok(None)` when the file does not exist
fn read_template(path: &Path) -> Result<Option<ProjectTemplate>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let template: ProjectTemplate = serde_json::from_str(&content)?;
    if template.name.trim().is_empty() {
        return Err(MorningPodError::Template(format!(
            "{} has an empty template name",
            path.display()
        )));
    }

    Ok(Some(template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::types::ProjectType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_everything_gives_generic_npm() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = ConfigLoader::new(temp_dir.path()).load();

        assert_eq!(loaded.source, TemplateSource::Generated);
        assert_eq!(loaded.template, default_template());
        assert_eq!(loaded.template.package_manager, PackageManager::Npm);
    }

    #[test]
    fn test_malformed_scripts_file_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(temp_dir.path());
        fs::create_dir_all(loader.config_path().parent().unwrap()).unwrap();
        fs::write(loader.config_path(), "{ not json").unwrap();

        let loaded = loader.load();
        assert!(matches!(loaded.source, TemplateSource::Fallback { .. }));
        assert_eq!(loaded.template, default_template());
    }

    #[test]
    fn test_empty_name_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(temp_dir.path()).with_config_file("scripts.json");
        fs::write(loader.config_path(), r#"{ "name": "  " }"#).unwrap();

        assert!(matches!(loader.load().source, TemplateSource::Fallback { .. }));
    }

    #[test]
    fn test_save_then_load_uses_file() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(temp_dir.path());

        let mut template = default_template();
        template.name = "Morning Pod".to_string();
        let path = loader.save(&template).unwrap();
        assert!(path.ends_with(DEFAULT_SCRIPTS_FILE));

        let loaded = loader.load();
        assert_eq!(loaded.source, TemplateSource::File { path });
        assert_eq!(loaded.template.name, "Morning Pod");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(temp_dir.path()).with_config_file("scripts.json");
        fs::write(loader.config_path(), r#"{ "name": "hand written" }"#).unwrap();

        let err = loader.init(false).unwrap_err();
        assert!(matches!(err, MorningPodError::Template(_)));
        let content = fs::read_to_string(loader.config_path()).unwrap();
        assert!(content.contains("hand written"));
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(temp_dir.path()).with_config_file("scripts.json");
        fs::write(loader.config_path(), r#"{ "name": "hand written" }"#).unwrap();

        let path = loader.init(true).unwrap();
        let loaded = loader.load();
        assert_eq!(loaded.source, TemplateSource::File { path });
        assert_eq!(loaded.template, default_template());
    }

    #[test]
    fn test_init_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::new(temp_dir.path());

        let path = loader.init(false).unwrap();
        assert!(path.exists());
        assert!(path.ends_with(DEFAULT_SCRIPTS_FILE));
    }

    #[test]
    fn test_generated_template_follows_manifest() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{ "dependencies": { "next": "14.2.0", "drizzle-orm": "0.30.0" } }"#,
        )
        .unwrap();

        let loader = ConfigLoader::new(temp_dir.path())
            .with_fallback_package_manager(PackageManager::Pnpm);
        assert_eq!(loader.detect().project_type, ProjectType::NextJs);

        let loaded = loader.load();
        assert_eq!(loaded.source, TemplateSource::Generated);
        assert_eq!(loaded.template.package_manager, PackageManager::Pnpm);
        assert!(loaded.template.has_category("db"));
    }

    #[test]
    fn test_loaded_template_serializes_source_tag() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = ConfigLoader::new(temp_dir.path()).load();
        let json = serde_json::to_value(&loaded).unwrap();
        assert_eq!(json["source"], "generated");
        assert_eq!(json["template"]["packageManager"], "npm");
    }
}
