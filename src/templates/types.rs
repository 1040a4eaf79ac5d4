use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::MorningPodError;

/// Framework family detected from a project manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    NextJs,
    React,
    Vue,
    Svelte,
    Node,
    #[default]
    Generic,
}

impl ProjectType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::NextJs => "Next.js",
            ProjectType::React => "React",
            ProjectType::Vue => "Vue",
            ProjectType::Svelte => "Svelte",
            ProjectType::Node => "Node.js",
            ProjectType::Generic => "Generic",
        }
    }

    /// Vite-based frontends also get a `preview` script for the production build
    pub fn uses_vite(&self) -> bool {
        matches!(self, ProjectType::React | ProjectType::Vue | ProjectType::Svelte)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// JavaScript package manager driving the project scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Prefix for running a package.json script
    pub fn run_prefix(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun run",
        }
    }

    /// Prefix for running a locally installed binary
    pub fn exec_prefix(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npx",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm exec",
            PackageManager::Bun => "bunx",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.binary())
    }

    pub fn run(&self, script: &str) -> String {
        format!("{} {}", self.run_prefix(), script)
    }

    pub fn exec(&self, binary: &str) -> String {
        format!("{} {}", self.exec_prefix(), binary)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

impl FromStr for PackageManager {
    type Err = MorningPodError;

    /// Accepts bare names and corepack specs like `pnpm@9.1.0`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().split('@').next().unwrap_or_default().to_lowercase();
        match name.as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(MorningPodError::Template(format!(
                "Unsupported package manager: {}",
                s
            ))),
        }
    }
}

/// Shape of a project as read from its manifest and marker files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetection {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub package_manager: PackageManager,
    #[serde(rename = "hasTypeScript")]
    pub has_typescript: bool,
    pub has_database: bool,
    pub has_testing: bool,
    pub has_linting: bool,
    pub has_docker: bool,
}

/// A single runnable entry in a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptCommand {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub command: String,
}

impl ScriptCommand {
    pub fn new(name: &str, description: &str, command: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            command: command.into(),
        }
    }
}

/// Named group of commands (`dev`, `test`, `db`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub commands: Vec<ScriptCommand>,
}

/// Nested command structure offered for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub package_manager: PackageManager,
    #[serde(default)]
    pub categories: Vec<CommandCategory>,
}

impl ProjectTemplate {
    pub fn category(&self, name: &str) -> Option<&CommandCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    pub fn command_count(&self) -> usize {
        self.categories.iter().map(|c| c.commands.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_manager_parsing() {
        assert_eq!("pnpm@9.1.0".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert_eq!("Yarn".parse::<PackageManager>().unwrap(), PackageManager::Yarn);
        assert!("deno".parse::<PackageManager>().is_err());
    }

    #[test]
    fn test_package_manager_prefixes() {
        assert_eq!(PackageManager::Npm.run("dev"), "npm run dev");
        assert_eq!(PackageManager::Yarn.run("dev"), "yarn dev");
        assert_eq!(PackageManager::Pnpm.exec("tsc"), "pnpm exec tsc");
        assert_eq!(PackageManager::Bun.install_command(), "bun install");
    }

    #[test]
    fn test_detection_uses_camel_case_keys() {
        let detection = ProjectDetection {
            project_type: ProjectType::NextJs,
            package_manager: PackageManager::Pnpm,
            has_typescript: true,
            ..Default::default()
        };
        let json = serde_json::to_value(detection).unwrap();
        assert_eq!(json["type"], "nextjs");
        assert_eq!(json["packageManager"], "pnpm");
        assert_eq!(json["hasTypeScript"], true);
        assert_eq!(json["hasDatabase"], false);
    }

    #[test]
    fn test_template_parses_with_defaults() {
        let template: ProjectTemplate = serde_json::from_str(
            r#"{"name": "custom", "categories": [{"name": "dev", "commands": [{"name": "dev", "command": "make dev"}]}]}"#,
        )
        .unwrap();
        assert_eq!(template.package_manager, PackageManager::Npm);
        assert!(template.has_category("dev"));
        assert_eq!(template.command_count(), 1);
    }
}
