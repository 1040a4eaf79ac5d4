use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::{
    DATABASE_PACKAGES, DOCKER_FILES, LINTING_PACKAGES, LOCKFILES, PACKAGE_JSON, PRISMA_SCHEMA,
    TESTING_PACKAGES, TSCONFIG_JSON,
};

use crate::utils::log_warn;

use super::types::{PackageManager, ProjectDetection, ProjectType};

/// The parts of package.json detection cares about
///
/// Fields with unexpected shapes are ignored individually; only invalid JSON
/// makes the whole manifest unusable.
#[derive(Debug, Default)]
struct PackageManifest {
    dependencies: Vec<String>,
    package_manager: Option<String>,
}

impl PackageManifest {
    fn from_value(value: &Value) -> Self {
        let dependency_names = |key: &str| -> Vec<String> {
            value
                .get(key)
                .and_then(Value::as_object)
                .map(|deps| deps.keys().cloned().collect())
                .unwrap_or_default()
        };

        let mut dependencies = dependency_names("dependencies");
        dependencies.extend(dependency_names("devDependencies"));

        Self {
            dependencies,
            package_manager: value
                .get("packageManager")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

impl PackageManifest {
    fn has(&self, package: &str) -> bool {
        self.dependencies.iter().any(|d| d == package)
    }

    fn has_any(&self, packages: &[&str]) -> bool {
        packages.iter().any(|p| self.has(p))
    }
}

/// Inspect a project directory, falling back to npm when no package manager is evident
pub fn detect_project(root: &Path) -> ProjectDetection {
    detect_project_with_fallback(root, PackageManager::Npm)
}

/// Inspect a project directory
///
/// Never fails: a missing or malformed package.json yields a generic
/// project using `fallback` as its package manager.
pub fn detect_project_with_fallback(root: &Path, fallback: PackageManager) -> ProjectDetection {
    let has_file = |name: &str| root.join(name).exists();

    let mut detection = ProjectDetection {
        package_manager: fallback,
        has_typescript: has_file(TSCONFIG_JSON),
        has_database: has_file(PRISMA_SCHEMA),
        has_docker: DOCKER_FILES.iter().any(|f| has_file(*f)),
        ..Default::default()
    };

    let Some(manifest) = read_manifest(root) else {
        debug!("No usable {} in {}, using generic project", PACKAGE_JSON, root.display());
        return detection;
    };

    detection.project_type = detect_framework(&manifest);
    detection.package_manager = detect_package_manager(root, &manifest).unwrap_or(fallback);
    detection.has_typescript |= manifest.has("typescript");
    detection.has_database |= manifest.has_any(DATABASE_PACKAGES);
    detection.has_testing = manifest.has_any(TESTING_PACKAGES);
    detection.has_linting = manifest.has_any(LINTING_PACKAGES);

    debug!(
        project_type = %detection.project_type,
        package_manager = %detection.package_manager,
        "Detected project in {}",
        root.display()
    );

    detection
}

fn read_manifest(root: &Path) -> Option<PackageManifest> {
    let path = root.join(PACKAGE_JSON);
    let content = fs::read_to_string(&path).ok()?;

    match serde_json::from_str::<Value>(&content) {
        Ok(value) if value.is_object() => Some(PackageManifest::from_value(&value)),
        Ok(_) => {
            log_warn("detect", format!("Ignoring {}: not a JSON object", path.display()));
            None
        }
        Err(e) => {
            log_warn("detect", format!("Ignoring malformed {}: {}", path.display(), e));
            None
        }
    }
}

fn detect_framework(manifest: &PackageManifest) -> ProjectType {
    if manifest.has("next") {
        ProjectType::NextJs
    } else if manifest.has_any(&["svelte", "@sveltejs/kit"]) {
        ProjectType::Svelte
    } else if manifest.has_any(&["vue", "nuxt"]) {
        ProjectType::Vue
    } else if manifest.has("react") {
        ProjectType::React
    } else {
        ProjectType::Node
    }
}

/// The `packageManager` field wins over lockfiles
fn detect_package_manager(root: &Path, manifest: &PackageManifest) -> Option<PackageManager> {
    if let Some(declared) = &manifest.package_manager {
        match declared.parse() {
            Ok(pm) => return Some(pm),
            Err(e) => log_warn("detect", e),
        }
    }

    LOCKFILES
        .iter()
        .find(|(file, _)| root.join(file).exists())
        .and_then(|(_, pm)| pm.parse().ok())
}
