// Gateway module for templates - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod detector;
mod generator;
mod loader;
mod types;

// Public re-exports - the ONLY way to access template functionality
pub use detector::{detect_project, detect_project_with_fallback};
pub use generator::generate_template;
pub use loader::{default_template, ConfigLoader, LoadedTemplate, TemplateSource};
pub use types::{
    CommandCategory, PackageManager, ProjectDetection, ProjectTemplate, ProjectType,
    ScriptCommand,
};
