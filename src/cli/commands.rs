use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::{
    app::{global_config_path, init_config, Config},
    constants::{LOCAL_CONFIG_PATH, PACKAGE_MANAGER_BINARIES},
    models::{
        estimate_cost, estimate_tokens, recommend_models, EnvCredentials, ModelCatalog, ModelKind,
        RecommendationRequest,
    },
    output::{
        render_detection, render_estimate, render_models, render_providers,
        render_recommendations, render_template, EstimateReport, OutputFormat,
        RecommendationReport,
    },
    templates::ConfigLoader,
    utils::{log_info, log_progress},
};

use super::Commands;

/// Handle CLI subcommands
///
/// `config_file` is the file passed with `--config`, if any.
pub fn handle_command(
    command: &Commands,
    config: &Config,
    config_file: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Recommend {
            priority,
            kind,
            content_length,
            limit,
            only_configured,
        } => {
            let request = RecommendationRequest {
                priority: priority.unwrap_or(config.recommendation.default_priority),
                kind: kind.or(config.recommendation.default_kind),
                content_length: *content_length,
                limit: limit.unwrap_or(config.recommendation.limit),
                only_configured: only_configured.unwrap_or(config.recommendation.only_configured),
            };
            log_info("recommend", format!("priority={} kind={:?}", request.priority, request.kind));

            let recommendations = recommend_models(ModelCatalog::builtin(), &request, &EnvCredentials);
            let report = RecommendationReport {
                priority: request.priority,
                kind: request.kind,
                content_length: request.content_length,
                recommendations,
            };
            print!("{}", render_recommendations(&report, format));
            Ok(())
        }
        Commands::Models { kind, provider } => {
            let models: Vec<_> = ModelCatalog::builtin()
                .all()
                .iter()
                .filter(|m| kind.map_or(true, |k| m.kind == k))
                .filter(|m| provider.map_or(true, |p| m.provider == p))
                .collect();
            print!("{}", render_models(&models, format));
            Ok(())
        }
        Commands::Estimate {
            model,
            content_length,
        } => {
            let model = ModelCatalog::builtin().get(model)?;
            let report = EstimateReport {
                model,
                content_length: *content_length,
                estimated_tokens: (model.kind == ModelKind::Summarization)
                    .then(|| estimate_tokens(*content_length)),
                estimated_cost: estimate_cost(model, Some(*content_length)),
            };
            print!("{}", render_estimate(&report, format));
            Ok(())
        }
        Commands::Detect { path } => {
            let loader = template_loader(path.as_deref(), config);
            print!("{}", render_detection(&loader.detect(), format));
            Ok(())
        }
        Commands::Template { path } => {
            let loader = template_loader(path.as_deref(), config);
            print!("{}", render_template(&loader.load(), format));
            Ok(())
        }
        Commands::TemplateInit { path, force } => {
            let loader = template_loader(path.as_deref(), config);
            log_progress(1, 2, "Detecting project");
            log_progress(2, 2, format!("Writing {} template", loader.detect().project_type));
            let written = loader
                .init(*force)
                .with_context(|| format!("Failed to write {}", loader.config_path().display()))?;
            println!("Created script template at: {}", written.display());
            Ok(())
        }
        Commands::Init => {
            println!("Initializing Morning Pod configuration...");
            let (path, created) = init_config()?;
            if created {
                println!("Created default configuration at: {}", path.display());
            } else {
                println!("Configuration already exists at: {}", path.display());
            }
            Ok(())
        }
        Commands::Status => {
            show_status(config_file, format);
            Ok(())
        }
        Commands::Version => {
            show_version();
            Ok(())
        }
    }
}

fn template_loader(path: Option<&Path>, config: &Config) -> ConfigLoader {
    let root = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    ConfigLoader::new(root)
        .with_config_file(&config.templates.config_file)
        .with_fallback_package_manager(config.templates.fallback_package_manager)
}

/// Show version information
pub fn show_version() {
    println!("Morning Pod v{}", env!("CARGO_PKG_VERSION"));
    println!("   Model recommendations and project script templates");
}

/// Show status of providers, configuration and tooling
fn show_status(config_file: Option<&Path>, format: OutputFormat) {
    let statuses = ModelCatalog::builtin().providers(&EnvCredentials);
    if format == OutputFormat::Json {
        print!("{}", render_providers(&statuses, format));
        return;
    }

    println!("Morning Pod Status:");
    println!();
    println!("  Providers:");
    print!("{}", render_providers(&statuses, format));

    // Check configuration
    println!("\n  Configuration:");
    let lines = config_status_lines(config_file, global_config_path(), Path::new(LOCAL_CONFIG_PATH));
    for line in lines {
        println!("    {}", line);
    }

    // Check package managers
    println!("\n  Package managers:");
    for binary in PACKAGE_MANAGER_BINARIES {
        if which::which(binary).is_ok() {
            println!("    {} {}", "[OK]".green(), binary);
        } else {
            println!("    {} {}", "[NOT FOUND]".dimmed(), binary);
        }
    }

    println!();
}

/// Describe which configuration files are in effect
///
/// An explicit `--config` file replaces the global and local files, so only
/// it is reported.
fn config_status_lines(
    config_file: Option<&Path>,
    global: Option<PathBuf>,
    local: &Path,
) -> Vec<String> {
    if let Some(path) = config_file {
        return vec![format!("[OK] Explicit: {} (--config)", path.display())];
    }

    let mut lines = vec![match global {
        Some(path) if path.exists() => format!("[OK] Global: {}", path.display()),
        Some(path) => format!("[WARNING] Global: {} not found (using defaults)", path.display()),
        None => "[WARNING] Global: no config directory available".to_string(),
    }];
    if local.exists() {
        lines.push(format!("[OK] Local: {}", local.display()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_replaces_global_and_local() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("custom.toml");
        let local = temp_dir.path().join("local.toml");
        fs::write(&local, "").unwrap();

        let global = temp_dir.path().join("global.toml");
        let lines = config_status_lines(Some(&explicit), Some(global), &local);
        assert_eq!(lines, vec![format!("[OK] Explicit: {} (--config)", explicit.display())]);
    }

    #[test]
    fn test_layered_config_lines() {
        let temp_dir = TempDir::new().unwrap();
        let global = temp_dir.path().join("global.toml");
        let local = temp_dir.path().join("local.toml");
        fs::write(&local, "").unwrap();

        let lines = config_status_lines(None, Some(global.clone()), &local);
        assert_eq!(
            lines,
            vec![
                format!("[WARNING] Global: {} not found (using defaults)", global.display()),
                format!("[OK] Local: {}", local.display()),
            ]
        );
    }
}
