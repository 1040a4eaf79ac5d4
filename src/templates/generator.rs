use super::types::{CommandCategory, ProjectDetection, ProjectTemplate, ScriptCommand};

/// Map a detected project onto its command template
///
/// The output always carries the input's package manager, and includes a
/// `db` category exactly when the project has a database.
pub fn generate_template(detection: &ProjectDetection) -> ProjectTemplate {
    let mut categories = vec![dev_category(detection)];

    if detection.has_testing {
        categories.push(test_category(detection));
    }
    if detection.has_linting {
        categories.push(lint_category(detection));
    }
    if detection.has_database {
        categories.push(db_category(detection));
    }
    if detection.has_docker {
        categories.push(docker_category());
    }

    let project = detection.project_type.display_name();
    let language = if detection.has_typescript { " (TypeScript)" } else { "" };

    ProjectTemplate {
        name: project.to_string(),
        description: format!("{}{} application scripts", project, language),
        package_manager: detection.package_manager,
        categories,
    }
}

/// install, dev, build and start for every project; Vite frontends add preview
fn dev_category(detection: &ProjectDetection) -> CommandCategory {
    let pm = detection.package_manager;
    let mut commands = vec![
        ScriptCommand::new("install", "Install dependencies", pm.install_command()),
        ScriptCommand::new("dev", "Start the development server", pm.run("dev")),
        ScriptCommand::new("build", "Build for production", pm.run("build")),
        ScriptCommand::new("start", "Run the production server", pm.run("start")),
    ];
    if detection.project_type.uses_vite() {
        commands.push(ScriptCommand::new(
            "preview",
            "Serve the production build locally",
            pm.run("preview"),
        ));
    }

    CommandCategory {
        name: "dev".to_string(),
        description: "Development workflow".to_string(),
        commands,
    }
}

fn test_category(detection: &ProjectDetection) -> CommandCategory {
    let pm = detection.package_manager;
    CommandCategory {
        name: "test".to_string(),
        description: "Automated tests".to_string(),
        commands: vec![
            ScriptCommand::new("test", "Run the test suite", pm.run("test")),
            ScriptCommand::new("test:watch", "Re-run tests on change", pm.run("test:watch")),
            ScriptCommand::new("test:e2e", "Run end-to-end tests", pm.run("test:e2e")),
        ],
    }
}

fn lint_category(detection: &ProjectDetection) -> CommandCategory {
    let pm = detection.package_manager;
    let mut commands = vec![
        ScriptCommand::new("lint", "Lint the codebase", pm.run("lint")),
        ScriptCommand::new("format", "Format source files", pm.run("format")),
    ];
    if detection.has_typescript {
        commands.push(ScriptCommand::new(
            "typecheck",
            "Type-check without emitting",
            pm.exec("tsc --noEmit"),
        ));
    }

    CommandCategory {
        name: "lint".to_string(),
        description: "Code quality".to_string(),
        commands,
    }
}

fn db_category(detection: &ProjectDetection) -> CommandCategory {
    let pm = detection.package_manager;
    CommandCategory {
        name: "db".to_string(),
        description: "Database management".to_string(),
        commands: vec![
            ScriptCommand::new("migrate", "Apply pending migrations", pm.run("db:migrate")),
            ScriptCommand::new("generate", "Regenerate the database client", pm.run("db:generate")),
            ScriptCommand::new("seed", "Seed sources and sample episodes", pm.run("db:seed")),
            ScriptCommand::new("studio", "Open the database browser", pm.run("db:studio")),
        ],
    }
}

fn docker_category() -> CommandCategory {
    CommandCategory {
        name: "docker".to_string(),
        description: "Containers".to_string(),
        commands: vec![
            ScriptCommand::new("up", "Start containers in the background", "docker compose up -d"),
            ScriptCommand::new("down", "Stop containers", "docker compose down"),
            ScriptCommand::new("logs", "Follow container logs", "docker compose logs -f"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::types::{PackageManager, ProjectType};
    use pretty_assertions::assert_eq;

    fn all_detections() -> Vec<ProjectDetection> {
        let types = [
            ProjectType::NextJs,
            ProjectType::React,
            ProjectType::Vue,
            ProjectType::Svelte,
            ProjectType::Node,
            ProjectType::Generic,
        ];
        let managers = [
            PackageManager::Npm,
            PackageManager::Yarn,
            PackageManager::Pnpm,
            PackageManager::Bun,
        ];

        let mut detections = Vec::new();
        for project_type in types {
            for package_manager in managers {
                for flags in 0u8..32 {
                    detections.push(ProjectDetection {
                        project_type,
                        package_manager,
                        has_typescript: flags & 1 != 0,
                        has_database: flags & 2 != 0,
                        has_testing: flags & 4 != 0,
                        has_linting: flags & 8 != 0,
                        has_docker: flags & 16 != 0,
                    });
                }
            }
        }
        detections
    }

    #[test]
    fn test_db_category_tracks_database_flag() {
        for detection in all_detections() {
            let template = generate_template(&detection);
            assert_eq!(template.has_category("db"), detection.has_database);
        }
    }

    #[test]
    fn test_package_manager_passes_through() {
        for detection in all_detections() {
            let template = generate_template(&detection);
            assert_eq!(template.package_manager, detection.package_manager);
        }
    }

    #[test]
    fn test_generic_template() {
        let template = generate_template(&ProjectDetection::default());
        assert_eq!(template.name, "Generic");
        assert_eq!(template.package_manager, PackageManager::Npm);
        let names: Vec<_> = template.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["dev"]);

        let dev = template.category("dev").unwrap();
        let commands: Vec<_> = dev.commands.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(
            commands,
            vec!["npm install", "npm run dev", "npm run build", "npm run start"]
        );
    }

    #[test]
    fn test_full_nextjs_template() {
        let detection = ProjectDetection {
            project_type: ProjectType::NextJs,
            package_manager: PackageManager::Pnpm,
            has_typescript: true,
            has_database: true,
            has_testing: true,
            has_linting: true,
            has_docker: true,
        };
        let template = generate_template(&detection);

        assert_eq!(template.name, "Next.js");
        assert_eq!(template.description, "Next.js (TypeScript) application scripts");
        let names: Vec<_> = template.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["dev", "test", "lint", "db", "docker"]);

        let lint = template.category("lint").unwrap();
        assert!(lint
            .commands
            .iter()
            .any(|c| c.command == "pnpm exec tsc --noEmit"));
        assert_eq!(template.category("db").unwrap().commands[0].command, "pnpm db:migrate");
    }

    #[test]
    fn test_dev_category_always_has_core_commands() {
        for detection in all_detections() {
            let template = generate_template(&detection);
            let dev = template.category("dev").unwrap();
            let names: Vec<_> = dev.commands.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(&names[..4], ["install", "dev", "build", "start"]);
        }
    }

    #[test]
    fn test_vite_projects_add_preview() {
        let detection = ProjectDetection {
            project_type: ProjectType::Vue,
            package_manager: PackageManager::Bun,
            ..Default::default()
        };
        let dev = generate_template(&detection).category("dev").cloned().unwrap();
        let commands: Vec<_> = dev.commands.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(
            commands,
            vec!["bun install", "bun run dev", "bun run build", "bun run start", "bun run preview"]
        );

        let node = ProjectDetection {
            project_type: ProjectType::Node,
            ..Default::default()
        };
        let dev = generate_template(&node).category("dev").cloned().unwrap();
        assert!(!dev.commands.iter().any(|c| c.name == "preview"));
    }

    #[test]
    fn test_typecheck_requires_typescript() {
        let detection = ProjectDetection {
            has_linting: true,
            ..Default::default()
        };
        let lint = generate_template(&detection).category("lint").cloned().unwrap();
        assert!(!lint.commands.iter().any(|c| c.name == "typecheck"));
    }
}
