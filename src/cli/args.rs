use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{ModelKind, Priority, Provider};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "morningpod")]
#[command(version)]
#[command(about = "Model recommendations and project script templates for Morning Pod", long_about = None)]
pub struct Cli {
    /// Path to configuration file (replaces the global and local config files)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend summarization and TTS models for a priority
    Recommend {
        /// What matters most: cost, quality or speed
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Only consider one kind of model (summarization, tts)
        #[arg(short, long)]
        kind: Option<ModelKind>,

        /// Characters of content to estimate cost for
        #[arg(long)]
        content_length: Option<usize>,

        /// Number of recommendations (at most 3)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Skip providers without an API key (`--only-configured=false` overrides config)
        #[arg(long, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
        only_configured: Option<bool>,
    },
    /// List the model catalog
    Models {
        /// Filter by kind (summarization, tts)
        #[arg(short, long)]
        kind: Option<ModelKind>,

        /// Filter by provider (openai, anthropic, google)
        #[arg(short, long)]
        provider: Option<Provider>,
    },
    /// Estimate the cost of processing content with one model
    Estimate {
        /// Model id, optionally prefixed with its provider (openai/gpt-4o)
        model: String,

        /// Characters of content
        #[arg(long)]
        content_length: usize,
    },
    /// Detect the shape of a project
    Detect {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Show the effective script template for a project
    Template {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Write the generated script template to the project's scripts file
    TemplateInit {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing scripts file
        #[arg(long)]
        force: bool,
    },
    /// Initialize configuration
    Init,
    /// Check provider credentials and local tooling
    Status,
    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_configured(args: &[&str]) -> Option<bool> {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Recommend { only_configured, .. } => only_configured,
            other => panic!("expected recommend, got {:?}", other),
        }
    }

    #[test]
    fn test_only_configured_flag_forms() {
        assert_eq!(only_configured(&["morningpod", "recommend"]), None);
        assert_eq!(only_configured(&["morningpod", "recommend", "--only-configured"]), Some(true));
        assert_eq!(
            only_configured(&["morningpod", "recommend", "--only-configured=false"]),
            Some(false)
        );
    }

    #[test]
    fn test_flag_does_not_swallow_next_argument() {
        let cli = Cli::try_parse_from(["morningpod", "recommend", "--only-configured", "-p", "cost"])
            .unwrap();
        match cli.command {
            Commands::Recommend {
                only_configured,
                priority,
                ..
            } => {
                assert_eq!(only_configured, Some(true));
                assert_eq!(priority, Some(Priority::Cost));
            }
            other => panic!("expected recommend, got {:?}", other),
        }
    }
}
