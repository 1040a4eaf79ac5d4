use anyhow::Result;
use clap::Parser;

use morningpod::{
    app::{load_config, load_config_from},
    cli::{handle_command, Cli},
    utils::{init_logger, log_debug},
};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        if !config_path.exists() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        }
        load_config_from(std::slice::from_ref(config_path))?
    } else {
        load_config()?
    };
    log_debug(format!("Loaded configuration: {:?}", config));

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    let format = cli.format.unwrap_or(config.output.format);
    handle_command(&cli.command, &config, cli.config.as_deref(), format)
}
