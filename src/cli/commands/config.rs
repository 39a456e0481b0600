use anyhow::{Context, Result};
use clap::Subcommand;

use crate::cli::output::{Formatter, get_formatter};
use crate::models::{Config, OutputFormat, ResolvedConfig};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Initialize configuration file")]
    Init {
        #[arg(
            long,
            short = 'g',
            help = "Create global config instead of project config"
        )]
        global: bool,
        #[arg(long, help = "Force overwrite existing config")]
        force: bool,
    },
    #[command(about = "Show current configuration")]
    Show,
    #[command(about = "Show configuration file paths")]
    Path,
}

pub async fn handle_config(cmd: ConfigCommand, format: OutputFormat, _verbose: bool) -> Result<()> {
    let formatter = get_formatter(format);

    match cmd {
        ConfigCommand::Init { global, force } => handle_init(global, force, formatter.as_ref()),
        ConfigCommand::Show => handle_show(format),
        ConfigCommand::Path => handle_path(formatter.as_ref()),
    }
}

fn handle_init(global: bool, force: bool, formatter: &dyn Formatter) -> Result<()> {
    let (config_path, scope) = if global {
        (Config::global_path(), "global")
    } else {
        (Config::project_path(), "project")
    };
    let config_path =
        config_path.ok_or_else(|| anyhow::anyhow!("could not determine {scope} config path"))?;

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} config already exists at: {}\nUse --force to overwrite.",
            scope,
            config_path.display()
        );
    }

    let created = if global {
        Config::init_global()
    } else {
        Config::init_project()
    };
    let path = created.with_context(|| format!("failed to create {scope} config"))?;

    println!(
        "{}",
        formatter.format_message(&format!("Created {scope} config at: {}", path.display()))
    );
    Ok(())
}

fn handle_show(format: OutputFormat) -> Result<()> {
    let resolved = Config::load()?;

    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "config": resolved.config,
            "project_path": resolved.project_path,
            "global_path": resolved.global_path,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_sources(&resolved);
    print!(
        "{}",
        toml::to_string_pretty(&resolved.config).context("failed to render config")?
    );
    Ok(())
}

fn print_sources(resolved: &ResolvedConfig) {
    match (&resolved.project_path, &resolved.global_path) {
        (Some(project), _) => println!("# Project config: {}", project.display()),
        (None, Some(global)) => println!("# Global config: {}", global.display()),
        (None, None) => println!("# Using defaults"),
    }
    println!();
}

fn handle_path(formatter: &dyn Formatter) -> Result<()> {
    let describe = |path: Option<std::path::PathBuf>| match path {
        Some(p) if p.exists() => format!("{} (exists)", p.display()),
        Some(p) => format!("{} (not found)", p.display()),
        None => "unavailable".to_string(),
    };

    let message = format!(
        "Project: {}\nGlobal:  {}",
        describe(Config::project_path()),
        describe(Config::global_path())
    );
    println!("{}", formatter.format_message(&message));
    Ok(())
}
