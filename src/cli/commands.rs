//! Command dispatch

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::to_display_tree;
use crate::cli::args::{Cli, Commands, ConfigCommands, Format};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, resolve_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return cmd_completion(*shell);
    }

    let project_dir = project_dir(cli)?;
    let mut settings = Settings::load(&project_dir)?;
    if let Some(input) = &cli.input {
        settings.override_input(&resolve_path(&project_dir, input));
    }
    if let Some(Commands::Build {
        build_dir: Some(dir),
    }) = &cli.command
    {
        settings.build_dir = resolve_path(&project_dir, dir);
    }
    debug!("settings: {:?}", settings);

    let container = ServiceContainer::new(settings);
    match &cli.command {
        None | Some(Commands::Build { .. }) => cmd_build(&container),
        Some(Commands::Render { format }) => cmd_render(&container, *format),
        Some(Commands::Tree { letter, depth }) => cmd_tree(&container, letter.as_deref(), *depth),
        Some(Commands::Stats) => cmd_stats(&container),
        Some(Commands::Config { command }) => cmd_config(&container, &project_dir, command),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.clone()),
        Some(dir) => Err(CliError::Usage(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

#[instrument(skip(container))]
fn cmd_build(container: &ServiceContainer) -> CliResult<()> {
    let report = container.conversion.run(&container.settings)?;
    output::success(&format!(
        "{} rows from {}",
        report.rows,
        report.input.display()
    ));
    output::action("JSON", &report.json_path.display());
    output::action("Turtle", &format!(
        "{} ({} statement lines)",
        report.turtle_path.display(),
        report.triple_lines
    ));
    for (level, count) in &report.counts {
        output::detail(&format!("{level}: {count}"));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_render(container: &ServiceContainer, format: Format) -> CliResult<()> {
    let artifacts = container.conversion.render(&container.settings)?;
    let mut stdout = io::stdout().lock();
    let written = match format {
        Format::Json => writeln!(stdout, "{}", artifacts.json),
        Format::Turtle => stdout.write_all(artifacts.turtle.as_bytes()),
    };
    written.map_err(|e| InfraError::io("write to stdout", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, letter: Option<&str>, depth: Option<usize>) -> CliResult<()> {
    let taxonomy = container.conversion.load(&container.settings)?;
    if let Some(letter) = letter {
        if taxonomy.section(letter).is_none() {
            return Err(CliError::Usage(format!("unknown section letter: {letter}")));
        }
    }
    output::info(&to_display_tree(&taxonomy, letter, depth));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_stats(container: &ServiceContainer) -> CliResult<()> {
    let taxonomy = container.conversion.load(&container.settings)?;
    output::header("Nodes per level");
    for (level, count) in taxonomy.count_by_level() {
        output::detail(&format!("{level:<9} {count}"));
    }
    output::detail(&format!("{:<9} {}", "leaves", taxonomy.leaf_count()));
    Ok(())
}

fn cmd_config(container: &ServiceContainer, project_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("no config directory for this platform".into()))?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(dir) = path.parent() {
                container
                    .fs
                    .create_dir_all(dir)
                    .map_err(|e| InfraError::io(format!("create {}", dir.display()), e))?;
            }
            container
                .fs
                .write_atomic(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            let local = local_config_path(project_dir);
            match global_config_path() {
                Some(global) => output::action("global", &describe(container, &global)),
                None => output::action("global", &"(unavailable)"),
            }
            output::action("local", &describe(container, &local));
            Ok(())
        }
    }
}

fn describe(container: &ServiceContainer, path: &Path) -> String {
    if container.fs.exists(path) {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
