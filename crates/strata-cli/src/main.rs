use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use strata_core::{HelperLoader, ResourceLocator, Result, StrataError};

mod args;
use args::{Cli, Commands, ResolveTarget, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        handle_completions(*shell);
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let root = match &cli.project_root {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let mut locator = ResourceLocator::from_project(&root)?;
    apply_dim_overrides(&mut locator, &cli.dims)?;

    if cli.verbose {
        eprintln!(
            "{} project root: {}",
            "[INFO]".blue().bold(),
            root.display()
        );
        eprintln!(
            "{} application: {}",
            "[INFO]".blue().bold(),
            locator.catalog().layout().app_name()
        );
    }

    match &cli.command {
        Commands::Dims => handle_dims(&locator, cli.json),
        Commands::Resolve { target } => handle_resolve(&locator, target, cli.json),
        Commands::Plugins => handle_plugins(&locator, cli.json),
        Commands::Helper { name, module } => handle_helper(&locator, name, module.as_deref()),
        Commands::Completions { .. } => unreachable!("handled before project loading"),
    }
}

/// Merge `--dim axis=value` overrides into the bootstrap selection.
fn apply_dim_overrides(locator: &mut ResourceLocator, dims: &[String]) -> Result<()> {
    if dims.is_empty() {
        return Ok(());
    }

    let mut pairs: Vec<(String, String)> = locator
        .dimensions()
        .current_dimension()
        .pairs()
        .to_vec();

    for dim in dims {
        let (axis, value) = dim.split_once('=').ok_or_else(|| StrataError::InvalidDimension {
            axis: dim.clone(),
            value: String::new(),
        })?;
        pairs.retain(|(a, _)| a != axis);
        pairs.push((axis.to_string(), value.to_string()));
    }

    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(a, v)| (a.as_str(), v.as_str()))
        .collect();
    locator.dimensions_mut().set_current_dimension(&borrowed)
}

fn handle_dims(locator: &ResourceLocator, json: bool) -> Result<()> {
    let dirs = locator.dimensions().dimension_dirs();

    if json {
        println!("{}", serde_json::to_string_pretty(&dirs).unwrap_or_default());
        return Ok(());
    }

    for (axis, value) in locator.dimensions().current_dimension().pairs() {
        println!("{}={}", axis.as_str().bold(), value);
    }
    for dir in dirs {
        println!("  {dir}");
    }
    Ok(())
}

fn handle_resolve(locator: &ResourceLocator, target: &ResolveTarget, json: bool) -> Result<()> {
    let paths = match target {
        ResolveTarget::Controllers { module } => locator.resolve_controller_dirs(module),
        ResolveTarget::Templates { module } => locator.resolve_template_dirs(module),
        ResolveTarget::Config { path } => locator.resolve_config_paths(path),
        ResolveTarget::Helpers { module } => locator.resolve_helper_dirs(module.as_deref()),
        ResolveTarget::Models => locator.resolve_model_dirs(),
        ResolveTarget::Generator {
            class,
            theme,
            skeleton,
        } => {
            if *skeleton {
                locator.resolve_generator_skeleton_dirs(class, theme)
            } else {
                locator.resolve_generator_template_dirs(class, theme)
            }
        }
    };

    print_paths(&paths, json);
    Ok(())
}

fn handle_plugins(locator: &ResourceLocator, json: bool) -> Result<()> {
    let plugins = locator.catalog().plugins();

    if json {
        let entries: Vec<serde_json::Value> = plugins
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "rootDir": p.root_dir,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).unwrap_or_default()
        );
        return Ok(());
    }

    if plugins.is_empty() {
        println!("No plugins installed");
        return Ok(());
    }
    for plugin in plugins {
        println!("{}  {}", plugin.name.as_str().bold(), plugin.root_dir.display());
    }
    Ok(())
}

fn handle_helper(locator: &ResourceLocator, name: &str, module: Option<&str>) -> Result<()> {
    let mut loader = HelperLoader::new();
    let path = loader.load(locator, module, name)?;
    println!("{}", path.display());
    Ok(())
}

fn print_paths(paths: &[PathBuf], json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(paths).unwrap_or_default()
        );
        return;
    }

    for path in paths {
        println!("{}", path.display());
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut out = io::stdout();

    match shell {
        Shell::Bash => generate(clap_complete::shells::Bash, &mut cmd, name, &mut out),
        Shell::Zsh => generate(clap_complete::shells::Zsh, &mut cmd, name, &mut out),
        Shell::Fish => generate(clap_complete::shells::Fish, &mut cmd, name, &mut out),
        Shell::PowerShell => generate(clap_complete::shells::PowerShell, &mut cmd, name, &mut out),
        Shell::Elvish => generate(clap_complete::shells::Elvish, &mut cmd, name, &mut out),
    }
}
