use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Inspect layered, dimension-aware resource resolution for a project")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (default: current directory)
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Override a dimension axis, e.g. --dim channel=web (repeatable)
    #[arg(long = "dim", value_name = "AXIS=VALUE", global = true)]
    pub dims: Vec<String>,

    /// Print results as a JSON array
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the active dimension and its cascade directory names
    Dims,

    /// Print the ordered, existing candidate paths for a resource category
    Resolve {
        #[command(subcommand)]
        target: ResolveTarget,
    },

    /// List installed plugins in registry order
    Plugins,

    /// Locate a helper file by name
    Helper {
        /// Helper name (without the file suffix)
        name: String,

        /// Module to search first
        #[arg(long)]
        module: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ResolveTarget {
    /// Controller script directories for a module
    Controllers {
        module: String,
    },

    /// Template directories for a module
    Templates {
        module: String,
    },

    /// Config file candidates, ascending precedence
    Config {
        /// Relative config path, e.g. settings.yml or modules/blog/config/view.yml
        path: String,
    },

    /// Helper directories
    Helpers {
        /// Module to search first
        #[arg(long)]
        module: Option<String>,
    },

    /// Model directories
    Models,

    /// Generator asset directories for a class and theme
    Generator {
        class: String,
        theme: String,

        /// Resolve skeleton directories instead of template directories
        #[arg(long)]
        skeleton: bool,
    },
}
