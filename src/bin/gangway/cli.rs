//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Gangway - A Python ctypes binding generator for C libraries
#[derive(Parser)]
#[command(name = "gangway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Python ctypes module from a C header
    Generate(GenerateArgs),

    /// Show the declarations extracted from a C header
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to the C header to parse
    pub header: PathBuf,

    /// Path of the Python module to write
    pub output: PathBuf,

    /// Library name used for the default shared-object path
    /// (defaults to the header file stem)
    #[arg(long)]
    pub lib_name: Option<String>,

    /// Class name for the generated interface
    /// (defaults to a camel-cased form of the library name)
    #[arg(long)]
    pub class_name: Option<String>,

    /// Fixed library path baked into the generated loader
    #[arg(long)]
    pub lib_path: Option<String>,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Path to the C header to parse
    pub header: PathBuf,

    /// Emit the parsed declarations as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
