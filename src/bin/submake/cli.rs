//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use submake::TargetOrder;

/// submake - Generate a Makefile that fetches and builds git submodules
#[derive(Parser)]
#[command(name = "submake")]
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
    /// Generate a Makefile from a submodule configuration
    Generate(GenerateArgs),

    /// List the configured submodules
    List(ListArgs),

    /// Check that the build tools the Makefile needs are installed
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// JSON configuration file (defaults to a built-in example)
    pub config: Option<PathBuf>,

    /// Output Makefile path
    #[arg(short, long, default_value = "Makefile")]
    pub output: PathBuf,

    /// Enter submodules interactively
    #[arg(short, long, conflicts_with = "config")]
    pub interactive: bool,

    /// Target ordering
    #[arg(long, value_enum, default_value_t = OrderArg::Input)]
    pub order: OrderArg,
}

#[derive(Args)]
pub struct ListArgs {
    /// JSON configuration file (defaults to a built-in example)
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct DoctorArgs {
    /// JSON configuration file (defaults to a built-in example)
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// `--order` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Keep the configuration's order
    Input,
    /// Emit dependencies first and make targets require them
    Dependencies,
}

impl From<OrderArg> for TargetOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Input => TargetOrder::Input,
            OrderArg::Dependencies => TargetOrder::Dependencies,
        }
    }
}
