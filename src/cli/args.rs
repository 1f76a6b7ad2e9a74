//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Parser, Subcommand, ValueEnum,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::delta::PatchMode;
use crate::export::CardinalityPolicy;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Model-to-config generator and flat JSON delta tool
#[derive(Parser)]
#[command(
    name = "modelconf",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate nested configs and metadata from class models, diff and patch flat JSON",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Set up .modelconf directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .modelconf/settings.toml")]
    Config,

    /// Build the nested XML config and class metadata from a model
    #[command(
        about = "Generate nested XML config and metadata JSON from a model",
        after_help = "Examples:\n  modelconf generate\n  modelconf generate model.xml --root BTS --out build"
    )]
    Generate {
        /// Model XML (defaults to input_dir/files.model)
        #[arg(value_name = "MODEL")]
        model: Option<PathBuf>,

        /// Root class of the nested document (overrides config)
        #[arg(short, long)]
        root: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Multiplicity tie-break (overrides config)
        #[arg(long, value_enum)]
        cardinality: Option<CardinalityArg>,
    },

    /// Compute the delta between two flat JSON documents
    #[command(about = "Diff two flat JSON documents into a delta")]
    Diff {
        /// Original document (defaults to input_dir/files.base_config)
        base: Option<PathBuf>,

        /// Changed document (defaults to input_dir/files.patched_config)
        patched: Option<PathBuf>,

        /// Where to write the delta (defaults to output_dir/files.delta)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rebuild a document from a base and a delta
    #[command(about = "Apply a delta to a flat JSON document")]
    Patch {
        /// Original document (defaults to input_dir/files.base_config)
        base: Option<PathBuf>,

        /// Delta document (defaults to output_dir/files.delta)
        delta: Option<PathBuf>,

        /// Where to write the result (defaults to output_dir/files.patched_output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// How the delta is applied (overrides config)
        #[arg(long, value_enum)]
        mode: Option<PatchModeArg>,
    },

    /// Run generate, diff and patch with configured paths
    #[command(about = "Run the full generate, diff, patch sequence")]
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CardinalityArg {
    Smallest,
    Strict,
}

impl From<CardinalityArg> for CardinalityPolicy {
    fn from(arg: CardinalityArg) -> Self {
        match arg {
            CardinalityArg::Smallest => CardinalityPolicy::Smallest,
            CardinalityArg::Strict => CardinalityPolicy::Strict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatchModeArg {
    DeltaOnly,
    InPlace,
}

impl From<PatchModeArg> for PatchMode {
    fn from(arg: PatchModeArg) -> Self {
        match arg {
            PatchModeArg::DeltaOnly => PatchMode::DeltaOnly,
            PatchModeArg::InPlace => PatchMode::InPlace,
        }
    }
}
