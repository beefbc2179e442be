//! CLI argument definitions for the `wheelwright` binary.
//!
//! Parsing lives here, apart from the command implementations in
//! [`crate::commands`], so tests can build a [`Cli`] with `parse_from`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Discover namespace packages and build platform-tagged wheels.
#[derive(Parser, Debug)]
#[command(name = "wheelwright")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  List the packages under a namespace:\n",
    "    $ wheelwright discover --source-tree python --namespace mlir\n\n",
    "  Show how a project is classified:\n",
    "    $ wheelwright classify --config wheelwright.toml --source-tree python\n\n",
    "  Build a wheel for another platform:\n",
    "    $ wheelwright build --config wheelwright.toml --source-tree python \\\n",
    "        --output-dir dist --target aarch64-apple-darwin\n\n",
    "Set RUST_LOG=debug to trace discovery and packaging.",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the packages found in a source tree.
    Discover(DiscoverArgs),

    /// Print the distribution descriptor for a project as JSON.
    Classify(ClassifyArgs),

    /// Build a platform-tagged wheel.
    Build(BuildArgs),
}

/// Arguments for the discover command.
#[derive(Args, Debug, Clone)]
pub struct DiscoverArgs {
    /// Directory containing the top-level packages.
    #[arg(long, value_name = "DIR")]
    pub source_tree: Utf8PathBuf,

    /// Root namespace to discover, with everything below it.
    #[arg(
        long,
        value_name = "NS",
        required_unless_present = "include",
        conflicts_with = "include"
    )]
    pub namespace: Option<String>,

    /// Include pattern over dotted package names (can be repeated).
    #[arg(long, value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Exclude pattern over dotted package names (can be repeated).
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Output a JSON array instead of one name per line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the classify command.
#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path to `wheelwright.toml`.
    #[arg(long, value_name = "FILE")]
    pub config: Utf8PathBuf,

    /// Directory containing the top-level packages.
    #[arg(long, value_name = "DIR")]
    pub source_tree: Utf8PathBuf,
}

/// Arguments for the build command.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Path to `wheelwright.toml`.
    #[arg(long, value_name = "FILE")]
    pub config: Utf8PathBuf,

    /// Directory containing the top-level packages.
    #[arg(long, value_name = "DIR")]
    pub source_tree: Utf8PathBuf,

    /// Directory the wheel is written to.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Utf8PathBuf,

    /// Target triple, overriding the configuration [default: host].
    #[arg(long, value_name = "TRIPLE")]
    pub target: Option<String>,
}
