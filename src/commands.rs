//! Implementations of the CLI subcommands.
//!
//! Each command writes its result to the supplied writer so that callers
//! (the binary, or tests) decide where output goes.

use std::io::{self, Write};

use thiserror::Error;
use wheelwright_packager::wheel::target::TargetTriple;

use crate::cli::{BuildArgs, ClassifyArgs, Cli, Command, DiscoverArgs};
use crate::config::{ConfigError, PackagesConfig, SetupConfig};
use crate::setup::{self, SetupError};

/// Errors surfaced by a CLI run.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Discovery, validation, or packaging failed.
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// Output could not be encoded as JSON.
    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Run the parsed command, writing results to `out`.
///
/// # Errors
///
/// Returns the first error raised by the selected command.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Discover(args) => run_discover(args, out),
        Command::Classify(args) => run_classify(args, out),
        Command::Build(args) => run_build(args, out),
    }
}

fn run_discover(args: &DiscoverArgs, out: &mut dyn Write) -> Result<()> {
    let packages_config = PackagesConfig {
        namespace: args.namespace.clone(),
        include: args.include.clone(),
        exclude: args.exclude.clone(),
    };
    let packages = setup::discover_packages(&packages_config, &args.source_tree)?;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&packages)?)?;
    } else {
        for name in &packages {
            writeln!(out, "{name}")?;
        }
    }
    Ok(())
}

fn run_classify(args: &ClassifyArgs, out: &mut dyn Write) -> Result<()> {
    let config = SetupConfig::load(&args.config)?;
    let plan = setup::plan(&config, &args.source_tree)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&plan.descriptor)?)?;
    Ok(())
}

fn run_build(args: &BuildArgs, out: &mut dyn Write) -> Result<()> {
    let config = SetupConfig::load(&args.config)?;
    let target = args
        .target
        .as_deref()
        .map(TargetTriple::try_from)
        .transpose()
        .map_err(SetupError::from)?;
    let output = setup::build(&config, &args.source_tree, &args.output_dir, target.as_ref())?;
    writeln!(out, "{}", output.wheel_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use clap::Parser;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    struct Project {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn project() -> Project {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        for package in ["python/mlir/dialects", "python/other"] {
            fs::create_dir_all(root.join(package)).expect("mkdir");
        }
        fs::write(root.join("python/mlir/__init__.py"), "").expect("write");
        fs::write(
            root.join("wheelwright.toml"),
            concat!(
                "name = \"mlir-python-bindings\"\n",
                "version = \"19.1.0\"\n",
                "[packages]\n",
                "namespace = \"mlir\"\n",
            ),
        )
        .expect("write config");
        Project { _dir: dir, root }
    }

    fn run_args(args: &[&str]) -> (Result<()>, String) {
        let cli = Cli::parse_from(args);
        let mut out = Vec::new();
        let result = run(&cli, &mut out);
        (result, String::from_utf8(out).expect("utf-8 output"))
    }

    #[rstest]
    fn discover_prints_one_name_per_line(project: Project) {
        let tree = project.root.join("python");
        let (result, out) = run_args(&[
            "wheelwright",
            "discover",
            "--source-tree",
            tree.as_str(),
            "--namespace",
            "mlir",
        ]);

        result.expect("discover succeeds");
        assert_eq!(out, "mlir\nmlir.dialects\n");
    }

    #[rstest]
    fn discover_json_prints_an_array(project: Project) {
        let tree = project.root.join("python");
        let (result, out) = run_args(&[
            "wheelwright",
            "discover",
            "--source-tree",
            tree.as_str(),
            "--include",
            "*",
            "--exclude",
            "mlir.*",
            "--json",
        ]);

        result.expect("discover succeeds");
        let names: Vec<String> = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(names, ["mlir", "other"]);
    }

    #[rstest]
    fn classify_prints_descriptor(project: Project) {
        let config = project.root.join("wheelwright.toml");
        let tree = project.root.join("python");
        let (result, out) = run_args(&[
            "wheelwright",
            "classify",
            "--config",
            config.as_str(),
            "--source-tree",
            tree.as_str(),
        ]);

        result.expect("classify succeeds");
        let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(json["name"], "mlir-python-bindings");
        assert_eq!(json["has_ext_modules"], true);
        assert_eq!(json["zip_safe"], false);
        assert_eq!(json["packages"], serde_json::json!(["mlir", "mlir.dialects"]));
    }

    #[rstest]
    fn build_prints_wheel_path(project: Project) {
        let config = project.root.join("wheelwright.toml");
        let tree = project.root.join("python");
        let dist = project.root.join("dist");
        let (result, out) = run_args(&[
            "wheelwright",
            "build",
            "--config",
            config.as_str(),
            "--source-tree",
            tree.as_str(),
            "--output-dir",
            dist.as_str(),
            "--target",
            "x86_64-apple-darwin",
        ]);

        result.expect("build succeeds");
        let expected = dist.join("mlir_python_bindings-19.1.0-py3-none-macosx_10_12_x86_64.whl");
        assert_eq!(out.trim_end(), expected.as_str());
        assert!(expected.is_file());
    }

    #[rstest]
    fn build_rejects_unsupported_target(project: Project) {
        let config = project.root.join("wheelwright.toml");
        let tree = project.root.join("python");
        let dist = project.root.join("dist");
        let (result, out) = run_args(&[
            "wheelwright",
            "build",
            "--config",
            config.as_str(),
            "--source-tree",
            tree.as_str(),
            "--output-dir",
            dist.as_str(),
            "--target",
            "wasm32-unknown-unknown",
        ]);

        let err = result.expect_err("unsupported target");
        assert!(matches!(err, CommandError::Setup(SetupError::Validation(_))));
        assert!(out.is_empty());
    }

    #[rstest]
    fn missing_config_is_reported(project: Project) {
        let config = project.root.join("absent.toml");
        let tree = project.root.join("python");
        let (result, _) = run_args(&[
            "wheelwright",
            "classify",
            "--config",
            config.as_str(),
            "--source-tree",
            tree.as_str(),
        ]);

        let err = result.expect_err("missing config");
        assert!(matches!(err, CommandError::Config(ConfigError::Read { .. })));
    }
}
