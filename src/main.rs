//! `wheelwright` CLI entrypoint.
//!
//! Installs the logger, runs the selected subcommand with stdout as the
//! output sink, and reports failures on stderr with exit code 1.

use clap::Parser;
use std::io::Write;
use wheelwright::cli::Cli;
use wheelwright::commands::{Result, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut std::io::stderr());
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; nothing else can be done.
    }
}
