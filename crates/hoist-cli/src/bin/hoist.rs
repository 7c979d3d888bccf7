#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::process::ExitCode;

use hoist_cli::args::CliArgs;
use hoist_cli::driver;

/// Parse errors were reported but output was still produced.
const EXIT_DIAGNOSTICS_OUTPUTS_GENERATED: u8 = 2;

fn main() -> ExitCode {
    hoist_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::compile(args, &cwd)?;

    for diagnostic in &result.diagnostics {
        eprintln!("{} {diagnostic}", "error:".red().bold());
    }

    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();
    for module in &result.modules {
        match &module.output_path {
            Some(path) => {
                let status = if module.changed { "lowered" } else { "copied" };
                eprintln!("{} {}", status.green(), path.display());
            }
            None => stdout
                .write_all(module.text.as_bytes())
                .context("failed to write to stdout")?,
        }
    }
    for path in &result.metadata_files {
        eprintln!("{} {}", "metadata".cyan(), path.display());
    }

    if result.diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_DIAGNOSTICS_OUTPUTS_GENERATED))
    }
}
