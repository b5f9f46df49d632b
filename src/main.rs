use std::{
    path::{Path, PathBuf},
    process::{Command, ExitCode},
};

use anyhow::{Context, ensure};
use clap::{CommandFactory, Parser as ClapParser, error::ErrorKind};
use colored::Colorize;
use gatec::{
    CompileFailure, CompileOptions, CompileResult, Compilation, compile_with,
    backend::Target,
    frontend::{SourceFile, SourceFileOrigin},
    middle::quad::pretty_print::pretty_print_quads,
};
use tracing::Level;

#[derive(Debug, ClapParser)]
#[command(version, about, long_about = None)]
pub struct Args {
    source_files: Vec<PathBuf>,

    /// Write the generated code to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Target::Python)]
    target: Target,

    /// Print the token stream
    #[arg(short, long)]
    tokens: bool,

    /// Print the syntax tree
    #[arg(short, long)]
    ast: bool,

    /// Print the symbol table
    #[arg(short, long)]
    symbols: bool,

    /// Print the quads before and after optimization
    #[arg(short, long)]
    quads: bool,

    #[arg(long)]
    no_optimize: bool,

    /// Print the truth table computed by the built-in simulator
    #[arg(long)]
    truth_table: bool,

    /// Execute the generated Python with `python3`
    #[arg(long)]
    run: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    if args.source_files.is_empty() {
        Args::command()
            .error(ErrorKind::MissingRequiredArgument, "Missing source files!")
            .exit();
    }

    for source_file in &args.source_files {
        if !source_file.exists() {
            Args::command()
                .error(
                    ErrorKind::InvalidValue,
                    format!("Source file '{}' does not exist!", source_file.display()),
                )
                .exit()
        }

        if !source_file.is_file() {
            Args::command()
                .error(
                    ErrorKind::InvalidValue,
                    format!("Input path '{}' is not a file!", source_file.display()),
                )
                .exit()
        }
    }

    if args.output.is_some() && args.source_files.len() > 1 {
        Args::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--output can only be used with a single source file",
            )
            .exit()
    }

    if args.run && args.target != Target::Python {
        Args::command()
            .error(
                ErrorKind::ArgumentConflict,
                "--run is only supported for the python target",
            )
            .exit()
    }

    /* Read in source files */

    let source_files = args
        .source_files
        .iter()
        .map(|path| {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;

            Ok(SourceFile {
                contents,
                origin: SourceFileOrigin::File(path.clone()),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let options = CompileOptions {
        target: args.target,
        optimize: !args.no_optimize,
    };

    let mut failed = false;

    for source_file in &source_files {
        match compile_with(&source_file.contents, &options) {
            CompileResult::Success(compilation) => emit(&args, &compilation)?,
            CompileResult::Failure(failure) => {
                report_failure(source_file, &failure);
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn emit(args: &Args, compilation: &Compilation) -> anyhow::Result<()> {
    if args.tokens {
        println!("{}", "Tokens:".bright_red());

        for token in &compilation.tokens {
            println!("    {token}");
        }
    }

    if args.ast {
        println!("{}", compilation.ast);
    }

    if args.symbols {
        println!("{}", compilation.symbol_table);
    }

    if args.quads {
        pretty_print_quads("Quads", &compilation.quads);
        pretty_print_quads("Optimized quads", &compilation.optimized_quads);
    }

    if args.truth_table {
        print!("{}", compilation.truth_table());
    }

    if let Some(output) = &args.output {
        std::fs::write(output, &compilation.generated_code)
            .with_context(|| format!("Failed to write '{}'", output.display()))?;
    } else if !args.run {
        print!("{}", compilation.generated_code);
    }

    if args.run {
        run_python(&compilation.generated_code)?;
    }

    Ok(())
}

fn report_failure(source_file: &SourceFile, failure: &CompileFailure) {
    for diagnostic in &failure.diagnostics {
        eprintln!(
            "{}: {} ({})",
            format!("error[{}]", failure.stage).bright_red().bold(),
            diagnostic,
            source_file.origin
        );
    }

    if let Some(highlight) = failure
        .location
        .and_then(|(line, column)| source_file.highlight(line, column))
    {
        eprintln!("{highlight}");
    }
}

fn run_python(code: &str) -> anyhow::Result<()> {
    let script = mktemp::Temp::new_file().context("Could not create a temporary file")?;
    let path: &Path = script.as_ref();

    std::fs::write(path, code)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;

    let status = Command::new("python3")
        .arg(path)
        .status()
        .context("Could not start python3")?;

    ensure!(status.success(), "python3 exited with {status}");

    Ok(())
}
