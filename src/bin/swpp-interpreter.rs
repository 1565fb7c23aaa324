//! CLI entry point: parse a `.swa` source file, run it to completion, and
//! write its three log files (spec.md §7).

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use swpp_interpreter::consts::HEAP_COST_FACTOR;
use swpp_interpreter::interpreter::{Engine, RunReport};
use swpp_interpreter::parser;

/// Interpreter and cost-model evaluator for the SWPP register-based
/// assembly ISA.
#[derive(Debug, ClapParser)]
#[command(name = "swpp-interpreter", version, about)]
struct Cli {
    /// Path to a `.swa` source file.
    input: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}: {err}", cli.input.display());
            return ExitCode::from(1);
        }
    };

    let program = match parser::parse(&source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    let stdin = io::stdin();
    let engine = Engine::new(&program, stdin.lock(), io::stdout().lock());
    let report = match engine.run() {
        Ok(report) => report,
        Err(err) => {
            match err.line() {
                Some(line) => eprintln!("line {line}: {err}"),
                None => eprintln!("{err}"),
            }
            return ExitCode::from(2);
        }
    };

    if let Err(err) = write_logs(&report) {
        eprintln!("failed to write logs: {err}");
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

fn write_logs(report: &RunReport) -> io::Result<()> {
    let total_cost = report.execution_cost + report.max_heap_usage as f64 * HEAP_COST_FACTOR;

    let mut main_log = BufWriter::new(fs::File::create("swpp-interpreter.log")?);
    writeln!(main_log, "Returned: {}", report.return_value)?;
    writeln!(main_log, "Execution cost: {:.4}", report.execution_cost)?;
    writeln!(main_log, "Max heap usage (bytes): {:.4}", report.max_heap_usage as f64)?;
    writeln!(main_log, "Total cost: {total_cost:.4}")?;

    let mut cost_log = BufWriter::new(fs::File::create("swpp-interpreter-cost.log")?);
    writeln!(cost_log, "Total waiting cost: {:.4}", report.total_wait_cost)?;
    write!(cost_log, "{}", report.cost_tree.render())?;

    let mut inst_log = BufWriter::new(fs::File::create("swpp-interpreter-inst.log")?);
    write!(inst_log, "{}", report.histogram.render())?;

    Ok(())
}
