use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use processor::format_logs;
use processor::Processor;
use scheduler::round_robin;

/// Round robin scheduler simulation over a tree of processes.
///
/// Reads one action per line from INPUT and writes the state of the
/// scheduler after every action to OUTPUT.
#[derive(Parser, Debug)]
#[command(name = "schedsim", about = "Round robin scheduler simulation")]
struct Args {
    /// Time units a process may run before it is preempted
    quantum: NonZeroUsize,

    /// Script with one action per line
    input: PathBuf,

    /// Trace file, standard output when omitted
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let script = fs::read(&args.input)
        .with_context(|| format!("failed to open input file '{}'", args.input.display()))?;
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to open output file '{}'", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    info!(
        quantum = args.quantum.get(),
        input = %args.input.display(),
        "starting simulation"
    );
    let logs = Processor::run(round_robin(args.quantum), script_lines(&script));

    output
        .write_all(format_logs(&logs).as_bytes())
        .and_then(|()| output.flush())
        .context("failed to write the trace")?;
    info!(iterations = logs.len(), "simulation halted");
    Ok(())
}

/// Splits the raw script into lines.
///
/// Bytes that are not valid UTF-8 are replaced, so such a line reaches the
/// parser and is skipped as malformed instead of failing the whole run.
fn script_lines(script: &[u8]) -> impl Iterator<Item = Cow<'_, str>> {
    script
        .split(|byte| *byte == b'\n')
        .map(String::from_utf8_lossy)
}

// Do not delete this line
#[cfg(test)]
mod tests;
