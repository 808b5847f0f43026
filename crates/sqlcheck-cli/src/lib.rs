//! # sqlcheck-cli
//!
//! The `sqlcheck` command: validates SQL files, inline strings or standard
//! input and reports each result as text or JSON.

pub mod cli;
pub mod config;
pub mod report;

use std::fs;
use std::io::{Read, Write};

use anyhow::Context;
use sqlcheck_core::Validator;
use tracing::{debug, info};

use crate::cli::{Cli, OutputFormat};
use crate::report::{Report, Source};

/// Validates every input named by `cli` and writes the reports to `out`.
///
/// Returns `true` when every input is valid.
///
/// # Errors
///
/// Fails when the configuration cannot be resolved, an input cannot be read,
/// or the output cannot be written.
pub fn run(cli: &Cli, stdin: impl Read, out: &mut impl Write) -> anyhow::Result<bool> {
    let validator = Validator::new(config::resolve(cli)?);
    debug!(origin = %config::origin(cli), "configuration loaded");

    let inputs = collect_inputs(cli, stdin)?;
    let mut reports = Vec::with_capacity(inputs.len());

    for (source, bytes) in &inputs {
        debug!(%source, bytes = bytes.len(), "validating input");
        if cli.tokens {
            write_tokens(out, source, bytes, &validator)?;
        }
        reports.push(Report::build(source, bytes, &validator));
    }

    let invalid = reports.iter().filter(|report| !report.valid).count();
    match cli.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
        OutputFormat::Text if !cli.quiet => {
            for report in &reports {
                writeln!(out, "{}", report.render_text())?;
            }
        }
        OutputFormat::Text => {}
    }

    if reports.len() > 1 {
        info!(inputs = reports.len(), invalid, "validation finished");
    }
    Ok(invalid == 0)
}

/// Reads files and inline strings in command-line order, or stdin when there
/// are neither.
fn collect_inputs(cli: &Cli, mut stdin: impl Read) -> anyhow::Result<Vec<(Source, Vec<u8>)>> {
    let mut inputs = Vec::with_capacity(cli.files.len() + cli.execute.len());

    for path in &cli.files {
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        inputs.push((Source::File(path.clone()), bytes));
    }
    for (index, sql) in cli.execute.iter().enumerate() {
        inputs.push((Source::Inline(index + 1), sql.clone().into_bytes()));
    }

    if inputs.is_empty() {
        let mut bytes = Vec::new();
        stdin
            .read_to_end(&mut bytes)
            .context("failed to read standard input")?;
        inputs.push((Source::Stdin, bytes));
    }
    Ok(inputs)
}

fn write_tokens(
    out: &mut impl Write,
    source: &Source,
    bytes: &[u8],
    validator: &Validator,
) -> anyhow::Result<()> {
    let sql = String::from_utf8_lossy(bytes);
    writeln!(out, "{source}:")?;
    for token in validator.tokens(&sql) {
        write!(
            out,
            "  {:>5}..{:<5} {:<14} {:?}",
            token.span.start,
            token.span.end,
            format!("{:?}", token.kind.category()),
            token.text
        )?;
        // Literal contents, when quoting or escapes change them.
        let value = token.unquoted();
        if value != token.text {
            write!(out, " = {value:?}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
