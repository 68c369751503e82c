/*!
Line-by-line driver: reads formulas, writes one record per non-empty line.
*/

use std::io::{BufRead, Write};

use crate::parser::{self, parse};
use crate::prelude::*;
use crate::solver::{self, check, Verdict};

/// A failure confined to one input line.
#[derive(Debug, Snafu)]
pub enum LineError {
    #[snafu(display("Syntax error: {}", source))]
    Syntax { source: parser::Error },
    #[snafu(display("Capacity exceeded: {}", source))]
    Capacity { source: solver::Error },
    #[snafu(display("Encoding error: {}", source))]
    Encoding { source: std::str::Utf8Error },
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Failed to read input line {}", line_number))]
    ReadInput {
        line_number: usize,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write the record for input line {}", line_number))]
    WriteOutput {
        line_number: usize,
        source: std::io::Error,
    },
}

/// Parses and checks a single line.
pub fn check_line(text: &str) -> Result<Verdict, LineError> {
    let (formula, mut variables) = parse(text).context(Syntax)?.into_parts();
    check(formula.as_ref(), &mut variables).context(Capacity)
}

/// Decodes and checks a single line of raw input.
pub fn check_bytes(bytes: &[u8]) -> Result<Verdict, LineError> {
    let text = std::str::from_utf8(bytes).context(Encoding)?;
    check_line(text)
}

/// Strips a trailing `\n` or `\r\n`.
fn strip_terminator(mut line: &[u8]) -> &[u8] {
    if let Some(rest) = line.strip_suffix(b"\n") {
        line = rest;
        if let Some(rest) = line.strip_suffix(b"\r") {
            line = rest;
        }
    }
    line
}

/// Counts of the records written by [`process`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub satisfiable: usize,
    pub unsatisfiable: usize,
    pub invalid: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.satisfiable + self.unsatisfiable + self.invalid
    }
}

/// Checks every line of `input` and writes the records to `output`, in input order.
///
/// Lines with nothing but a line terminator produce no record.
/// A line that fails to parse or to be checked produces a diagnostic record and processing goes on.
pub fn process<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Summary, Error> {
    let mut summary = Summary::default();
    let mut buffer = Vec::new();
    let mut line_number: usize = 0;

    loop {
        buffer.clear();
        let read = input.read_until(b'\n', &mut buffer).context(ReadInput {
            line_number: line_number + 1,
        })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = strip_terminator(&buffer);
        if line.is_empty() {
            continue;
        }

        match check_bytes(line) {
            Ok(verdict) => {
                debug!("Line {}: {}", line_number, verdict);
                if verdict.is_satisfiable() {
                    summary.satisfiable += 1;
                } else {
                    summary.unsatisfiable += 1;
                }
                writeln!(output, "{}", verdict).context(WriteOutput { line_number })?;
            }
            Err(e) => {
                warn!("Line {}: {}", line_number, e);
                summary.invalid += 1;
                writeln!(
                    output,
                    "Linha inválida: {} ({})",
                    String::from_utf8_lossy(line),
                    e
                )
                .context(WriteOutput { line_number })?;
            }
        }
    }

    output.flush().context(WriteOutput { line_number })?;

    info!(
        "Checked {} line(s): {} satisfiable, {} unsatisfiable, {} invalid",
        summary.total(),
        summary.satisfiable,
        summary.unsatisfiable,
        summary.invalid
    );

    Ok(summary)
}
