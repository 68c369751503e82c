#[macro_use]
extern crate log;

use std::{
    env::args,
    fs::File,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use pretty_env_logger::formatted_builder;
use propsat::{
    prelude::*,
    process::{self, check_line},
    report::Report,
};

const DEFAULT_INPUT: &str = "data.txt";
const DEFAULT_OUTPUT: &str = "saida.txt";

fn usage_string() -> String {
    format!(
        "Usage: {} <command>

command:
    check [input_file] [output_file] - check every formula in the file, one per line
        (defaults: {} and {}, '-' as output_file writes to stdout)
    solve <formula> - check a single formula",
        args().next().unwrap_or_else(|| "propsat".to_owned()),
        DEFAULT_INPUT,
        DEFAULT_OUTPUT
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
    #[snafu(display("Failed to open input file '{}'", path.display()))]
    OpenInput { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to create output file '{}'", path.display()))]
    CreateOutput { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to check formulas in '{}'", path.display()))]
    ProcessFile {
        path: PathBuf,
        source: process::Error,
    },
    #[snafu(display("Failed to check formula '{}'", formula))]
    InvalidFormula {
        formula: String,
        source: process::LineError,
    },
}

fn check_file(input_path: PathBuf, output_path: Option<PathBuf>) -> Result<(), Error> {
    let input = BufReader::new(File::open(&input_path).context(OpenInput {
        path: input_path.clone(),
    })?);

    let summary = match output_path {
        Some(output_path) => {
            let output = BufWriter::new(File::create(&output_path).context(CreateOutput {
                path: output_path.clone(),
            })?);
            process::process(input, output)
        }
        None => {
            let stdout = io::stdout();
            process::process(input, stdout.lock())
        }
    }
    .context(ProcessFile { path: input_path })?;

    if summary.invalid > 0 {
        warn!("{} line(s) could not be checked", summary.invalid);
    }

    Ok(())
}

/// Input and output paths of `check`. `None` as output means stdout.
fn check_paths(args: &[String]) -> (PathBuf, Option<PathBuf>) {
    let input_path = args.get(0).map(String::as_str).unwrap_or(DEFAULT_INPUT);
    let output_path = match args.get(1).map(String::as_str) {
        Some("-") => None,
        Some(path) => Some(path),
        None => Some(DEFAULT_OUTPUT),
    };

    (PathBuf::from(input_path), output_path.map(PathBuf::from))
}

fn dispatch_command(args: Vec<String>) -> Result<(), Error> {
    match args.get(0).map(|s| s.as_str()) {
        Some("check") => {
            let (input_path, output_path) = check_paths(&args[1..]);
            check_file(input_path, output_path)?;
        }
        Some("solve") => {
            let formula = args.get(1).context(MissingArgument)?;
            let verdict = check_line(formula).context(InvalidFormula {
                formula: formula.to_owned(),
            })?;
            println!("{}", verdict);
        }
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
        None => {
            println!("{}", usage_string());
        }
    }

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else if cfg!(debug_assertions) {
        builder.parse_filters("propsat=debug");
    } else {
        builder.parse_filters("propsat=warn");
    }

    if let Err(e) = builder.try_init() {
        eprintln!("Failed to initialize the logger: {}", e);
    }
}

fn main() -> Result<(), Report> {
    init_logger();

    let mut args = args();

    // drop arg[0]
    args.next();

    dispatch_command(args.collect())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(args: &[&str]) -> (PathBuf, Option<PathBuf>) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        check_paths(&args)
    }

    #[test]
    fn check_defaults_to_data_and_saida() {
        assert_eq!(
            paths(&[]),
            (PathBuf::from("data.txt"), Some(PathBuf::from("saida.txt")))
        );
        assert_eq!(
            paths(&["in.txt"]),
            (PathBuf::from("in.txt"), Some(PathBuf::from("saida.txt")))
        );
    }

    #[test]
    fn check_explicit_paths() {
        assert_eq!(
            paths(&["in.txt", "out.txt"]),
            (PathBuf::from("in.txt"), Some(PathBuf::from("out.txt")))
        );
        assert_eq!(paths(&["in.txt", "-"]), (PathBuf::from("in.txt"), None));
    }
}
