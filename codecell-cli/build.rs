use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the log levels from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("codecell")
        .version(env!("CARGO_PKG_VERSION"))
        .about("pandoc filter that turns single-cell code tables into markdown tables")
        .arg(
            Arg::new("target")
                .help("Target output format (passed by pandoc, informational)")
                .index(1)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .help("Read the pandoc JSON document from a file instead of stdin")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the filtered document to a file instead of stdout")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a codecell.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log verbosity on stderr")
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS)),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .help("Print the effective normalizer settings and exit")
                .action(ArgAction::SetTrue),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "codecell", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "codecell", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "codecell", &outdir)?;

    Ok(())
}
