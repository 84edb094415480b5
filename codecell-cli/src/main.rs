// Command-line interface for codecell
//
// This binary is a pandoc JSON filter. pandoc runs it with the target output format as the
// first argument, pipes the document AST in as JSON on stdin and reads the filtered AST back
// from stdout. All table rewriting lives in the codecell-filter crate; this layer only wires
// configuration, logging and I/O around it.
//
// Usage:
//  pandoc in.docx -t gfm --wrap=none --filter codecell -o out.md   - As a pandoc filter
//  codecell [<target-format>] [--input <file>] [--output <file>]   - On a saved `pandoc -t json` dump
//  codecell --print-config                                         - Show the effective settings
//
// Logging goes to stderr, stdout carries the document.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use codecell_config::{CodecellConfig, Loader, LogLevel};
use codecell_filter::{run_json, CodeTableFilter, FilterError, NormalizeOptions};
use log::{debug, LevelFilter};
use std::fs;
use std::io::{self, Read, Write};

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

fn build_cli() -> Command {
    Command::new("codecell")
        .version(env!("CARGO_PKG_VERSION"))
        .about("pandoc filter that turns single-cell code tables into markdown tables")
        .long_about(
            "codecell is a pandoc JSON filter.\n\n\
            Tables whose head is exactly one row with one cell (how pandoc reads many\n\
            code blocks from .docx files) are replaced by a raw markdown block:\n\n  \
            | Code |\n  \
            |------|\n  \
            | line one <br> line two |\n\n\
            Every other table is left untouched.\n\n\
            Examples:\n  \
            pandoc in.docx -t gfm --wrap=none --filter codecell -o out.md\n  \
            pandoc in.docx -t json | codecell markdown | pandoc -f json -t gfm\n  \
            codecell --input doc.json --output filtered.json",
        )
        .arg(
            Arg::new("target")
                .help("Target output format (passed by pandoc, informational)")
                .required(false)
                .index(1)
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_name("PATH")
                .help("Read the pandoc JSON document from a file instead of stdin")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("PATH")
                .help("Write the filtered document to a file instead of stdout")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a codecell.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log verbosity on stderr (overrides log.level)")
                .value_parser(clap::builder::PossibleValuesParser::new(LOG_LEVELS)),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .help("Print the effective normalizer settings and exit")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("log-level").map(|s| s.as_str()),
    );
    init_logging(config.log.level);

    let filter = CodeTableFilter::new(NormalizeOptions::from(&config.normalize));

    if matches.get_flag("print-config") {
        print!("{}", describe_options(filter.options()));
        return;
    }

    handle_filter_command(&matches, &filter);
}

/// Run the code table filter over one document.
fn handle_filter_command(matches: &ArgMatches, filter: &CodeTableFilter) {
    if let Some(target) = matches.get_one::<String>("target") {
        debug!("filtering for target format '{target}'");
    }

    let input = matches.get_one::<String>("input").map(|s| s.as_str());
    let output = matches.get_one::<String>("output").map(|s| s.as_str());

    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let filtered = run_json(&source, filter).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    write_output(output, &filtered).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn read_input(path: Option<&str>) -> Result<String, FilterError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| FilterError::Io {
            path: path.to_string(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| FilterError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&str>, json: &str) -> Result<(), FilterError> {
    match path {
        Some(path) => fs::write(path, json).map_err(|source| FilterError::Io {
            path: path.to_string(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| FilterError::Io {
                    path: "<stdout>".to_string(),
                    source,
                })
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>, log_level: Option<&str>) -> CodecellConfig {
    let loader = Loader::new().with_optional_file("codecell.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match log_level {
        Some(level) => loader.set_override("log.level", level),
        None => Ok(loader),
    };

    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Configure `env_logger` on stderr. `RUST_LOG`, when set, wins over the configured level.
fn init_logging(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_filter(level))
        .target(env_logger::Target::Stderr);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    let _ = builder.try_init();
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::Off,
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

fn describe_options(options: &NormalizeOptions) -> String {
    format!(
        "header_label = {:?}\nline_break = {:?}\nraw_format = {:?}\n",
        options.header_label, options.line_break, options.raw_format
    )
}
