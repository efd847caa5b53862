//! `settings` CLI — read, update, and normalize JSON settings documents.
//!
//! ## Usage
//!
//! ```sh
//! # Print a value (stdin → stdout)
//! echo '{"display":{"zoom":100}}' | settings get display/zoom
//!
//! # Read from a file
//! settings get display/theme -i settings.json
//!
//! # Update a file in place (the file is created if missing)
//! settings set display/zoom 150 -i settings.json -o settings.json
//!
//! # Force a kind, or pass a JSON list/map
//! settings set recent '["a.ptb","b.ptb"]' --kind json -i settings.json
//!
//! # Refuse to replace a non-map parent
//! settings set display/zoom/x 1 --strict -i settings.json
//!
//! # Re-save with sorted keys
//! settings dump -i settings.json --compact
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use settings_core::{reader, writer, Format, SettingValue, Settings};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(
    name = "settings",
    version,
    about = "Read, update and normalize hierarchical JSON settings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); logs go to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value stored at a slash-delimited key as JSON
    Get {
        /// Key such as `display/zoom`
        key: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Store a value at a key and write the updated document
    Set {
        /// Key such as `display/zoom`
        key: String,
        /// Value to store, interpreted according to --kind
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Input file; a missing file starts an empty document
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// How to interpret VALUE
        #[arg(long, value_enum, default_value_t = ValueKind::Auto)]
        kind: ValueKind,
        /// Fail instead of replacing a non-map value along the key
        #[arg(long)]
        strict: bool,
        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Re-save a document with keys sorted
    Dump {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueKind {
    /// Signed integer, then unsigned integer, else string
    Auto,
    Int,
    Uint,
    #[value(name = "string")]
    Str,
    /// A JSON integer, string, list or map
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Get { key, input } => {
            let settings = load_settings(input.as_deref())?;
            let Some(value) = settings.get_ref(&key) else {
                anyhow::bail!("Key not found: {}", key);
            };
            let json = writer::value_to_string(value, Format::Compact)
                .context("Failed to render value as JSON")?;
            write_output(None, &json)?;
        }
        Commands::Set {
            key,
            value,
            input,
            output,
            kind,
            strict,
            compact,
        } => {
            let mut settings = match input.as_deref() {
                Some(path) if Path::new(path).exists() => load_settings(Some(path))?,
                Some(path) => {
                    debug!(path, "input file does not exist, starting empty");
                    Settings::new()
                }
                None => Settings::new(),
            };

            let value = parse_value(&value, kind)?;
            if strict {
                settings
                    .try_set(&key, value)
                    .with_context(|| format!("Failed to set '{}'", key))?;
            } else {
                settings.set(&key, value);
            }
            info!(key = key.as_str(), "stored setting");

            let json = settings
                .to_string_with(format_for(compact))
                .context("Failed to render settings as JSON")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Dump {
            input,
            output,
            compact,
        } => {
            let settings = load_settings(input.as_deref())?;
            let json = settings
                .to_string_with(format_for(compact))
                .context("Failed to render settings as JSON")?;
            write_output(output.as_deref(), &json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn format_for(compact: bool) -> Format {
    if compact {
        Format::Compact
    } else {
        Format::Pretty
    }
}

/// Interpret a command-line value.
///
/// - `auto`: `-3` → Int, `18446744073709551615` → UInt, anything else → String
/// - `json`: parsed with the document reader's rules (no bools, floats or null)
fn parse_value(raw: &str, kind: ValueKind) -> Result<SettingValue> {
    let value = match kind {
        ValueKind::Auto => {
            if let Ok(n) = raw.parse::<i64>() {
                SettingValue::Int(n)
            } else if let Ok(n) = raw.parse::<u64>() {
                SettingValue::UInt(n)
            } else {
                SettingValue::String(raw.to_string())
            }
        }
        ValueKind::Int => SettingValue::Int(
            raw.parse()
                .with_context(|| format!("Invalid integer: '{}'", raw))?,
        ),
        ValueKind::Uint => SettingValue::UInt(
            raw.parse()
                .with_context(|| format!("Invalid unsigned integer: '{}'", raw))?,
        ),
        ValueKind::Str => SettingValue::String(raw.to_string()),
        ValueKind::Json => {
            reader::parse_value(raw).with_context(|| format!("Invalid JSON value: '{}'", raw))?
        }
    };
    Ok(value)
}

fn load_settings(path: Option<&str>) -> Result<Settings> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to read file: {}", path))?;
            Settings::load(BufReader::new(file))
                .with_context(|| format!("Failed to load settings from {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Settings::from_json(&buf).context("Failed to load settings from stdin")
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", content))
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
