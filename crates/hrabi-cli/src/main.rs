use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use hrabi_core::source::read_declarations;
use hrabi_core::{parse_fragment, Error, FormatMode, Fragment, Interface, Severity};

const EXIT_OK: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// hrabi - human-readable contract interface fragments
///
/// Parse, check and re-render constructor, function, event and error declarations.
#[derive(Parser)]
#[command(name = "hrabi", version, about, long_about = None)]
struct Cli {
    /// Log debug details to stderr
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print results and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every declaration of a file
    Format {
        /// Declaration file (one per line, or a JSON ABI array)
        file: PathBuf,
        /// Output convention: full, minimal or json
        #[arg(long, short, default_value = "full")]
        mode: FormatMode,
    },

    /// Parse a declaration file and report errors and duplicates
    Check {
        /// Declaration file (one per line, or a JSON ABI array)
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Skip malformed declarations instead of stopping at the first
        #[arg(long)]
        lenient: bool,
    },

    /// Print the bare signature and selector of one declaration
    Signature {
        /// Declaration, e.g. "function transfer(address to, uint amount)"
        declaration: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse one declaration and print it in the chosen convention
    Parse {
        /// Declaration, e.g. "event Transfer(address indexed from, uint value)"
        declaration: String,
        /// Output convention: sighash, minimal, full or json
        #[arg(long, short, default_value = "json")]
        mode: FormatMode,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match cli.command {
        Commands::Format { file, mode } => cmd_format(&file, mode),
        Commands::Check {
            file,
            json,
            lenient,
        } => cmd_check(&file, json, lenient, cli.quiet),
        Commands::Signature { declaration, json } => cmd_signature(&declaration, json),
        Commands::Parse { declaration, mode } => cmd_parse(&declaration, mode),
        Commands::Version => {
            println!(
                "hrabi {} (hrabi-core {})",
                env!("CARGO_PKG_VERSION"),
                hrabi_core::VERSION
            );
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

// ── Commands ──────────────────────────────────────────────

fn cmd_format(file: &Path, mode: FormatMode) -> i32 {
    let interface = match load(file) {
        Ok(interface) => interface,
        Err(code) => return code,
    };

    if mode == FormatMode::Json {
        return match interface.to_json_string(true) {
            Ok(text) => {
                println!("{}", text);
                EXIT_OK
            }
            Err(err) => report(&err),
        };
    }

    match interface.format(mode) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            EXIT_OK
        }
        Err(err) => report(&err),
    }
}

fn cmd_check(file: &Path, json: bool, lenient: bool, quiet: bool) -> i32 {
    let text = match read_file(file) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let built = read_declarations(&text).and_then(|declarations| {
        if lenient {
            Ok(Interface::new_lenient(declarations))
        } else {
            Interface::new(declarations)
        }
    });

    let interface = match built {
        Ok(interface) => interface,
        Err(err) => {
            if json {
                let summary = serde_json::json!({
                    "valid": false,
                    "error_diagnostics": 1,
                    "message": err.to_string(),
                });
                println!("{}", summary);
            } else {
                eprintln!("{} {}", "error:".red().bold(), err);
            }
            return EXIT_INVALID;
        }
    };

    let errors = interface.error_count();
    let warnings = interface.warning_count();
    let valid = errors == 0;

    if json {
        let summary = serde_json::json!({
            "valid": valid,
            "fragments": interface.fragments().len(),
            "functions": interface.functions().len(),
            "events": interface.events().len(),
            "errors": interface.errors().len(),
            "error_diagnostics": errors,
            "warning_diagnostics": warnings,
            "diagnostics": interface.diagnostics(),
        });
        println!("{}", summary);
    } else {
        for diagnostic in interface.diagnostics() {
            let line = diagnostic.to_string();
            match diagnostic.severity {
                Severity::Error => eprintln!("{}", line.red()),
                Severity::Warning => eprintln!("{}", line.yellow()),
            }
        }
        if valid && !quiet {
            println!(
                "{} {}: valid ({} fragments, {} warnings)",
                "✓".green().bold(),
                file.display(),
                interface.fragments().len(),
                warnings
            );
        } else if !valid {
            eprintln!(
                "{} {}: {} declarations skipped",
                "✗".red().bold(),
                file.display(),
                errors
            );
        }
    }

    if valid {
        EXIT_OK
    } else {
        EXIT_INVALID
    }
}

fn cmd_signature(declaration: &str, json: bool) -> i32 {
    let fragment = match parse_fragment(declaration) {
        Ok(fragment) => fragment,
        Err(err) => return report(&err),
    };
    let signature = match fragment.signature() {
        Ok(signature) => signature,
        Err(err) => return report(&err),
    };
    let selector = fragment.selector_hex().unwrap_or_default();

    if json {
        let label = match fragment {
            Fragment::Event(_) => "topic",
            _ => "selector",
        };
        let mut out = serde_json::json!({ "signature": signature });
        out[label] = serde_json::Value::String(selector);
        println!("{}", out);
    } else {
        println!("{}", signature);
        println!("{}", selector);
    }
    EXIT_OK
}

fn cmd_parse(declaration: &str, mode: FormatMode) -> i32 {
    let formatted = parse_fragment(declaration).and_then(|fragment| fragment.format(mode));
    match formatted {
        Ok(formatted) => {
            match formatted.as_json() {
                Some(value) => match serde_json::to_string_pretty(value) {
                    Ok(text) => println!("{}", text),
                    Err(err) => return report(&Error::from(err)),
                },
                None => println!("{}", formatted),
            }
            EXIT_OK
        }
        Err(err) => report(&err),
    }
}

// ── Helpers ───────────────────────────────────────────────

fn read_file(file: &Path) -> Result<String, i32> {
    std::fs::read_to_string(file).map_err(|err| {
        eprintln!(
            "{} cannot read {}: {}",
            "error:".red().bold(),
            file.display(),
            err
        );
        EXIT_USAGE
    })
}

fn load(file: &Path) -> Result<Interface, i32> {
    let text = read_file(file)?;
    read_declarations(&text)
        .and_then(Interface::new)
        .map_err(|err| report(&err))
}

/// Print an error and pick the exit code for it
fn report(err: &Error) -> i32 {
    eprintln!("{} {}", "error:".red().bold(), err);
    match err {
        Error::UnsupportedFormat { .. } => EXIT_USAGE,
        _ => EXIT_INVALID,
    }
}
