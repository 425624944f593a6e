//! `scriptcheck` command-line entry point
//!
//! Reads one script, runs it through the lexer, parser and type checker, and prints
//! every diagnostic with its source line. Exits with 0 when the script is clean, 1
//! when diagnostics were reported and 2 when the file could not be read or parsing
//! aborted.

use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, ValueEnum};
use scriptcheck::{
    config::DEFAULT_MAX_NESTING_DEPTH,
    display_diagnostic, display_error,
    errors::diagnostics::{Diagnostic, ParseError},
    lexer::lexer::tokenize_with_config,
    parser::parser::parse_with_config,
    type_checker::type_checker::TypeChecker,
    FrontendConfig,
};
use tracing_subscriber::EnvFilter;

const EXIT_CLEAN: u8 = 0;
const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Check a script for syntax errors, redeclarations, static reassignments and type
/// mismatches
#[derive(Parser, Debug)]
#[command(name = "scriptcheck", version, about)]
struct Cli {
    /// Script to check
    file: PathBuf,

    /// Print the token stream before checking
    #[arg(long)]
    tokens: bool,

    /// Print the parsed program as JSON
    #[arg(long)]
    ast: bool,

    /// How diagnostics are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Maximum nesting of statements and expressions
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,

    /// Lex `-1` as a minus sign followed by a number
    #[arg(long)]
    no_fold_negative: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr, defaulting to warnings only
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: failed to read {}: {}", cli.file.display(), error);
            return EXIT_FATAL;
        }
    };

    let config = FrontendConfig::new()
        .with_max_nesting_depth(cli.max_depth)
        .with_fold_negative_literals(!cli.no_fold_negative);

    if cli.tokens {
        match tokenize_with_config(&source, &config) {
            Ok(tokens) => {
                for token in &tokens {
                    println!("{}", token.debug());
                }
            }
            Err(error) => {
                eprintln!("{}", display_error(&error, &source, &file_name));
                return EXIT_FATAL;
            }
        }
    }

    let start = Instant::now();

    let parsed = match parse_with_config(&source, &config) {
        Ok(parsed) => parsed,
        Err(error) => {
            eprintln!("{}", display_error(&error, &source, &file_name));
            return EXIT_FATAL;
        }
    };

    tracing::info!(elapsed = ?start.elapsed(), "parsed {}", file_name);

    if cli.ast {
        match serde_json::to_string_pretty(&parsed.program) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("error: failed to serialize the AST: {}", error);
                return EXIT_FATAL;
            }
        }
    }

    let mut diagnostics: Vec<Diagnostic> = parsed
        .errors
        .iter()
        .map(ParseError::to_diagnostic)
        .collect();

    TypeChecker::new().check(&parsed.program, &mut diagnostics);

    tracing::info!(elapsed = ?start.elapsed(), "checked {}", file_name);

    match cli.format {
        OutputFormat::Text => {
            for diagnostic in &diagnostics {
                println!("{}\n", display_diagnostic(diagnostic, &source, &file_name));
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&diagnostics) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("error: failed to serialize diagnostics: {}", error);
                return EXIT_FATAL;
            }
        },
    }

    if diagnostics.is_empty() {
        EXIT_CLEAN
    } else {
        EXIT_DIAGNOSTICS
    }
}
