//! # rulelex - command-line shell
//!
//! Tokenizes a file with one of the [presets](rulelex::presets) and prints one
//! token per line, or tries a preset out interactively on the REPL.
//!
//! ## Extensions
//!
//! - The REPL supports multi-line input: if a line ends inside a string or a
//!   comment, it asks for a continuation line instead of raising the error.
//!   Editing previous lines is not supported.
//! - Logging goes to standard error and is controlled by `-v`/`-vv` or the
//!   `RUST_LOG` environment variable.
#![deny(
    warnings,
)]
#![deny(
    future_incompatible,
    keyword_idents,
    let_underscore,
    nonstandard_style,
    refining_impl_trait,
)]
#![deny(
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2024_compatibility,
)]
#![deny(
    clippy::all,
    clippy::pedantic,
)]
#![deny(
    clippy::alloc_instead_of_core,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::as_conversions,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::else_if_without_else,
    clippy::empty_structs_with_brackets,
    clippy::error_impl_error,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::get_unwrap,
    clippy::if_then_some_else_none,
    clippy::indexing_slicing,
    clippy::let_underscore_must_use,
    clippy::map_err_ignore,
    clippy::missing_assert_message,
    clippy::missing_docs_in_private_items,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::rc_buffer,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::self_named_module_files,
    clippy::std_instead_of_core,
    clippy::str_to_string,
    clippy::string_add,
    clippy::string_slice,
    clippy::string_to_string,
    clippy::todo,
    clippy::try_err,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::verbose_file_reads,
    clippy::wildcard_enum_match_arm
)]
#![warn(unused)]

use clap::{ArgAction, Parser, Subcommand};
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rulelex::errors::{EngineError, UnterminatedError};
use rulelex::lexer::DefaultLexer;
use rulelex::presets;

use std::fs;
use std::io::{self, Write};
use std::process::{ExitCode, Termination};

/// Build the lexer of the named preset, optionally with a different ignore set.
fn load_lexer(preset: &str, ignore: Option<&str>) -> Result<DefaultLexer, EngineError> {
    let lexer = presets::by_name(preset).ok_or_else(|| EngineError::UnknownPreset {
        name: preset.to_owned(),
        available: presets::PRESETS.keys().sorted().join(", "),
    })?;
    debug!(preset, rules = lexer.rules().len(), "loaded preset");

    Ok(match ignore {
        Some(chars) => lexer.with_ignored(chars),
        None => lexer,
    })
}

/// Load a file, tokenize it and print the tokens.
fn run_file(file: &str, lexer: &DefaultLexer) -> Result<(), EngineError> {
    let source = fs::read_to_string(file)?;
    let tokens = lexer.tokenize(&source)?;
    debug!(file, tokens = tokens.len(), "tokenized file");

    let mut stdout = io::stdout().lock();
    for token in tokens {
        writeln!(stdout, "{token}")?;
    }
    Ok(())
}

/// Run the REPL prompt until standard input is closed.
fn run_prompt(lexer: &DefaultLexer) -> Result<(), EngineError> {
    let stdin = io::stdin();
    let mut source = String::new();
    let mut line = String::new();
    loop {
        print!("{}", if source.is_empty() { "> " } else { ". " });
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            return Ok(());
        }
        source.push_str(&line);

        match lexer.tokenize(&source) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{token}");
                }
            }
            Err(err) if err.is_unterminated() => {
                debug!(error = %err, "asking for a continuation line");
                continue;
            }
            Err(err) => eprintln!("{err}"),
        }
        source.clear();
    }
}

/// Isomorphic to `Result<T, EngineError>`,
/// this allows for overriding the [Termination]
/// trait impl and report custom exit codes instead.
///
/// As this is only supposed to be used on the very
/// outer shell, T defaults to `()`.
#[derive(Debug)]
enum EngineResult<T = ()> {
    /// Ok variant.
    Ok(T),
    /// Error variant
    Err(EngineError),
}

impl Termination for EngineResult {
    fn report(self) -> ExitCode {
        if let EngineResult::Err(err) = self {
            eprintln!("{err}");
            err.into()
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl<T, E> From<Result<T, E>> for EngineResult<T>
where
    EngineError: From<E>,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => EngineResult::Ok(value),
            Err(err) => EngineResult::Err(err.into()),
        }
    }
}

/// Install the log subscriber. `-v` flags take precedence over `RUST_LOG`.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// rulelex tokenizes text with composable rule lists. The shell offers the
/// built-in presets, either on a file or interactively.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, subcommand_negates_reqs = true)]
struct LexArgs {
    /// Subcommands, either this or [`source_file`] needs to be specified.
    #[command(subcommand)]
    command: Option<LexCommands>,

    /// Source file to tokenize
    #[arg(required = true)]
    source_file: Option<String>,

    /// Rule preset to tokenize with
    #[arg(long, short, global = true, env = "RULELEX_PRESET", default_value = "script")]
    preset: String,

    /// Characters to skip between tokens, replacing the preset's own set
    #[arg(long, global = true)]
    ignore: Option<String>,

    /// Log more: -v for debug, -vv for trace output
    #[arg(long, short, global = true, action = ArgAction::Count)]
    verbose: u8,
}

/// Available commands in rulelex
#[derive(Subcommand, Debug)]
enum LexCommands {
    /// run the tokenizer repl.
    Repl,
    /// tokenize the given file and print its tokens.
    Tokenize {
        /// Source file to tokenize
        source_file: String,
    },
}

fn main() -> EngineResult {
    let LexArgs {
        command,
        source_file,
        preset,
        ignore,
        verbose,
    } = LexArgs::parse();
    init_logging(verbose);

    let lexer = match load_lexer(&preset, ignore.as_deref()) {
        Ok(lexer) => lexer,
        Err(err) => return EngineResult::Err(err),
    };

    match (command, source_file) {
        (None, Some(source_file))
        | (Some(LexCommands::Tokenize { source_file }), None) => {
            run_file(&source_file, &lexer).into()
        }

        (Some(LexCommands::Repl), None) => run_prompt(&lexer).into(),

        (Some(_), Some(_))
        | (None, None) => EngineResult::Err(EngineError::UsageError(
            "pass either a source file or a subcommand".to_owned(),
        )),
    }
}
