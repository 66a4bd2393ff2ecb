//! Command-line interface for serpent
//! Tokenizes and validates a Serpent+ program, printing the token listing and the verdict.
//!
//! Usage:
//!   serpent [PATH]                       - Analyze a source file (the built-in sample when omitted)
//!   serpent -c `<code>`                  - Analyze an inline program
//!   serpent --config-dir `<dir>` [PATH]  - Use another language definition
//!
//! Exit status: 0 when the program is valid, 1 on lexical or syntax errors, 2 when the input
//! or the language definition cannot be loaded.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serpent::serpent::analyzer::Analyzer;
use serpent::serpent::config::{ConfigError, ConfigSources, LanguageConfig};
use serpent::serpent::formats::{self, OutputFormat};
use std::borrow::Cow;
use std::path::PathBuf;
use std::process;

const SAMPLE_PROGRAM: &str = include_str!("../../samples/average.srp");

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();

    let source = load_source(&matches).unwrap_or_else(|message| {
        eprintln!("error: {message}");
        process::exit(2);
    });
    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(2);
    });
    let analyzer = Analyzer::new(&config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(2);
    });

    let format = matches
        .get_one::<String>("format")
        .map(|name| name.parse::<OutputFormat>())
        .transpose()
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(2);
        })
        .unwrap_or_default();

    let code = run(
        &analyzer,
        &source,
        format,
        matches.get_flag("show-tokens"),
        !matches.get_flag("no-table"),
    );
    process::exit(code);
}

fn cli() -> Command {
    Command::new("serpent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize and validate Serpent+ source code")
        .arg(
            Arg::new("path")
                .help("Path to a source file to analyze")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("code")
                .long("code")
                .short('c')
                .help("Inline source code to analyze")
                .conflicts_with("path"),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding token_lexeme.txt, token_translation.txt, ...")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("block-termination")
                .long("block-termination")
                .help("Path to a block_termination.txt overriding the configured one")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (json, yaml and ast also print the syntax tree)")
                .value_parser(["table", "tokens", "json", "yaml", "ast"])
                .default_value("table"),
        )
        .arg(
            Arg::new("show-tokens")
                .long("show-tokens")
                .help("Also print the raw token stream")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-table")
                .long("no-table")
                .help("Do not print the token listing")
                .action(ArgAction::SetTrue),
        )
}

fn load_source(matches: &ArgMatches) -> Result<String, String> {
    if let Some(path) = matches.get_one::<PathBuf>("path") {
        return std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()));
    }
    if let Some(code) = matches.get_one::<String>("code") {
        return Ok(code.clone());
    }
    Ok(SAMPLE_PROGRAM.to_string())
}

fn load_config(matches: &ArgMatches) -> Result<Cow<'static, LanguageConfig>, ConfigError> {
    let block_termination = matches.get_one::<PathBuf>("block-termination");
    match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => {
            let mut sources = ConfigSources::in_dir(dir);
            if let Some(path) = block_termination {
                sources = sources.with_block_termination(path);
            }
            LanguageConfig::load(&sources).map(Cow::Owned)
        }
        None => match block_termination {
            Some(path) => LanguageConfig::embedded_with_block_termination(path).map(Cow::Owned),
            None => Ok(Cow::Borrowed(LanguageConfig::embedded())),
        },
    }
}

/// Runs both stages, printing as it goes. Returns the exit status.
fn run(
    analyzer: &Analyzer<'_>,
    source: &str,
    format: OutputFormat,
    show_tokens: bool,
    show_listing: bool,
) -> i32 {
    print!("{}", formats::section_header("Lexical Analysis"));
    let output = analyzer.tokenize(source);
    if !output.is_clean() {
        println!("Lexical errors:");
        for error in &output.errors {
            println!("  - {error}");
        }
        return 1;
    }

    if show_listing {
        let rows = analyzer.table(&output.tokens);
        match formats::format_tokens(format, &rows, &output.tokens) {
            Ok(listing) => print!("{listing}"),
            Err(e) => {
                eprintln!("error: {e}");
                return 2;
            }
        }
    }

    if show_tokens {
        print!("{}", formats::section_header("Raw Tokens"));
        print!("{}", formats::format_raw_tokens(&output.tokens));
    }

    print!("{}", formats::section_header("Syntax Analysis"));
    match analyzer.parse(&output.tokens) {
        Ok(program) => {
            println!("Syntax OK");
            if format.shows_tree() {
                print!("{}", formats::section_header("Syntax Tree"));
                match formats::format_tree(format, &program) {
                    Ok(tree) => print!("{tree}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return 2;
                    }
                }
            }
            0
        }
        Err(e) => {
            println!("Syntax error: {e}");
            1
        }
    }
}
