//! Command-line interface for marktree
//!
//! Usage:
//!   marktree parse `<path>` [--format json|treeviz] [--config `<file>`]  - Print the parsed tree
//!   marktree tokens `<path>` [--format json|simple]                     - Print the line tokens
//!   marktree blocks `<path>`                                            - Print the block tree before inline parsing
//!
//! A path of `-` reads standard input. Logging goes to stderr and is controlled by
//! `MARKTREE_LOG` (default `warn`).

use clap::{Arg, ArgAction, ArgMatches, Command};
use marktree::markdown::config::{Loader, MarktreeConfig};
use marktree::markdown::formats::{to_json_string, FormatRegistry, TreevizFormatter};
use marktree::markdown::parsing::parse_blocks_with_options;
use marktree::{parse_with_options, tokenize, Result};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the Markdown file, or - for stdin")
        .required(true)
        .index(1)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("Configuration file layered over the built-in defaults")
}

fn build_cli() -> Command {
    Command::new("marktree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse Markdown into an mdast-shaped syntax tree")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse a document and print its tree")
                .arg(path_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (json, treeviz); defaults to the configured one"),
                )
                .arg(
                    Arg::new("show-positions")
                        .long("show-positions")
                        .help("Prefix treeviz lines with source line numbers")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .help("Deepest container nesting to parse")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the line tokens of a document")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["json", "simple"])
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("blocks")
                .about("Print the block tree with raw inline text, and the link references")
                .arg(path_arg())
                .arg(config_arg()),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MARKTREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let result = match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub),
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("blocks", sub)) => handle_blocks_command(sub),
        _ => unreachable!("a subcommand is required"),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Defaults, then the `--config` file, then flags.
fn load_config(matches: &ArgMatches) -> Result<MarktreeConfig> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Ok(Some(format)) = matches.try_get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Ok(Some(depth)) = matches.try_get_one::<u32>("max-depth") {
        loader = loader.set_override("parser.max_nesting_depth", i64::from(*depth))?;
    }
    if matches!(matches.try_get_one::<bool>("show-positions"), Ok(Some(&true))) {
        loader = loader.set_override("output.show_positions", true)?;
    }
    Ok(loader.build()?)
}

fn handle_parse_command(matches: &ArgMatches) -> Result<String> {
    let config = load_config(matches)?;
    let source = read_source(path(matches))?;
    let root = parse_with_options(&source, &config.parser);

    let mut registry = FormatRegistry::with_defaults();
    registry.register(TreevizFormatter {
        show_linum: config.output.show_positions,
    });
    let mut output = registry.serialize(&root, &config.output.format)?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn handle_tokens_command(matches: &ArgMatches) -> Result<String> {
    let source = read_source(path(matches))?;
    let tokens = tokenize(&source);

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("simple") => Ok(tokens
            .iter()
            .map(|token| format!("{:02} {} {:?}\n", token.line(), token.kind, token.content))
            .collect()),
        _ => Ok(to_json_string(&tokens)? + "\n"),
    }
}

#[derive(Serialize)]
struct BlocksOutput<'a> {
    tree: &'a marktree::Root,
    references: &'a marktree::ReferenceMap,
}

fn handle_blocks_command(matches: &ArgMatches) -> Result<String> {
    let config = load_config(matches)?;
    let source = read_source(path(matches))?;
    let (tree, references) = parse_blocks_with_options(&source, &config.parser);
    Ok(to_json_string(&BlocksOutput {
        tree: &tree,
        references: &references,
    })? + "\n")
}

fn path(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-")
}
