//! uC Compiler Driver
//!
//! Command-line entry point for the uC front end: tokenize, parse and
//! type-check a single source file.

use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use ucc_common::{CompilerError, ErrorReporter};
use ucc_frontend::{Lexer, Node, ShowOptions};

#[derive(Parser)]
#[command(name = "ucc")]
#[command(about = "uC Compiler")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Lex {
        /// Input uC source file
        input: PathBuf,
    },

    /// Parse a source file and print its AST
    Parse {
        /// Input uC source file
        input: PathBuf,

        #[command(flatten)]
        show: ShowArgs,

        /// Emit the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse and type-check a source file
    Check {
        /// Input uC source file
        input: PathBuf,
    },
}

#[derive(Args)]
struct ShowArgs {
    /// Print attribute names alongside values
    #[arg(long)]
    attrnames: bool,

    /// Print the child slot each node occupies
    #[arg(long)]
    nodenames: bool,

    /// Print node coordinates
    #[arg(long)]
    showcoord: bool,
}

impl From<ShowArgs> for ShowOptions {
    fn from(args: ShowArgs) -> Self {
        ShowOptions { attrnames: args.attrnames, nodenames: args.nodenames, showcoord: args.showcoord }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let mut reporter = ErrorReporter::new();

    let result = match cli.command {
        Commands::Lex { input } => lex_file(&input, &mut reporter),
        Commands::Parse { input, show, json } => parse_file(&input, show.into(), json, &mut reporter),
        Commands::Check { input } => check_file(&input, &mut reporter),
    };

    if let Err(e) = result {
        reporter.report(&e);
    }
    if reporter.has_errors() {
        reporter.print_diagnostics();
        eprintln!("{}", reporter.summary());
        process::exit(1);
    }
}

fn read_source(path: &Path) -> Result<String, CompilerError> {
    debug!("reading {}", path.display());
    Ok(fs::read_to_string(path)?)
}

fn lex_file(input: &Path, reporter: &mut ErrorReporter) -> Result<(), CompilerError> {
    let source = read_source(input)?;
    let tokens = Lexer::new(&source, |message, line, column| {
        reporter.error(message.to_string(), Some(ucc_common::Coord::new(line, column)));
    })
    .tokenize();

    for token in &tokens {
        println!("{}\t{}", token.coord, token.token_type);
    }
    info!("{} token(s)", tokens.len());
    Ok(())
}

fn parse_tree(input: &Path, reporter: &mut ErrorReporter) -> Result<Node, CompilerError> {
    let source = read_source(input)?;
    let program = ucc_frontend::parse_with_reporter(&source, reporter)?;
    Ok(program)
}

fn parse_file(input: &Path, options: ShowOptions, json: bool, reporter: &mut ErrorReporter) -> Result<(), CompilerError> {
    let program = parse_tree(input, reporter)?;
    if json {
        let text = serde_json::to_string_pretty(&program)
            .map_err(|e| CompilerError::InternalError { message: e.to_string() })?;
        println!("{}", text);
    } else {
        print!("{}", program.to_tree_string(&options));
    }
    Ok(())
}

fn check_file(input: &Path, reporter: &mut ErrorReporter) -> Result<(), CompilerError> {
    let program = parse_tree(input, reporter)?;
    ucc_frontend::check(&program)?;
    if !reporter.has_errors() {
        println!("ok");
    }
    Ok(())
}
