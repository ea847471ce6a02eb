use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use lox_interpreter as lox;

use lox::ast_printer::AstPrinter;
use lox::error::StderrReporter;
use lox::parser::Parser;
use lox::scanner::{scan_tokens, Scanner};
use lox::{Lox, Outcome};

const EXIT_STATIC_ERROR: u8 = 65;
const EXIT_RUNTIME_ERROR: u8 = 70;
const EXIT_IO_ERROR: u8 = 74;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print tokens as a JSON array instead of one per line
        #[arg(long)]
        json: bool,
    },

    /// Parses a program and prints its syntax tree
    Parse { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },
}

/// Reads the whole file as UTF‑8 text.
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let source = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", source.len(), filename);

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // `[module:line] - message`, module path without the crate prefix
    Builder::new()
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("lox_interpreter::").unwrap_or(module);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(source: &str, json: bool) -> Result<ExitCode> {
    if json {
        let (tokens, errors) = scan_tokens(source);
        let mut reporter = StderrReporter;
        for e in &errors {
            e.report(&mut reporter);
        }

        println!(
            "{}",
            serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?
        );

        return Ok(exit_code(errors.is_empty(), EXIT_STATIC_ERROR));
    }

    let mut clean = true;

    for result in Scanner::new(source) {
        match result {
            Ok(token) => println!("{}", token),
            Err(e) => {
                clean = false;
                debug!("Tokenization error: {}", e);
                e.report(&mut StderrReporter);
            }
        }
    }

    Ok(exit_code(clean, EXIT_STATIC_ERROR))
}

fn parse(source: &str) -> Result<ExitCode> {
    let (tokens, lex_errors) = scan_tokens(source);

    let mut parser = Parser::new(tokens);
    let statements = parser.parse();
    let parse_errors = parser.into_errors();

    let mut reporter = StderrReporter;
    for e in lex_errors.iter().chain(parse_errors.iter()) {
        e.report(&mut reporter);
    }

    if !lex_errors.is_empty() || !parse_errors.is_empty() {
        return Ok(ExitCode::from(EXIT_STATIC_ERROR));
    }

    for stmt in &statements {
        println!("{}", AstPrinter::print_stmt(stmt));
    }

    Ok(ExitCode::SUCCESS)
}

fn run(source: &str) -> Result<ExitCode> {
    let mut session = Lox::new();

    let outcome = session.run(source).context("Failed to write program output")?;
    info!("Run finished: {:?}", outcome);

    Ok(match outcome {
        Outcome::Completed => ExitCode::SUCCESS,
        Outcome::StaticError => ExitCode::from(EXIT_STATIC_ERROR),
        Outcome::RuntimeError => ExitCode::from(EXIT_RUNTIME_ERROR),
    })
}

fn exit_code(clean: bool, failure: u8) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(failure)
    }
}

fn main() -> Result<ExitCode> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let filename = match &args.commands {
        Commands::Tokenize { filename, .. }
        | Commands::Parse { filename }
        | Commands::Run { filename } => filename,
    };

    let source = match read_file(filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{:#}", e);
            return Ok(ExitCode::from(EXIT_IO_ERROR));
        }
    };

    match args.commands {
        Commands::Tokenize { json, .. } => tokenize(&source, json),
        Commands::Parse { .. } => parse(&source),
        Commands::Run { .. } => run(&source),
    }
}
