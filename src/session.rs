//! The `run(source)` entry point: scanner → parser → resolver → interpreter.

use std::io::Write;

use log::{debug, info};

use crate::error::{LoxError, Reporter, Result, StderrReporter};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::scan_tokens;

/// How far a call to [`Lox::run`] got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every statement ran.
    Completed,
    /// A lexical, syntax or resolution error was reported; nothing ran.
    StaticError,
    /// Execution started and stopped at a reported runtime error.
    RuntimeError,
}

/// One interpreter session.  Globals defined by one `run` stay visible to
/// the next.
pub struct Lox {
    interpreter: Interpreter,
    reporter: Box<dyn Reporter>,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    /// Session printing to stdout and reporting to stderr.
    pub fn new() -> Self {
        Self::with_io(Box::new(std::io::stdout()), Box::new(StderrReporter))
    }

    pub fn with_io(out: Box<dyn Write>, reporter: Box<dyn Reporter>) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
            reporter,
        }
    }

    /// Run `source` to completion.  Diagnostics go to the reporter; `Err` is
    /// only returned when the output sink fails.
    pub fn run(&mut self, source: &str) -> Result<Outcome> {
        info!("Running {} bytes of source", source.len());

        let (tokens, lex_errors) = scan_tokens(source);
        self.report_all(&lex_errors);

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();
        let parse_errors = parser.into_errors();
        self.report_all(&parse_errors);

        if !lex_errors.is_empty() || !parse_errors.is_empty() {
            debug!("Static errors before resolution, not executing");
            return Ok(Outcome::StaticError);
        }

        let resolve_errors = {
            let mut resolver = Resolver::new(&mut self.interpreter);
            resolver.resolve(&statements);
            resolver.into_errors()
        };
        self.report_all(&resolve_errors);

        if !resolve_errors.is_empty() {
            debug!("Resolution errors, not executing");
            return Ok(Outcome::StaticError);
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => Ok(Outcome::Completed),
            Err(e @ LoxError::Runtime { .. }) => {
                e.report(self.reporter.as_mut());
                Ok(Outcome::RuntimeError)
            }
            Err(e) => Err(e),
        }
    }

    fn report_all(&mut self, errors: &[LoxError]) {
        for e in errors {
            e.report(self.reporter.as_mut());
        }
    }
}
