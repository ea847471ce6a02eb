//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! All pipeline stages (scanner, parser, resolver, runtime) convert their
//! failure modes into one of the variants defined here.  Static diagnostics
//! carry the line, a location suffix (`""`, `" at end"` or `" at 'lexeme'"`)
//! and a message; runtime errors carry the line and a message.
//!
//! The module **does not** print diagnostics itself: rendering goes through a
//! [`Reporter`], which the caller of [`crate::session::Lox`] supplies.

use std::cell::RefCell;
use std::fmt;
use std::io;
use std::rc::Rc;

use log::{debug, info};
use thiserror::Error;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("{}", static_diagnostic(.line, "", .message))]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("{}", static_diagnostic(.line, .location, .message))]
    Parse {
        message: String,
        location: String,
        line: usize,
    },

    /// Static‑analysis failure found by the resolver.
    #[error("{}", static_diagnostic(.line, .location, .message))]
    Resolve {
        message: String,
        location: String,
        line: usize,
    },

    /// Runtime evaluation error.  Fatal to the running program.
    #[error("{}", runtime_diagnostic(.line, .message))]
    Runtime { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Raised when the
    /// `print` sink refuses a write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// `[line N] Error<location>: <message>`, the one rendering of every static
/// diagnostic.
pub fn static_diagnostic(line: impl fmt::Display, location: &str, message: &str) -> String {
    format!("[line {}] Error{}: {}", line, location, message)
}

/// `<message>\n[line N]`, the rendering of a runtime error.
pub fn runtime_diagnostic(line: impl fmt::Display, message: &str) -> String {
    format!("{}\n[line {}]", message, line)
}

/// `" at end"` for the EOF token, `" at 'lexeme'"` for everything else.
fn location_of(token: &Token) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**; the location is derived from
    /// the offending token.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        LoxError::Parse {
            message,
            location: location_of(token),
            line: token.line,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", token.line, message);

        LoxError::Resolve {
            message,
            location: location_of(token),
            line: token.line,
        }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Runtime error: line={}, msg={}", token.line, message);

        LoxError::Runtime {
            message,
            line: token.line,
        }
    }

    /// Forward this error to `reporter` in the channel that matches its kind.
    pub fn report(&self, reporter: &mut dyn Reporter) {
        match self {
            LoxError::Lex { message, line } => reporter.error(*line, "", message),
            LoxError::Parse {
                message,
                location,
                line,
            }
            | LoxError::Resolve {
                message,
                location,
                line,
            } => reporter.error(*line, location, message),
            LoxError::Runtime { message, line } => reporter.runtime_error(*line, message),
            LoxError::Io(e) => reporter.error(0, "", &e.to_string()),
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostic reporting
// ─────────────────────────────────────────────────────────────────────────────

/// Line‑oriented sink for diagnostics produced by the pipeline.
pub trait Reporter {
    /// A static (lexical, syntax or resolution) error.
    fn error(&mut self, line: usize, location: &str, message: &str);

    /// A runtime error that halted execution.
    fn runtime_error(&mut self, line: usize, message: &str);
}

/// Writes every diagnostic to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn error(&mut self, line: usize, location: &str, message: &str) {
        eprintln!("{}", static_diagnostic(line, location, message));
    }

    fn runtime_error(&mut self, line: usize, message: &str) {
        eprintln!("{}", runtime_diagnostic(line, message));
    }
}

/// Records rendered diagnostics in memory.  Clones share the same buffer, so
/// one handle can be given to a [`crate::session::Lox`] while another is
/// kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct BufferReporter {
    lines: Rc<RefCell<Vec<String>>>,
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl Reporter for BufferReporter {
    fn error(&mut self, line: usize, location: &str, message: &str) {
        self.lines
            .borrow_mut()
            .push(static_diagnostic(line, location, message));
    }

    fn runtime_error(&mut self, line: usize, message: &str) {
        self.lines
            .borrow_mut()
            .push(runtime_diagnostic(line, message));
    }
}
