#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use lox_interpreter as lox;

use lox::error::BufferReporter;
use lox::{Lox, Outcome};

/// `Write` sink whose bytes stay readable after it has been boxed away.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output should be UTF-8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session wired to in-memory output and diagnostics.
pub struct Harness {
    pub session: Lox,
    pub out: SharedBuf,
    pub reporter: BufferReporter,
}

impl Harness {
    pub fn new() -> Self {
        let out = SharedBuf::default();
        let reporter = BufferReporter::new();
        let session = Lox::with_io(Box::new(out.clone()), Box::new(reporter.clone()));

        Self {
            session,
            out,
            reporter,
        }
    }

    pub fn run(&mut self, source: &str) -> Outcome {
        self.session.run(source).expect("in-memory sink never fails")
    }
}

pub struct RunResult {
    pub outcome: Outcome,
    pub output: String,
    pub diagnostics: Vec<String>,
}

pub fn run(source: &str) -> RunResult {
    let mut harness = Harness::new();
    let outcome = harness.run(source);

    RunResult {
        outcome,
        output: harness.out.contents(),
        diagnostics: harness.reporter.lines(),
    }
}

/// Runs a program that must complete and returns what it printed.
pub fn run_ok(source: &str) -> String {
    let result = run(source);
    assert_eq!(
        result.outcome,
        Outcome::Completed,
        "diagnostics: {:?}",
        result.diagnostics
    );
    result.output
}
