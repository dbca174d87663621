#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::lox::{Lox, Outcome};

/// `Write` sink that can still be read after the interpreter took ownership
/// of a clone.
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Fresh session plus the buffer its `print` statements write into.
pub fn session() -> (Lox, SharedOutput) {
    let output = SharedOutput::default();
    (Lox::with_output(output.clone()), output)
}

/// Run `source` in a fresh session; returns printed output and outcome.
pub fn run(source: &str) -> (String, Outcome) {
    let (mut lox, output) = session();
    let outcome = lox.run(source);
    (output.contents(), outcome)
}

/// Run `source` and assert it succeeded; returns printed output.
pub fn run_ok(source: &str) -> String {
    let (output, outcome) = run(source);
    assert!(
        outcome.is_success(),
        "expected success, got diagnostics: {:?}",
        outcome
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
    );
    output
}

/// Messages of every diagnostic, in order.
pub fn messages(outcome: &Outcome) -> Vec<String> {
    outcome.diagnostics.iter().map(|d| d.message()).collect()
}
