//! Execution‑unit driver: the contract between the language core and
//! whatever feeds it source (a file runner, a REPL, a test).
//!
//! One [`Lox`] owns one interpreter, so globals declared by one call to
//! [`Lox::run`] are visible to the next. Error flags, on the other hand,
//! belong to the returned [`Outcome`] and start clean on every call.

use std::io::Write;

use log::{debug, info};

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;

/// Result of running one execution unit.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Every diagnostic, in the order it was raised.
    pub diagnostics: Vec<LoxError>,
    pub had_syntax_error: bool,
    pub had_resolution_error: bool,
    pub had_runtime_error: bool,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !(self.had_syntax_error || self.had_resolution_error || self.had_runtime_error)
    }

    /// Conventional process exit code: 65 for static errors, 70 for a
    /// runtime error, 0 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.had_syntax_error || self.had_resolution_error {
            65
        } else if self.had_runtime_error {
            70
        } else {
            0
        }
    }
}

pub struct Lox {
    interpreter: Interpreter,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    /// Session printing to stdout.
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    /// Session whose `print` output goes to `output`.
    pub fn with_output<W: Write + 'static>(output: W) -> Self {
        Self {
            interpreter: Interpreter::with_output(output),
        }
    }

    /// Access to the interpreter, e.g. to register more natives.
    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Scan, parse, resolve and interpret one unit of source text. Each
    /// stage only runs when every earlier stage was clean.
    pub fn run(&mut self, source: &str) -> Outcome {
        info!("Running unit of {} bytes", source.len());

        let mut outcome = Outcome::default();

        let (tokens, lex_errors) = Scanner::new(source).scan_all();
        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        outcome.had_syntax_error = !lex_errors.is_empty() || parser.had_error();
        outcome.diagnostics.extend(lex_errors);
        outcome.diagnostics.extend(parser.take_errors());

        if outcome.had_syntax_error {
            debug!("Stopping after syntax errors");
            return outcome;
        }

        if let Err(errors) = Resolver::new(&mut self.interpreter).resolve(&statements) {
            debug!("Stopping after {} resolution error(s)", errors.len());
            outcome.had_resolution_error = true;
            outcome.diagnostics.extend(errors);
            return outcome;
        }

        if let Err(e) = self.interpreter.interpret(&statements) {
            outcome.had_runtime_error = true;
            outcome.diagnostics.push(e);
        }

        outcome
    }
}
