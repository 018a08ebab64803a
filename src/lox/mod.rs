use anyhow::Result;
use log::{info, warn};
use std::fs::read_to_string;
use std::io::{self, BufRead, Write};
use std::path::Path;

use scanner::{scan, ErrorReporter};

pub mod ast;
pub mod scanner;

/// One interpreter session. Reports lexical errors (to stderr unless told otherwise) and
/// remembers whether any were seen so the caller can pick an exit code.
pub struct Lox {
    had_error: bool,
    diagnostics: Box<dyn Write>,
}

impl Default for Lox {
    fn default() -> Self {
        Self::with_diagnostics(Box::new(io::stderr()))
    }
}

impl ErrorReporter for Lox {
    fn error(&mut self, line: usize, message: &str) {
        self.report(line, "", message);
    }
}

impl Lox {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session whose error reports go to `diagnostics`.
    pub fn with_diagnostics(diagnostics: Box<dyn Write>) -> Self {
        Self {
            had_error: false,
            diagnostics,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    fn report(&mut self, line: usize, location: &str, message: &str) {
        if let Err(e) = writeln!(self.diagnostics, "[line {line}] Error{location}: {message}") {
            warn!("could not write error report: {e}");
        }
        self.had_error = true;
    }

    pub fn run_file(&mut self, path: &Path, out: &mut dyn Write) -> Result<()> {
        info!("running {}", path.display());
        let source = read_to_string(path)?;
        self.run(&source, out)
    }

    pub fn run_prompt(&mut self) -> Result<()> {
        self.prompt(&mut io::stdin().lock(), &mut io::stdout())
    }

    /// Run each line of `input` on its own until EOF, starting every line at line 1.
    fn prompt(&mut self, input: &mut impl BufRead, out: &mut dyn Write) -> Result<()> {
        loop {
            write!(out, "> ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            // the line ending isn't part of the entry
            self.run(line.trim_end_matches(['\n', '\r']), out)?;
            // a bad line shouldn't end the session
            self.had_error = false;
        }
        Ok(())
    }

    /// Scan `source` and write each token on its own line.
    pub fn run(&mut self, source: &str, out: &mut dyn Write) -> Result<()> {
        let tokens = scan(source, self);
        for token in tokens {
            writeln!(out, "{token}")?;
        }
        Ok(())
    }
}
