//! Interactive front end
//!
//! Accumulates input lines into complete `;`-terminated statements and runs
//! each one through the scanner, parser and evaluator independently. A
//! failing statement is reported and the loop carries on with the next one.

use std::io::{self, BufRead, Write};

use crate::error::Result;
use crate::lexer::SimpleScanner;
use crate::parser::{Node, SimpleParser};
use crate::runtime::SimpleEvaluator;

/// Input that ends the REPL
pub const EXIT_COMMAND: &str = "exit();";

/// How the parsed tree is shown before evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AstFormat {
    /// Don't show the tree
    #[default]
    None,
    /// Indented `<kind> <text>` lines
    Text,
    /// JSON
    Json,
}

/// Front end configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Print the tree and the execution trace of each statement
    pub verbose: bool,
    /// Tree output format
    pub ast_format: AstFormat,
    /// Prompt written before each line is read; empty for none
    pub prompt: String,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            verbose: false,
            ast_format: AstFormat::None,
            prompt: "\n>".to_string(),
        }
    }
}

/// Collects lines until they form a `;`-terminated statement
#[derive(Debug, Default)]
pub struct StatementBuffer {
    pending: String,
}

impl StatementBuffer {
    /// Creates an empty buffer
    pub fn new() -> Self {
        StatementBuffer::default()
    }

    /// Adds a line, returning the complete statement text once the line
    /// ends with `;`
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end();
        if self.pending.is_empty() && line.trim_start().is_empty() {
            return None;
        }

        self.pending.push_str(line);
        if line.ends_with(';') {
            Some(std::mem::take(&mut self.pending))
        } else {
            self.pending.push('\n');
            None
        }
    }

    /// Returns whatever is left over at end of input
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.pending);
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest.trim_end().to_string())
        }
    }

    /// Returns true if no partial statement is buffered
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Result of running one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOutcome {
    /// Parsed tree
    pub ast: Node,
    /// Evaluation result
    pub value: i64,
    /// Execution trace; empty unless running verbose
    pub trace: Vec<String>,
}

/// Read-eval-print loop over statement text
pub struct Repl {
    config: ReplConfig,
    buffer: StatementBuffer,
}

impl Repl {
    /// Creates a REPL with the given configuration
    pub fn new(config: ReplConfig) -> Self {
        Repl {
            config,
            buffer: StatementBuffer::new(),
        }
    }

    /// Tokenizes, parses and evaluates one statement
    pub fn execute(&self, statement: &str) -> Result<StatementOutcome> {
        let tokens = SimpleScanner::new(statement).scan_tokens();
        let ast = SimpleParser::new(tokens).parse()?;

        let mut evaluator = if self.config.verbose {
            SimpleEvaluator::with_trace()
        } else {
            SimpleEvaluator::new()
        };
        let value = evaluator.evaluate(&ast)?;

        Ok(StatementOutcome {
            ast,
            value,
            trace: evaluator.execution_trace().to_vec(),
        })
    }

    /// Runs until `exit();` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        self.prompt(output)?;

        for line in input.lines() {
            let line = line?;
            if line.trim() == EXIT_COMMAND {
                tracing::debug!("exit requested");
                return Ok(());
            }

            if let Some(statement) = self.buffer.push_line(&line) {
                self.report(&statement, output)?;
            }
            self.prompt(output)?;
        }

        if let Some(statement) = self.buffer.finish() {
            self.report(&statement, output)?;
        }
        Ok(())
    }

    fn report<W: Write>(&self, statement: &str, output: &mut W) -> io::Result<()> {
        match self.execute(statement) {
            Ok(outcome) => {
                let format = match self.config.ast_format {
                    AstFormat::None if self.config.verbose => AstFormat::Text,
                    format => format,
                };
                match format {
                    AstFormat::None => {}
                    AstFormat::Text => write!(output, "{}", outcome.ast)?,
                    AstFormat::Json => {
                        writeln!(output, "{}", serde_json::to_string_pretty(&outcome.ast)?)?
                    }
                }
                for line in &outcome.trace {
                    writeln!(output, "{}", line)?;
                }
                writeln!(output, "{}", outcome.value)
            }
            Err(err) => {
                tracing::debug!(%err, "statement failed");
                writeln!(output, "error: {}", err)
            }
        }
    }

    fn prompt<W: Write>(&self, output: &mut W) -> io::Result<()> {
        if !self.config.prompt.is_empty() {
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;
        }
        Ok(())
    }
}
