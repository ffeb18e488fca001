use std::{
	fs::read_to_string,
	io::{BufRead, Stdout, Write},
	path::Path,
};

use anyhow::Context;
use tracing::debug;

use crate::{Diagnostics, Environment, Interpreter, ReplError, parse, tokenize};

/// Settings of one interpreter session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
	/// Printed before every line read by the prompt.
	pub prompt: String,
	/// Skip running a chunk that has lexical or syntax errors.
	pub strict: bool,
}

impl Default for SessionConfig {
	fn default() -> Self { Self { prompt: "[repl] ".to_string(), strict: false } }
}

/// An interpreter session. Variables survive from one run to the next.
pub struct Repl<W: Write = Stdout> {
	config:      SessionConfig,
	environment: Environment,
	interpreter: Interpreter<W>,
}

impl Repl<Stdout> {
	pub fn new(config: SessionConfig) -> Self { Self::with_output(config, std::io::stdout()) }
}

impl<W: Write> Repl<W> {
	/// A session whose `print` output goes to `out`.
	pub fn with_output(config: SessionConfig, out: W) -> Self {
		Self { config, environment: Environment::new(), interpreter: Interpreter::new(out) }
	}

	pub fn environment(&self) -> &Environment { &self.environment }

	pub fn output(&self) -> &W { self.interpreter.output() }

	/// Run a whole source file as one chunk.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ReplError> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source)
	}

	/// Run the REPL prompt on stdin until end of input.
	pub fn run_prompt(&mut self) {
		let stdin = std::io::stdin();
		self.prompt_loop(stdin.lock(), std::io::stdout());
	}

	/// Read `input` line by line, writing the prompt to `prompt`. Every line is
	/// its own run.
	pub fn prompt_loop<R: BufRead, P: Write>(&mut self, mut input: R, mut prompt: P) {
		let mut line = String::new();
		loop {
			line.clear();
			if let Err(e) = write!(prompt, "{}", self.config.prompt).and_then(|_| prompt.flush()) {
				eprintln!("Failed flush: {e}");
			}
			match input.read_line(&mut line) {
				Ok(0) => {
					if let Err(e) = writeln!(prompt, "\nExited tinyrepl") {
						eprintln!("Failed write: {e}");
					}
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			// Errors of the line itself were already printed.
			if let Err(ReplError::InternalError(e)) = self.run(&line) {
				eprintln!("Failed run prompt: {e}");
			}
		}
	}

	/// Run one chunk of source, printing its diagnostics to stderr.
	pub fn run(&mut self, source: &str) -> Result<(), ReplError> {
		let mut diagnostics = Diagnostics::new();
		let result = self.run_with(source, &mut diagnostics);
		for diagnostic in diagnostics.drain() {
			eprintln!("{diagnostic}");
		}
		result
	}

	/// Run one chunk of source, collecting its diagnostics into `diagnostics`.
	pub fn run_with(&mut self, source: &str, diagnostics: &mut Diagnostics) -> Result<(), ReplError> {
		let tokens = tokenize(source, diagnostics)?;
		// Nothing but `Eof`: a blank line or a lone comment.
		if tokens.len() == 1 {
			return syntax_result(diagnostics);
		}

		let statements = parse(tokens, diagnostics)?;
		if self.config.strict && diagnostics.had_syntax_error() {
			debug!(errors = diagnostics.len(), "strict mode, skipping run");
			return syntax_result(diagnostics);
		}

		if !self.interpreter.interpret(&statements, &mut self.environment, diagnostics) {
			return Err(ReplError::RuntimeError);
		}
		syntax_result(diagnostics)
	}
}

fn syntax_result(diagnostics: &Diagnostics) -> Result<(), ReplError> {
	if diagnostics.had_syntax_error() { Err(ReplError::SyntaxErrors(diagnostics.len())) } else { Ok(()) }
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::Value;

	fn session(strict: bool) -> Repl<Vec<u8>> {
		Repl::with_output(SessionConfig { strict, ..SessionConfig::default() }, Vec::new())
	}

	fn printed(repl: &Repl<Vec<u8>>) -> &str { std::str::from_utf8(repl.output()).unwrap() }

	#[test]
	fn lines_share_variables() {
		let mut repl = session(false);
		repl.run("let x = 1;\n").unwrap();
		repl.run("x = x + 1;\n").unwrap();
		repl.run("print x;\n").unwrap();
		assert_eq!(printed(&repl), "2\n");
		assert_eq!(repl.environment().value("x"), Some(&Value::Int(2)));
	}

	#[test]
	fn blank_and_comment_lines_do_nothing() {
		let mut repl = session(false);
		repl.run("\n").unwrap();
		repl.run("// just a comment\n").unwrap();
		assert_eq!(printed(&repl), "");
		assert!(repl.environment().is_empty());
	}

	#[test]
	fn lenient_runs_recovered_statements() {
		let mut repl = session(false);
		let mut diagnostics = Diagnostics::new();
		let result = repl.run_with("let = ; print 1;\n", &mut diagnostics);
		assert!(matches!(result, Err(ReplError::SyntaxErrors(1))));
		assert_eq!(printed(&repl), "1\n");
	}

	#[test]
	fn strict_skips_lines_with_errors() {
		let mut repl = session(true);
		let mut diagnostics = Diagnostics::new();
		let result = repl.run_with("let = ; print 1;\n", &mut diagnostics);
		assert!(matches!(result, Err(ReplError::SyntaxErrors(1))));
		assert_eq!(printed(&repl), "");

		let mut diagnostics = Diagnostics::new();
		assert!(repl.run_with("print 1 @;\n", &mut diagnostics).is_err());
		assert_eq!(printed(&repl), "");
		assert_eq!(diagnostics.entries()[0].message(), "Unexpected character.");
	}

	#[test]
	fn runtime_error_aborts_only_its_line() {
		let mut repl = session(false);
		let mut diagnostics = Diagnostics::new();
		let result = repl.run_with("print 1; print 5 / 0; print 2;\n", &mut diagnostics);
		assert!(matches!(result, Err(ReplError::RuntimeError)));
		assert_eq!(diagnostics.entries()[0].to_string(), "line 1: Division by zero is undefined.");
		repl.run("print 3;\n").unwrap();
		assert_eq!(printed(&repl), "1\n3\n");
	}

	#[test]
	fn prompt_loop_reads_until_eof() {
		let mut repl = session(false);
		let mut prompt = Vec::new();
		repl.prompt_loop(Cursor::new("let a = \"hi\";\nprint a + \"!\";\n"), &mut prompt);
		assert_eq!(printed(&repl), "hi!\n");
		assert_eq!(String::from_utf8(prompt).unwrap(), "[repl] [repl] [repl] \nExited tinyrepl\n");
	}

	/// Accepts `limit` bytes, then refuses every write.
	struct Refusing {
		limit: usize,
	}

	impl Write for Refusing {
		fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
			if self.limit < buf.len() {
				return Err(std::io::Error::other("sink closed"));
			}
			self.limit -= buf.len();
			Ok(buf.len())
		}

		fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
	}

	#[test]
	fn prompt_loop_survives_a_broken_prompt_sink() {
		let mut repl = session(false);
		repl.prompt_loop(Cursor::new("let a = 1;\nprint a;\n"), Refusing { limit: 0 });
		assert_eq!(printed(&repl), "1\n");

		let mut repl = session(false);
		repl.prompt_loop(Cursor::new("print 2;\n"), Refusing { limit: "[repl] [repl] ".len() });
		assert_eq!(printed(&repl), "2\n");
	}

	#[test]
	fn missing_file_is_internal_error() {
		let mut repl = session(false);
		let result = repl.run_file("definitely/not/here.txt");
		assert!(matches!(result, Err(ReplError::InternalError(_))));
	}
}
