//! The sink every phase reports its errors to.
//!
//! The core never formats or prints diagnostics, it hands the line, location
//! hint and message to a [`Reporter`] supplied by the caller.

use std::fmt::Display;

use super::{interpreter::RuntimeError, lexer::LexError, parser::ParseError};

pub trait Reporter {
	/// A lexical or syntax error. `location` is empty for lexical errors.
	fn syntax_error(&mut self, line: usize, location: &str, message: &str);

	/// The runtime error that aborted a run.
	fn runtime_error(&mut self, line: usize, message: &str);
}

/// One reported error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	Syntax { line: usize, location: String, message: String },
	Runtime { line: usize, message: String },
}

impl Diagnostic {
	pub fn line(&self) -> usize {
		match self {
			Diagnostic::Syntax { line, .. } | Diagnostic::Runtime { line, .. } => *line,
		}
	}

	pub fn message(&self) -> &str {
		match self {
			Diagnostic::Syntax { message, .. } | Diagnostic::Runtime { message, .. } => message,
		}
	}

	pub fn is_runtime(&self) -> bool { matches!(self, Diagnostic::Runtime { .. }) }
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Diagnostic::Syntax { line, location, message } if location.is_empty() => {
				write!(f, "line {line}: error: {message}")
			}
			Diagnostic::Syntax { line, location, message } => write!(f, "line {line}: error {location}: {message}"),
			Diagnostic::Runtime { line, message } => write!(f, "line {line}: {message}"),
		}
	}
}

/// Collects diagnostics in the order they were reported.
#[derive(Debug, Default)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	pub fn new() -> Self { Self::default() }

	pub fn entries(&self) -> &[Diagnostic] { &self.entries }

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	/// Whether a lexical or syntax error was reported.
	pub fn had_syntax_error(&self) -> bool { self.entries.iter().any(|d| !d.is_runtime()) }

	pub fn had_runtime_error(&self) -> bool { self.entries.iter().any(Diagnostic::is_runtime) }

	/// Remove and return everything collected so far.
	pub fn drain(&mut self) -> std::vec::Drain<'_, Diagnostic> { self.entries.drain(..) }
}

impl Reporter for Diagnostics {
	fn syntax_error(&mut self, line: usize, location: &str, message: &str) {
		self.entries.push(Diagnostic::Syntax { line, location: location.to_string(), message: message.to_string() });
	}

	fn runtime_error(&mut self, line: usize, message: &str) {
		self.entries.push(Diagnostic::Runtime { line, message: message.to_string() });
	}
}

/// Forward typed errors to a reporter.
pub(crate) trait Report {
	fn report(&self, reporter: &mut dyn Reporter);
}

impl Report for LexError {
	fn report(&self, reporter: &mut dyn Reporter) { reporter.syntax_error(self.line, "", &self.r#type.to_string()) }
}

impl Report for ParseError {
	fn report(&self, reporter: &mut dyn Reporter) {
		reporter.syntax_error(self.line, &self.location, &self.r#type.to_string())
	}
}

impl Report for RuntimeError {
	fn report(&self, reporter: &mut dyn Reporter) { reporter.runtime_error(self.line, &self.r#type.to_string()) }
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::error::{interpreter::RuntimeErrorType, lexer::LexErrorType, parser::ParseErrorType};

	#[test]
	fn collects_in_order() {
		let mut diagnostics = Diagnostics::new();
		LexError::new(1, LexErrorType::UnexpectedCharacter('@')).report(&mut diagnostics);
		ParseError::new(2, "at end".to_string(), ParseErrorType::ExpectedExpression).report(&mut diagnostics);
		RuntimeError::new(3, RuntimeErrorType::DivisionByZero).report(&mut diagnostics);

		let rendered: Vec<String> = diagnostics.entries().iter().map(ToString::to_string).collect();
		assert_eq!(rendered, vec![
			"line 1: error: Unexpected character.",
			"line 2: error at end: Expected expression.",
			"line 3: Division by zero is undefined.",
		]);
		assert!(diagnostics.had_syntax_error());
		assert!(diagnostics.had_runtime_error());
	}

	#[test]
	fn drain_empties() {
		let mut diagnostics = Diagnostics::new();
		diagnostics.runtime_error(1, "Undefined variable 'y'.");
		assert_eq!(diagnostics.drain().count(), 1);
		assert!(diagnostics.is_empty());
		assert!(!diagnostics.had_runtime_error());
	}
}
