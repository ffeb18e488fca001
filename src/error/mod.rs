pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod report;

/// ReplError is the top-level error type for the interpreter.
#[derive(thiserror::Error, Debug)]
pub enum ReplError {
	/// Internal interpreter error, should never happen
	#[error("InterpreterInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Lexical or syntax errors stopped the run before interpretation
	#[error("Generated {0} syntax errors")]
	SyntaxErrors(usize),
	/// A runtime error aborted the run, it has already been reported
	#[error("Run aborted by a runtime error")]
	RuntimeError,
}

impl From<parser::ParserError> for ReplError {
	fn from(error: parser::ParserError) -> Self {
		match error {
			parser::ParserError::InternalError(e) => ReplError::InternalError(e),
			parser::ParserError::ParseError(_) => ReplError::SyntaxErrors(1),
		}
	}
}
