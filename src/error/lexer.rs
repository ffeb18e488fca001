/// A specific lexing error with line number and type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: {type}")]
pub struct LexError {
	/// The line number where the error occurred.
	pub line:   usize,
	/// The type of lexing error.
	pub r#type: LexErrorType,
}

impl LexError {
	pub fn new(line: usize, r#type: LexErrorType) -> Self { Self { line, r#type } }
}

/// Types of lexing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorType {
	/// A character outside the lexical grammar.
	UnexpectedCharacter(char),
	/// A string literal still open at end of input.
	UnterminatedString,
	/// An integer literal that does not fit the runtime integer type.
	NumberTooLarge,
}

impl std::fmt::Display for LexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexErrorType::*;
		match self {
			UnexpectedCharacter(_) => {
				write!(f, "Unexpected character.")
			}
			UnterminatedString => {
				write!(f, "Unterminated string.")
			}
			NumberTooLarge => {
				write!(f, "Number literal is too large.")
			}
		}
	}
}

/// Lexer related errors
#[derive(thiserror::Error, Debug)]
pub enum LexerError {
	/// Internal interpreter error, should never happen
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	/// Errors encountered during lexing
	#[error(transparent)]
	LexError(#[from] LexError),
}
