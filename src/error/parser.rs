#[derive(thiserror::Error, Debug)]
pub enum ParserError {
	#[error("{0}")]
	InternalError(#[from] anyhow::Error),
	#[error(transparent)]
	ParseError(#[from] ParseError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: error {location}: {type}")]
pub struct ParseError {
	pub line:     usize,
	/// `at end` or `at '<lexeme>'`.
	pub location: String,
	pub r#type:   ParseErrorType,
}

impl ParseError {
	pub fn new(line: usize, location: String, r#type: ParseErrorType) -> Self { Self { line, location, r#type } }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParseErrorType {
	ExpectedExpression,
	ExpectedVariableName,
	ExpectedLoopVariable,
	InvalidAssignment,
	/// Parentheses, operators or statements nested past the parser's limit.
	NestedTooDeeply,
	/// A required token is missing, `what` names it and `after` names what precedes it.
	Expected { what: &'static str, after: &'static str },
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectedExpression => write!(f, "Expected expression."),
			ExpectedVariableName => write!(f, "Expected variable name."),
			ExpectedLoopVariable => write!(f, "Expected loop variable name."),
			InvalidAssignment => write!(f, "Invalid assignment."),
			NestedTooDeeply => write!(f, "Expression nested too deeply."),
			Expected { what, after } => write!(f, "Expected '{what}' after {after}."),
		}
	}
}
