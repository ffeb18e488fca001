//! # tinyrepl
//!
//! A line-oriented interpreter for a small imperative language:
//!
//! ``` text
//! let total = 0;
//! for i in 0..3 begin total = total + 2; end
//! if total == 6 then print "six"; else print total;
//! ```
//!
//! ## Scanning
//!
//! The [`Lexer`] takes in the characters and converts them into tokens.
//! Whitespace and `//` comments are dropped, so `let x = (a + 1);` becomes
//! `["let", "x", "=", "(", "a", "+", "1", ")", ";"]` followed by `Eof`.
//!
//! ## Parsing
//!
//! The [`Parser`] builds an abstract syntax tree out of the tokens and reports
//! syntax errors. One malformed statement does not stop it, it skips ahead to
//! the next statement and keeps going.
//!
//! ``` markdown
//! x (Statement::VarDeclaration)
//! └── group (Expression::Grouping)
//!     └── + (Expression::Binary)
//!         ├── a (Expression::Variable)
//!         └── 1 (Expression::Literal)
//! ```
//!
//! ## Tree-walk interpreting
//!
//! The [`Interpreter`] executes the tree right after parsing, against an
//! [`Environment`] that the caller keeps alive for the whole session. The
//! first runtime error ends the run.
//!
//! Errors of every phase go to a caller supplied [`Reporter`], the core never
//! prints them itself.

pub mod cli;
mod environment;
mod error;
mod interpreter;
mod lexer;
mod parser;
mod repl;
mod statement;

pub use environment::Environment;
pub use error::{
	ReplError,
	interpreter::{RuntimeError, RuntimeErrorType},
	lexer::{LexError, LexErrorType},
	parser::{ParseError, ParseErrorType},
	report::{Diagnostic, Diagnostics, Reporter},
};
pub use interpreter::{Interpreter, value::Value};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{
	Parser,
	expression::{Expression, LiteralValue},
};
pub use repl::{Repl, SessionConfig};
pub use statement::Statement;

/// Scan `source` into tokens ending with `Eof`. Lexical errors are reported and
/// the offending text is skipped.
pub fn tokenize<'a>(source: &'a str, reporter: &mut dyn Reporter) -> Result<Vec<Token<'a>>, ReplError> {
	Lexer::new(source).tokenize(reporter)
}

/// Parse tokens into statements. Syntax errors are reported and the malformed
/// statements left out, so the result may be partial.
pub fn parse<'a>(tokens: Vec<Token<'a>>, reporter: &mut dyn Reporter) -> Result<Vec<Statement<'a>>, ReplError> {
	Parser::new(tokens, reporter).parse()
}
