use std::fmt::Display;

use crate::interpreter::value::Value;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
	pub r#type: TokenType<'a>,
	pub lexeme: &'a str,
	pub line:   usize,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType<'a>, lexeme: &'a str, line: usize) -> Self { Self { r#type, lexeme, line } }

	/// The runtime value carried by literal and identifier tokens.
	pub fn literal(&self) -> Option<Value> {
		match self.r#type {
			TokenType::Number(n) => Some(Value::Int(n)),
			TokenType::String(s) | TokenType::Identifier(s) => Some(Value::Str(s.to_string())),
			TokenType::True => Some(Value::Bool(true)),
			TokenType::False => Some(Value::Bool(false)),
			_ => None,
		}
	}

	/// Location hint used in syntax error reports.
	pub fn location(&self) -> String {
		if self.r#type == TokenType::Eof { "at end".to_string() } else { format!("at '{}'", self.lexeme) }
	}
}

impl Display for Token<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:<15} {:<15} line: {}", format!("{:?}", self.r#type), self.lexeme, self.line)
	}
}

/// The different types of tokens, literal payloads borrow the source text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenType<'a> {
	/// New Line Character `\n`.
	NewLine,
	/// Empty Character: ` `, `\r`, `\t`.
	EmptyChar,
	/// Comment `//`
	Comment,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Comma `,`.
	Comma,
	/// Dot `.`.
	Dot,
	/// Range dots `..`.
	DotDot,
	/// Colon `:`.
	Colon,
	/// Semicolon `;`.
	Semicolon,
	/// Plus `+`.
	Plus,
	/// Minus `-`.
	Minus,
	/// Asterisk `*`.
	Star,
	/// Slash `/`.
	Slash,
	/// Exponent `^`, also written `**`.
	Caret,
	/// Bang `!`.
	Bang,
	/// Question mark `?`.
	Question,
	/// Equal `=`.
	Equal,
	/// Equal equal `==`.
	EqualEqual,
	/// Bang equal `!=`.
	BangEqual,
	/// Greater than `>`.
	Greater,
	/// Greater than or equal `>=`.
	GreaterEqual,
	/// Less than `<`.
	Less,
	/// Less than or equal `<=`.
	LessEqual,
	/// Identifier, e.g. variable name.
	Identifier(&'a str),
	/// String literal without its quotes, e.g. `hello` for `"hello"`.
	String(&'a str),
	/// Integer literal, e.g. `1_000`.
	Number(i64),
	/// Variable declaration keyword.
	Let,
	If,
	Then,
	Else,
	/// Boolean literal `true`.
	True,
	/// Boolean literal `false`.
	False,
	/// Logical AND keyword.
	And,
	/// Logical OR keyword.
	Or,
	For,
	In,
	/// Block opener for `for` and `while`.
	Begin,
	/// Block terminator for `for` and `while`.
	End,
	While,
	Print,
	/// End of input.
	Eof,
}

impl<'a> TokenType<'a> {
	pub fn is_ignored(&self) -> bool {
		matches!(self, TokenType::EmptyChar | TokenType::NewLine | TokenType::Comment)
	}

	/// Keywords that may begin a statement, used to resynchronize the parser.
	pub fn starts_statement(&self) -> bool {
		matches!(self, TokenType::Let | TokenType::Print | TokenType::If | TokenType::For | TokenType::While)
	}

	pub fn keyword_or_identifier(value: &'a str) -> Self {
		match value {
			"let" => TokenType::Let,
			"if" => TokenType::If,
			"then" => TokenType::Then,
			"else" => TokenType::Else,
			"true" => TokenType::True,
			"false" => TokenType::False,
			"and" => TokenType::And,
			"or" => TokenType::Or,
			"for" => TokenType::For,
			"in" => TokenType::In,
			"begin" => TokenType::Begin,
			"end" => TokenType::End,
			"while" => TokenType::While,
			"print" => TokenType::Print,
			_ => TokenType::Identifier(value),
		}
	}
}
