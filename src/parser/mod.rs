//! The `Lexer` uses the `Lexical grammar`: its alphabet is characters and its
//! strings are tokens. The `Parser` uses the `Syntactic grammar`: its alphabet
//! is tokens and its strings are statements.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Comma|,|Left
//! Assignment|=|Right
//! Or|or|Left
//! And|and|Left
//! Equality|== !=|Left
//! Comparison|< > <= >=|Left
//! AddSub|+ -|Left
//! MulDiv|* /|Left
//! Unary|! -|Right
//! Exponent|^ **|Right
//!
//! Grammar:
//!
//! ``` BNF
//! program      → declaration* EOF ;
//! declaration  → "let" IDENT ( "=" expression )? ";" | statement ;
//! statement    → ifStmt | printStmt | forStmt | whileStmt | exprStmt ;
//! ifStmt       → "if" expression "then" statement ( "else" statement )? ;
//! forStmt      → "for" IDENT "in" addsub ".." addsub "begin" declaration* "end" ;
//! whileStmt    → "while" expression "begin" declaration* "end" ;
//! printStmt    → "print" expression ";" ;
//! exprStmt     → expression ";" ;
//! expression   → comma ;
//! comma        → assignment ( "," assignment )* ;
//! assignment   → logic_or ( "=" assignment )? ;
//! logic_or     → logic_and ( "or" logic_and )* ;
//! logic_and    → equality ( "and" equality )* ;
//! equality     → comparison ( ( "==" | "!=" ) comparison )* ;
//! comparison   → addsub ( ( ">" | ">=" | "<" | "<=" ) addsub )* ;
//! addsub       → muldiv ( ( "+" | "-" ) muldiv )* ;
//! muldiv       → unary ( ( "*" | "/" ) unary )* ;
//! unary        → ( "!" | "-" ) unary | exponent ;
//! exponent     → primary ( "^" unary )* ;
//! primary      → "true" | "false" | NUMBER | STRING | IDENT | "(" expression ")" ;
//! ```
//!
//! A syntax error inside a declaration is reported, the parser skips to the
//! next statement boundary and the malformed declaration is dropped.
//!
//! Nesting is capped at [`MAX_DEPTH`] levels. Every parenthesis, prefix
//! operator, right-hand side of a chained operator and nested statement
//! counts as one level, so the tree handed to the interpreter is never deeper
//! than the cap.

pub mod expression;

use std::{iter::Peekable, vec::IntoIter};

use TokenType::*;
use anyhow::anyhow;
use tracing::debug;

use crate::{
	error::{
		ReplError,
		parser::{ParseError, ParseErrorType, ParserError},
		report::{Report, Reporter},
	},
	lexer::{Token, TokenType},
	parser::expression::Expression,
	statement::Statement,
};

/// Deepest nesting of expressions and statements a parse accepts.
pub const MAX_DEPTH: usize = 64;

/// Recursive-descent parser over one token stream.
pub struct Parser<'a, 'r> {
	/// The tokens to parse, always terminated by `Eof`.
	tokens:      Peekable<IntoIter<Token<'a>>>,
	reporter:    &'r mut dyn Reporter,
	error_count: usize,
	/// Current nesting level, see [`MAX_DEPTH`].
	depth:       usize,
}

impl<'a, 'r> Parser<'a, 'r> {
	pub fn new(mut tokens: Vec<Token<'a>>, reporter: &'r mut dyn Reporter) -> Self {
		if tokens.last().is_none_or(|token| token.r#type != Eof) {
			let line = tokens.last().map_or(1, |token| token.line);
			tokens.push(Token::new(Eof, "", line));
		}
		Self { tokens: tokens.into_iter().peekable(), reporter, error_count: 0, depth: 0 }
	}

	/// Parse every declaration up to `Eof`. Malformed declarations are reported
	/// and left out, `Err` means an internal fault.
	#[tracing::instrument(level = "debug", skip_all)]
	pub fn parse(mut self) -> Result<Vec<Statement<'a>>, ReplError> {
		let mut statements = Vec::new();
		while !self.is_at_end()? {
			if let Some(statement) = self.declaration()? {
				statements.push(statement);
			}
		}
		debug!(statements = statements.len(), errors = self.error_count, "parsed tokens");
		Ok(statements)
	}

	fn declaration(&mut self) -> Result<Option<Statement<'a>>, ParserError> {
		let depth = self.depth;
		let result = if matches!(self.peek()?.r#type, Let) {
			self.advance()?;
			self.var_declaration()
		} else {
			self.statement()
		};

		match result {
			Ok(statement) => Ok(Some(statement)),
			Err(ParserError::ParseError(error)) => {
				// Levels entered by the abandoned declaration are never left.
				self.depth = depth;
				self.report(&error);
				self.synchronize()?;
				Ok(None)
			}
			Err(internal) => Err(internal),
		}
	}

	fn var_declaration(&mut self) -> Result<Statement<'a>, ParserError> {
		if !matches!(self.peek()?.r#type, Identifier(_)) {
			return Err(self.error_here(ParseErrorType::ExpectedVariableName));
		}
		let name_token = self.advance()?;

		let initializer = if matches!(self.peek()?.r#type, Equal) {
			self.advance()?;
			Some(*self.expression()?)
		} else {
			None
		};

		self.consume(Semicolon, ParseErrorType::Expected { what: ";", after: "declaration" })?;
		Ok(Statement::VarDeclaration { name_token, initializer })
	}

	fn statement(&mut self) -> Result<Statement<'a>, ParserError> {
		let r#type = self.peek()?.r#type;
		match r#type {
			If => {
				self.advance()?;
				self.if_statement()
			}
			Print => {
				let keyword = self.advance()?;
				let value = self.expression()?;
				self.consume(Semicolon, ParseErrorType::Expected { what: ";", after: "expression" })?;
				Ok(Statement::Print { keyword, value: *value })
			}
			For => {
				let keyword = self.advance()?;
				self.for_statement(keyword)
			}
			While => {
				self.advance()?;
				let condition = self.expression()?;
				self.consume(Begin, ParseErrorType::Expected { what: "begin", after: "condition" })?;
				let body = self.block()?;
				Ok(Statement::While { condition: *condition, body })
			}
			_ => {
				let expression = self.expression()?;
				self.consume(Semicolon, ParseErrorType::Expected { what: ";", after: "expression" })?;
				Ok(Statement::Expression(*expression))
			}
		}
	}

	fn if_statement(&mut self) -> Result<Statement<'a>, ParserError> {
		let condition = self.expression()?;
		self.consume(Then, ParseErrorType::Expected { what: "then", after: "condition" })?;
		let then_branch = Box::new(self.nested(Self::statement)?);

		let else_branch = if matches!(self.peek()?.r#type, Else) {
			self.advance()?;
			Some(Box::new(self.nested(Self::statement)?))
		} else {
			None
		};

		Ok(Statement::If { condition: *condition, then_branch, else_branch })
	}

	/// The loop variable is required by the grammar but not kept.
	fn for_statement(&mut self, keyword: Token<'a>) -> Result<Statement<'a>, ParserError> {
		if !matches!(self.peek()?.r#type, Identifier(_)) {
			return Err(self.error_here(ParseErrorType::ExpectedLoopVariable));
		}
		self.advance()?;
		self.consume(In, ParseErrorType::Expected { what: "in", after: "loop variable" })?;
		let start = self.addsub()?;
		self.consume(DotDot, ParseErrorType::Expected { what: "..", after: "first expression" })?;
		let end = self.addsub()?;
		self.consume(Begin, ParseErrorType::Expected { what: "begin", after: "range" })?;
		let body = self.block()?;

		Ok(Statement::For { keyword, start: *start, end: *end, body })
	}

	/// Declarations up to and including `end`.
	fn block(&mut self) -> Result<Vec<Statement<'a>>, ParserError> {
		self.deepen()?;
		let mut body = Vec::new();
		while !matches!(self.peek()?.r#type, End | Eof) {
			if let Some(statement) = self.declaration()? {
				body.push(statement);
			}
		}
		self.consume(End, ParseErrorType::Expected { what: "end", after: "block" })?;
		self.depth -= 1;
		Ok(body)
	}

	fn expression(&mut self) -> Result<Box<Expression<'a>>, ParserError> { self.comma() }

	/// Parse comma expressions.
	fn comma(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.assignment()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, Comma) {
			self.advance()?;
			self.deepen()?;
			expression = Expression::comma(expression, self.assignment()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	/// Parse assignments. The target is parsed as an ordinary expression first
	/// and only a bare variable is accepted once `=` shows up.
	fn assignment(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let expression = self.logic_or()?;
		if !matches!(self.peek()?.r#type, Equal) {
			return Ok(expression);
		}

		let equals = self.advance()?;
		let value = self.nested(Self::assignment)?;
		match *expression {
			Expression::Variable(target) => Ok(Expression::assign(target, value)),
			other => {
				self.report(&ParseError::new(equals.line, equals.location(), ParseErrorType::InvalidAssignment));
				Ok(Box::new(other))
			}
		}
	}

	fn logic_or(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.logic_and()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, Or) {
			let operator = self.advance()?;
			self.deepen()?;
			expression = Expression::logical(expression, operator, self.logic_and()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	fn logic_and(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.equality()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, And) {
			let operator = self.advance()?;
			self.deepen()?;
			expression = Expression::logical(expression, operator, self.equality()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	/// Parse equality expressions.
	fn equality(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.comparison()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, BangEqual | EqualEqual) {
			let operator = self.advance()?;
			self.deepen()?;
			expression = Expression::binary(expression, operator, self.comparison()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	/// Parse comparison expressions.
	fn comparison(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.addsub()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, Greater | GreaterEqual | Less | LessEqual) {
			let operator = self.advance()?;
			self.deepen()?;
			expression = Expression::binary(expression, operator, self.addsub()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	fn addsub(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.muldiv()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, Minus | Plus) {
			let operator = self.advance()?;
			self.deepen()?;
			expression = Expression::binary(expression, operator, self.muldiv()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	fn muldiv(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.unary()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, Slash | Star) {
			let operator = self.advance()?;
			self.deepen()?;
			expression = Expression::binary(expression, operator, self.unary()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	/// Parse unary expressions.
	fn unary(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		if matches!(self.peek()?.r#type, Bang | Minus) {
			let operator = self.advance()?;
			return Ok(Expression::unary(operator, self.nested(Self::unary)?));
		}
		self.exponent()
	}

	/// The right operand goes back through `unary`, which makes `^` right
	/// associative and lets `2 ^ -1` parse.
	fn exponent(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let mut expression = self.primary()?;
		let depth = self.depth;
		while matches!(self.peek()?.r#type, Caret) {
			let operator = self.advance()?;
			self.deepen()?;
			expression = Expression::binary(expression, operator, self.unary()?)
		}
		self.depth = depth;
		Ok(expression)
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> Result<Box<Expression<'a>>, ParserError> {
		let r#type = self.peek()?.r#type;
		match r#type {
			True | False | Number(_) | String(_) | Identifier(_) => {
				let token = self.advance()?;
				Ok(Box::new(token.try_into()?))
			}
			LeftParen => {
				self.advance()?; // consume '('
				let expression = self.nested(Self::expression)?;
				self.consume(RightParen, ParseErrorType::Expected { what: ")", after: "expression" })?;
				Ok(Expression::grouping(expression))
			}
			_ => Err(self.error_here(ParseErrorType::ExpectedExpression)),
		}
	}

	fn is_at_end(&mut self) -> Result<bool, ParserError> { Ok(matches!(self.peek()?.r#type, Eof)) }

	/// Advance to the next token. `Eof` is never consumed, it is handed out again.
	fn advance(&mut self) -> Result<Token<'a>, ParserError> {
		if self.is_at_end()? {
			return Ok(self.peek()?.clone());
		}
		self.tokens.next().ok_or_else(|| anyhow!("Unexpected end of token stream").into())
	}

	/// Peek at the current token.
	fn peek(&mut self) -> Result<&Token<'a>, ParserError> {
		self.tokens.peek().ok_or_else(|| anyhow!("Unexpected end of token stream").into())
	}

	/// Consume the current token if it has the expected type.
	fn consume(&mut self, expected: TokenType<'a>, r#type: ParseErrorType) -> Result<Token<'a>, ParserError> {
		if self.peek()?.r#type == expected {
			return self.advance();
		}
		Err(self.error_here(r#type))
	}

	/// Enter one more nesting level, failing past [`MAX_DEPTH`].
	fn deepen(&mut self) -> Result<(), ParserError> {
		if self.depth >= MAX_DEPTH {
			return Err(self.error_here(ParseErrorType::NestedTooDeeply));
		}
		self.depth += 1;
		Ok(())
	}

	/// Run `parse` one nesting level deeper.
	fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T, ParserError>) -> Result<T, ParserError> {
		self.deepen()?;
		let parsed = parse(self)?;
		self.depth -= 1;
		Ok(parsed)
	}

	/// A syntax error located at the current token.
	fn error_here(&mut self, r#type: ParseErrorType) -> ParserError {
		match self.peek() {
			Ok(token) => ParseError::new(token.line, token.location(), r#type).into(),
			Err(internal) => internal,
		}
	}

	fn report(&mut self, error: &ParseError) {
		self.error_count += 1;
		error.report(&mut *self.reporter);
	}

	/// Discard tokens until just after a `;` or right before a statement keyword.
	fn synchronize(&mut self) -> Result<(), ParserError> {
		let mut previous = self.advance()?;
		loop {
			if matches!(previous.r#type, Semicolon) {
				return Ok(());
			}
			let next = self.peek()?.r#type;
			if matches!(next, Eof) || next.starts_statement() {
				debug!(line = previous.line, "resynchronized parser");
				return Ok(());
			}
			previous = self.advance()?;
		}
	}
}
