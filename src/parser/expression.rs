//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `-123 * (45)`
//! as nested nodes. Every node owns its children.

use Expression::*;

use crate::{interpreter::value::Value, lexer::Token};

#[allow(clippy::enum_variant_names)]
/// Expression AST nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
	Literal(LiteralValue<'a>),
	Variable(Token<'a>),
	Unary { operator: Token<'a>, right: Box<Expression<'a>> },
	Binary { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	/// `and` / `or`, the right side is only evaluated when needed.
	Logical { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	Assign { target: Token<'a>, value: Box<Expression<'a>> },
	/// Evaluates both sides, yields the right one.
	Comma { left: Box<Expression<'a>>, right: Box<Expression<'a>> },
	Grouping(Box<Expression<'a>>),
}

impl<'a> Expression<'a> {
	pub fn unary(operator: Token<'a>, right: Box<Self>) -> Box<Self> { Box::new(Unary { operator, right }) }

	pub fn binary(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Binary { left, operator, right })
	}

	pub fn logical(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Logical { left, operator, right })
	}

	pub fn comma(left: Box<Self>, right: Box<Self>) -> Box<Self> { Box::new(Comma { left, right }) }

	pub fn grouping(expr: Box<Self>) -> Box<Self> { Box::new(Grouping(expr)) }

	pub fn assign(target: Token<'a>, value: Box<Self>) -> Box<Self> { Box::new(Assign { target, value }) }
}

/// Literal values in the AST
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
	Number(i64),
	String(&'a str),
	Boolean(bool),
}

impl LiteralValue<'_> {
	pub fn to_value(self) -> Value {
		match self {
			LiteralValue::Number(n) => Value::Int(n),
			LiteralValue::String(s) => Value::Str(s.to_string()),
			LiteralValue::Boolean(b) => Value::Bool(b),
		}
	}
}

impl<'a> TryFrom<Token<'a>> for Expression<'a> {
	type Error = anyhow::Error;

	fn try_from(token: Token<'a>) -> Result<Self, Self::Error> {
		use crate::lexer::TokenType;

		Ok(match token.r#type {
			TokenType::Number(n) => Literal(LiteralValue::Number(n)),
			TokenType::String(s) => Literal(LiteralValue::String(s)),
			TokenType::True => Literal(LiteralValue::Boolean(true)),
			TokenType::False => Literal(LiteralValue::Boolean(false)),
			TokenType::Identifier(_) => Variable(token),
			_ => anyhow::bail!("Cannot convert token {:?} to Expression", token),
		})
	}
}

impl std::fmt::Display for Expression<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal(lit) => write!(f, "{lit}"),
			Variable(token) => write!(f, "{}", token.lexeme),
			Unary { operator, right } => write!(f, "({} {right})", operator.lexeme),
			Binary { left, operator, right } | Logical { left, operator, right } => {
				write!(f, "({} {left} {right})", operator.lexeme)
			}
			Assign { target, value } => write!(f, "(= {} {value})", target.lexeme),
			Comma { left, right } => write!(f, "(, {left} {right})"),
			Grouping(expression) => write!(f, "(group {expression})"),
		}
	}
}

impl std::fmt::Display for LiteralValue<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LiteralValue::Number(n) => write!(f, "{n}"),
			LiteralValue::String(s) => write!(f, "\"{s}\""),
			LiteralValue::Boolean(b) => write!(f, "{b}"),
		}
	}
}
