//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The branches of an `if` are single statements, the bodies of
//! `for` and `while` are `begin ... end` sequences of declarations.

use std::fmt::Display;

use crate::{lexer::Token, parser::expression::Expression};

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
	/// An expression used as a statement.
	Expression(Expression<'a>),
	/// A print statement.
	Print {
		/// The `print` keyword, for error lines.
		keyword: Token<'a>,
		value:   Expression<'a>,
	},
	/// A variable declaration statement.
	VarDeclaration {
		/// The token of the variable being declared.
		name_token:  Token<'a>,
		/// An optional initializer expression.
		initializer: Option<Expression<'a>>,
	},
	If {
		condition:   Expression<'a>,
		then_branch: Box<Statement<'a>>,
		else_branch: Option<Box<Statement<'a>>>,
	},
	/// Runs `body` once per integer in `start..end`. The loop variable is
	/// parsed but never bound.
	For {
		/// The `for` keyword, for error lines.
		keyword: Token<'a>,
		start:   Expression<'a>,
		end:     Expression<'a>,
		body:    Vec<Statement<'a>>,
	},
	While {
		condition: Expression<'a>,
		body:      Vec<Statement<'a>>,
	},
}

impl Display for Statement<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Statement::Expression(expression) => write!(f, "(; {expression})"),
			Statement::Print { value, .. } => write!(f, "(print {value})"),
			Statement::VarDeclaration { name_token, initializer: Some(initializer) } => {
				write!(f, "(let {} {initializer})", name_token.lexeme)
			}
			Statement::VarDeclaration { name_token, initializer: None } => write!(f, "(let {})", name_token.lexeme),
			Statement::If { condition, then_branch, else_branch } => {
				write!(f, "(if {condition} {then_branch}")?;
				if let Some(else_branch) = else_branch {
					write!(f, " {else_branch}")?;
				}
				write!(f, ")")
			}
			Statement::For { start, end, body, .. } => write!(f, "(for {start} {end}{})", display_body(body)),
			Statement::While { condition, body } => write!(f, "(while {condition}{})", display_body(body)),
		}
	}
}

fn display_body(body: &[Statement]) -> String { body.iter().map(|s| format!(" {s}")).collect() }
