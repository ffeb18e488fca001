//! Tree-walking interpreter.
//!
//! The interpreter walks the statements produced by the parser in order,
//! recursively evaluating each expression to a runtime [`Value`] and running
//! statements for their effect on the [`Environment`] and the output sink.
//!
//! # Expression Types
//!
//! - **Literals**: booleans, integers, strings
//! - **Unary**: `-` (negation), `!` (logical NOT)
//! - **Binary**: `+`, `-`, `*`, `/`, `^`, comparisons, equality
//! - **Logical**: `and`, `or`, short-circuiting and yielding an operand
//! - **Grouping**: Parenthesized expressions
//! - **Comma**: Sequence operator (evaluates left, returns right)
//! - **Variable** and **Assign**: reads and writes of declared variables
//!
//! The first runtime error is reported and ends the run, later statements
//! of the same run are not executed.

pub mod value;

use std::io::Write;

use Expression::*;
use tracing::{debug, trace};
use value::Value;

use crate::{
	environment::Environment,
	error::{
		interpreter::{RuntimeError, RuntimeErrorType},
		report::{Report, Reporter},
	},
	lexer::TokenType,
	parser::expression::Expression,
	statement::Statement,
};

/// Interpreter that executes statements, `print` output goes to `out`.
pub struct Interpreter<W: Write> {
	out: W,
}

impl<W: Write> Interpreter<W> {
	pub fn new(out: W) -> Self { Self { out } }

	pub fn output(&self) -> &W { &self.out }

	pub fn into_output(self) -> W { self.out }

	/// Execute `statements` in order against `environment`. Returns `false`
	/// when a runtime error was reported and the run was abandoned.
	#[tracing::instrument(level = "debug", skip_all, fields(count = statements.len()))]
	pub fn interpret(
		&mut self,
		statements: &[Statement],
		environment: &mut Environment,
		reporter: &mut dyn Reporter,
	) -> bool {
		for statement in statements {
			if let Err(error) = self.execute(statement, environment) {
				debug!(line = error.line, "run aborted: {}", error.r#type);
				error.report(reporter);
				return false;
			}
		}
		true
	}

	fn execute(&mut self, statement: &Statement, environment: &mut Environment) -> Result<(), RuntimeError> {
		trace!(%statement, "execute");
		match statement {
			Statement::Expression(expression) => {
				evaluate(expression, environment)?;
			}
			Statement::Print { keyword, value } => {
				let value = evaluate(value, environment)?;
				writeln!(self.out, "{value}").map_err(|e| RuntimeError::new(keyword.line, e.into()))?;
			}
			Statement::VarDeclaration { name_token, initializer } => {
				let value = match initializer {
					Some(initializer) => evaluate(initializer, environment)?,
					None => Value::Nil,
				};
				environment.define(name_token, value);
			}
			Statement::If { condition, then_branch, else_branch } => {
				if evaluate(condition, environment)?.is_truthy() {
					self.execute(then_branch, environment)?
				} else if let Some(else_branch) = else_branch {
					self.execute(else_branch, environment)?
				}
			}
			Statement::While { condition, body } => {
				while evaluate(condition, environment)?.is_truthy() {
					self.execute_all(body, environment)?;
				}
			}
			Statement::For { keyword, start, end, body } => {
				let (start, end) = match (evaluate(start, environment)?, evaluate(end, environment)?) {
					(Value::Int(start), Value::Int(end)) => (start, end),
					_ => return Err(RuntimeError::new(keyword.line, RuntimeErrorType::RangeMustBeNumbers)),
				};
				for _ in start..end {
					self.execute_all(body, environment)?;
				}
			}
		}
		Ok(())
	}

	fn execute_all(&mut self, statements: &[Statement], environment: &mut Environment) -> Result<(), RuntimeError> {
		statements.iter().try_for_each(|statement| self.execute(statement, environment))
	}
}

/// Evaluate the given expression and return its value.
fn evaluate(expression: &Expression, environment: &mut Environment) -> Result<Value, RuntimeError> {
	Ok(match expression {
		Literal(literal) => literal.to_value(),
		Grouping(inner) => evaluate(inner, environment)?,
		Variable(token) => environment.get(token)?,
		Assign { target, value } => {
			let value = evaluate(value, environment)?;
			environment.assign(target, value.clone())?;
			value
		}
		Unary { operator, right } => {
			let right = evaluate(right, environment)?;
			match operator.r#type {
				TokenType::Bang => Value::Bool(!right.is_truthy()),
				_ => right.negate().map_err(|e| RuntimeError::new(operator.line, e))?,
			}
		}
		Binary { left, operator, right } => {
			let left = evaluate(left, environment)?;
			let right = evaluate(right, environment)?;
			left.binary_op(&operator.r#type, &right).map_err(|e| RuntimeError::new(operator.line, e))?
		}
		Logical { left, operator, right } => {
			let left = evaluate(left, environment)?;
			let short_circuit = match operator.r#type {
				TokenType::Or => left.is_truthy(),
				_ => !left.is_truthy(),
			};
			if short_circuit { left } else { evaluate(right, environment)? }
		}
		Comma { left, right } => {
			evaluate(left, environment)?;
			evaluate(right, environment)?
		}
	})
}
