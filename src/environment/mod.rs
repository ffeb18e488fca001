use std::collections::HashMap;

use crate::{
	error::interpreter::{RuntimeError, RuntimeErrorType},
	interpreter::value::Value,
	lexer::Token,
};

/// The variables of one session. There is a single flat scope, it outlives
/// every run and keeps its bindings between REPL lines.
#[derive(Default, Debug, Clone)]
pub struct Environment {
	variables: HashMap<String, Value>,
}

impl Environment {
	pub fn new() -> Self { Self::default() }

	/// A `let` statement doesn't just define a new variable, it can also be
	/// used to redefine an existing variable.
	pub fn define(&mut self, token: &Token, value: Value) { self.variables.insert(token.lexeme.to_string(), value); }

	pub fn get(&self, token: &Token) -> Result<Value, RuntimeError> {
		self.variables.get(token.lexeme).cloned().ok_or_else(|| undefined(token))
	}

	/// Assign a value to an existing variable.
	pub fn assign(&mut self, token: &Token, value: Value) -> Result<(), RuntimeError> {
		match self.variables.get_mut(token.lexeme) {
			Some(slot) => {
				*slot = value;
				Ok(())
			}
			None => Err(undefined(token)),
		}
	}

	/// Look a binding up by name.
	pub fn value(&self, name: &str) -> Option<&Value> { self.variables.get(name) }

	pub fn len(&self) -> usize { self.variables.len() }

	pub fn is_empty(&self) -> bool { self.variables.is_empty() }
}

fn undefined(token: &Token) -> RuntimeError {
	RuntimeError::new(token.line, RuntimeErrorType::UndefinedVariable(token.lexeme.to_string()))
}
