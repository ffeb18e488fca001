use std::fmt::Display;

use Value::*;

use crate::{error::interpreter::RuntimeErrorType, lexer::TokenType};

/// Value represents a runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Nil,
	Bool(bool),
	Int(i64),
	Str(String),
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Nil => write!(f, "nil"),
			Bool(b) => write!(f, "{b}"),
			Int(n) => write!(f, "{n}"),
			Str(s) => write!(f, "{s}"),
		}
	}
}

impl Value {
	/// Performs a binary operation between two values.
	pub fn binary_op(&self, op: &TokenType, right: &Self) -> Result<Value, RuntimeErrorType> {
		use TokenType::*;

		match op {
			Plus => self.plus(right),
			Minus => self.integers(right).map(|(l, r)| Int(l.wrapping_sub(r))),
			Star => self.integers(right).map(|(l, r)| Int(l.wrapping_mul(r))),
			Slash => self.slash(right),
			Caret => self.caret(right),
			Greater => self.integers(right).map(|(l, r)| Bool(l > r)),
			GreaterEqual => self.integers(right).map(|(l, r)| Bool(l >= r)),
			Less => self.integers(right).map(|(l, r)| Bool(l < r)),
			LessEqual => self.integers(right).map(|(l, r)| Bool(l <= r)),
			EqualEqual => Ok(Bool(self == right)),
			BangEqual => Ok(Bool(self != right)),
			_ => Err(RuntimeErrorType::OperandsMustBeNumbers),
		}
	}

	/// Only `nil` and `false` are falsy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Nil => false,
			Bool(b) => *b,
			Int(_) | Str(_) => true,
		}
	}

	/// Arithmetic negation.
	pub fn negate(&self) -> Result<Value, RuntimeErrorType> {
		match self {
			Int(n) => Ok(Int(n.wrapping_neg())),
			_ => Err(RuntimeErrorType::OperandMustBeNumber),
		}
	}

	/// Both operands as integers, for the numeric-only operators.
	fn integers(&self, other: &Self) -> Result<(i64, i64), RuntimeErrorType> {
		match (self, other) {
			(Int(l), Int(r)) => Ok((*l, *r)),
			_ => Err(RuntimeErrorType::OperandsMustBeNumbers),
		}
	}

	/// Concatenates two strings, otherwise adds two integers.
	fn plus(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		match (self, other) {
			(Str(l), Str(r)) => Ok(Str(format!("{l}{r}"))),
			_ => self.integers(other).map(|(l, r)| Int(l.wrapping_add(r))),
		}
	}

	/// Integer division truncating toward zero.
	fn slash(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		let (l, r) = self.integers(other)?;
		if r == 0 {
			return Err(RuntimeErrorType::DivisionByZero);
		}
		Ok(Int(l.wrapping_div(r)))
	}

	/// Floating point power truncated back to an integer.
	fn caret(&self, other: &Self) -> Result<Value, RuntimeErrorType> {
		let (l, r) = self.integers(other)?;
		Ok(Int((l as f64).powf(r as f64) as i64))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn op(left: Value, op: TokenType, right: Value) -> Result<Value, RuntimeErrorType> { left.binary_op(&op, &right) }

	#[test]
	fn display() {
		assert_eq!(Nil.to_string(), "nil");
		assert_eq!(Bool(true).to_string(), "true");
		assert_eq!(Int(-12).to_string(), "-12");
		assert_eq!(Str("a \"b\"".to_string()).to_string(), "a \"b\"");
	}

	#[test]
	fn truthiness() {
		assert!(!Nil.is_truthy());
		assert!(!Bool(false).is_truthy());
		assert!(Bool(true).is_truthy());
		assert!(Int(0).is_truthy());
		assert!(Str(String::new()).is_truthy());
	}

	#[test]
	fn arithmetic() {
		assert_eq!(op(Int(1), TokenType::Plus, Int(2)).unwrap(), Int(3));
		assert_eq!(op(Int(1), TokenType::Minus, Int(2)).unwrap(), Int(-1));
		assert_eq!(op(Int(3), TokenType::Star, Int(4)).unwrap(), Int(12));
		assert_eq!(op(Int(7), TokenType::Slash, Int(2)).unwrap(), Int(3));
		assert_eq!(op(Int(-7), TokenType::Slash, Int(2)).unwrap(), Int(-3));
		assert_eq!(op(Int(i64::MAX), TokenType::Plus, Int(1)).unwrap(), Int(i64::MIN));
	}

	#[test]
	fn power() {
		assert_eq!(op(Int(2), TokenType::Caret, Int(10)).unwrap(), Int(1024));
		assert_eq!(op(Int(2), TokenType::Caret, Int(-1)).unwrap(), Int(0));
		assert_eq!(op(Int(0), TokenType::Caret, Int(0)).unwrap(), Int(1));
		assert_eq!(op(Int(10), TokenType::Caret, Int(100)).unwrap(), Int(i64::MAX));
	}

	#[test]
	fn concatenation() {
		assert_eq!(op(Str("a".into()), TokenType::Plus, Str("b".into())).unwrap(), Str("ab".into()));
		assert!(matches!(op(Int(1), TokenType::Plus, Str("a".into())), Err(RuntimeErrorType::OperandsMustBeNumbers)));
		assert!(matches!(
			op(Str("a".into()), TokenType::Minus, Str("b".into())),
			Err(RuntimeErrorType::OperandsMustBeNumbers)
		));
	}

	#[test]
	fn division_by_zero() {
		assert!(matches!(op(Int(5), TokenType::Slash, Int(0)), Err(RuntimeErrorType::DivisionByZero)));
		assert_eq!(op(Int(i64::MIN), TokenType::Slash, Int(-1)).unwrap(), Int(i64::MIN));
	}

	#[test]
	fn comparison() {
		assert_eq!(op(Int(1), TokenType::Less, Int(2)).unwrap(), Bool(true));
		assert_eq!(op(Int(2), TokenType::LessEqual, Int(2)).unwrap(), Bool(true));
		assert_eq!(op(Int(1), TokenType::Greater, Int(2)).unwrap(), Bool(false));
		assert_eq!(op(Int(2), TokenType::GreaterEqual, Int(3)).unwrap(), Bool(false));
		assert!(op(Str("a".into()), TokenType::Less, Str("b".into())).is_err());
	}

	#[test]
	fn equality_never_fails() {
		assert_eq!(op(Int(1), TokenType::EqualEqual, Str("1".into())).unwrap(), Bool(false));
		assert_eq!(op(Nil, TokenType::EqualEqual, Nil).unwrap(), Bool(true));
		assert_eq!(op(Nil, TokenType::EqualEqual, Bool(false)).unwrap(), Bool(false));
		assert_eq!(op(Str("x".into()), TokenType::BangEqual, Str("x".into())).unwrap(), Bool(false));
		assert_eq!(op(Bool(true), TokenType::BangEqual, Int(1)).unwrap(), Bool(true));
	}

	#[test]
	fn negation() {
		assert_eq!(Int(5).negate().unwrap(), Int(-5));
		assert!(matches!(Bool(true).negate(), Err(RuntimeErrorType::OperandMustBeNumber)));
	}
}
