/// A runtime fault, it aborts the remaining statements of the current run.
#[derive(thiserror::Error, Debug)]
#[error("line {line}: {type}")]
pub struct RuntimeError {
	pub line:   usize,
	pub r#type: RuntimeErrorType,
}

impl RuntimeError {
	pub fn new(line: usize, r#type: RuntimeErrorType) -> Self { Self { line, r#type } }
}

#[derive(thiserror::Error, Debug)]
/// Errors that can occur during interpretation
pub enum RuntimeErrorType {
	#[error("Operand must be a number.")]
	OperandMustBeNumber,
	#[error("Operands must be numbers.")]
	OperandsMustBeNumbers,
	#[error("Division by zero is undefined.")]
	DivisionByZero,
	#[error("Undefined variable '{0}'.")]
	UndefinedVariable(String),
	#[error("Range must be specified by numbers.")]
	RangeMustBeNumbers,
	/// The output sink refused a `print`.
	#[error("Failed to write output: {0}")]
	Output(#[from] std::io::Error),
}
