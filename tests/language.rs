use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tinyrepl::{Diagnostics, Environment, Interpreter, Repl, ReplError, SessionConfig, TokenType, Value, parse, tokenize};

/// Run `source` in a fresh environment, returning what it printed and the
/// messages it reported.
fn run(source: &str) -> (String, Vec<String>) {
	let mut diagnostics = Diagnostics::new();
	let mut environment = Environment::new();
	let mut interpreter = Interpreter::new(Vec::new());
	let tokens = tokenize(source, &mut diagnostics).unwrap();
	let statements = parse(tokens, &mut diagnostics).unwrap();
	interpreter.interpret(&statements, &mut environment, &mut diagnostics);
	let printed = String::from_utf8(interpreter.into_output()).unwrap();
	(printed, diagnostics.entries().iter().map(|d| d.message().to_string()).collect())
}

fn printed(source: &str) -> String {
	let (printed, errors) = run(source);
	assert!(errors.is_empty(), "{errors:?}");
	printed
}

#[test]
fn integer_literals_keep_their_value() {
	for (literal, expected) in [("0", 0), ("42", 42), ("1_000_000", 1_000_000), ("9223372036854775807", i64::MAX)] {
		let mut diagnostics = Diagnostics::new();
		let tokens = tokenize(literal, &mut diagnostics).unwrap();
		assert_eq!(tokens[0].r#type, TokenType::Number(expected));
		assert_eq!(tokens[0].literal(), Some(Value::Int(expected)));
	}
}

#[test]
fn plus_adds_or_concatenates() {
	assert_eq!(printed("print \"a\" + \"b\"; print 1 + 2;"), "ab\n3\n");
	let (out, errors) = run("print 1 + \"a\"; print 2;");
	assert_eq!(out, "");
	assert_eq!(errors, ["Operands must be numbers."]);
}

#[test]
fn division_by_zero_aborts_the_run() {
	let (out, errors) = run("print 1; print 5 / 0; print 2;");
	assert_eq!(out, "1\n");
	assert_eq!(errors, ["Division by zero is undefined."]);
}

#[test]
fn variables() {
	assert_eq!(printed("let x = 1; x = 2; print x;"), "2\n");
	let (out, errors) = run("print y; print 1;");
	assert_eq!(out, "");
	assert_eq!(errors, ["Undefined variable 'y'."]);
}

#[test]
fn for_runs_body_once_per_step() {
	assert_eq!(printed("for i in 0..3 begin print 1; end"), "1\n1\n1\n");
	assert_eq!(printed("let n = 2; for i in 0..n begin n = n + 1; print n; end"), "3\n4\n");
	let (_, errors) = run("for i in 0..1 begin print i; end");
	assert_eq!(errors, ["Undefined variable 'i'."]);
}

#[test]
fn logic_and_truthiness() {
	assert_eq!(printed("print true and false; print false or 7; print !0;"), "false\n7\nfalse\n");
	assert_eq!(printed("print nil or \"x\"; print 0 and 5;"), "x\n5\n");
}

#[test]
fn equality_does_not_coerce() { assert_eq!(printed("print 1 == \"1\"; print 1 != \"1\";"), "false\ntrue\n"); }

#[test]
fn recovery_keeps_later_statements() {
	let (out, errors) = run("let = ; print 1;");
	assert_eq!(out, "1\n");
	assert_eq!(errors, ["Expected variable name."]);
}

#[test]
fn session_keeps_state_between_lines() {
	let mut repl = Repl::with_output(SessionConfig::default(), Vec::new());
	repl.run("let count = 10;").unwrap();
	repl.run("while count > 7 begin count = count - 1; end").unwrap();
	assert!(matches!(repl.run("print count / 0;"), Err(ReplError::RuntimeError)));
	repl.run("print count;").unwrap();
	assert_eq!(String::from_utf8_lossy(repl.output()), "7\n");
}

#[test]
fn strict_session_refuses_broken_lines() {
	let config = SessionConfig { strict: true, ..SessionConfig::default() };
	let mut repl = Repl::with_output(config, Vec::new());
	assert!(matches!(repl.run("let = ; print 1;"), Err(ReplError::SyntaxErrors(1))));
	assert!(repl.output().is_empty());
}

#[test]
fn run_sample_file() {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("sample.txt");
	let mut repl = Repl::with_output(SessionConfig::default(), Vec::new());
	repl.run_file(&path).unwrap();
	assert_eq!(String::from_utf8_lossy(repl.output()), "15\nhello world\n12\n");
	assert_eq!(repl.environment().value("total"), Some(&Value::Int(15)));
}

#[test]
fn deep_nesting_is_a_syntax_error() {
	let depth = 10_000;
	let source = format!("print {}1{};\nprint 2;", "(".repeat(depth), ")".repeat(depth));
	let (out, errors) = run(&source);
	assert_eq!(out, "2\n");
	assert_eq!(errors, ["Expression nested too deeply."]);

	let mut repl = Repl::with_output(SessionConfig::default(), Vec::new());
	repl.run("let kept = 1;").unwrap();
	assert!(matches!(repl.run(&source), Err(ReplError::SyntaxErrors(1))));
	repl.run("print kept;").unwrap();
	assert_eq!(String::from_utf8_lossy(repl.output()), "2\n1\n");
}

#[test]
fn nesting_below_the_limit_evaluates() {
	let source = format!("print {}2{} * {}3;", "(".repeat(60), ")".repeat(60), "-".repeat(60));
	assert_eq!(printed(&source), "6\n");
}
