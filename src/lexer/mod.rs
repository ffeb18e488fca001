//! Turns source text into tokens.
//!
//! The lexer walks the source once with two cursors: `start` marks the
//! beginning of the lexeme being scanned and `cursor` the character under
//! consideration. It never backtracks; two-character operators such as `==`,
//! `..` or `**` are recognized with a single character of lookahead.
//!
//! Keywords are recognized by `maximal munch`: an identifier-like run is read
//! to its end first and only then looked up in the keyword table, so `end_x`
//! is an identifier and not `end` followed by `_x`.
//!
//! A lexical error never stops the scan. The offending text is reported to
//! the caller's [`Reporter`] and left out of the token stream.
mod token;

use std::{iter::Peekable, str::CharIndices};

use TokenType::*;
use anyhow::Context;
pub use token::*;
use tracing::{debug, trace};

use crate::error::{
	ReplError,
	lexer::{LexError, LexErrorType, LexerError},
	report::{Report, Reporter},
};

/// A lexer for one chunk of source code
pub struct Lexer<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points just past the character currently being considered
	cursor:      usize,
	/// Tracks what source line `cursor` is on so we can produce tokens that know
	/// their location.
	line:        usize,
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1 }
	}

	/// Scan all tokens from the source code, the last one is always `Eof`.
	pub fn tokenize(&mut self, reporter: &mut dyn Reporter) -> Result<Vec<Token<'a>>, ReplError> {
		let mut tokens = Vec::new();
		let mut error_count = 0;
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			match self.scan_token(&mut tokens) {
				Err(LexerError::LexError(e)) => {
					e.report(reporter);
					error_count += 1;
				}
				Err(LexerError::InternalError(e)) => {
					return Err(e.into());
				}
				Ok(_) => {}
			}
		}
		tokens.push(Token::new(Eof, "", self.line));
		debug!(tokens = tokens.len(), errors = error_count, lines = self.line, "tokenized source");
		Ok(tokens)
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self, tokens: &mut Vec<Token<'a>>) -> Result<(), LexerError> {
		let next_char = self.advance().context("Unexpected end of input")?;
		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => LeftParen,
			')' => RightParen,
			',' => Comma,
			':' => Colon,
			';' => Semicolon,
			'?' => Question,
			'+' => Plus,
			'-' => Minus,
			'^' => Caret,
			'.' => if self.match_next('.') { DotDot } else { Dot },
			'*' => if self.match_next('*') { Caret } else { Star },
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else { Greater },
			'/' => if self.match_next('/') {
				while self.peek().is_some_and(|c| c != '\n') { self.advance(); }
				Comment
			} else { Slash },
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => { self.line += 1; NewLine }
			'"' => self.string()?,
			c if c.is_ascii_digit() => self.number()?,
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => return Err(LexError::new(self.line, LexErrorType::UnexpectedCharacter(next_char)).into()),
		};

		if !r#type.is_ignored() {
			let token = Token::new(r#type, &self.source[self.start..self.cursor], self.line);
			trace!("{token}");
			tokens.push(token);
		}

		Ok(())
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Scan a string literal, the opening quote is already consumed
	fn string(&mut self) -> Result<TokenType<'a>, LexerError> {
		let start_line = self.line;
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\n' {
				self.line += 1
			}
			self.advance();
		}

		self.peek().ok_or_else(|| LexError::new(start_line, LexErrorType::UnterminatedString))?;
		self.advance(); // The closing "
		let value = &self.source[self.start + 1..self.cursor - 1];
		Ok(String(value))
	}

	/// Scan an integer literal, `_` is accepted as a digit separator
	fn number(&mut self) -> Result<TokenType<'a>, LexerError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
			self.advance();
		}

		let digits: std::string::String =
			self.source[self.start..self.cursor].chars().filter(|c| c.is_ascii_digit()).collect();
		let value = digits.parse().map_err(|_| LexError::new(self.line, LexErrorType::NumberTooLarge))?;
		Ok(Number(value))
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType<'a> {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		TokenType::keyword_or_identifier(text)
	}
}
