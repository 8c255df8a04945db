use crate::mode::LexMode;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
#[cfg(feature = "diagnostics")]
use diagnostics::Diagnostic;
use std::error::Error;
use std::fmt::Display;
use std::io;

/// A stable classification of lexical errors produced by the tokeniser.
///
/// Diagnostic codes (prefix `TOK`) are assigned per variant and are stable:
/// - `TOK0001`: [`LexErrorType::UnexpectedCharacter`]
/// - `TOK0002`: [`LexErrorType::InvalidStringLiteral`]
/// - `TOK0003`: [`LexErrorType::InvalidRegExpLiteral`]
/// - `TOK0004`: [`LexErrorType::InvalidSingleLineCommentOpening`]
/// - `TOK0005`: [`LexErrorType::InvalidMultiLineCommentOpening`]
/// - `TOK0006`: [`LexErrorType::UnterminatedTemplate`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexErrorType {
  UnexpectedCharacter(char),
  InvalidStringLiteral,
  InvalidRegExpLiteral,
  InvalidSingleLineCommentOpening,
  InvalidMultiLineCommentOpening,
  UnterminatedTemplate,
}

impl LexErrorType {
  /// Stable diagnostic code for this error variant.
  pub fn code(&self) -> &'static str {
    match self {
      LexErrorType::UnexpectedCharacter(_) => "TOK0001",
      LexErrorType::InvalidStringLiteral => "TOK0002",
      LexErrorType::InvalidRegExpLiteral => "TOK0003",
      LexErrorType::InvalidSingleLineCommentOpening => "TOK0004",
      LexErrorType::InvalidMultiLineCommentOpening => "TOK0005",
      LexErrorType::UnterminatedTemplate => "TOK0006",
    }
  }

  /// Human-readable message describing this error.
  pub fn message(&self) -> String {
    match self {
      LexErrorType::UnexpectedCharacter(c) => format!("unexpected character {:?}", c),
      LexErrorType::InvalidStringLiteral => "invalid string literal".into(),
      LexErrorType::InvalidRegExpLiteral => "invalid regexp literal".into(),
      LexErrorType::InvalidSingleLineCommentOpening => "invalid single-line comment opening".into(),
      LexErrorType::InvalidMultiLineCommentOpening => "invalid multi-line comment opening".into(),
      LexErrorType::UnterminatedTemplate => "unterminated template literal".into(),
    }
  }
}

/// A lexical error, carrying the byte offset of the token being read and the
/// lexical goal in force at the time.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct LexError {
  pub typ: LexErrorType,
  pub offset: usize,
  pub mode: LexMode,
}

impl LexError {
  pub fn new(typ: LexErrorType, offset: usize, mode: LexMode) -> LexError {
    LexError { typ, offset, mode }
  }

  /// Convert this error into a renderable [`diagnostics::Diagnostic`].
  #[cfg(feature = "diagnostics")]
  pub fn to_diagnostic(&self) -> Diagnostic {
    Diagnostic::new(self.typ.code(), self.typ.message(), self.offset)
      .with_note(format!("lexical goal: {}", self.mode))
  }
}

impl Debug for LexError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self)
  }
}

impl Display for LexError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} (mode {} at offset {})",
      self.typ.message(),
      self.mode,
      self.offset
    )
  }
}

impl Error for LexError {}

/// Any failure surfaced while reading tokens: a lexical error, or an I/O
/// error from the underlying byte source. End-of-input is not an error; it
/// is reported as `Ok(None)` by [`Tokenizer::read`](crate::lex::Tokenizer::read).
#[derive(Debug)]
pub enum TokenizeError {
  Lex(LexError),
  Io(io::Error),
}

impl TokenizeError {
  pub(crate) fn lex(typ: LexErrorType, offset: usize, mode: LexMode) -> TokenizeError {
    TokenizeError::Lex(LexError::new(typ, offset, mode))
  }
}

impl Display for TokenizeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      TokenizeError::Lex(e) => Display::fmt(e, f),
      TokenizeError::Io(e) => write!(f, "read error: {}", e),
    }
  }
}

impl Error for TokenizeError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      TokenizeError::Lex(e) => Some(e),
      TokenizeError::Io(e) => Some(e),
    }
  }
}

impl From<LexError> for TokenizeError {
  fn from(e: LexError) -> TokenizeError {
    TokenizeError::Lex(e)
  }
}

impl From<io::Error> for TokenizeError {
  fn from(e: io::Error) -> TokenizeError {
    TokenizeError::Io(e)
  }
}

pub type TokenizeResult<T> = Result<T, TokenizeError>;
