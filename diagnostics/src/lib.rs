//! Diagnostics for the tokeniser: an error report and a caret renderer.
//!
//! A tokeniser error points at a single byte offset in a single source
//! text and carries at most one note, so that is all this crate models.
//! Severity is fixed: the tokeniser only ever reports errors.
//!
//! ```
//! use diagnostics::render_diagnostic;
//! use diagnostics::Diagnostic;
//!
//! let diag = Diagnostic::new("TOK0002", "invalid string literal", 8)
//!   .with_note("lexical goal: div");
//! let rendered = render_diagnostic("main.js", "let x = 'oops;", &diag);
//! assert_eq!(rendered, concat!(
//!   "error[TOK0002]: invalid string literal\n",
//!   " --> main.js:1:9\n",
//!   "  |\n",
//!   "1 | let x = 'oops;\n",
//!   "  |         ^ invalid string literal\n",
//!   "  = note: lexical goal: div\n",
//! ));
//! ```

use std::fmt::Write;

/// A render-ready tokeniser error: a stable code, a message, the byte
/// offset it points at, and an optional note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub code: &'static str,
  pub message: String,
  pub offset: usize,
  pub note: Option<String>,
}

impl Diagnostic {
  pub fn new(code: &'static str, message: impl Into<String>, offset: usize) -> Diagnostic {
    Diagnostic {
      code,
      message: message.into(),
      offset,
      note: None,
    }
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Diagnostic {
    self.note = Some(note.into());
    self
  }
}

/// Renders a diagnostic against its source text: header, `-->` location,
/// the line containing the offset, and a caret under the offset.
///
/// Columns are counted in code points, matching how the tokeniser reads
/// input. An offset at or past the end of the source points just past the
/// last line.
pub fn render_diagnostic(file_name: &str, source: &str, diagnostic: &Diagnostic) -> String {
  let offset = diagnostic.offset.min(source.len());
  let before = &source[..offset];
  let line_no = before.matches('\n').count() + 1;
  let line_start = before.rfind('\n').map_or(0, |i| i + 1);
  let line = source[line_start..].lines().next().unwrap_or("");
  let column = before[line_start..].chars().count() + 1;

  let gutter = line_no.to_string();
  let pad = " ".repeat(gutter.len());

  let mut out = String::new();
  writeln!(out, "error[{}]: {}", diagnostic.code, diagnostic.message).unwrap();
  writeln!(out, " --> {}:{}:{}", file_name, line_no, column).unwrap();
  writeln!(out, "{} |", pad).unwrap();
  writeln!(out, "{} | {}", gutter, line).unwrap();
  writeln!(
    out,
    "{} | {}^ {}",
    pad,
    " ".repeat(column - 1),
    diagnostic.message
  )
  .unwrap();
  if let Some(note) = &diagnostic.note {
    writeln!(out, "{} = note: {}", pad, note).unwrap();
  }
  out
}
