use crate::error::TokenizeResult;
use crate::lex::Tokenizer;
use crate::mode::LexMode;
use crate::mode::ModeStack;
use crate::token::promote_keywords;
use crate::token::Token;
use crate::token::TokenKind;
use std::io::Read;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod mode;
pub mod reader;
pub mod token;

/// Tokenises a source string, driving the lexical-goal stack and promoting
/// reserved-word identifiers to keywords.
pub fn parse(source: &str) -> TokenizeResult<Vec<Token>> {
  parse_reader(source.as_bytes())
}

pub fn parse_bytes(source: &[u8]) -> TokenizeResult<Vec<Token>> {
  parse_reader(source)
}

/// Tokenises any byte source. After each token the lexical-goal stack is
/// updated: a template head or middle pushes `RegExpOrTemplateTail`, a
/// template tail pops, `{` pushes `RegExp`, and `}` pops. Reserved-word
/// identifiers are promoted to keywords in a final pass.
pub fn parse_reader<R: Read>(rd: R) -> TokenizeResult<Vec<Token>> {
  let mut tokenizer = Tokenizer::new(rd);
  let mut stack = ModeStack::new();
  let mut tokens = Vec::new();
  while let Some(token) = tokenizer.read()? {
    match token.kind {
      TokenKind::TemplateHead | TokenKind::TemplateMiddle => {
        stack.push_mode(&mut tokenizer, LexMode::RegExpOrTemplateTail);
      }
      TokenKind::TemplateTail => {
        stack.pop_mode(&mut tokenizer);
      }
      TokenKind::PuncLeftBrace => {
        stack.push_mode(&mut tokenizer, LexMode::RegExp);
      }
      TokenKind::PuncRightBrace => {
        stack.pop_mode(&mut tokenizer);
      }
      _ => {}
    }
    tokens.push(token);
  }
  promote_keywords(&mut tokens);
  Ok(tokens)
}
