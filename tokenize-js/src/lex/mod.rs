use crate::char::is_identifier_continue;
use crate::char::is_identifier_start;
use crate::error::LexErrorType;
use crate::error::TokenizeError;
use crate::error::TokenizeResult;
use crate::mode::LexMode;
use crate::reader::CharReader;
use crate::token::Token;
use crate::token::TokenKind;
use std::io::Read;

#[cfg(test)]
mod tests;

/// A streaming ECMAScript tokeniser.
///
/// Each [`read`](Tokenizer::read) produces the next token under the current
/// lexical goal. The tokenizer never changes its own goal: the calling
/// parser drives it through a [`ModeStack`](crate::mode::ModeStack) after
/// observing each token, which is how the `/` (division vs regexp) and `}`
/// (brace vs template tail) ambiguities are resolved.
///
/// Two cursors track progress: the reader position and `saved`, the offset
/// where the current token began. Emitting a token advances `saved` to the
/// reader position; the previous `saved` becomes the token's offset.
pub struct Tokenizer<R: Read> {
  reader: CharReader<R>,
  mode: LexMode,
  saved: usize,
}

impl<R: Read> Tokenizer<R> {
  pub fn new(rd: R) -> Tokenizer<R> {
    Tokenizer {
      reader: CharReader::new(rd),
      mode: LexMode::Div,
      saved: 0,
    }
  }

  /// The lexical goal currently in force.
  pub fn mode(&self) -> LexMode {
    self.mode
  }

  pub(crate) fn set_mode(&mut self, mode: LexMode) {
    self.mode = mode;
  }

  /// Reads every remaining token. End-of-input terminates the sequence
  /// normally; errors abort it.
  pub fn read_all(&mut self) -> TokenizeResult<Vec<Token>> {
    let mut tokens = Vec::new();
    while let Some(token) = self.read()? {
      tokens.push(token);
    }
    Ok(tokens)
  }

  /// Produces the next token, or `None` at end-of-input.
  pub fn read(&mut self) -> TokenizeResult<Option<Token>> {
    if self.reader.pos() == 0 {
      if let Some(token) = self.read_shebang()? {
        return Ok(Some(token));
      }
    }

    let mut ws = String::new();
    loop {
      match self.next_char()? {
        Some(c) if c.is_whitespace() => ws.push(c),
        Some(c) => {
          self.reader.unread(c);
          break;
        }
        None => break,
      }
    }
    if !ws.is_empty() {
      return Ok(Some(self.emit(TokenKind::Whitespace, ws, String::new())));
    }

    let Some(c0) = self.next_char()? else {
      return Ok(None);
    };

    let token = match c0 {
      '!' => {
        if self.read_if('=')? {
          if self.read_if('=')? {
            self.fixed(TokenKind::BinaryStrictNotEquals, "!==")
          } else {
            self.fixed(TokenKind::BinaryNotEquals, "!=")
          }
        } else {
          self.fixed(TokenKind::UnaryBang, "!")
        }
      }
      '%' => {
        if self.read_if('=')? {
          self.fixed(TokenKind::BinaryModuloAssignment, "%=")
        } else {
          self.fixed(TokenKind::BinaryModulo, "%")
        }
      }
      '&' => {
        if self.read_if('&')? {
          self.fixed(TokenKind::BinaryLogicalAnd, "&&")
        } else if self.read_if('=')? {
          self.fixed(TokenKind::BinaryBitwiseAndAssignment, "&=")
        } else {
          self.fixed(TokenKind::BinaryBitwiseAnd, "&")
        }
      }
      '(' => self.fixed(TokenKind::PuncLeftParen, "("),
      ')' => self.fixed(TokenKind::PuncRightParen, ")"),
      '*' => {
        if self.read_if('*')? {
          if self.read_if('=')? {
            self.fixed(TokenKind::BinaryExponentAssignment, "**=")
          } else {
            self.fixed(TokenKind::BinaryExponent, "**")
          }
        } else if self.read_if('=')? {
          self.fixed(TokenKind::BinaryStarAssignment, "*=")
        } else {
          self.fixed(TokenKind::BinaryStar, "*")
        }
      }
      '+' => {
        if self.read_if('+')? {
          self.fixed(TokenKind::UnaryIncrement, "++")
        } else if self.read_if('=')? {
          self.fixed(TokenKind::BinaryPlusAssignment, "+=")
        } else {
          self.fixed(TokenKind::BinaryPlus, "+")
        }
      }
      ',' => self.fixed(TokenKind::PuncComma, ","),
      '-' => {
        if self.read_if('-')? {
          self.fixed(TokenKind::UnaryDecrement, "--")
        } else if self.read_if('=')? {
          self.fixed(TokenKind::BinaryMinusAssignment, "-=")
        } else {
          self.fixed(TokenKind::BinaryMinus, "-")
        }
      }
      '.' => match self.next_char()? {
        Some('.') => {
          if self.read_if('.')? {
            self.fixed(TokenKind::PuncSpread, "...")
          } else {
            self.reader.unread('.');
            self.fixed(TokenKind::PuncPeriod, ".")
          }
        }
        Some(c1) => {
          self.reader.unread(c1);
          self.fixed(TokenKind::PuncPeriod, ".")
        }
        None => self.fixed(TokenKind::PuncPeriod, "."),
      },
      '/' => match self.next_char()? {
        Some('/') => {
          self.reader.unread('/');
          self.reader.unread('/');
          return self.lex_single_line_comment().map(Some);
        }
        Some('*') => {
          self.reader.unread('*');
          self.reader.unread('/');
          return self.lex_multiple_line_comment().map(Some);
        }
        c1 => {
          if let Some(c1) = c1 {
            self.reader.unread(c1);
          }
          if self.mode == LexMode::RegExp || self.mode == LexMode::RegExpOrTemplateTail {
            return self.lex_regexp('/').map(Some);
          }
          if self.read_if('=')? {
            self.fixed(TokenKind::BinaryDivideEquals, "/=")
          } else {
            self.fixed(TokenKind::BinaryDivide, "/")
          }
        }
      },
      ':' => self.fixed(TokenKind::PuncColon, ":"),
      ';' => self.fixed(TokenKind::PuncSemicolon, ";"),
      '<' => {
        if self.read_if('<')? {
          if self.read_if('=')? {
            self.fixed(TokenKind::BinaryShiftLeftAssignment, "<<=")
          } else {
            self.fixed(TokenKind::BinaryShiftLeft, "<<")
          }
        } else if self.read_if('=')? {
          self.fixed(TokenKind::BinaryLessOrEqual, "<=")
        } else {
          self.fixed(TokenKind::BinaryLess, "<")
        }
      }
      '=' => {
        if self.read_if('=')? {
          if self.read_if('=')? {
            self.fixed(TokenKind::BinaryStrictEquals, "===")
          } else {
            self.fixed(TokenKind::BinaryEquals, "==")
          }
        } else if self.read_if('>')? {
          self.fixed(TokenKind::PuncFatArrow, "=>")
        } else {
          self.fixed(TokenKind::BinaryAssignment, "=")
        }
      }
      '>' => {
        if self.read_if('=')? {
          self.fixed(TokenKind::BinaryGreaterOrEqual, ">=")
        } else if self.read_if('>')? {
          if self.read_if('=')? {
            self.fixed(TokenKind::BinaryShiftRightAssignment, ">>=")
          } else if self.read_if('>')? {
            if self.read_if('=')? {
              self.fixed(TokenKind::BinaryShiftRightUnsignedAssignment, ">>>=")
            } else {
              self.fixed(TokenKind::BinaryShiftRightUnsigned, ">>>")
            }
          } else {
            self.fixed(TokenKind::BinaryShiftRight, ">>")
          }
        } else {
          self.fixed(TokenKind::BinaryGreater, ">")
        }
      }
      '?' => self.fixed(TokenKind::PuncQuestion, "?"),
      '@' => self.fixed(TokenKind::PuncAt, "@"),
      '[' => self.fixed(TokenKind::PuncLeftBracket, "["),
      ']' => self.fixed(TokenKind::PuncRightBracket, "]"),
      '`' => return self.lex_template('`', true).map(Some),
      '^' => {
        if self.read_if('=')? {
          self.fixed(TokenKind::BinaryBitwiseXorAssignment, "^=")
        } else {
          self.fixed(TokenKind::BinaryBitwiseXor, "^")
        }
      }
      '{' => self.fixed(TokenKind::PuncLeftBrace, "{"),
      '|' => {
        if self.read_if('|')? {
          self.fixed(TokenKind::BinaryLogicalOr, "||")
        } else if self.read_if('=')? {
          self.fixed(TokenKind::BinaryBitwiseOrAssignment, "|=")
        } else {
          self.fixed(TokenKind::BinaryBitwiseOr, "|")
        }
      }
      '}' => {
        if self.mode == LexMode::TemplateTail || self.mode == LexMode::RegExpOrTemplateTail {
          return self.lex_template('}', false).map(Some);
        }
        self.fixed(TokenKind::PuncRightBrace, "}")
      }
      '~' => self.fixed(TokenKind::UnaryTilde, "~"),
      '"' | '\'' => return self.lex_string(c0).map(Some),
      c if c.is_numeric() => {
        self.reader.unread(c);
        return self.lex_number().map(Some);
      }
      c if is_identifier_start(c) => {
        self.reader.unread(c);
        return self.lex_identifier().map(Some);
      }
      c => return Err(self.err(LexErrorType::UnexpectedCharacter(c))),
    };
    Ok(Some(token))
  }

  // Only attempted while nothing has been consumed: a `#!` line at the very
  // start of input runs through (but not including) the next line feed, so
  // the line feed lands in the following whitespace token.
  fn read_shebang(&mut self) -> TokenizeResult<Option<Token>> {
    let Some(c0) = self.next_char()? else {
      return Ok(None);
    };
    if c0 != '#' {
      self.reader.unread(c0);
      return Ok(None);
    }
    match self.next_char()? {
      Some('!') => {
        let mut raw = String::from("#!");
        loop {
          match self.next_char()? {
            Some('\n') => {
              self.reader.unread('\n');
              break;
            }
            Some(c) => raw.push(c),
            None => break,
          }
        }
        let value = raw.clone();
        Ok(Some(self.emit(TokenKind::MetaShebangLine, raw, value)))
      }
      Some(c1) => {
        self.reader.unread(c1);
        self.reader.unread(c0);
        Ok(None)
      }
      None => {
        self.reader.unread(c0);
        Ok(None)
      }
    }
  }

  // The opening quote has been consumed. Escapes decode per a small table; a
  // backslash followed by a line feed contributes nothing to the value; any
  // other escaped code point stays in the raw but is dropped from the value.
  fn lex_string(&mut self, quote: char) -> TokenizeResult<Token> {
    let mut raw = String::new();
    raw.push(quote);
    let mut value = String::new();
    let mut escaped = false;
    loop {
      let Some(c) = self.next_char()? else {
        return Err(self.err(LexErrorType::InvalidStringLiteral));
      };
      raw.push(c);
      if escaped {
        escaped = false;
        match c {
          '\n' => {}
          c if c == quote => value.push(c),
          '\\' => value.push('\\'),
          'n' => value.push('\n'),
          'r' => value.push('\r'),
          't' => value.push('\t'),
          _ => {}
        }
        continue;
      }
      match c {
        '\\' => escaped = true,
        // A bare line feed ends the literal; only the opening quote may
        // close it.
        '\n' => return Err(self.err(LexErrorType::InvalidStringLiteral)),
        c if c == quote => return Ok(self.emit(TokenKind::String, raw, value)),
        c => value.push(c),
      }
    }
  }

  // The opening slash has been consumed. A backslash shields the next code
  // point; the body runs to the next bare `/`, then a run of lowercase ASCII
  // letters is taken as flags. Character classes are not special-cased.
  fn lex_regexp(&mut self, open: char) -> TokenizeResult<Token> {
    let mut raw = String::new();
    raw.push(open);
    let mut escaped = false;
    loop {
      let Some(c) = self.next_char()? else {
        return Err(self.err(LexErrorType::InvalidRegExpLiteral));
      };
      raw.push(c);
      if escaped {
        escaped = false;
        continue;
      }
      match c {
        '\\' => escaped = true,
        c if c == open => break,
        _ => {}
      }
    }
    loop {
      match self.next_char()? {
        Some(c) if c.is_ascii_lowercase() => raw.push(c),
        Some(c) => {
          self.reader.unread(c);
          break;
        }
        None => break,
      }
    }
    let value = raw.clone();
    Ok(self.emit(TokenKind::Regexp, raw, value))
  }

  // The dispatcher pushed `//` back; the opening pair is re-read and checked
  // here.
  fn lex_single_line_comment(&mut self) -> TokenizeResult<Token> {
    if self.next_char()? != Some('/') {
      return Err(self.err(LexErrorType::InvalidSingleLineCommentOpening));
    }
    if self.next_char()? != Some('/') {
      return Err(self.err(LexErrorType::InvalidSingleLineCommentOpening));
    }
    let mut raw = String::from("//");
    loop {
      match self.next_char()? {
        Some('\n') => {
          self.reader.unread('\n');
          break;
        }
        Some(c) => raw.push(c),
        None => break,
      }
    }
    let value = raw.clone();
    Ok(self.emit(TokenKind::SingleLineComment, raw, value))
  }

  fn lex_multiple_line_comment(&mut self) -> TokenizeResult<Token> {
    if self.next_char()? != Some('/') {
      return Err(self.err(LexErrorType::InvalidMultiLineCommentOpening));
    }
    if self.next_char()? != Some('*') {
      return Err(self.err(LexErrorType::InvalidMultiLineCommentOpening));
    }
    let mut raw = String::from("/*");
    loop {
      match self.next_char()? {
        Some('*') => {
          if self.read_if('/')? {
            raw.push_str("*/");
            break;
          }
          raw.push('*');
        }
        Some(c) => raw.push(c),
        // An unterminated comment runs to end of input.
        None => break,
      }
    }
    let value = raw.clone();
    Ok(self.emit(TokenKind::MultipleLineComment, raw, value))
  }

  // Runs of Unicode numbers with at most one embedded period. No radix
  // prefixes, exponents, or bigint suffixes.
  fn lex_number(&mut self) -> TokenizeResult<Token> {
    let mut raw = String::new();
    let mut seen_period = false;
    loop {
      match self.next_char()? {
        Some(c) if c.is_numeric() => raw.push(c),
        Some('.') if !seen_period => {
          raw.push('.');
          seen_period = true;
        }
        Some(c) => {
          self.reader.unread(c);
          break;
        }
        None => break,
      }
    }
    let value = raw.clone();
    Ok(self.emit(TokenKind::Number, raw, value))
  }

  fn lex_identifier(&mut self) -> TokenizeResult<Token> {
    let mut raw = String::new();
    loop {
      match self.next_char()? {
        Some(c) if is_identifier_continue(c) => raw.push(c),
        Some(c) => {
          self.reader.unread(c);
          break;
        }
        None => break,
      }
    }
    let value = raw.clone();
    Ok(self.emit(TokenKind::Identifier, raw, value))
  }

  // The opener (a backtick for a head, `}` for a tail) has been consumed.
  // The chunk runs to a closing backtick or a `${`; a backslash shields the
  // following code point from terminating the chunk, and both pass through
  // to raw and value undecoded.
  fn lex_template(&mut self, opener: char, head: bool) -> TokenizeResult<Token> {
    let mut raw = String::new();
    raw.push(opener);
    let mut value = String::new();
    loop {
      let Some(c) = self.next_char()? else {
        return Err(self.err(LexErrorType::UnterminatedTemplate));
      };
      match c {
        '`' => {
          raw.push('`');
          let kind = if head {
            TokenKind::TemplateNoSubstitution
          } else {
            TokenKind::TemplateTail
          };
          return Ok(self.emit(kind, raw, value));
        }
        '$' => {
          if self.read_if('{')? {
            raw.push_str("${");
            let kind = if head {
              TokenKind::TemplateHead
            } else {
              TokenKind::TemplateMiddle
            };
            return Ok(self.emit(kind, raw, value));
          }
          raw.push('$');
          value.push('$');
        }
        '\\' => {
          raw.push('\\');
          value.push('\\');
          let Some(escaped) = self.next_char()? else {
            return Err(self.err(LexErrorType::UnterminatedTemplate));
          };
          raw.push(escaped);
          value.push(escaped);
        }
        c => {
          raw.push(c);
          value.push(c);
        }
      }
    }
  }

  // Advances `saved` to the reader position and returns the offset the
  // current token started at.
  fn save(&mut self) -> usize {
    let s = self.saved;
    self.saved = self.reader.pos();
    s
  }

  fn emit(&mut self, kind: TokenKind, raw: String, value: String) -> Token {
    Token {
      kind,
      raw,
      value,
      offset: self.save(),
    }
  }

  fn fixed(&mut self, kind: TokenKind, raw: &str) -> Token {
    self.emit(kind, raw.to_string(), String::new())
  }

  fn err(&self, typ: LexErrorType) -> TokenizeError {
    TokenizeError::lex(typ, self.saved, self.mode)
  }

  fn next_char(&mut self) -> TokenizeResult<Option<char>> {
    self.reader.read().map_err(TokenizeError::Io)
  }

  // Consumes the next code point iff it equals `want`; end-of-input never
  // matches.
  fn read_if(&mut self, want: char) -> TokenizeResult<bool> {
    match self.next_char()? {
      Some(c) if c == want => Ok(true),
      Some(c) => {
        self.reader.unread(c);
        Ok(false)
      }
      None => Ok(false),
    }
  }
}
