use crate::error::LexErrorType;
use crate::error::TokenizeError;
use crate::lex::Tokenizer;
use crate::mode::LexMode;
use crate::mode::ModeStack;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token::TokenKind::*;

fn check<const N: usize>(source: &str, expected: [(TokenKind, &str, &str); N]) {
  let mut tokenizer = Tokenizer::new(source.as_bytes());
  for (kind, raw, value) in expected {
    let token = tokenizer
      .read()
      .unwrap()
      .unwrap_or_else(|| panic!("expected {:?} {:?} in {:?}, got end of input", kind, raw, source));
    assert_eq!(
      (token.kind, token.raw.as_str(), token.value.as_str()),
      (kind, raw, value),
      "in {:?}",
      source
    );
  }
  assert!(
    tokenizer.read().unwrap().is_none(),
    "expected end of input in {:?}",
    source
  );
}

fn check_err(source: &str, typ: LexErrorType, offset: usize) {
  let mut tokenizer = Tokenizer::new(source.as_bytes());
  loop {
    match tokenizer.read() {
      Ok(Some(_)) => continue,
      Ok(None) => panic!("lexed {:?} without an error", source),
      Err(TokenizeError::Lex(err)) => {
        assert_eq!(err.typ, typ, "in {:?}", source);
        assert_eq!(err.offset, offset, "in {:?}", source);
        return;
      }
      Err(other) => panic!("unexpected error {:?} in {:?}", other, source),
    }
  }
}

fn read1<R: std::io::Read>(tokenizer: &mut Tokenizer<R>) -> Token {
  tokenizer.read().unwrap().expect("unexpected end of input")
}

#[test]
fn punctuators_longest_match() {
  let table: &[(&str, TokenKind)] = &[
    ("!", UnaryBang),
    ("!=", BinaryNotEquals),
    ("!==", BinaryStrictNotEquals),
    ("%", BinaryModulo),
    ("%=", BinaryModuloAssignment),
    ("&", BinaryBitwiseAnd),
    ("&&", BinaryLogicalAnd),
    ("&=", BinaryBitwiseAndAssignment),
    ("(", PuncLeftParen),
    (")", PuncRightParen),
    ("*", BinaryStar),
    ("**", BinaryExponent),
    ("**=", BinaryExponentAssignment),
    ("*=", BinaryStarAssignment),
    ("+", BinaryPlus),
    ("++", UnaryIncrement),
    ("+=", BinaryPlusAssignment),
    (",", PuncComma),
    ("-", BinaryMinus),
    ("--", UnaryDecrement),
    ("-=", BinaryMinusAssignment),
    (".", PuncPeriod),
    ("...", PuncSpread),
    ("/", BinaryDivide),
    ("/=", BinaryDivideEquals),
    (":", PuncColon),
    (";", PuncSemicolon),
    ("<", BinaryLess),
    ("<=", BinaryLessOrEqual),
    ("<<", BinaryShiftLeft),
    ("<<=", BinaryShiftLeftAssignment),
    ("=", BinaryAssignment),
    ("==", BinaryEquals),
    ("===", BinaryStrictEquals),
    ("=>", PuncFatArrow),
    (">", BinaryGreater),
    (">=", BinaryGreaterOrEqual),
    (">>", BinaryShiftRight),
    (">>=", BinaryShiftRightAssignment),
    (">>>", BinaryShiftRightUnsigned),
    (">>>=", BinaryShiftRightUnsignedAssignment),
    ("?", PuncQuestion),
    ("@", PuncAt),
    ("[", PuncLeftBracket),
    ("]", PuncRightBracket),
    ("^", BinaryBitwiseXor),
    ("^=", BinaryBitwiseXorAssignment),
    ("{", PuncLeftBrace),
    ("}", PuncRightBrace),
    ("|", BinaryBitwiseOr),
    ("||", BinaryLogicalOr),
    ("|=", BinaryBitwiseOrAssignment),
    ("~", UnaryTilde),
  ];
  for (source, kind) in table {
    check(source, [(*kind, *source, "")]);
  }
}

#[test]
fn unused_lookahead_is_unread() {
  check("..", [(PuncPeriod, ".", ""), (PuncPeriod, ".", "")]);
  check("==>", [(BinaryEquals, "==", ""), (BinaryGreater, ">", "")]);
  check(">>>>", [
    (BinaryShiftRightUnsigned, ">>>", ""),
    (BinaryGreater, ">", ""),
  ]);
  check(">>>=>", [
    (BinaryShiftRightUnsignedAssignment, ">>>=", ""),
    (BinaryGreater, ">", ""),
  ]);
  check("!===", [
    (BinaryStrictNotEquals, "!==", ""),
    (BinaryAssignment, "=", ""),
  ]);
  check("**=1", [
    (BinaryExponentAssignment, "**=", ""),
    (Number, "1", "1"),
  ]);
}

#[test]
fn whitespace_runs_are_single_tokens() {
  check(" \t\r\n x", [
    (Whitespace, " \t\r\n ", ""),
    (Identifier, "x", "x"),
  ]);
  // NO-BREAK SPACE and LINE SEPARATOR carry the White_Space property.
  check("a\u{00a0}\u{2028}b", [
    (Identifier, "a", "a"),
    (Whitespace, "\u{00a0}\u{2028}", ""),
    (Identifier, "b", "b"),
  ]);
}

#[test]
fn identifiers() {
  check("x", [(Identifier, "x", "x")]);
  check("$_a1", [(Identifier, "$_a1", "$_a1")]);
  check("café", [(Identifier, "café", "café")]);
  check("переменная", [(Identifier, "переменная", "переменная")]);
  // Combining mark inside an identifier.
  check("a\u{0301}b", [(Identifier, "a\u{0301}b", "a\u{0301}b")]);
  // Reserved words are plain identifiers at this layer; promotion is the
  // facade's post-pass.
  check("var", [(Identifier, "var", "var")]);
}

#[test]
fn numbers() {
  check("123", [(Number, "123", "123")]);
  check("1.5", [(Number, "1.5", "1.5")]);
  check("1.", [(Number, "1.", "1.")]);
  // A second period starts a new token.
  check("1.2.3", [
    (Number, "1.2", "1.2"),
    (PuncPeriod, ".", ""),
    (Number, "3", "3"),
  ]);
  // A leading period is a punctuator, not part of the number.
  check(".5", [(PuncPeriod, ".", ""), (Number, "5", "5")]);
  // Arabic-Indic digits carry the Number property.
  check("١٢٣", [(Number, "١٢٣", "١٢٣")]);
}

#[test]
fn strings_decode_escapes() {
  check("'hello'", [(String, "'hello'", "hello")]);
  check("\"hello\"", [(String, "\"hello\"", "hello")]);
  check("'a\\nb'", [(String, "'a\\nb'", "a\nb")]);
  check("'a\\r\\tb'", [(String, "'a\\r\\tb'", "a\r\tb")]);
  check("'a\\\\b'", [(String, "'a\\\\b'", "a\\b")]);
  check("'don\\'t'", [(String, "'don\\'t'", "don't")]);
  check("\"say \\\"hi\\\"\"", [(String, "\"say \\\"hi\\\"\"", "say \"hi\"")]);
  // The other quote needs no escape.
  check("\"don't\"", [(String, "\"don't\"", "don't")]);
  // A backslash followed by a line feed contributes nothing to the value.
  check("'a\\\nb'", [(String, "'a\\\nb'", "ab")]);
  // Escapes outside the table are dropped from the value, kept in the raw.
  check("'a\\qb'", [(String, "'a\\qb'", "ab")]);
}

#[test]
fn string_errors() {
  check_err("'abc", LexErrorType::InvalidStringLiteral, 0);
  check_err("'ab\ncd'", LexErrorType::InvalidStringLiteral, 0);
  check_err("x = 'a", LexErrorType::InvalidStringLiteral, 4);
  // The escape consumes the quote, so the literal never closes.
  check_err("'a\\'", LexErrorType::InvalidStringLiteral, 0);
}

#[test]
fn slash_is_division_under_div_goal() {
  check("a/b/g", [
    (Identifier, "a", "a"),
    (BinaryDivide, "/", ""),
    (Identifier, "b", "b"),
    (BinaryDivide, "/", ""),
    (Identifier, "g", "g"),
  ]);
  check("a/=2", [
    (Identifier, "a", "a"),
    (BinaryDivideEquals, "/=", ""),
    (Number, "2", "2"),
  ]);
}

#[test]
fn slash_is_regexp_under_regexp_goal() {
  let mut tokenizer = Tokenizer::new("/abc/gi".as_bytes());
  let mut stack = ModeStack::new();
  stack.push_mode(&mut tokenizer, LexMode::RegExp);
  let token = read1(&mut tokenizer);
  assert_eq!(token.kind, Regexp);
  assert_eq!(token.raw, "/abc/gi");
  assert_eq!(token.value, "/abc/gi");
  assert_eq!(token.offset, 0);
  assert!(tokenizer.read().unwrap().is_none());
}

#[test]
fn regexp_body_and_flags() {
  for mode in [LexMode::RegExp, LexMode::RegExpOrTemplateTail] {
    let mut tokenizer = Tokenizer::new("/a\\/b/g;".as_bytes());
    let mut stack = ModeStack::new();
    stack.push_mode(&mut tokenizer, mode);
    let token = read1(&mut tokenizer);
    assert_eq!(token.kind, Regexp);
    assert_eq!(token.raw, "/a\\/b/g");
  }

  // Flags stop at the first non-lowercase code point.
  let mut tokenizer = Tokenizer::new("/a/gX".as_bytes());
  let mut stack = ModeStack::new();
  stack.push_mode(&mut tokenizer, LexMode::RegExp);
  let token = read1(&mut tokenizer);
  assert_eq!(token.raw, "/a/g");
  let next = read1(&mut tokenizer);
  assert_eq!((next.kind, next.raw.as_str()), (Identifier, "X"));

  // Character classes are not special-cased: the bare `/` inside `[/]`
  // terminates the body.
  let mut tokenizer = Tokenizer::new("/[/]/".as_bytes());
  let mut stack = ModeStack::new();
  stack.push_mode(&mut tokenizer, LexMode::RegExp);
  let token = read1(&mut tokenizer);
  assert_eq!((token.kind, token.raw.as_str()), (Regexp, "/[/"));
}

#[test]
fn regexp_errors_carry_mode() {
  let mut tokenizer = Tokenizer::new("/ab".as_bytes());
  let mut stack = ModeStack::new();
  stack.push_mode(&mut tokenizer, LexMode::RegExp);
  match tokenizer.read() {
    Err(TokenizeError::Lex(err)) => {
      assert_eq!(err.typ, LexErrorType::InvalidRegExpLiteral);
      assert_eq!(err.offset, 0);
      assert_eq!(err.mode, LexMode::RegExp);
    }
    other => panic!("expected regexp error, got {:?}", other),
  }
}

#[test]
fn comments() {
  check("// hi", [(SingleLineComment, "// hi", "// hi")]);
  check("// hi\nx", [
    (SingleLineComment, "// hi", "// hi"),
    (Whitespace, "\n", ""),
    (Identifier, "x", "x"),
  ]);
  check("/* a */", [(MultipleLineComment, "/* a */", "/* a */")]);
  check("/* a\nb */;", [
    (MultipleLineComment, "/* a\nb */", "/* a\nb */"),
    (PuncSemicolon, ";", ""),
  ]);
  check("/**a**/", [(MultipleLineComment, "/**a**/", "/**a**/")]);
  // An unterminated block comment runs to end of input.
  check("/* a", [(MultipleLineComment, "/* a", "/* a")]);
  // Comments win over regexp recognition.
  let mut tokenizer = Tokenizer::new("//x".as_bytes());
  let mut stack = ModeStack::new();
  stack.push_mode(&mut tokenizer, LexMode::RegExp);
  assert_eq!(read1(&mut tokenizer).kind, SingleLineComment);
}

#[test]
fn template_without_substitution() {
  check("`abc`", [(TemplateNoSubstitution, "`abc`", "abc")]);
  check("``", [(TemplateNoSubstitution, "``", "")]);
  check("`a$b`", [(TemplateNoSubstitution, "`a$b`", "a$b")]);
  // A backslash shields the closing backtick and the substitution opener.
  check("`a\\`b`", [(TemplateNoSubstitution, "`a\\`b`", "a\\`b")]);
  check("`a\\${b`", [(TemplateNoSubstitution, "`a\\${b`", "a\\${b")]);
}

#[test]
fn template_with_substitutions() {
  let mut tokenizer = Tokenizer::new("`a${b}c${d}e`".as_bytes());
  let mut stack = ModeStack::new();

  let head = read1(&mut tokenizer);
  assert_eq!(
    (head.kind, head.raw.as_str(), head.value.as_str(), head.offset),
    (TemplateHead, "`a${", "a", 0)
  );
  stack.push_mode(&mut tokenizer, LexMode::RegExpOrTemplateTail);

  assert_eq!(read1(&mut tokenizer).raw, "b");

  let middle = read1(&mut tokenizer);
  assert_eq!(
    (middle.kind, middle.raw.as_str(), middle.value.as_str()),
    (TemplateMiddle, "}c${", "c")
  );

  assert_eq!(read1(&mut tokenizer).raw, "d");

  let tail = read1(&mut tokenizer);
  assert_eq!(
    (tail.kind, tail.raw.as_str(), tail.value.as_str()),
    (TemplateTail, "}e`", "e")
  );
  stack.pop_mode(&mut tokenizer);

  assert!(tokenizer.read().unwrap().is_none());
  assert!(stack.is_empty());
}

#[test]
fn regexp_inside_template_substitution() {
  let mut tokenizer = Tokenizer::new("`${/a/}`".as_bytes());
  let mut stack = ModeStack::new();

  let head = read1(&mut tokenizer);
  assert_eq!((head.kind, head.raw.as_str(), head.value.as_str()), (TemplateHead, "`${", ""));
  stack.push_mode(&mut tokenizer, LexMode::RegExpOrTemplateTail);

  let regexp = read1(&mut tokenizer);
  assert_eq!((regexp.kind, regexp.raw.as_str()), (Regexp, "/a/"));

  let tail = read1(&mut tokenizer);
  assert_eq!((tail.kind, tail.raw.as_str()), (TemplateTail, "}`"));
  stack.pop_mode(&mut tokenizer);

  assert!(tokenizer.read().unwrap().is_none());
}

#[test]
fn right_brace_is_plain_under_div_and_regexp_goals() {
  check("}", [(PuncRightBrace, "}", "")]);

  let mut tokenizer = Tokenizer::new("}".as_bytes());
  let mut stack = ModeStack::new();
  stack.push_mode(&mut tokenizer, LexMode::RegExp);
  assert_eq!(read1(&mut tokenizer).kind, PuncRightBrace);
}

#[test]
fn right_brace_resumes_template_under_tail_goal() {
  let mut tokenizer = Tokenizer::new("}a`".as_bytes());
  let mut stack = ModeStack::new();
  stack.push_mode(&mut tokenizer, LexMode::TemplateTail);
  let token = read1(&mut tokenizer);
  assert_eq!(
    (token.kind, token.raw.as_str(), token.value.as_str()),
    (TemplateTail, "}a`", "a")
  );
}

#[test]
fn template_errors() {
  check_err("`abc", LexErrorType::UnterminatedTemplate, 0);
  check_err("`abc${", LexErrorType::UnterminatedTemplate, 0);
  check_err("`a\\", LexErrorType::UnterminatedTemplate, 0);
}

#[test]
fn shebang_line() {
  check("#!/bin/sh", [(MetaShebangLine, "#!/bin/sh", "#!/bin/sh")]);
  check("#!x\ny", [
    (MetaShebangLine, "#!x", "#!x"),
    (Whitespace, "\n", ""),
    (Identifier, "y", "y"),
  ]);
  // `#` not followed by `!` is no shebang.
  check_err("#x", LexErrorType::UnexpectedCharacter('#'), 0);
  // Only recognised at offset zero.
  check_err("x\n#!y", LexErrorType::UnexpectedCharacter('#'), 2);
}

#[test]
fn unexpected_characters() {
  check_err("\\", LexErrorType::UnexpectedCharacter('\\'), 0);
  check_err("a #", LexErrorType::UnexpectedCharacter('#'), 2);
}

#[test]
fn offsets_are_utf8_byte_positions() {
  let mut tokenizer = Tokenizer::new("é = 1".as_bytes());
  let offsets: Vec<usize> = std::iter::from_fn(|| tokenizer.read().unwrap())
    .map(|t| t.offset)
    .collect();
  assert_eq!(offsets, vec![0, 2, 3, 4, 5]);
}

#[test]
fn read_all_collects_until_end_of_input() {
  let mut tokenizer = Tokenizer::new("a + b".as_bytes());
  let tokens = tokenizer.read_all().unwrap();
  let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
  assert_eq!(kinds, vec![
    Identifier, Whitespace, BinaryPlus, Whitespace, Identifier
  ]);
  assert!(tokenizer.read().unwrap().is_none());
}

#[test]
fn empty_input_is_end_of_input() {
  let mut tokenizer = Tokenizer::new(&b""[..]);
  assert!(tokenizer.read().unwrap().is_none());
  assert!(Tokenizer::new(&b""[..]).read_all().unwrap().is_empty());
}

#[test]
fn backtick_opens_a_template_under_any_goal() {
  for mode in [
    LexMode::Div,
    LexMode::RegExp,
    LexMode::RegExpOrTemplateTail,
    LexMode::TemplateTail,
  ] {
    let mut tokenizer = Tokenizer::new("`x`".as_bytes());
    let mut stack = ModeStack::new();
    stack.push_mode(&mut tokenizer, mode);
    assert_eq!(read1(&mut tokenizer).kind, TemplateNoSubstitution);
  }
}
