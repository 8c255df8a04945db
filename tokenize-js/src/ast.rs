//! ESTree-flavoured syntax tree shape for downstream consumers.
//!
//! This is a declaration only: the tokeniser never constructs these values.
//! It pins down the JSON form a parser built on top of the token stream is
//! expected to emit, with the conventional `{"type": ...}` tagging and
//! camel-cased field names.

use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Position {
  pub line: u32,
  pub column: u32,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct SourceLocation {
  pub source: Option<String>,
  pub start: Position,
  pub end: Position,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum UnaryOperator {
  #[serde(rename = "-")]
  Minus,
  #[serde(rename = "+")]
  Plus,
  #[serde(rename = "!")]
  Bang,
  #[serde(rename = "~")]
  Tilde,
  #[serde(rename = "typeof")]
  Typeof,
  #[serde(rename = "void")]
  Void,
  #[serde(rename = "delete")]
  Delete,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum UpdateOperator {
  #[serde(rename = "++")]
  Increment,
  #[serde(rename = "--")]
  Decrement,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum BinaryOperator {
  #[serde(rename = "==")]
  Equal,
  #[serde(rename = "!=")]
  NotEqual,
  #[serde(rename = "===")]
  StrictEqual,
  #[serde(rename = "!==")]
  StrictNotEqual,
  #[serde(rename = "<")]
  Less,
  #[serde(rename = "<=")]
  LessOrEqual,
  #[serde(rename = ">")]
  Greater,
  #[serde(rename = ">=")]
  GreaterOrEqual,
  #[serde(rename = "<<")]
  ShiftLeft,
  #[serde(rename = ">>")]
  ShiftRight,
  #[serde(rename = ">>>")]
  ShiftRightUnsigned,
  #[serde(rename = "+")]
  Plus,
  #[serde(rename = "-")]
  Minus,
  #[serde(rename = "*")]
  Multiply,
  #[serde(rename = "/")]
  Divide,
  #[serde(rename = "%")]
  Modulo,
  #[serde(rename = "|")]
  BitwiseOr,
  #[serde(rename = "^")]
  BitwiseXor,
  #[serde(rename = "&")]
  BitwiseAnd,
  #[serde(rename = "in")]
  In,
  #[serde(rename = "instanceof")]
  Instanceof,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum AssignmentOperator {
  #[serde(rename = "=")]
  Assign,
  #[serde(rename = "+=")]
  Add,
  #[serde(rename = "-=")]
  Subtract,
  #[serde(rename = "*=")]
  Multiply,
  #[serde(rename = "/=")]
  Divide,
  #[serde(rename = "%=")]
  Modulo,
  #[serde(rename = "<<=")]
  ShiftLeft,
  #[serde(rename = ">>=")]
  ShiftRight,
  #[serde(rename = ">>>=")]
  ShiftRightUnsigned,
  #[serde(rename = "|=")]
  BitwiseOr,
  #[serde(rename = "^=")]
  BitwiseXor,
  #[serde(rename = "&=")]
  BitwiseAnd,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum LogicalOperator {
  #[serde(rename = "||")]
  Or,
  #[serde(rename = "&&")]
  And,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
  Script,
  Module,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableDeclarationKind {
  Var,
  Let,
  Const,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
  Constructor,
  Method,
  Get,
  Set,
}

/// A syntax tree node: its optional source span plus the tagged node data.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Node {
  pub loc: Option<SourceLocation>,
  #[serde(flatten)]
  pub stx: Box<Syntax>,
}

impl Node {
  pub fn new(stx: Syntax) -> Node {
    Node {
      loc: None,
      stx: Box::new(stx),
    }
  }

  pub fn with_loc(loc: SourceLocation, stx: Syntax) -> Node {
    Node {
      loc: Some(loc),
      stx: Box::new(stx),
    }
  }
}

/// The node data, tagged with its ESTree `type` name.
///
/// Union positions (e.g. a for-loop initialiser that is a declaration or an
/// expression) are plain `Node`s; array holes are `None` elements.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Syntax {
  Program {
    source_type: SourceType,
    body: Vec<Node>,
    directives: Vec<Node>,
  },
  Identifier {
    name: String,
  },
  RegExpLiteral {
    pattern: String,
    flags: String,
  },
  NullLiteral,
  StringLiteral {
    value: String,
  },
  BooleanLiteral {
    value: bool,
  },
  NumericLiteral {
    value: f64,
  },
  ExpressionStatement {
    expression: Node,
  },
  BlockStatement {
    body: Vec<Node>,
    directives: Vec<Node>,
  },
  EmptyStatement,
  DebuggerStatement,
  WithStatement {
    object: Node,
    body: Node,
  },
  ReturnStatement {
    argument: Option<Node>,
  },
  LabeledStatement {
    label: Node,
    body: Node,
  },
  BreakStatement {
    label: Option<Node>,
  },
  ContinueStatement {
    label: Option<Node>,
  },
  IfStatement {
    test: Node,
    consequent: Node,
    alternate: Option<Node>,
  },
  SwitchStatement {
    discriminant: Node,
    cases: Vec<Node>,
  },
  SwitchCase {
    test: Option<Node>,
    consequent: Vec<Node>,
  },
  ThrowStatement {
    argument: Node,
  },
  TryStatement {
    block: Node,
    handler: Option<Node>,
    finalizer: Option<Node>,
  },
  CatchClause {
    param: Node,
    body: Node,
  },
  WhileStatement {
    test: Node,
    body: Node,
  },
  DoWhileStatement {
    body: Node,
    test: Node,
  },
  ForStatement {
    init: Option<Node>,
    test: Option<Node>,
    update: Option<Node>,
    body: Node,
  },
  ForInStatement {
    left: Node,
    right: Node,
    body: Node,
  },
  ForOfStatement {
    left: Node,
    right: Node,
    body: Node,
  },
  FunctionDeclaration {
    id: Node,
    params: Vec<Node>,
    body: Node,
    generator: bool,
    #[serde(rename = "async")]
    is_async: bool,
  },
  VariableDeclaration {
    declarations: Vec<Node>,
    kind: VariableDeclarationKind,
  },
  VariableDeclarator {
    id: Node,
    init: Option<Node>,
  },
  Decorator {
    expression: Node,
  },
  Directive {
    value: Node,
  },
  DirectiveLiteral {
    value: String,
  },
  Super,
  ThisExpression,
  ArrowFunctionExpression {
    id: Option<Node>,
    params: Vec<Node>,
    body: Node,
    generator: bool,
    #[serde(rename = "async")]
    is_async: bool,
    expression: bool,
  },
  YieldExpression {
    argument: Option<Node>,
    delegate: bool,
  },
  AwaitExpression {
    argument: Option<Node>,
  },
  ArrayExpression {
    elements: Vec<Option<Node>>,
  },
  ObjectExpression {
    properties: Vec<Node>,
  },
  ObjectProperty {
    key: Node,
    computed: bool,
    value: Node,
    decorators: Vec<Node>,
    shorthand: bool,
  },
  ObjectMethod {
    key: Node,
    computed: bool,
    kind: MethodKind,
    params: Vec<Node>,
    body: Node,
    generator: bool,
    #[serde(rename = "async")]
    is_async: bool,
    decorators: Vec<Node>,
  },
  RestProperty {
    argument: Node,
  },
  SpreadProperty {
    argument: Node,
  },
  FunctionExpression {
    id: Option<Node>,
    params: Vec<Node>,
    body: Node,
    generator: bool,
    #[serde(rename = "async")]
    is_async: bool,
  },
  UnaryExpression {
    operator: UnaryOperator,
    prefix: bool,
    argument: Node,
  },
  UpdateExpression {
    operator: UpdateOperator,
    argument: Node,
    prefix: bool,
  },
  BinaryExpression {
    operator: BinaryOperator,
    left: Node,
    right: Node,
  },
  AssignmentExpression {
    operator: AssignmentOperator,
    left: Node,
    right: Node,
  },
  LogicalExpression {
    operator: LogicalOperator,
    left: Node,
    right: Node,
  },
  SpreadElement {
    argument: Node,
  },
  MemberExpression {
    object: Node,
    property: Node,
    computed: bool,
  },
  BindExpression {
    object: Option<Node>,
    callee: Node,
  },
  ConditionalExpression {
    test: Node,
    alternate: Node,
    consequent: Node,
  },
  CallExpression {
    callee: Node,
    arguments: Vec<Node>,
  },
  NewExpression {
    callee: Node,
    arguments: Vec<Node>,
  },
  SequenceExpression {
    expressions: Vec<Node>,
  },
  TemplateLiteral {
    quasis: Vec<Node>,
    expressions: Vec<Node>,
  },
  TaggedTemplateExpression {
    tag: Node,
    quasi: Node,
  },
  TemplateElement {
    tail: bool,
    cooked: String,
    raw: String,
  },
  ObjectPattern {
    properties: Vec<Node>,
  },
  ArrayPattern {
    elements: Vec<Option<Node>>,
  },
  RestElement {
    argument: Node,
  },
  AssignmentPattern {
    left: Node,
    right: Node,
  },
  ClassBody {
    body: Vec<Node>,
  },
  ClassMethod {
    key: Node,
    value: Node,
    kind: MethodKind,
    computed: bool,
    #[serde(rename = "static")]
    is_static: bool,
    decorators: Vec<Node>,
  },
  ClassProperty {
    key: Node,
    value: Node,
  },
  ClassDeclaration {
    id: Node,
    super_class: Option<Node>,
    body: Node,
    decorators: Vec<Node>,
  },
  ClassExpression {
    id: Option<Node>,
    super_class: Option<Node>,
    body: Node,
    decorators: Vec<Node>,
  },
  MetaProperty {
    meta: Node,
    property: Node,
  },
  ImportDeclaration {
    specifiers: Vec<Node>,
    source: Node,
  },
  ImportSpecifier {
    local: Node,
    imported: Node,
  },
  ImportDefaultSpecifier {
    local: Node,
  },
  ImportNamespaceSpecifier {
    local: Node,
  },
  ExportNamedDeclaration {
    declaration: Option<Node>,
    specifiers: Vec<Node>,
    source: Option<Node>,
  },
  ExportSpecifier {
    local: Node,
    exported: Node,
  },
  ExportDefaultDeclaration {
    declaration: Node,
  },
  ExportAllDeclaration {
    source: Node,
  },
}
