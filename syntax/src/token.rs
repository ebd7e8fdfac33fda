use crate::internal::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  // values
  Ident,
  IntLit,
  FloatLit,
  StrLit,
  True,
  False,
  // scalar type keywords
  I8,
  I16,
  I32,
  I64,
  U8,
  U16,
  U32,
  U64,
  Isize,
  Usize,
  F32,
  F64,
  C8,
  C32,
  Bool,
  Void,
  // operators
  Plus,
  Minus,
  Star,
  Slash,
  Percent,
  Caret,
  Pipe,
  Amp,
  Lt,
  Gt,
  Dot,
  EqEq,
  NotEq,
  PlusEq,
  MinusEq,
  StarEq,
  SlashEq,
  GtEq,
  LtEq,
  OrOr,
  AndAnd,
  DotDot,
  DotDotEq,
  DotDotLt,
  // keywords
  Return,
  If,
  Elif,
  Else,
  For,
  While,
  Do,
  In,
  Continue,
  Break,
  Import,
  Match,
  Struct,
  Enum,
  Comptime,
  // modifiers
  Public,
  Private,
  Protected,
  Const,
  External,
  Dynamic,
  Static,
  // structure
  Newline,
  Indent,
  Dedent,
  // punctuation
  LParen,
  RParen,
  LBracket,
  RBracket,
  Comma,
  Colon,
  Assign,
  Unknown,
  Eof,
}

use TokenKind as T;

impl TokenKind {
  /// Number of kinds; `Eof` is always the last variant.
  pub const COUNT: usize = T::Eof as usize + 1;

  pub const ALL: [TokenKind; TokenKind::COUNT] = [
    T::Ident,
    T::IntLit,
    T::FloatLit,
    T::StrLit,
    T::True,
    T::False,
    T::I8,
    T::I16,
    T::I32,
    T::I64,
    T::U8,
    T::U16,
    T::U32,
    T::U64,
    T::Isize,
    T::Usize,
    T::F32,
    T::F64,
    T::C8,
    T::C32,
    T::Bool,
    T::Void,
    T::Plus,
    T::Minus,
    T::Star,
    T::Slash,
    T::Percent,
    T::Caret,
    T::Pipe,
    T::Amp,
    T::Lt,
    T::Gt,
    T::Dot,
    T::EqEq,
    T::NotEq,
    T::PlusEq,
    T::MinusEq,
    T::StarEq,
    T::SlashEq,
    T::GtEq,
    T::LtEq,
    T::OrOr,
    T::AndAnd,
    T::DotDot,
    T::DotDotEq,
    T::DotDotLt,
    T::Return,
    T::If,
    T::Elif,
    T::Else,
    T::For,
    T::While,
    T::Do,
    T::In,
    T::Continue,
    T::Break,
    T::Import,
    T::Match,
    T::Struct,
    T::Enum,
    T::Comptime,
    T::Public,
    T::Private,
    T::Protected,
    T::Const,
    T::External,
    T::Dynamic,
    T::Static,
    T::Newline,
    T::Indent,
    T::Dedent,
    T::LParen,
    T::RParen,
    T::LBracket,
    T::RBracket,
    T::Comma,
    T::Colon,
    T::Assign,
    T::Unknown,
    T::Eof,
  ];

  pub fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
      "true" => T::True,
      "false" => T::False,
      "i8" => T::I8,
      "i16" => T::I16,
      "i32" => T::I32,
      "i64" => T::I64,
      "u8" => T::U8,
      "u16" => T::U16,
      "u32" => T::U32,
      "u64" => T::U64,
      "isize" => T::Isize,
      "usize" => T::Usize,
      "f32" => T::F32,
      "f64" => T::F64,
      "c8" => T::C8,
      "c32" => T::C32,
      "bool" => T::Bool,
      "void" => T::Void,
      "return" => T::Return,
      "if" => T::If,
      "elif" => T::Elif,
      "else" => T::Else,
      "for" => T::For,
      "while" => T::While,
      "do" => T::Do,
      "in" => T::In,
      "continue" => T::Continue,
      "break" => T::Break,
      "import" => T::Import,
      "match" => T::Match,
      "struct" => T::Struct,
      "enum" => T::Enum,
      "comptime" => T::Comptime,
      "public" => T::Public,
      "private" => T::Private,
      "protected" => T::Protected,
      "const" => T::Const,
      "external" => T::External,
      "dynamic" => T::Dynamic,
      "static" => T::Static,
      _ => return None,
    };
    Some(kind)
  }

  /// Source spelling, or a description for kinds without a fixed one.
  pub const fn describe(self) -> &'static str {
    match self {
      T::Ident => "identifier",
      T::IntLit => "integer literal",
      T::FloatLit => "float literal",
      T::StrLit => "string literal",
      T::True => "true",
      T::False => "false",
      T::I8 => "i8",
      T::I16 => "i16",
      T::I32 => "i32",
      T::I64 => "i64",
      T::U8 => "u8",
      T::U16 => "u16",
      T::U32 => "u32",
      T::U64 => "u64",
      T::Isize => "isize",
      T::Usize => "usize",
      T::F32 => "f32",
      T::F64 => "f64",
      T::C8 => "c8",
      T::C32 => "c32",
      T::Bool => "bool",
      T::Void => "void",
      T::Plus => "+",
      T::Minus => "-",
      T::Star => "*",
      T::Slash => "/",
      T::Percent => "%",
      T::Caret => "^",
      T::Pipe => "|",
      T::Amp => "&",
      T::Lt => "<",
      T::Gt => ">",
      T::Dot => ".",
      T::EqEq => "==",
      T::NotEq => "!=",
      T::PlusEq => "+=",
      T::MinusEq => "-=",
      T::StarEq => "*=",
      T::SlashEq => "/=",
      T::GtEq => ">=",
      T::LtEq => "<=",
      T::OrOr => "||",
      T::AndAnd => "&&",
      T::DotDot => "..",
      T::DotDotEq => "..=",
      T::DotDotLt => "..<",
      T::Return => "return",
      T::If => "if",
      T::Elif => "elif",
      T::Else => "else",
      T::For => "for",
      T::While => "while",
      T::Do => "do",
      T::In => "in",
      T::Continue => "continue",
      T::Break => "break",
      T::Import => "import",
      T::Match => "match",
      T::Struct => "struct",
      T::Enum => "enum",
      T::Comptime => "comptime",
      T::Public => "public",
      T::Private => "private",
      T::Protected => "protected",
      T::Const => "const",
      T::External => "external",
      T::Dynamic => "dynamic",
      T::Static => "static",
      T::Newline => "newline",
      T::Indent => "block start",
      T::Dedent => "block end",
      T::LParen => "(",
      T::RParen => ")",
      T::LBracket => "[",
      T::RBracket => "]",
      T::Comma => ",",
      T::Colon => ":",
      T::Assign => "=",
      T::Unknown => "unrecognized input",
      T::Eof => "end of input",
    }
  }

  /// Kinds with a fixed spelling are quoted in diagnostics.
  pub const fn is_punctuation_like(self) -> bool {
    !matches!(
      self,
      T::Ident
        | T::IntLit
        | T::FloatLit
        | T::StrLit
        | T::Newline
        | T::Indent
        | T::Dedent
        | T::Unknown
        | T::Eof
    )
  }

  pub const fn is_block_marker(self) -> bool {
    matches!(self, T::Indent | T::Dedent)
  }
}

impl std::fmt::Display for TokenKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if self.is_punctuation_like() {
      write!(f, "`{}`", self.describe())
    } else {
      f.write_str(self.describe())
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
  None,
  Str(idx::StrPool),
  Int(u64),
  /// `f64::to_bits`, so tokens stay `Eq`
  Float(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub loc: SrcLoc,
  pub payload: Payload,
}

impl Token {
  pub const fn new(kind: TokenKind, loc: SrcLoc) -> Self {
    Token { kind, loc, payload: Payload::None }
  }

  pub const fn with_payload(kind: TokenKind, loc: SrcLoc, payload: Payload) -> Self {
    Token { kind, loc, payload }
  }

  pub const fn str_idx(&self) -> Option<idx::StrPool> {
    match self.payload {
      Payload::Str(index) => Some(index),
      _ => None,
    }
  }

  pub fn lexeme<'a>(&self, strings: &'a StringPool) -> &'a str {
    match self.str_idx() {
      Some(index) => strings.get(index),
      None => self.kind.describe(),
    }
  }
}
