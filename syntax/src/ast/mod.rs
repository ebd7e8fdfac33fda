mod modifiers;
mod shape;

pub use modifiers::{Modifier, ModifierSet};

use crate::internal::{TokenKind as T, *};

/// Root of a parse: the top-level statement list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
  pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
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
}

impl Scalar {
  pub const fn from_token(kind: TokenKind) -> Option<Scalar> {
    let scalar = match kind {
      T::I8 => Scalar::I8,
      T::I16 => Scalar::I16,
      T::I32 => Scalar::I32,
      T::I64 => Scalar::I64,
      T::U8 => Scalar::U8,
      T::U16 => Scalar::U16,
      T::U32 => Scalar::U32,
      T::U64 => Scalar::U64,
      T::Isize => Scalar::Isize,
      T::Usize => Scalar::Usize,
      T::F32 => Scalar::F32,
      T::F64 => Scalar::F64,
      T::C8 => Scalar::C8,
      T::C32 => Scalar::C32,
      T::Bool => Scalar::Bool,
      T::Void => Scalar::Void,
      _ => return None,
    };
    Some(scalar)
  }

  pub const fn token(self) -> TokenKind {
    match self {
      Scalar::I8 => T::I8,
      Scalar::I16 => T::I16,
      Scalar::I32 => T::I32,
      Scalar::I64 => T::I64,
      Scalar::U8 => T::U8,
      Scalar::U16 => T::U16,
      Scalar::U32 => T::U32,
      Scalar::U64 => T::U64,
      Scalar::Isize => T::Isize,
      Scalar::Usize => T::Usize,
      Scalar::F32 => T::F32,
      Scalar::F64 => T::F64,
      Scalar::C8 => T::C8,
      Scalar::C32 => T::C32,
      Scalar::Bool => T::Bool,
      Scalar::Void => T::Void,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
  Scalar(Scalar),
  Pointer(Box<Type>),
  Array(Box<Type>, Option<Box<Expr>>),
}

/// A type, or a left-nested chain of tuple (`,`) and sum (`|`) members.
/// Always holds at least one `Type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
  Type(Type),
  Tuple(Box<TypeExpr>, Type),
  Sum(Box<TypeExpr>, Type),
}

impl TypeExpr {
  /// Member types in source order.
  pub fn members(&self) -> Vec<&Type> {
    match self {
      TypeExpr::Type(ty) => vec![ty],
      TypeExpr::Tuple(head, ty) | TypeExpr::Sum(head, ty) => {
        let mut members = head.members();
        members.push(ty);
        members
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  pub modifiers: ModifierSet,
  pub ty: TypeExpr,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
  pub decl: Declaration,
  pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDecl {
  pub decl: Declaration,
  /// Leading parenthesized group of the explicit-receiver form.
  pub receiver: Option<Vec<Declaration>>,
  pub params: Vec<Declaration>,
  pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
  pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
  VarDecl(VarDecl),
  Assign(Assign),
  FnDecl(FnDecl),
  Call(Call),
  Return(Option<Expr>),
  While(While),
  For(ForLoop),
  If(IfStmt),
  Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
  Assign,
  Add,
  Sub,
  Mul,
  Div,
}

impl AssignOp {
  pub const fn from_token(kind: TokenKind) -> Option<AssignOp> {
    match kind {
      T::Assign => Some(AssignOp::Assign),
      T::PlusEq => Some(AssignOp::Add),
      T::MinusEq => Some(AssignOp::Sub),
      T::StarEq => Some(AssignOp::Mul),
      T::SlashEq => Some(AssignOp::Div),
      _ => None,
    }
  }

  pub const fn token(self) -> TokenKind {
    match self {
      AssignOp::Assign => T::Assign,
      AssignOp::Add => T::PlusEq,
      AssignOp::Sub => T::MinusEq,
      AssignOp::Mul => T::StarEq,
      AssignOp::Div => T::SlashEq,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign {
  pub target: VarRef,
  pub op: AssignOp,
  pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
  pub name: String,
  pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While {
  pub cond: Expr,
  pub body: Block,
}

/// `for` loop; `var` is only in scope inside `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForLoop {
  pub var: VarDecl,
  pub iter: Expr,
  pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStmt {
  pub cond: Expr,
  pub then: Block,
  pub elifs: Vec<(Expr, Block)>,
  pub otherwise: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
  Int(u64),
  /// `f64::to_bits`
  Float(u64),
  Str(String),
  Bool(bool),
}

impl Literal {
  pub fn float(value: f64) -> Literal {
    Literal::Float(value.to_bits())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
  pub name: String,
  pub index: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cast {
  pub ty: Type,
  pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  Literal(Literal),
  Var(VarRef),
  Call(Call),
  Cast(Cast),
  Paren(Box<Expr>),
  Binary(Box<Binary>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
  pub lhs: Expr,
  pub op: BinOp,
  pub rhs: Expr,
}

impl Expr {
  pub fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
    Expr::Binary(Box::new(Binary { lhs, op, rhs }))
  }

  pub fn var(name: &str) -> Expr {
    Expr::Var(VarRef { name: name.to_string(), index: None })
  }

  pub const fn int(value: u64) -> Expr {
    Expr::Literal(Literal::Int(value))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
  Add,
  Sub,
  Mul,
  Div,
  Rem,
  BitXor,
  BitOr,
  BitAnd,
  Lt,
  Gt,
  Field,
  Eq,
  NotEq,
  AddAssign,
  SubAssign,
  MulAssign,
  DivAssign,
  GtEq,
  LtEq,
  Or,
  And,
  Range,
  RangeInclusive,
  RangeExclusive,
}

impl BinOp {
  pub const ALL: [BinOp; 24] = [
    BinOp::Add,
    BinOp::Sub,
    BinOp::Mul,
    BinOp::Div,
    BinOp::Rem,
    BinOp::BitXor,
    BinOp::BitOr,
    BinOp::BitAnd,
    BinOp::Lt,
    BinOp::Gt,
    BinOp::Field,
    BinOp::Eq,
    BinOp::NotEq,
    BinOp::AddAssign,
    BinOp::SubAssign,
    BinOp::MulAssign,
    BinOp::DivAssign,
    BinOp::GtEq,
    BinOp::LtEq,
    BinOp::Or,
    BinOp::And,
    BinOp::Range,
    BinOp::RangeInclusive,
    BinOp::RangeExclusive,
  ];

  pub const fn token(self) -> TokenKind {
    match self {
      BinOp::Add => T::Plus,
      BinOp::Sub => T::Minus,
      BinOp::Mul => T::Star,
      BinOp::Div => T::Slash,
      BinOp::Rem => T::Percent,
      BinOp::BitXor => T::Caret,
      BinOp::BitOr => T::Pipe,
      BinOp::BitAnd => T::Amp,
      BinOp::Lt => T::Lt,
      BinOp::Gt => T::Gt,
      BinOp::Field => T::Dot,
      BinOp::Eq => T::EqEq,
      BinOp::NotEq => T::NotEq,
      BinOp::AddAssign => T::PlusEq,
      BinOp::SubAssign => T::MinusEq,
      BinOp::MulAssign => T::StarEq,
      BinOp::DivAssign => T::SlashEq,
      BinOp::GtEq => T::GtEq,
      BinOp::LtEq => T::LtEq,
      BinOp::Or => T::OrOr,
      BinOp::And => T::AndAnd,
      BinOp::Range => T::DotDot,
      BinOp::RangeInclusive => T::DotDotEq,
      BinOp::RangeExclusive => T::DotDotLt,
    }
  }
}
