//! Precedence and disambiguation table.
//!
//! Every decision the parser makes is a lookup of `(Pos, TokenKind)` in
//! `TABLE`. The table is assembled at compile time from `RULES`; two rules
//! claiming the same position and token fail the build, so an ambiguity can
//! never be settled by whichever rule happens to come first.
//!
//! Binding strength between competing constructs is the `Prec` ladder:
//! type keywords > pointer suffix `*` > call/index `(` `[` > field access `.`
//! > general binary operators > `,`. All levels associate left.

use crate::internal::{TokenKind as T, *};

/// Binding strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prec {
  Separator,
  CompoundAssign,
  Range,
  Or,
  And,
  Equality,
  Compare,
  BitOr,
  BitXor,
  BitAnd,
  Sum,
  Product,
  Field,
  Postfix,
  PointerSuffix,
  TypeKeyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
  Left,
  Right,
}

/// Constructs that compete for the same tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
  TypeKeyword,
  PointerSuffix,
  Call,
  Index,
  Binary(BinOp),
  Separator,
}

impl Construct {
  pub const fn prec(self) -> Prec {
    match self {
      Construct::TypeKeyword => Prec::TypeKeyword,
      Construct::PointerSuffix => Prec::PointerSuffix,
      Construct::Call | Construct::Index => Prec::Postfix,
      Construct::Binary(op) => op.prec(),
      Construct::Separator => Prec::Separator,
    }
  }

  pub const fn assoc(self) -> Assoc {
    match self {
      Construct::TypeKeyword
      | Construct::PointerSuffix
      | Construct::Call
      | Construct::Index
      | Construct::Binary(_)
      | Construct::Separator => Assoc::Left,
    }
  }

  /// Whether this construct, met after an operand, takes that operand away
  /// from an enclosing construct of strength `enclosing`.
  pub const fn binds_over(self, enclosing: Prec) -> bool {
    self.assoc().binds(self.prec(), enclosing)
  }
}

impl Assoc {
  /// Ties between equal strengths go left for `Left` and right for `Right`.
  pub const fn binds(self, own: Prec, enclosing: Prec) -> bool {
    let (own, enclosing) = (own as u8, enclosing as u8);
    match self {
      Assoc::Left => own > enclosing,
      Assoc::Right => own >= enclosing,
    }
  }
}

impl BinOp {
  pub const fn prec(self) -> Prec {
    match self {
      BinOp::AddAssign | BinOp::SubAssign | BinOp::MulAssign | BinOp::DivAssign => {
        Prec::CompoundAssign
      }
      BinOp::Range | BinOp::RangeInclusive | BinOp::RangeExclusive => Prec::Range,
      BinOp::Or => Prec::Or,
      BinOp::And => Prec::And,
      BinOp::Eq | BinOp::NotEq => Prec::Equality,
      BinOp::Lt | BinOp::Gt | BinOp::GtEq | BinOp::LtEq => Prec::Compare,
      BinOp::BitOr => Prec::BitOr,
      BinOp::BitXor => Prec::BitXor,
      BinOp::BitAnd => Prec::BitAnd,
      BinOp::Add | BinOp::Sub => Prec::Sum,
      BinOp::Mul | BinOp::Div | BinOp::Rem => Prec::Product,
      BinOp::Field => Prec::Field,
    }
  }
}

/// Where the parser is when it consults the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
  /// start of a statement
  Stmt,
  /// after the identifier that starts a statement
  StmtName,
  /// after the name of a declaration
  DeclTail,
  /// where a parameter list may start
  Param,
  /// after a complete type
  TypeSuffix,
  /// after a member of a type expression
  TypeList,
  /// where a value must start
  Operand,
  /// after an identifier in operand position
  Name,
  /// after a complete value inside an expression
  Operator,
}

impl Pos {
  pub const COUNT: usize = 9;

  pub const ALL: [Pos; Pos::COUNT] = [
    Pos::Stmt,
    Pos::StmtName,
    Pos::DeclTail,
    Pos::Param,
    Pos::TypeSuffix,
    Pos::TypeList,
    Pos::Operand,
    Pos::Name,
    Pos::Operator,
  ];

  /// Action for tokens no rule mentions.
  pub const fn fallback(self) -> Action {
    match self {
      Pos::Stmt | Pos::DeclTail | Pos::Param | Pos::Operand => Action::Reject,
      Pos::StmtName => Action::Assign,
      Pos::TypeSuffix | Pos::TypeList | Pos::Name | Pos::Operator => Action::End,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  EmptyLine,
  Return,
  If,
  While,
  For,
  Decl,
  Named,
  Assign,
  Init,
  FnParams,
  Receiver,
  PointerSuffix,
  ArrayType,
  TupleMember,
  SumMember,
  Literal,
  Ident,
  Group,
  Cast,
  Call,
  Index,
  Infix(BinOp),
  /// the production being parsed is complete
  End,
  Reject,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
  pub pos: Pos,
  pub kinds: &'static [TokenKind],
  pub action: Action,
}

impl Rule {
  const fn new(pos: Pos, kinds: &'static [TokenKind], action: Action) -> Self {
    Rule { pos, kinds, action }
  }
}

const SCALARS: &[TokenKind] = &[
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
];

const DECL_START: &[TokenKind] = &[
  T::Public,
  T::Private,
  T::Protected,
  T::Const,
  T::External,
  T::Dynamic,
  T::Static,
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
];

const fn infix(op: BinOp) -> Rule {
  let kinds: &'static [TokenKind] = match op {
    BinOp::Add => &[T::Plus],
    BinOp::Sub => &[T::Minus],
    BinOp::Mul => &[T::Star],
    BinOp::Div => &[T::Slash],
    BinOp::Rem => &[T::Percent],
    BinOp::BitXor => &[T::Caret],
    BinOp::BitOr => &[T::Pipe],
    BinOp::BitAnd => &[T::Amp],
    BinOp::Lt => &[T::Lt],
    BinOp::Gt => &[T::Gt],
    BinOp::Field => &[T::Dot],
    BinOp::Eq => &[T::EqEq],
    BinOp::NotEq => &[T::NotEq],
    BinOp::AddAssign => &[T::PlusEq],
    BinOp::SubAssign => &[T::MinusEq],
    BinOp::MulAssign => &[T::StarEq],
    BinOp::DivAssign => &[T::SlashEq],
    BinOp::GtEq => &[T::GtEq],
    BinOp::LtEq => &[T::LtEq],
    BinOp::Or => &[T::OrOr],
    BinOp::And => &[T::AndAnd],
    BinOp::Range => &[T::DotDot],
    BinOp::RangeInclusive => &[T::DotDotEq],
    BinOp::RangeExclusive => &[T::DotDotLt],
  };
  Rule::new(Pos::Operator, kinds, Action::Infix(op))
}

pub const RULES: &[Rule] = &[
  Rule::new(Pos::Stmt, &[T::Newline], Action::EmptyLine),
  Rule::new(Pos::Stmt, &[T::Return], Action::Return),
  Rule::new(Pos::Stmt, &[T::If], Action::If),
  Rule::new(Pos::Stmt, &[T::While], Action::While),
  Rule::new(Pos::Stmt, &[T::For], Action::For),
  Rule::new(Pos::Stmt, DECL_START, Action::Decl),
  Rule::new(Pos::Stmt, &[T::Ident], Action::Named),
  // `Ident (` is always a call, never a grouped expression
  Rule::new(Pos::StmtName, &[T::LParen], Action::Call),
  Rule::new(Pos::DeclTail, &[T::Assign], Action::Init),
  Rule::new(Pos::DeclTail, &[T::Colon], Action::FnParams),
  Rule::new(Pos::DeclTail, &[T::LParen], Action::Receiver),
  Rule::new(Pos::DeclTail, &[T::Newline, T::Dedent, T::Eof, T::In], Action::End),
  Rule::new(Pos::Param, DECL_START, Action::Decl),
  // an empty list ends at the block or at a receiver's `)`
  Rule::new(Pos::Param, &[T::Newline, T::RParen], Action::End),
  // `*` after a type is a pointer suffix; multiplication only exists in
  // operator position
  Rule::new(Pos::TypeSuffix, &[T::Star], Action::PointerSuffix),
  Rule::new(Pos::TypeSuffix, &[T::LBracket], Action::ArrayType),
  Rule::new(Pos::TypeList, &[T::Comma], Action::TupleMember),
  Rule::new(Pos::TypeList, &[T::Pipe], Action::SumMember),
  Rule::new(
    Pos::Operand,
    &[T::IntLit, T::FloatLit, T::StrLit, T::True, T::False],
    Action::Literal,
  ),
  Rule::new(Pos::Operand, &[T::Ident], Action::Ident),
  Rule::new(Pos::Operand, &[T::LParen], Action::Group),
  Rule::new(Pos::Operand, SCALARS, Action::Cast),
  Rule::new(Pos::Name, &[T::LParen], Action::Call),
  // `Ident [` in an expression is indexing; array types need type position
  Rule::new(Pos::Name, &[T::LBracket], Action::Index),
  infix(BinOp::Add),
  infix(BinOp::Sub),
  infix(BinOp::Mul),
  infix(BinOp::Div),
  infix(BinOp::Rem),
  infix(BinOp::BitXor),
  infix(BinOp::BitOr),
  infix(BinOp::BitAnd),
  infix(BinOp::Lt),
  infix(BinOp::Gt),
  infix(BinOp::Field),
  infix(BinOp::Eq),
  infix(BinOp::NotEq),
  infix(BinOp::AddAssign),
  infix(BinOp::SubAssign),
  infix(BinOp::MulAssign),
  infix(BinOp::DivAssign),
  infix(BinOp::GtEq),
  infix(BinOp::LtEq),
  infix(BinOp::Or),
  infix(BinOp::And),
  infix(BinOp::Range),
  infix(BinOp::RangeInclusive),
  infix(BinOp::RangeExclusive),
];

type Table = [[Action; TokenKind::COUNT]; Pos::COUNT];

const fn build(rules: &[Rule]) -> Table {
  let mut table = [[Action::Reject; TokenKind::COUNT]; Pos::COUNT];
  let mut claimed = [[false; TokenKind::COUNT]; Pos::COUNT];
  let mut p = 0;
  while p < Pos::COUNT {
    let fallback = Pos::ALL[p].fallback();
    let mut k = 0;
    while k < TokenKind::COUNT {
      table[p][k] = fallback;
      k += 1;
    }
    p += 1;
  }
  let mut r = 0;
  while r < rules.len() {
    let rule = rules[r];
    let mut k = 0;
    while k < rule.kinds.len() {
      let (pos, kind) = (rule.pos as usize, rule.kinds[k] as usize);
      if claimed[pos][kind] {
        panic!("two rules claim the same position and token");
      }
      claimed[pos][kind] = true;
      table[pos][kind] = rule.action;
      k += 1;
    }
    r += 1;
  }
  table
}

static TABLE: Table = build(RULES);

pub fn action(pos: Pos, kind: TokenKind) -> Action {
  TABLE[pos as usize][kind as usize]
}

/// Every `(position, token)` pair claimed by more than one rule.
pub fn conflicts(rules: &[Rule]) -> Vec<(Pos, TokenKind)> {
  let mut seen = rustc_hash::FxHashSet::default();
  let mut conflicts = Vec::new();
  for rule in rules {
    for kind in rule.kinds {
      if !seen.insert((rule.pos, *kind)) {
        conflicts.push((rule.pos, *kind));
      }
    }
  }
  conflicts
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn rule_table_has_no_conflicts() {
    let conflicts = conflicts(RULES);
    assert!(conflicts.is_empty(), "unresolved: {conflicts:?}");
  }

  #[test]
  fn conflicting_rules_are_detected() {
    let rules = [
      Rule::new(Pos::TypeSuffix, &[T::Star], Action::PointerSuffix),
      infix(BinOp::Mul),
      Rule::new(Pos::TypeSuffix, &[T::LBracket, T::Star], Action::ArrayType),
    ];
    assert_eq!(conflicts(&rules), vec![(Pos::TypeSuffix, T::Star)]);
  }

  #[test]
  fn construct_ladder_is_strictly_ordered() {
    let ladder = [
      Construct::TypeKeyword,
      Construct::PointerSuffix,
      Construct::Call,
      Construct::Binary(BinOp::Field),
    ];
    for pair in ladder.windows(2) {
      assert!(pair[0].prec() > pair[1].prec(), "{pair:?}");
    }
    assert_eq!(Construct::Call.prec(), Construct::Index.prec());
    for op in BinOp::ALL.into_iter().filter(|op| *op != BinOp::Field) {
      let prec = Construct::Binary(op).prec();
      assert!(prec < Construct::Binary(BinOp::Field).prec(), "{op:?}");
      assert!(prec > Construct::Separator.prec(), "{op:?}");
    }
  }

  #[test]
  fn binary_operator_ladder() {
    let ladder: &[&[BinOp]] = &[
      &[BinOp::AddAssign, BinOp::SubAssign, BinOp::MulAssign, BinOp::DivAssign],
      &[BinOp::Range, BinOp::RangeInclusive, BinOp::RangeExclusive],
      &[BinOp::Or],
      &[BinOp::And],
      &[BinOp::Eq, BinOp::NotEq],
      &[BinOp::Lt, BinOp::Gt, BinOp::GtEq, BinOp::LtEq],
      &[BinOp::BitOr],
      &[BinOp::BitXor],
      &[BinOp::BitAnd],
      &[BinOp::Add, BinOp::Sub],
      &[BinOp::Mul, BinOp::Div, BinOp::Rem],
      &[BinOp::Field],
    ];
    assert_eq!(ladder.iter().map(|level| level.len()).sum::<usize>(), BinOp::ALL.len());
    for level in ladder {
      assert!(level.iter().all(|op| op.prec() == level[0].prec()));
    }
    for pair in ladder.windows(2) {
      assert!(pair[0][0].prec() < pair[1][0].prec(), "{pair:?}");
    }
  }

  #[test]
  fn every_construct_associates_left() {
    let mut constructs = vec![
      Construct::TypeKeyword,
      Construct::PointerSuffix,
      Construct::Call,
      Construct::Index,
      Construct::Separator,
    ];
    constructs.extend(BinOp::ALL.map(Construct::Binary));
    assert!(constructs.iter().all(|c| c.assoc() == Assoc::Left));
  }

  #[test]
  fn associativity_decides_ties() {
    let sum = Construct::Binary(BinOp::Add);
    assert!(sum.binds_over(Prec::Separator));
    assert!(sum.binds_over(Prec::Or));
    assert!(!sum.binds_over(Prec::Sum));
    assert!(!sum.binds_over(Prec::Product));
    assert!(Assoc::Right.binds(Prec::Sum, Prec::Sum));
    assert!(!Assoc::Right.binds(Prec::Sum, Prec::Product));
    assert!(Assoc::Right.binds(Prec::Product, Prec::Sum));
  }

  #[test]
  fn params_start_only_at_a_declaration() {
    assert_eq!(action(Pos::Param, T::Const), Action::Decl);
    assert_eq!(action(Pos::Param, T::U8), Action::Decl);
    assert_eq!(action(Pos::Param, T::Newline), Action::End);
    assert_eq!(action(Pos::Param, T::RParen), Action::End);
    assert_eq!(action(Pos::Param, T::Ident), Action::Reject);
  }

  #[test]
  fn every_operator_token_maps_to_its_op() {
    for op in BinOp::ALL {
      assert_eq!(action(Pos::Operator, op.token()), Action::Infix(op));
    }
  }

  #[test]
  fn overloaded_tokens_resolve_by_position() {
    assert_eq!(action(Pos::TypeSuffix, T::Star), Action::PointerSuffix);
    assert_eq!(action(Pos::Operator, T::Star), Action::Infix(BinOp::Mul));
    assert_eq!(action(Pos::TypeList, T::Pipe), Action::SumMember);
    assert_eq!(action(Pos::Operator, T::Pipe), Action::Infix(BinOp::BitOr));
    assert_eq!(action(Pos::TypeList, T::Comma), Action::TupleMember);
    assert_eq!(action(Pos::Operator, T::Comma), Action::End);
    assert_eq!(action(Pos::Name, T::LParen), Action::Call);
    assert_eq!(action(Pos::Operand, T::LParen), Action::Group);
    assert_eq!(action(Pos::Operand, T::I32), Action::Cast);
    assert_eq!(action(Pos::Name, T::LBracket), Action::Index);
    assert_eq!(action(Pos::TypeSuffix, T::LBracket), Action::ArrayType);
  }

  #[test]
  fn reserved_keywords_are_rejected() {
    let reserved = [
      T::Do,
      T::Continue,
      T::Break,
      T::Import,
      T::Match,
      T::Struct,
      T::Enum,
      T::Comptime,
      T::Unknown,
    ];
    for kind in reserved {
      assert_eq!(action(Pos::Stmt, kind), Action::Reject);
      assert_eq!(action(Pos::Operand, kind), Action::Reject);
      assert_eq!(action(Pos::DeclTail, kind), Action::Reject);
      assert_eq!(action(Pos::Param, kind), Action::Reject);
    }
  }

  #[test]
  fn unclaimed_tokens_take_the_position_fallback() {
    for pos in Pos::ALL {
      for kind in TokenKind::ALL {
        let claimed = RULES
          .iter()
          .any(|rule| rule.pos == pos && rule.kinds.contains(&kind));
        if !claimed {
          assert_eq!(action(pos, kind), pos.fallback(), "{pos:?} {kind:?}");
        }
      }
    }
  }
}
