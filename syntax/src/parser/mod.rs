use crate::internal::{TokenKind as T, *};
#[cfg(test)]
use std::sync::Once;
#[cfg(test)]
use tracing_subscriber::{EnvFilter, fmt, fmt::format::FmtSpan};

mod decl;
mod expr;

/// How deep blocks, groups, argument lists, indexes and array bounds may
/// nest before the parser gives up instead of exhausting the stack.
pub const MAX_DEPTH: u32 = 128;

/// Deterministic recursive-descent parser. Holds exactly one token of
/// lookahead; every branch is decided by `prec::action`.
#[derive(Debug)]
pub struct Parser<S> {
  stream: S,
  cur: Token,
  depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
  #[error("expected {expected}, found {found} at {}:{}", .loc.line, .loc.col)]
  UnexpectedToken {
    expected: Expected,
    found: TokenKind,
    loc: SrcLoc,
  },
}

/// What the parser could have accepted where it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
  Token(TokenKind),
  Statement,
  Expression,
  Type,
  Param,
  AssignOp,
  DeclTail,
  /// nesting went past `MAX_DEPTH`
  ShallowerNesting,
}

impl std::fmt::Display for Expected {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Expected::Token(kind) => write!(f, "{kind}"),
      Expected::Statement => f.write_str("statement"),
      Expected::Expression => f.write_str("expression"),
      Expected::Type => f.write_str("type"),
      Expected::Param => f.write_str("parameter or block"),
      Expected::AssignOp => f.write_str("assignment operator"),
      Expected::DeclTail => f.write_str("`=`, `:`, `(` or newline"),
      Expected::ShallowerNesting => write!(f, "at most {MAX_DEPTH} levels of nesting"),
    }
  }
}

pub(crate) type PResult<T> = Result<T, ParseError>;

impl<S: TokenStream> Parser<S> {
  pub fn new(mut stream: S) -> Self {
    #[cfg(test)]
    configure_test_tracing();

    let cur = stream.next_token();
    Parser { stream, cur, depth: 0 }
  }

  #[instrument(skip_all)]
  pub fn parse(mut self) -> Result<Program, ParseError> {
    let mut stmts = Vec::new();
    while !self.cur_token_is(T::Eof) {
      stmts.push(self.parse_stmt()?);
    }
    trace!(stmts = stmts.len(), "program");
    Ok(Program { stmts })
  }

  #[instrument(skip_all)]
  fn parse_stmt(&mut self) -> PResult<Stmt> {
    match action(Pos::Stmt, self.cur.kind) {
      Action::EmptyLine => {
        self.advance();
        Ok(Stmt::Empty)
      }
      Action::Return => self.parse_return_stmt(),
      Action::If => self.parse_if_stmt(),
      Action::While => self.parse_while_stmt(),
      Action::For => self.parse_for_stmt(),
      Action::Decl => self.parse_decl_stmt(),
      Action::Named => self.parse_named_stmt(),
      _ => Err(self.unexpected(Expected::Statement)),
    }
  }

  #[instrument(skip_all)]
  fn parse_block(&mut self) -> PResult<Block> {
    self.consume_expecting(T::Newline)?;
    self.nested(|parser| {
      parser.consume_expecting(T::Indent)?;
      let mut stmts = Vec::new();
      loop {
        match parser.cur.kind {
          T::Dedent => {
            parser.advance();
            break;
          }
          // never close a block on our own
          T::Eof => return Err(parser.unexpected(Expected::Token(T::Dedent))),
          _ => stmts.push(parser.parse_stmt()?),
        }
      }
      trace!(stmts = stmts.len(), "block");
      Ok(Block { stmts })
    })
  }

  #[instrument(skip_all)]
  fn parse_decl_stmt(&mut self) -> PResult<Stmt> {
    let decl = self.parse_decl()?;
    match action(Pos::DeclTail, self.cur.kind) {
      Action::Init => {
        self.advance(); // `=`
        let init = self.parse_expr()?;
        self.end_simple_stmt()?;
        Ok(Stmt::VarDecl(VarDecl { decl, init: Some(init) }))
      }
      Action::FnParams => {
        self.advance(); // `:`
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Stmt::FnDecl(FnDecl { decl, receiver: None, params, body }))
      }
      Action::Receiver => {
        self.advance(); // `(`
        let receiver = self.parse_params()?;
        self.consume_expecting(T::RParen)?;
        self.consume_expecting(T::Colon)?;
        let params = self.parse_params()?;
        let body = self.parse_block()?;
        Ok(Stmt::FnDecl(FnDecl {
          decl,
          receiver: Some(receiver),
          params,
          body,
        }))
      }
      Action::End => {
        self.end_simple_stmt()?;
        Ok(Stmt::VarDecl(VarDecl { decl, init: None }))
      }
      _ => Err(self.unexpected(Expected::DeclTail)),
    }
  }

  #[instrument(skip_all)]
  fn parse_named_stmt(&mut self) -> PResult<Stmt> {
    let name = self.consume_ident()?;
    let stmt = match action(Pos::StmtName, self.cur.kind) {
      Action::Call => {
        let args = self.parse_args()?;
        Stmt::Call(Call { name, args })
      }
      _ => {
        let index = match action(Pos::Name, self.cur.kind) {
          Action::Index => Some(Box::new(self.parse_index()?)),
          _ => None,
        };
        let Some(op) = AssignOp::from_token(self.cur.kind) else {
          return Err(self.unexpected(Expected::AssignOp));
        };
        self.advance();
        let value = self.parse_expr()?;
        Stmt::Assign(Assign {
          target: VarRef { name, index },
          op,
          value,
        })
      }
    };
    self.end_simple_stmt()?;
    Ok(stmt)
  }

  #[instrument(skip_all)]
  fn parse_return_stmt(&mut self) -> PResult<Stmt> {
    self.advance(); // `return`
    let value = match action(Pos::Operand, self.cur.kind) {
      Action::Reject => None,
      _ => Some(self.parse_expr()?),
    };
    self.end_simple_stmt()?;
    Ok(Stmt::Return(value))
  }

  #[instrument(skip_all)]
  fn parse_if_stmt(&mut self) -> PResult<Stmt> {
    self.advance(); // `if`
    let cond = self.parse_expr()?;
    self.consume_expecting(T::Colon)?;
    let then = self.parse_block()?;
    let mut elifs = Vec::new();
    while self.cur_token_is(T::Elif) {
      self.advance();
      let cond = self.parse_expr()?;
      self.consume_expecting(T::Colon)?;
      elifs.push((cond, self.parse_block()?));
    }
    let otherwise = if self.cur_token_is(T::Else) {
      self.advance();
      self.consume_expecting(T::Colon)?;
      Some(self.parse_block()?)
    } else {
      None
    };
    Ok(Stmt::If(IfStmt { cond, then, elifs, otherwise }))
  }

  #[instrument(skip_all)]
  fn parse_while_stmt(&mut self) -> PResult<Stmt> {
    self.advance(); // `while`
    let cond = self.parse_expr()?;
    self.consume_expecting(T::Colon)?;
    let body = self.parse_block()?;
    Ok(Stmt::While(While { cond, body }))
  }

  #[instrument(skip_all)]
  fn parse_for_stmt(&mut self) -> PResult<Stmt> {
    self.advance(); // `for`
    let decl = self.parse_decl()?;
    let init = match action(Pos::DeclTail, self.cur.kind) {
      Action::Init => {
        self.advance();
        Some(self.parse_expr()?)
      }
      _ => None,
    };
    self.consume_expecting(T::In)?;
    let iter = self.parse_expr()?;
    self.consume_expecting(T::Colon)?;
    let body = self.parse_block()?;
    Ok(Stmt::For(ForLoop {
      var: VarDecl { decl, init },
      iter,
      body,
    }))
  }

  /// A simple statement ends at a newline, or directly before a block end.
  fn end_simple_stmt(&mut self) -> PResult<()> {
    match self.cur.kind {
      T::Newline => {
        self.advance();
        Ok(())
      }
      T::Dedent | T::Eof => Ok(()),
      _ => Err(self.unexpected(Expected::Token(T::Newline))),
    }
  }

  /// Runs `production` one nesting level deeper, failing at the current
  /// token once `MAX_DEPTH` is reached.
  pub(super) fn nested<R>(
    &mut self,
    production: impl FnOnce(&mut Self) -> PResult<R>,
  ) -> PResult<R> {
    if self.depth >= MAX_DEPTH {
      return Err(self.unexpected(Expected::ShallowerNesting));
    }
    self.depth += 1;
    let result = production(self);
    self.depth -= 1;
    result
  }

  fn cur_token_is(&self, kind: TokenKind) -> bool {
    self.cur.kind == kind
  }

  fn consume_expecting(&mut self, kind: TokenKind) -> PResult<Token> {
    if self.cur_token_is(kind) {
      Ok(self.advance())
    } else {
      Err(self.unexpected(Expected::Token(kind)))
    }
  }

  fn consume_ident(&mut self) -> PResult<String> {
    let token = self.consume_expecting(T::Ident)?;
    Ok(self.lexeme(&token))
  }

  fn lexeme(&self, token: &Token) -> String {
    token
      .str_idx()
      .map(|index| self.stream.lexeme(index).to_string())
      .unwrap_or_default()
  }

  fn advance(&mut self) -> Token {
    let token = self.cur;
    self.cur = self.stream.next_token();
    trace!(kind = ?token.kind, line = token.loc.line, col = token.loc.col, "shift");
    token
  }

  fn unexpected(&self, expected: Expected) -> ParseError {
    self.error_at(self.cur, expected)
  }

  fn error_at(&self, token: Token, expected: Expected) -> ParseError {
    debug!(?expected, found = ?token.kind, line = token.loc.line, "syntax error");
    ParseError::UnexpectedToken {
      expected,
      found: token.kind,
      loc: token.loc,
    }
  }
}

#[cfg(test)]
static INIT: Once = Once::new();

#[cfg(test)]
fn configure_test_tracing() {
  INIT.call_once(|| {
    let subscriber = fmt::Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .with_span_events(FmtSpan::ACTIVE)
      .finish();
    tracing::subscriber::set_global_default(subscriber)
      .expect("setting default tracing subscriber failed");
  });
}
