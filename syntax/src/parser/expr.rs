use super::{Expected, PResult, Parser};
use crate::internal::{TokenKind as T, *};

impl<S: TokenStream> Parser<S> {
  pub(super) fn parse_expr(&mut self) -> PResult<Expr> {
    self.parse_expr_prec(Prec::Separator)
  }

  /// Precedence climbing: an operator takes the operand to its left only
  /// if it binds over `prec`; ties are settled by its associativity.
  #[instrument(skip_all)]
  fn parse_expr_prec(&mut self, prec: Prec) -> PResult<Expr> {
    let mut lhs = self.parse_val()?;
    loop {
      let Action::Infix(op) = action(Pos::Operator, self.cur.kind) else {
        break;
      };
      let construct = Construct::Binary(op);
      if !construct.binds_over(prec) {
        break;
      }
      self.advance();
      let rhs = self.nested(|parser| parser.parse_expr_prec(construct.prec()))?;
      lhs = Expr::binary(lhs, op, rhs);
    }
    Ok(lhs)
  }

  #[instrument(skip_all)]
  fn parse_val(&mut self) -> PResult<Expr> {
    match action(Pos::Operand, self.cur.kind) {
      Action::Literal => self.parse_literal(),
      Action::Ident => {
        let name = self.consume_ident()?;
        match action(Pos::Name, self.cur.kind) {
          Action::Call => {
            let args = self.parse_args()?;
            Ok(Expr::Call(Call { name, args }))
          }
          Action::Index => {
            let index = self.parse_index()?;
            Ok(Expr::Var(VarRef { name, index: Some(Box::new(index)) }))
          }
          _ => Ok(Expr::Var(VarRef { name, index: None })),
        }
      }
      Action::Group => {
        self.advance(); // `(`
        let inner = self.nested(Self::parse_expr)?;
        self.consume_expecting(T::RParen)?;
        Ok(Expr::Paren(Box::new(inner)))
      }
      Action::Cast => {
        let ty = self.parse_type()?;
        let args = self.parse_args()?;
        Ok(Expr::Cast(Cast { ty, args }))
      }
      _ => Err(self.unexpected(Expected::Expression)),
    }
  }

  fn parse_literal(&mut self) -> PResult<Expr> {
    let token = self.advance();
    let literal = match (token.kind, token.payload) {
      (T::IntLit, Payload::Int(value)) => Literal::Int(value),
      (T::FloatLit, Payload::Float(bits)) => Literal::Float(bits),
      (T::StrLit, Payload::Str(_)) => Literal::Str(self.lexeme(&token)),
      (T::True, _) => Literal::Bool(true),
      (T::False, _) => Literal::Bool(false),
      // the stream handed us a literal without its value
      _ => return Err(self.error_at(token, Expected::Expression)),
    };
    Ok(Expr::Literal(literal))
  }

  /// `( args? )`; `,` only ever separates arguments.
  #[instrument(skip_all)]
  pub(super) fn parse_args(&mut self) -> PResult<Vec<Expr>> {
    self.consume_expecting(T::LParen)?;
    let mut args = Vec::new();
    if self.cur_token_is(T::RParen) {
      self.advance();
      return Ok(args);
    }
    loop {
      args.push(self.nested(Self::parse_expr)?);
      match self.cur.kind {
        T::Comma => {
          self.advance();
        }
        T::RParen => {
          self.advance();
          return Ok(args);
        }
        _ => return Err(self.unexpected(Expected::Token(T::RParen))),
      }
    }
  }

  /// `[ expr ]` after an identifier.
  pub(super) fn parse_index(&mut self) -> PResult<Expr> {
    self.consume_expecting(T::LBracket)?;
    let index = self.nested(Self::parse_expr)?;
    self.consume_expecting(T::RBracket)?;
    Ok(index)
  }
}

#[cfg(test)]
mod tests {
  use crate::internal::*;
  use pretty_assertions::assert_eq;

  fn expr(src: &str) -> Expr {
    let program = Parser::new(Lexer::new_str(&format!("i32 v = {src}")).lex())
      .parse()
      .unwrap();
    match program.stmts.into_iter().next() {
      Some(Stmt::VarDecl(VarDecl { init: Some(init), .. })) => init,
      other => panic!("expected initialized var decl, got {other:?}"),
    }
  }

  fn bin(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
    Expr::binary(lhs, op, rhs)
  }

  fn var(name: &str) -> Expr {
    Expr::var(name)
  }

  #[test]
  fn product_binds_tighter_than_sum() {
    assert_eq!(
      expr("a + b * c"),
      bin(var("a"), BinOp::Add, bin(var("b"), BinOp::Mul, var("c")))
    );
    assert_eq!(
      expr("a * b + c"),
      bin(bin(var("a"), BinOp::Mul, var("b")), BinOp::Add, var("c"))
    );
  }

  #[test]
  fn equal_levels_associate_left() {
    assert_eq!(
      expr("a - b - c"),
      bin(bin(var("a"), BinOp::Sub, var("b")), BinOp::Sub, var("c"))
    );
    assert_eq!(
      expr("a.b.c"),
      bin(bin(var("a"), BinOp::Field, var("b")), BinOp::Field, var("c"))
    );
    assert_eq!(
      expr("x += y -= z"),
      bin(bin(var("x"), BinOp::AddAssign, var("y")), BinOp::SubAssign, var("z"))
    );
  }

  #[test]
  fn every_operator_chains_by_its_table_associativity() {
    for op in BinOp::ALL {
      let mut buffer = TokenBuffer::new(SrcLoc::default());
      buffer
        .push(TokenKind::Return, SrcLoc::default())
        .push_ident("a", SrcLoc::default())
        .push(op.token(), SrcLoc::default())
        .push_ident("b", SrcLoc::default())
        .push(op.token(), SrcLoc::default())
        .push_ident("c", SrcLoc::default());
      let program = Parser::new(buffer).parse().unwrap();
      let expected = match Construct::Binary(op).assoc() {
        Assoc::Left => bin(bin(var("a"), op, var("b")), op, var("c")),
        Assoc::Right => bin(var("a"), op, bin(var("b"), op, var("c"))),
      };
      assert_eq!(program.stmts, vec![Stmt::Return(Some(expected))], "{op:?}");
    }
  }

  #[test]
  fn full_ladder() {
    // || < && < == < < < | < ^ < & < + < *
    assert_eq!(
      expr("a || b && c == d < e | f ^ g & h + i * j"),
      bin(
        var("a"),
        BinOp::Or,
        bin(
          var("b"),
          BinOp::And,
          bin(
            var("c"),
            BinOp::Eq,
            bin(
              var("d"),
              BinOp::Lt,
              bin(
                var("e"),
                BinOp::BitOr,
                bin(
                  var("f"),
                  BinOp::BitXor,
                  bin(
                    var("g"),
                    BinOp::BitAnd,
                    bin(var("h"), BinOp::Add, bin(var("i"), BinOp::Mul, var("j"))),
                  ),
                ),
              ),
            ),
          ),
        ),
      )
    );
  }

  #[test]
  fn ranges_bind_looser_than_logic_and_tighter_than_compound_assign() {
    assert_eq!(
      expr("n += 0 ..= a || b"),
      bin(
        var("n"),
        BinOp::AddAssign,
        bin(Expr::int(0), BinOp::RangeInclusive, bin(var("a"), BinOp::Or, var("b"))),
      )
    );
  }

  #[test]
  fn field_access_binds_tighter_than_arithmetic() {
    assert_eq!(
      expr("p.x * 2"),
      bin(bin(var("p"), BinOp::Field, var("x")), BinOp::Mul, Expr::int(2))
    );
  }

  #[test]
  fn cast_then_field_access() {
    assert_eq!(
      expr("i32(x).y"),
      bin(
        Expr::Cast(Cast {
          ty: Type::Scalar(Scalar::I32),
          args: vec![var("x")],
        }),
        BinOp::Field,
        var("y"),
      )
    );
  }

  #[test]
  fn star_after_cast_type_is_pointer_suffix() {
    assert_eq!(
      expr("u8*(p) * 2"),
      bin(
        Expr::Cast(Cast {
          ty: Type::Pointer(Box::new(Type::Scalar(Scalar::U8))),
          args: vec![var("p")],
        }),
        BinOp::Mul,
        Expr::int(2),
      )
    );
  }

  #[test]
  fn parens_group_and_are_kept() {
    assert_eq!(
      expr("(a + b) * c"),
      bin(
        Expr::Paren(Box::new(bin(var("a"), BinOp::Add, var("b")))),
        BinOp::Mul,
        var("c"),
      )
    );
  }

  #[test]
  fn calls_and_indexing() {
    assert_eq!(
      expr("max(xs[i], f()) + ys[0]"),
      bin(
        Expr::Call(Call {
          name: "max".to_string(),
          args: vec![
            Expr::Var(VarRef {
              name: "xs".to_string(),
              index: Some(Box::new(var("i"))),
            }),
            Expr::Call(Call { name: "f".to_string(), args: vec![] }),
          ],
        }),
        BinOp::Add,
        Expr::Var(VarRef {
          name: "ys".to_string(),
          index: Some(Box::new(Expr::int(0))),
        }),
      )
    );
  }

  #[test]
  fn literals() {
    assert_eq!(expr("true"), Expr::Literal(Literal::Bool(true)));
    assert_eq!(expr("false"), Expr::Literal(Literal::Bool(false)));
    assert_eq!(expr("1.5"), Expr::Literal(Literal::float(1.5)));
    assert_eq!(expr("\"hi\""), Expr::Literal(Literal::Str("hi".to_string())));
    assert_eq!(expr("18446744073709551615"), Expr::int(u64::MAX));
  }

  #[test]
  fn literal_without_payload_is_rejected() {
    let mut buffer = TokenBuffer::new(SrcLoc::default());
    buffer
      .push(TokenKind::Return, SrcLoc::new(0, 1, 1, 6))
      .push(TokenKind::IntLit, SrcLoc::new(7, 1, 8, 1));
    let err = Parser::new(buffer).parse().unwrap_err();
    assert_eq!(
      err,
      ParseError::UnexpectedToken {
        expected: Expected::Expression,
        found: TokenKind::IntLit,
        loc: SrcLoc::new(7, 1, 8, 1),
      }
    );
  }

  #[test]
  fn comma_is_never_absorbed_into_an_argument() {
    let Expr::Call(call) = expr("f(a + b, c)") else {
      panic!("expected call");
    };
    assert_eq!(call.args, vec![bin(var("a"), BinOp::Add, var("b")), var("c")]);
  }

  #[test]
  fn grouping_requires_a_closing_paren() {
    let err = Parser::new(Lexer::new_str("i32 v = (a + b").lex())
      .parse()
      .unwrap_err();
    let ParseError::UnexpectedToken { expected, found, .. } = err;
    assert_eq!((expected, found), (Expected::Token(TokenKind::RParen), TokenKind::Newline));
  }
}
