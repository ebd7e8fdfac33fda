use super::{Expected, PResult, Parser};
use crate::internal::{TokenKind as T, *};

impl<S: TokenStream> Parser<S> {
  /// `modifier* TypeExpr Ident`, the shared head of variable and function
  /// declarations and of parameters.
  #[instrument(skip_all)]
  pub(super) fn parse_decl(&mut self) -> PResult<Declaration> {
    let mut modifiers = ModifierSet::empty();
    while let Some(modifier) = Modifier::from_token(self.cur.kind) {
      modifiers.insert(modifier);
      self.advance();
    }
    let ty = self.parse_type_expr()?;
    let name = self.consume_ident()?;
    trace!(name = %name, "decl");
    Ok(Declaration { modifiers, ty, name })
  }

  /// Possibly empty, comma separated declarations.
  #[instrument(skip_all)]
  pub(super) fn parse_params(&mut self) -> PResult<Vec<Declaration>> {
    let mut params = Vec::new();
    match action(Pos::Param, self.cur.kind) {
      Action::Decl => {}
      Action::End => return Ok(params),
      _ => return Err(self.unexpected(Expected::Param)),
    }
    params.push(self.parse_decl()?);
    while self.cur_token_is(T::Comma) {
      self.advance();
      params.push(self.parse_decl()?);
    }
    Ok(params)
  }

  #[instrument(skip_all)]
  pub(super) fn parse_type_expr(&mut self) -> PResult<TypeExpr> {
    let mut type_expr = TypeExpr::Type(self.parse_type()?);
    loop {
      type_expr = match action(Pos::TypeList, self.cur.kind) {
        Action::TupleMember => {
          self.advance();
          TypeExpr::Tuple(Box::new(type_expr), self.parse_type()?)
        }
        Action::SumMember => {
          self.advance();
          TypeExpr::Sum(Box::new(type_expr), self.parse_type()?)
        }
        _ => return Ok(type_expr),
      };
    }
  }

  #[instrument(skip_all)]
  pub(super) fn parse_type(&mut self) -> PResult<Type> {
    let Some(scalar) = Scalar::from_token(self.cur.kind) else {
      return Err(self.unexpected(Expected::Type));
    };
    self.advance();
    let mut ty = Type::Scalar(scalar);
    loop {
      ty = match action(Pos::TypeSuffix, self.cur.kind) {
        Action::PointerSuffix => {
          self.advance();
          Type::Pointer(Box::new(ty))
        }
        Action::ArrayType => {
          self.advance(); // `[`
          let bound = if self.cur_token_is(T::RBracket) {
            None
          } else {
            Some(Box::new(self.nested(Self::parse_expr)?))
          };
          self.consume_expecting(T::RBracket)?;
          Type::Array(Box::new(ty), bound)
        }
        _ => return Ok(ty),
      };
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::internal::*;
  use pretty_assertions::assert_eq;

  fn decl_of(src: &str) -> Declaration {
    let program = Parser::new(Lexer::new_str(src).lex()).parse().unwrap();
    match program.stmts.into_iter().next() {
      Some(Stmt::VarDecl(var)) => var.decl,
      other => panic!("expected var decl, got {other:?}"),
    }
  }

  fn scalar(scalar: Scalar) -> Type {
    Type::Scalar(scalar)
  }

  fn ptr(ty: Type) -> Type {
    Type::Pointer(Box::new(ty))
  }

  #[test]
  fn pointer_suffixes_nest_left() {
    assert_eq!(
      decl_of("c8** argv").ty,
      TypeExpr::Type(ptr(ptr(scalar(Scalar::C8))))
    );
  }

  #[test]
  fn array_types_with_and_without_bounds() {
    assert_eq!(
      decl_of("i64[] xs").ty,
      TypeExpr::Type(Type::Array(Box::new(scalar(Scalar::I64)), None))
    );
    assert_eq!(
      decl_of("u8[n * 2]* grid").ty,
      TypeExpr::Type(ptr(Type::Array(
        Box::new(scalar(Scalar::U8)),
        Some(Box::new(Expr::binary(Expr::var("n"), BinOp::Mul, Expr::int(2)))),
      )))
    );
  }

  #[test]
  fn tuple_and_sum_chains_are_left_associative() {
    let ty = decl_of("i32, f32 | void result").ty;
    assert_eq!(
      ty,
      TypeExpr::Sum(
        Box::new(TypeExpr::Tuple(
          Box::new(TypeExpr::Type(scalar(Scalar::I32))),
          scalar(Scalar::F32),
        )),
        scalar(Scalar::Void),
      )
    );
    assert_eq!(
      ty.members(),
      vec![&scalar(Scalar::I32), &scalar(Scalar::F32), &scalar(Scalar::Void)]
    );
  }

  #[test]
  fn every_modifier_is_collected() {
    let decl = decl_of("public private protected const external dynamic static bool b");
    assert_eq!(decl.modifiers.iter().collect::<Vec<_>>(), Modifier::ALL.to_vec());
    assert_eq!(decl.name, "b");
  }

  #[test]
  fn repeated_modifiers_collapse() {
    let decl = decl_of("const const i8 k");
    assert_eq!(decl.modifiers, ModifierSet::of(&[Modifier::Const]));
  }

  #[test]
  fn modifiers_need_a_type() {
    let err = Parser::new(Lexer::new_str("public x = 1").lex()).parse().unwrap_err();
    let ParseError::UnexpectedToken { expected, found, .. } = err;
    assert_eq!((expected, found), (Expected::Type, TokenKind::Ident));
  }
}
