use crate::internal::{TokenKind as T, *};

/// Re-derives the token kinds a tree was parsed from. Literal values and
/// names are dropped; modifiers come out in canonical order.
trait TokenShape {
  fn shape(&self, out: &mut Vec<TokenKind>);
}

impl Program {
  pub fn token_shape(&self) -> Vec<TokenKind> {
    let mut out = Vec::with_capacity(self.stmts.len() * 8);
    for stmt in &self.stmts {
      stmt.shape(&mut out);
    }
    out
  }
}

impl TokenShape for Stmt {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    match self {
      Stmt::VarDecl(var) => {
        var.shape(out);
        out.push(T::Newline);
      }
      Stmt::Assign(assign) => {
        assign.target.shape(out);
        out.push(assign.op.token());
        assign.value.shape(out);
        out.push(T::Newline);
      }
      Stmt::FnDecl(fn_decl) => fn_decl.shape(out),
      Stmt::Call(call) => {
        call.shape(out);
        out.push(T::Newline);
      }
      Stmt::Return(value) => {
        out.push(T::Return);
        if let Some(value) = value {
          value.shape(out);
        }
        out.push(T::Newline);
      }
      Stmt::While(while_loop) => {
        out.push(T::While);
        while_loop.cond.shape(out);
        out.push(T::Colon);
        while_loop.body.shape(out);
      }
      Stmt::For(for_loop) => {
        out.push(T::For);
        for_loop.var.shape(out);
        out.push(T::In);
        for_loop.iter.shape(out);
        out.push(T::Colon);
        for_loop.body.shape(out);
      }
      Stmt::If(if_stmt) => {
        out.push(T::If);
        if_stmt.cond.shape(out);
        out.push(T::Colon);
        if_stmt.then.shape(out);
        for (cond, block) in &if_stmt.elifs {
          out.push(T::Elif);
          cond.shape(out);
          out.push(T::Colon);
          block.shape(out);
        }
        if let Some(block) = &if_stmt.otherwise {
          out.extend([T::Else, T::Colon]);
          block.shape(out);
        }
      }
      Stmt::Empty => out.push(T::Newline),
    }
  }
}

impl TokenShape for Block {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    out.extend([T::Newline, T::Indent]);
    for stmt in &self.stmts {
      stmt.shape(out);
    }
    out.push(T::Dedent);
  }
}

impl TokenShape for FnDecl {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    self.decl.shape(out);
    if let Some(receiver) = &self.receiver {
      out.push(T::LParen);
      params_shape(receiver, out);
      out.push(T::RParen);
    }
    out.push(T::Colon);
    params_shape(&self.params, out);
    self.body.shape(out);
  }
}

fn params_shape(params: &[Declaration], out: &mut Vec<TokenKind>) {
  for (i, param) in params.iter().enumerate() {
    if i > 0 {
      out.push(T::Comma);
    }
    param.shape(out);
  }
}

impl TokenShape for VarDecl {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    self.decl.shape(out);
    if let Some(init) = &self.init {
      out.push(T::Assign);
      init.shape(out);
    }
  }
}

impl TokenShape for Declaration {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    out.extend(self.modifiers.iter().map(Modifier::token));
    self.ty.shape(out);
    out.push(T::Ident);
  }
}

impl TokenShape for TypeExpr {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    match self {
      TypeExpr::Type(ty) => ty.shape(out),
      TypeExpr::Tuple(head, ty) => {
        head.shape(out);
        out.push(T::Comma);
        ty.shape(out);
      }
      TypeExpr::Sum(head, ty) => {
        head.shape(out);
        out.push(T::Pipe);
        ty.shape(out);
      }
    }
  }
}

impl TokenShape for Type {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    match self {
      Type::Scalar(scalar) => out.push(scalar.token()),
      Type::Pointer(inner) => {
        inner.shape(out);
        out.push(T::Star);
      }
      Type::Array(inner, bound) => {
        inner.shape(out);
        out.push(T::LBracket);
        if let Some(bound) = bound {
          bound.shape(out);
        }
        out.push(T::RBracket);
      }
    }
  }
}

impl TokenShape for Call {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    out.push(T::Ident);
    args_shape(&self.args, out);
  }
}

fn args_shape(args: &[Expr], out: &mut Vec<TokenKind>) {
  out.push(T::LParen);
  for (i, arg) in args.iter().enumerate() {
    if i > 0 {
      out.push(T::Comma);
    }
    arg.shape(out);
  }
  out.push(T::RParen);
}

impl TokenShape for VarRef {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    out.push(T::Ident);
    if let Some(index) = &self.index {
      out.push(T::LBracket);
      index.shape(out);
      out.push(T::RBracket);
    }
  }
}

impl TokenShape for Expr {
  fn shape(&self, out: &mut Vec<TokenKind>) {
    match self {
      Expr::Literal(literal) => out.push(match literal {
        Literal::Int(_) => T::IntLit,
        Literal::Float(_) => T::FloatLit,
        Literal::Str(_) => T::StrLit,
        Literal::Bool(true) => T::True,
        Literal::Bool(false) => T::False,
      }),
      Expr::Var(var) => var.shape(out),
      Expr::Call(call) => call.shape(out),
      Expr::Cast(cast) => {
        cast.ty.shape(out);
        args_shape(&cast.args, out);
      }
      Expr::Paren(inner) => {
        out.push(T::LParen);
        inner.shape(out);
        out.push(T::RParen);
      }
      Expr::Binary(binary) => {
        binary.lhs.shape(out);
        out.push(binary.op.token());
        binary.rhs.shape(out);
      }
    }
  }
}
