use crate::internal::{TokenKind as T, *};

/// Pull source of tokens for the parser. Once exhausted, a stream keeps
/// returning `Eof`.
pub trait TokenStream {
  fn next_token(&mut self) -> Token;
  fn lexeme(&self, index: idx::StrPool) -> &str;
}

/// Pre-tokenized input, as produced by `Lexer::lex` or built up by a driver.
#[derive(Debug)]
pub struct TokenBuffer {
  tokens: Vec<Token>,
  strings: StringPool,
  pos: usize,
  eof: SrcLoc,
}

impl TokenBuffer {
  pub fn new(eof: SrcLoc) -> Self {
    Self::from_parts(Vec::with_capacity(64), StringPool::new(), eof)
  }

  pub fn from_parts(tokens: Vec<Token>, strings: StringPool, eof: SrcLoc) -> Self {
    TokenBuffer { tokens, strings, pos: 0, eof }
  }

  pub fn push(&mut self, kind: TokenKind, loc: SrcLoc) -> &mut Self {
    self.tokens.push(Token::new(kind, loc));
    self
  }

  pub fn push_ident(&mut self, name: &str, loc: SrcLoc) -> &mut Self {
    let index = self.strings.intern(name);
    self.tokens.push(Token::with_payload(T::Ident, loc, Payload::Str(index)));
    self
  }

  pub fn push_str(&mut self, value: &str, loc: SrcLoc) -> &mut Self {
    let index = self.strings.intern(value);
    self.tokens.push(Token::with_payload(T::StrLit, loc, Payload::Str(index)));
    self
  }

  pub fn push_int(&mut self, value: u64, loc: SrcLoc) -> &mut Self {
    self.tokens.push(Token::with_payload(T::IntLit, loc, Payload::Int(value)));
    self
  }

  pub fn push_float(&mut self, value: f64, loc: SrcLoc) -> &mut Self {
    let payload = Payload::Float(value.to_bits());
    self.tokens.push(Token::with_payload(T::FloatLit, loc, payload));
    self
  }

  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  pub const fn strings(&self) -> &StringPool {
    &self.strings
  }

  pub fn kinds(&self) -> Vec<TokenKind> {
    self.tokens.iter().map(|token| token.kind).collect()
  }
}

impl TokenStream for TokenBuffer {
  fn next_token(&mut self) -> Token {
    match self.tokens.get(self.pos) {
      Some(token) if token.kind != T::Eof => {
        self.pos += 1;
        *token
      }
      Some(token) => *token,
      None => Token::new(T::Eof, self.eof),
    }
  }

  fn lexeme(&self, index: idx::StrPool) -> &str {
    self.strings.get(index)
  }
}
