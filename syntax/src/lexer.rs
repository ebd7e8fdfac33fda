use crate::internal::{TokenKind as T, *};

/// Reference lexer: turns source text into a `TokenBuffer`, synthesizing
/// `Newline`, `Indent` and `Dedent` from line structure. Blank lines are
/// skipped entirely.
#[derive(Debug)]
pub struct Lexer {
  src: Vec<u8>,
  strings: StringPool,
  tokens: Vec<Token>,
  indents: Vec<u32>,
  pos: usize,
  line: u32,
  line_start: usize,
  at_line_start: bool,
}

impl Lexer {
  pub fn new(src: Vec<u8>) -> Self {
    assert!(src.len() <= u32::MAX as usize);
    Lexer {
      src,
      strings: StringPool::new(),
      tokens: Vec::with_capacity(64),
      indents: vec![0],
      pos: 0,
      line: 1,
      line_start: 0,
      at_line_start: true,
    }
  }

  pub fn new_str(src: &str) -> Self {
    Self::new(src.bytes().collect())
  }

  #[instrument(skip_all)]
  pub fn lex(mut self) -> TokenBuffer {
    while !self.eof() {
      if self.at_line_start {
        self.indentation();
        continue;
      }
      match self.src[self.pos] {
        b' ' | b'\t' | b'\r' => self.pos += 1,
        b'\n' => {
          self.simple_token(T::Newline, 1);
          self.line += 1;
          self.line_start = self.pos;
          self.at_line_start = true;
        }
        _ => {
          self.next_token();
        }
      }
    }
    if !self.at_line_start {
      self.simple_token(T::Newline, 0);
    }
    while self.indents.len() > 1 {
      self.indents.pop();
      self.simple_token(T::Dedent, 0);
    }
    let eof = self.simple_token(T::Eof, 0).loc;
    trace!(tokens = self.tokens.len(), "lexed");
    TokenBuffer::from_parts(self.tokens, self.strings, eof)
  }

  fn indentation(&mut self) {
    let start = self.pos;
    while !self.eof() && matches!(self.src[self.pos], b' ' | b'\t') {
      self.pos += 1;
    }
    let width = (self.pos - start) as u32;
    match self.src.get(self.pos) {
      None => return,
      Some(b'\r') | Some(b'\n') => {
        while !self.eof() && self.src[self.pos] != b'\n' {
          self.pos += 1;
        }
        if !self.eof() {
          self.pos += 1;
          self.line += 1;
          self.line_start = self.pos;
        }
        return;
      }
      Some(_) => {}
    }
    self.at_line_start = false;
    let current = self.indents.last().copied().unwrap_or(0);
    if width > current {
      self.indents.push(width);
      self.simple_token(T::Indent, 0);
      return;
    }
    while width < self.indents.last().copied().unwrap_or(0) {
      self.indents.pop();
      self.simple_token(T::Dedent, 0);
    }
    if width != self.indents.last().copied().unwrap_or(0) {
      // dedent to a column no enclosing block opened at
      self.simple_token(T::Unknown, 0);
    }
  }

  fn next_token(&mut self) -> Token {
    let token = match self.src[self.pos] {
      b'(' => self.simple_token(T::LParen, 1),
      b')' => self.simple_token(T::RParen, 1),
      b'[' => self.simple_token(T::LBracket, 1),
      b']' => self.simple_token(T::RBracket, 1),
      b',' => self.simple_token(T::Comma, 1),
      b':' => self.simple_token(T::Colon, 1),
      b'%' => self.simple_token(T::Percent, 1),
      b'^' => self.simple_token(T::Caret, 1),
      b'+' if self.peek() == b'=' => self.simple_token(T::PlusEq, 2),
      b'+' => self.simple_token(T::Plus, 1),
      b'-' if self.peek() == b'=' => self.simple_token(T::MinusEq, 2),
      b'-' => self.simple_token(T::Minus, 1),
      b'*' if self.peek() == b'=' => self.simple_token(T::StarEq, 2),
      b'*' => self.simple_token(T::Star, 1),
      b'/' if self.peek() == b'=' => self.simple_token(T::SlashEq, 2),
      b'/' => self.simple_token(T::Slash, 1),
      b'|' if self.peek() == b'|' => self.simple_token(T::OrOr, 2),
      b'|' => self.simple_token(T::Pipe, 1),
      b'&' if self.peek() == b'&' => self.simple_token(T::AndAnd, 2),
      b'&' => self.simple_token(T::Amp, 1),
      b'<' if self.peek() == b'=' => self.simple_token(T::LtEq, 2),
      b'<' => self.simple_token(T::Lt, 1),
      b'>' if self.peek() == b'=' => self.simple_token(T::GtEq, 2),
      b'>' => self.simple_token(T::Gt, 1),
      b'=' if self.peek() == b'=' => self.simple_token(T::EqEq, 2),
      b'=' => self.simple_token(T::Assign, 1),
      b'!' if self.peek() == b'=' => self.simple_token(T::NotEq, 2),
      b'.' if self.peek() == b'.' => match self.src.get(self.pos + 2) {
        Some(b'=') => self.simple_token(T::DotDotEq, 3),
        Some(b'<') => self.simple_token(T::DotDotLt, 3),
        _ => self.simple_token(T::DotDot, 2),
      },
      b'.' => self.simple_token(T::Dot, 1),
      b'"' => self.str_lit(),
      b if b.is_ascii_digit() => self.number(),
      b if b.is_ascii_alphabetic() || b == b'_' => self.ident(),
      _ => self.simple_token(T::Unknown, 1),
    };
    trace!(kind = ?token.kind, line = token.loc.line, "token");
    token
  }

  fn simple_token(&mut self, kind: TokenKind, len: usize) -> Token {
    let token = Token::new(kind, self.loc(len));
    self.pos += len;
    self.tokens.push(token);
    token
  }

  fn push(&mut self, kind: TokenKind, start: usize, payload: Payload) -> Token {
    let len = (self.pos - start).min(u16::MAX as usize) as u16;
    let col = (start - self.line_start) as u32 + 1;
    let loc = SrcLoc::new(start as u32, self.line, col, len);
    let token = Token::with_payload(kind, loc, payload);
    self.tokens.push(token);
    token
  }

  fn str_lit(&mut self) -> Token {
    let start = self.pos;
    self.pos += 1; // "
    let mut value = Vec::new();
    loop {
      match self.src.get(self.pos) {
        None | Some(b'\n') => return self.push(T::Unknown, start, Payload::None),
        Some(b'"') => break,
        Some(b'\\') => {
          let escaped = match self.src.get(self.pos + 1) {
            Some(b'n') => b'\n',
            Some(b't') => b'\t',
            Some(b'\\') => b'\\',
            Some(b'"') => b'"',
            _ => {
              self.pos += 1;
              return self.push(T::Unknown, start, Payload::None);
            }
          };
          value.push(escaped);
          self.pos += 2;
        }
        Some(byte) => {
          value.push(*byte);
          self.pos += 1;
        }
      }
    }
    self.pos += 1; // "
    match String::from_utf8(value) {
      Ok(value) => {
        let index = self.strings.intern(&value);
        self.push(T::StrLit, start, Payload::Str(index))
      }
      Err(_) => self.push(T::Unknown, start, Payload::None),
    }
  }

  fn number(&mut self) -> Token {
    let start = self.pos;
    self.skip_digits();
    let is_float = self.src.get(self.pos) == Some(&b'.')
      && self.src.get(self.pos + 1).is_some_and(u8::is_ascii_digit);
    if is_float {
      self.pos += 1;
      self.skip_digits();
    }
    // SAFETY: we only consumed ascii digits and `.`
    let lexeme = unsafe { std::str::from_utf8_unchecked(&self.src[start..self.pos]) };
    let (kind, payload) = if is_float {
      match lexeme.parse::<f64>() {
        Ok(value) => (T::FloatLit, Payload::Float(value.to_bits())),
        Err(_) => (T::Unknown, Payload::None),
      }
    } else {
      match lexeme.parse::<u64>() {
        Ok(value) => (T::IntLit, Payload::Int(value)),
        Err(_) => (T::Unknown, Payload::None),
      }
    };
    self.push(kind, start, payload)
  }

  fn ident(&mut self) -> Token {
    let start = self.pos;
    while !self.eof() && (self.src[self.pos].is_ascii_alphanumeric() || self.src[self.pos] == b'_') {
      self.pos += 1;
    }
    // SAFETY: identifiers are ascii alphanumerics and `_`
    let lexeme = unsafe { std::str::from_utf8_unchecked(&self.src[start..self.pos]) };
    match TokenKind::keyword(lexeme) {
      Some(kind) => self.push(kind, start, Payload::None),
      None => {
        let index = self.strings.intern(lexeme);
        self.push(T::Ident, start, Payload::Str(index))
      }
    }
  }

  fn skip_digits(&mut self) {
    while !self.eof() && self.src[self.pos].is_ascii_digit() {
      self.pos += 1;
    }
  }

  fn loc(&self, len: usize) -> SrcLoc {
    let col = (self.pos - self.line_start) as u32 + 1;
    SrcLoc::new(self.pos as u32, self.line, col, len as u16)
  }

  fn peek(&self) -> u8 {
    *self.src.get(self.pos + 1).unwrap_or(&0)
  }

  const fn eof(&self) -> bool {
    self.pos >= self.src.len()
  }
}
