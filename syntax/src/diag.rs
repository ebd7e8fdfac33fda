use crate::internal::{TokenKind as T, *};

/// How a syntax error presents to the user. Every class is reported
/// through the single `ParseError::UnexpectedToken` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  UnexpectedToken,
  /// a block-start without its block-end, or the reverse
  UnbalancedBlock,
  /// the stream ended mid-production
  IncompleteInput,
  /// valid input nested deeper than the parser follows
  NestingLimit,
}

impl ParseError {
  pub const fn class(&self) -> ErrorClass {
    let ParseError::UnexpectedToken { expected, found, .. } = *self;
    let expected_marker = matches!(expected, Expected::Token(T::Indent | T::Dedent));
    if matches!(expected, Expected::ShallowerNesting) {
      ErrorClass::NestingLimit
    } else if found.is_block_marker() || expected_marker {
      ErrorClass::UnbalancedBlock
    } else if matches!(found, T::Eof) {
      ErrorClass::IncompleteInput
    } else {
      ErrorClass::UnexpectedToken
    }
  }

  pub const fn loc(&self) -> SrcLoc {
    let ParseError::UnexpectedToken { loc, .. } = *self;
    loc
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub line: u32,
  pub col: u32,
  pub width: u32,
  pub msg: String,
}

impl Diagnostic {
  /// The offending source line with the error underlined.
  pub fn render(&self, src: &str) -> String {
    let line = src.lines().nth(self.line.saturating_sub(1) as usize).unwrap_or("");
    let gutter = self.line.to_string();
    let pad = " ".repeat(gutter.len());
    let indent = " ".repeat(self.col.saturating_sub(1) as usize);
    let carets = "^".repeat(self.width as usize);
    format!("error: {}\n{pad} |\n{gutter} | {line}\n{pad} | {indent}{carets}", self.msg)
  }
}

impl From<&ParseError> for Diagnostic {
  fn from(err: &ParseError) -> Self {
    let ParseError::UnexpectedToken { expected, found, loc } = *err;
    let msg = match err.class() {
      ErrorClass::UnexpectedToken => format!("expected {expected}, found {found}"),
      ErrorClass::UnbalancedBlock => {
        format!("unbalanced block: expected {expected}, found {found}")
      }
      ErrorClass::IncompleteInput => format!("unexpected end of input, expected {expected}"),
      ErrorClass::NestingLimit => format!("nested too deeply, expected {expected}"),
    };
    Diagnostic {
      line: loc.line,
      col: loc.col,
      width: u32::from(loc.len).max(1),
      msg,
    }
  }
}

impl From<ParseError> for Diagnostic {
  fn from(err: ParseError) -> Self {
    Diagnostic::from(&err)
  }
}

impl std::fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}: {}", self.line, self.col, self.msg)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn error(expected: Expected, found: TokenKind, loc: SrcLoc) -> ParseError {
    ParseError::UnexpectedToken { expected, found, loc }
  }

  #[test]
  fn classifies_errors() {
    let loc = SrcLoc::default();
    assert_eq!(
      error(Expected::Token(T::Dedent), T::Eof, loc).class(),
      ErrorClass::UnbalancedBlock
    );
    assert_eq!(
      error(Expected::Statement, T::Dedent, loc).class(),
      ErrorClass::UnbalancedBlock
    );
    assert_eq!(
      error(Expected::Expression, T::Eof, loc).class(),
      ErrorClass::IncompleteInput
    );
    assert_eq!(
      error(Expected::Token(T::Colon), T::Newline, loc).class(),
      ErrorClass::UnexpectedToken
    );
  }

  #[test]
  fn names_expected_and_found() {
    let err = error(Expected::Token(T::Colon), T::Newline, SrcLoc::new(4, 1, 5, 1));
    let diag = Diagnostic::from(&err);
    assert_eq!(
      diag,
      Diagnostic {
        line: 1,
        col: 5,
        width: 1,
        msg: "expected `:`, found newline".to_string(),
      }
    );
    assert_eq!(diag.to_string(), "1:5: expected `:`, found newline");
    assert_eq!(err.to_string(), "expected `:`, found newline at 1:5");
  }

  #[test]
  fn zero_width_tokens_still_underline() {
    let err = error(Expected::Token(T::Dedent), T::Eof, SrcLoc::new(9, 2, 3, 0));
    let diag = Diagnostic::from(err);
    assert_eq!(diag.width, 1);
    assert_eq!(diag.msg, "unbalanced block: expected block end, found end of input");
  }

  #[test]
  fn nesting_limit_wins_over_block_markers() {
    let loc = SrcLoc::new(40, 3, 5, 0);
    let err = error(Expected::ShallowerNesting, T::Indent, loc);
    assert_eq!(err.class(), ErrorClass::NestingLimit);
    assert_eq!(err.loc(), loc);
    assert_eq!(
      Diagnostic::from(err).msg,
      format!("nested too deeply, expected at most {MAX_DEPTH} levels of nesting")
    );
  }

  #[test]
  fn loc_points_at_the_offending_token() {
    let loc = SrcLoc::new(12, 2, 3, 4);
    assert_eq!(error(Expected::Statement, T::Break, loc).loc(), loc);
  }

  #[test]
  fn incomplete_input_message() {
    let diag = Diagnostic::from(error(Expected::Expression, T::Eof, SrcLoc::new(8, 1, 9, 0)));
    assert_eq!(diag.msg, "unexpected end of input, expected expression");
  }

  #[test]
  fn renders_source_line_with_carets() {
    let src = "i32 x = 1\nbool ok = x 2\n";
    let diag = Diagnostic {
      line: 2,
      col: 13,
      width: 1,
      msg: "expected newline, found integer literal".to_string(),
    };
    assert_eq!(
      diag.render(src),
      "error: expected newline, found integer literal\n  |\n2 | bool ok = x 2\n  |             ^"
    );
  }
}
