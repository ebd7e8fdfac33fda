pub mod ast;
pub mod diag;
pub mod idx;
pub mod lexer;
pub mod parser;
pub mod prec;
pub mod src_loc;
pub mod str_pool;
pub mod stream;
pub mod token;

pub mod internal {
  pub use crate::ast::*;
  pub use crate::diag::*;
  pub use crate::idx;
  pub use crate::lexer::*;
  pub use crate::parser::*;
  pub use crate::prec::*;
  pub use crate::src_loc::*;
  pub use crate::str_pool::*;
  pub use crate::stream::*;
  pub use crate::token::*;
  pub use bilge::prelude::*;
  pub use tracing::{debug, instrument, trace};
}

use internal::*;

/// Parses a whole program from any token source.
pub fn parse<S: TokenStream>(stream: S) -> Result<Program, ParseError> {
  Parser::new(stream).parse()
}

/// Lexes and parses `src`, turning a failure into a printable diagnostic.
pub fn parse_str(src: &str) -> Result<Program, Diagnostic> {
  parse(Lexer::new_str(src).lex()).map_err(Diagnostic::from)
}
