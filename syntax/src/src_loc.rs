#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SrcLoc {
  pub offset: u32,
  pub line: u32,
  pub col: u32,
  pub len: u16,
}

impl SrcLoc {
  pub const fn new(offset: u32, line: u32, col: u32, len: u16) -> Self {
    SrcLoc { offset, line, col, len }
  }
}
