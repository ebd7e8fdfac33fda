/// Interned lexeme, resolved through the owning `StringPool`.
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub struct StrPool(u32);

impl StrPool {
  pub const fn new(idx: u32) -> Self {
    Self(idx)
  }

  pub const fn usize(&self) -> usize {
    self.0 as usize
  }
}

impl std::fmt::Debug for StrPool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "idx::StrPool({})", self.0)
  }
}
