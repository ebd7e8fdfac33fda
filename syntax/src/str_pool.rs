use crate::internal::*;
use rustc_hash::FxHashMap;

#[derive(Debug)]
pub struct StringPool {
  strs: Vec<Box<str>>,
  lookup: FxHashMap<Box<str>, idx::StrPool>,
}

impl StringPool {
  pub fn new() -> Self {
    let mut pool = Self {
      strs: Vec::with_capacity(64),
      lookup: FxHashMap::default(),
    };
    // index 0 is always the empty string
    pool.strs.push("".into());
    pool
  }

  pub const fn empty(&self) -> idx::StrPool {
    idx::StrPool::new(0)
  }

  pub fn intern(&mut self, s: &str) -> idx::StrPool {
    if s.is_empty() {
      return self.empty();
    }
    if let Some(index) = self.lookup.get(s) {
      return *index;
    }
    assert!(self.strs.len() < u32::MAX as usize);
    let index = idx::StrPool::new(self.strs.len() as u32);
    self.strs.push(s.into());
    self.lookup.insert(s.into(), index);
    index
  }

  pub fn get(&self, index: idx::StrPool) -> &str {
    self.strs.get(index.usize()).map_or("", |s| &**s)
  }

  pub fn len(&self) -> usize {
    self.strs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.strs.len() == 1
  }
}

impl Default for StringPool {
  fn default() -> Self {
    Self::new()
  }
}
