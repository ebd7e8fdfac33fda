use crate::internal::{TokenKind as T, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
  Public,
  Private,
  Protected,
  Const,
  External,
  Dynamic,
  Static,
}

impl Modifier {
  /// Canonical order, used when re-deriving tokens from a set.
  pub const ALL: [Modifier; 7] = [
    Modifier::Public,
    Modifier::Private,
    Modifier::Protected,
    Modifier::Const,
    Modifier::External,
    Modifier::Dynamic,
    Modifier::Static,
  ];

  pub const fn from_token(kind: TokenKind) -> Option<Modifier> {
    match kind {
      T::Public => Some(Modifier::Public),
      T::Private => Some(Modifier::Private),
      T::Protected => Some(Modifier::Protected),
      T::Const => Some(Modifier::Const),
      T::External => Some(Modifier::External),
      T::Dynamic => Some(Modifier::Dynamic),
      T::Static => Some(Modifier::Static),
      _ => None,
    }
  }

  pub const fn token(self) -> TokenKind {
    match self {
      Modifier::Public => T::Public,
      Modifier::Private => T::Private,
      Modifier::Protected => T::Protected,
      Modifier::Const => T::Const,
      Modifier::External => T::External,
      Modifier::Dynamic => T::Dynamic,
      Modifier::Static => T::Static,
    }
  }
}

#[bitsize(8)]
#[derive(FromBits, DebugBits, Clone, Copy, Eq, PartialEq)]
pub struct ModifierSet {
  pub public: bool,
  pub private: bool,
  pub protected: bool,
  pub constant: bool,
  pub external: bool,
  pub dynamic: bool,
  pub storage: bool,
  pub reserved: u1,
}

impl ModifierSet {
  pub fn empty() -> Self {
    Self::from(0u8)
  }

  pub fn of(modifiers: &[Modifier]) -> Self {
    let mut set = Self::empty();
    for modifier in modifiers {
      set.insert(*modifier);
    }
    set
  }

  /// Repeated modifiers collapse; no semantic checks happen here.
  pub fn insert(&mut self, modifier: Modifier) {
    match modifier {
      Modifier::Public => self.set_public(true),
      Modifier::Private => self.set_private(true),
      Modifier::Protected => self.set_protected(true),
      Modifier::Const => self.set_constant(true),
      Modifier::External => self.set_external(true),
      Modifier::Dynamic => self.set_dynamic(true),
      Modifier::Static => self.set_storage(true),
    }
  }

  pub fn contains(&self, modifier: Modifier) -> bool {
    match modifier {
      Modifier::Public => self.public(),
      Modifier::Private => self.private(),
      Modifier::Protected => self.protected(),
      Modifier::Const => self.constant(),
      Modifier::External => self.external(),
      Modifier::Dynamic => self.dynamic(),
      Modifier::Static => self.storage(),
    }
  }

  pub fn is_empty(&self) -> bool {
    u8::from(*self) == 0
  }

  pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
    Modifier::ALL.into_iter().filter(|modifier| self.contains(*modifier))
  }
}

impl Default for ModifierSet {
  fn default() -> Self {
    Self::empty()
  }
}
