//! Interned identifiers.
//!
//! Scoped names, the operator table, and the reserved-identifier checks all
//! compare identifiers far more often than they print them, so we intern
//! once and compare `u32`s everywhere else, following the same shape as the
//! teacher's `mm0_util::{Symbol, Interner}` used throughout `build_mir.rs`.

use hashbrown::HashMap;
use std::fmt;

/// An interned identifier. `Copy`, `Eq`, `Hash` on the index alone.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
  /// The raw index into the owning [`Interner`]'s table.
  #[must_use] pub fn into_usize(self) -> usize { self.0 as usize }
}

impl fmt::Debug for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Symbol({})", self.0) }
}

/// Owns the backing string table for [`Symbol`]s.
#[derive(Default)]
pub struct Interner {
  strings: Vec<Box<str>>,
  map: HashMap<Box<str>, Symbol>,
}

impl Interner {
  /// Create an empty interner.
  #[must_use] pub fn new() -> Self { Self::default() }

  /// Intern `s`, returning the existing `Symbol` if already present.
  pub fn intern(&mut self, s: &str) -> Symbol {
    if let Some(&sym) = self.map.get(s) { return sym }
    let sym = Symbol(u32::try_from(self.strings.len()).expect("too many symbols"));
    self.strings.push(s.into());
    self.map.insert(s.into(), sym);
    sym
  }

  /// Resolve a `Symbol` back to its text.
  #[must_use] pub fn resolve(&self, sym: Symbol) -> &str { &self.strings[sym.into_usize()] }

  /// Build a dense `sym -> T` lookup table, for cases (like the operator
  /// table) where every interesting symbol is known up front.
  pub fn init_dense_map<T: Copy>(&self, pairs: &[(Symbol, T)]) -> Box<[Option<T>]> {
    let len = pairs.iter().map(|(s, _)| s.into_usize()).max().map_or(0, |n| n + 1)
      .max(self.strings.len());
    let mut map = vec![None; len].into_boxed_slice();
    for &(s, v) in pairs { map[s.into_usize()] = Some(v); }
    map
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn interning_dedupes() {
    let mut i = Interner::new();
    let a = i.intern("foo");
    let b = i.intern("bar");
    let c = i.intern("foo");
    assert_eq!(a, c);
    assert_ne!(a, b);
    assert_eq!(i.resolve(a), "foo");
    assert_eq!(i.resolve(b), "bar");
  }
}
