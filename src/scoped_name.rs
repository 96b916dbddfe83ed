//! Qualified names as an ordered list of `(identifier, scope-kind)` pairs
//! (spec.md §3.3).

use smallvec::SmallVec;
use crate::symbol::{Interner, Symbol};

/// The kind of a single scope level in a [`ScopedName`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScopeKind { None, Namespace, InlineNamespace, Class, Struct, Union, Enum }

impl ScopeKind {
  /// The restrictiveness ordering from spec.md §3.3: `Namespace < Class ≈
  /// Struct ≈ Union < Enum`. Returns `None` for `ScopeKind::None`, which
  /// does not participate in nesting restrictions.
  #[must_use] pub fn restrictiveness(self) -> Option<u8> {
    match self {
      ScopeKind::None => None,
      ScopeKind::Namespace | ScopeKind::InlineNamespace => Some(0),
      ScopeKind::Class | ScopeKind::Struct | ScopeKind::Union => Some(1),
      ScopeKind::Enum => Some(2),
    }
  }

  /// `true` if nesting `inner` inside `outer` would place a less-restrictive
  /// kind inside a more-restrictive one, which spec.md §3.3 forbids.
  #[must_use] pub fn nesting_violates(outer: Self, inner: Self) -> bool {
    match (outer.restrictiveness(), inner.restrictiveness()) {
      (Some(o), Some(i)) => i < o,
      _ => false,
    }
  }

  /// `true` if the same identifier was first recorded with `earlier` and is
  /// now being reused with `later`: always fine when equal, fine across the
  /// `Class ≈ Struct ≈ Union` equivalence class (spec.md §3.3), a conflict
  /// otherwise (spec.md §1: "enforces consistent scoping when the same
  /// qualified name reappears").
  #[must_use] pub fn redeclaration_conflicts(earlier: Self, later: Self) -> bool {
    if earlier == later { return false }
    match (earlier.restrictiveness(), later.restrictiveness()) {
      (Some(1), Some(1)) => false,
      _ => true,
    }
  }
}

/// One level of a [`ScopedName`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scope { pub ident: Symbol, pub kind: ScopeKind }

/// An ordered list of scopes from outermost to innermost (spec.md §3.3).
/// Most names are unqualified (one scope) or lightly nested, so a
/// `SmallVec` avoids heap allocation for the common case.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ScopedName(pub SmallVec<[Scope; 4]>);

impl ScopedName {
  #[must_use] pub fn unqualified(ident: Symbol) -> Self {
    Self(SmallVec::from_elem(Scope { ident, kind: ScopeKind::None }, 1))
  }

  #[must_use] pub fn is_empty(&self) -> bool { self.0.is_empty() }
  #[must_use] pub fn len(&self) -> usize { self.0.len() }

  /// Number of scopes (spec.md §4.4 `count_name`).
  #[must_use] pub fn count_name(&self) -> usize { self.len() }

  /// The innermost component.
  #[must_use] pub fn local_name(&self) -> Option<Symbol> { self.0.last().map(|s| s.ident) }

  /// Everything but the last component.
  #[must_use] pub fn scope_name(&self) -> &[Scope] {
    if self.0.is_empty() { &[] } else { &self.0[..self.0.len() - 1] }
  }

  /// `true` if the last two components share an identifier, i.e. this name
  /// denotes a constructor definition such as `Foo::Foo`.
  #[must_use] pub fn is_constructor(&self) -> bool {
    self.0.len() >= 2 && self.0[self.0.len() - 1].ident == self.0[self.0.len() - 2].ident
  }

  /// Structural equality ignoring nothing (scope kinds included), as opposed
  /// to [`crate::ast::equal`] which ignores scoped names entirely.
  #[must_use] pub fn structurally_eq(&self, other: &Self) -> bool { self == other }

  /// Lexicographic comparison by identifier text, outermost first.
  #[must_use] pub fn cmp_lexicographic(&self, other: &Self, interner: &Interner) -> std::cmp::Ordering {
    self.0.iter().map(|s| interner.resolve(s.ident))
      .cmp(other.0.iter().map(|s| interner.resolve(s.ident)))
  }

  /// `true` if `self` is a strict or non-strict prefix of `other`'s scopes.
  #[must_use] pub fn is_prefix_of(&self, other: &Self) -> bool {
    self.0.len() <= other.0.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
  }

  /// `true` if `self`'s scopes end with `other`'s scopes.
  #[must_use] pub fn is_suffix_of(&self, other: &Self) -> bool {
    self.0.len() <= other.0.len()
      && self.0.iter().rev().zip(other.0.iter().rev()).all(|(a, b)| a == b)
  }

  /// The longest common scope-prefix shared with `other`, used by
  /// [`crate::typedef_store::TypedefStore`]'s longest-prefix lookup.
  #[must_use] pub fn common_prefix_len(&self, other: &Self) -> usize {
    self.0.iter().zip(other.0.iter()).take_while(|(a, b)| a == b).count()
  }

  /// Like [`Self::common_prefix_len`] but compares identifiers only, not
  /// scope-kind: the conflicting-nesting check needs to find how many
  /// outer scopes name the same thing *before* deciding whether their
  /// kinds disagree, so it cannot use an equality that already factors
  /// kind in (spec.md §3.3, §8 "ScopedName ordering ... respected
  /// transitively").
  #[must_use] pub fn common_name_prefix_len(&self, other: &Self) -> usize {
    self.0.iter().zip(other.0.iter()).take_while(|(a, b)| a.ident == b.ident).count()
  }

  /// Check that re-declaring `self` nested inside the scopes already
  /// recorded by `existing` does not place a less-restrictive scope-kind
  /// inside a more restrictive one (spec.md §3.3).
  #[must_use] pub fn nesting_is_consistent(&self) -> bool {
    self.0.windows(2).all(|w| !ScopeKind::nesting_violates(w[0].kind, w[1].kind))
  }

  /// `true` if the local name matches either reserved-identifier pattern
  /// from spec.md §4.4.3: `_[A-Z_].*`, or (C++ only) `.*__.*`.
  #[must_use] pub fn is_reserved(&self, interner: &Interner, cpp: bool) -> bool {
    let Some(local) = self.local_name() else { return false };
    Self::is_reserved_ident(interner.resolve(local), cpp)
  }

  /// Like [`Self::is_reserved`] but tests a single already-resolved
  /// identifier rather than a whole name's local component, so callers can
  /// check every scope of a [`ScopedName`] in turn (spec.md §4.4.3: "*Any*
  /// scope identifier matching the reserved-name patterns").
  #[must_use] pub fn is_reserved_ident(s: &str, cpp: bool) -> bool {
    let leading = {
      let mut chars = s.chars();
      matches!(chars.next(), Some('_'))
        && matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_uppercase())
    };
    let double_underscore = cpp && s.as_bytes().windows(2).any(|w| w == b"__");
    leading || double_underscore
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sn(i: &mut Interner, names: &[(&str, ScopeKind)]) -> ScopedName {
    ScopedName(names.iter().map(|&(n, kind)| Scope { ident: i.intern(n), kind }).collect())
  }

  #[test] fn constructor_detection() {
    let mut i = Interner::new();
    let foo_foo = sn(&mut i, &[("Foo", ScopeKind::Class), ("Foo", ScopeKind::None)]);
    assert!(foo_foo.is_constructor());
    let foo_bar = sn(&mut i, &[("Foo", ScopeKind::Class), ("bar", ScopeKind::None)]);
    assert!(!foo_bar.is_constructor());
  }

  #[test] fn nesting_ordering() {
    assert!(ScopeKind::nesting_violates(ScopeKind::Class, ScopeKind::Namespace));
    assert!(!ScopeKind::nesting_violates(ScopeKind::Namespace, ScopeKind::Class));
    assert!(!ScopeKind::nesting_violates(ScopeKind::Class, ScopeKind::Enum));
  }

  #[test] fn reserved_identifiers() {
    let mut i = Interner::new();
    assert!(sn(&mut i, &[("_Foo", ScopeKind::None)]).is_reserved(&i, true));
    assert!(sn(&mut i, &[("__x", ScopeKind::None)]).is_reserved(&i, true));
    assert!(!sn(&mut i, &[("__x", ScopeKind::None)]).is_reserved(&i, false));
    assert!(!sn(&mut i, &[("ok_name", ScopeKind::None)]).is_reserved(&i, true));
  }

  #[test] fn prefix_and_common_prefix() {
    let mut i = Interner::new();
    let a = sn(&mut i, &[("ns", ScopeKind::Namespace), ("Foo", ScopeKind::Class)]);
    let b = sn(&mut i, &[("ns", ScopeKind::Namespace), ("Foo", ScopeKind::Class), ("bar", ScopeKind::None)]);
    assert!(a.is_prefix_of(&b));
    assert_eq!(a.common_prefix_len(&b), 2);
  }
}
