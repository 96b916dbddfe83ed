//! Persistent mapping from [`ScopedName`] to a canonical [`AstRef`]
//! (spec.md §4.7). Holds its own arena, independent of any in-flight parse
//! arena (spec.md §5): entries are immutable once inserted, so checker and
//! renderers may read them freely mid-parse.

use crate::ast::{Arena, AstRef};
use crate::dialect::DialectSet;
use crate::diag::{DiagKind, Diagnostic};
use crate::scoped_name::{ScopeKind, ScopedName};
use crate::span::SourceSpan;
use crate::symbol::Interner;
use crate::typebits::TypeBits;

struct Entry {
  sname: ScopedName,
  ast: AstRef,
}

/// What [`TypedefStore::show`] prints an entry as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowFormat { English, Gibberish }

/// Owns a persistent arena plus the ordered list of typedef names inserted
/// into it (spec.md §4.7).
#[derive(Default)]
pub struct TypedefStore {
  arena: Arena,
  entries: Vec<Entry>,
}

impl TypedefStore {
  #[must_use] pub fn new() -> Self { Self::default() }

  #[must_use] pub fn arena(&self) -> &Arena { &self.arena }
  pub fn arena_mut(&mut self) -> &mut Arena { &mut self.arena }

  /// Inserts `sname` pointing at `ast`, which must already live in
  /// [`TypedefStore::arena_mut`]. Fails if `sname` overlaps an existing
  /// entry at a scope prefix whose `ScopeKind` ordering it would violate
  /// (spec.md §3.3, §4.7).
  pub fn insert(&mut self, sname: ScopedName, ast: AstRef, loc: SourceSpan) -> Result<(), Diagnostic> {
    for existing in &self.entries {
      let shared = existing.sname.common_name_prefix_len(&sname);
      if shared == 0 { continue }
      for i in 0..shared {
        let (outer, inner) = (existing.sname.0[i].kind, sname.0[i].kind);
        if ScopeKind::redeclaration_conflicts(outer, inner) {
          return Err(Diagnostic::new(
            loc,
            DiagKind::IllegalRelation,
            "scope kind conflicts with earlier declaration of the same prefix",
          ));
        }
      }
    }
    self.entries.push(Entry { sname, ast });
    Ok(())
  }

  #[must_use] pub fn lookup(&self, sname: &ScopedName) -> Option<AstRef> {
    self.entries.iter().find(|e| &e.sname == sname).map(|e| e.ast)
  }

  /// The entry whose scopes share the longest prefix with `sname`.
  #[must_use] pub fn lookup_longest_prefix(&self, sname: &ScopedName) -> Option<(&ScopedName, AstRef)> {
    self.entries.iter()
      .map(|e| (e.sname.common_prefix_len(sname), e))
      .filter(|(len, _)| *len > 0)
      .max_by_key(|(len, _)| *len)
      .map(|(_, e)| (&e.sname, e.ast))
  }

  /// Entries in insertion order whose local name matches `glob` (a `*`/`?`
  /// shell-style pattern) and whose legality includes `dialect_filter`,
  /// rendered per `format` (spec.md §4.7).
  #[must_use] pub fn show<'a>(
    &'a self,
    glob: &'a str,
    dialect_filter: DialectSet,
    format: ShowFormat,
    interner: &'a Interner,
  ) -> impl Iterator<Item = (&'a ScopedName, AstRef, ShowFormat)> + 'a {
    self.entries.iter()
      .filter(move |e| {
        e.sname.local_name().is_some_and(|s| glob_match(glob, interner.resolve(s)))
          && dialect_filter.is_subset(TypeBits::check(self.arena.get(e.ast).typ))
      })
      .map(move |e| (&e.sname, e.ast, format))
  }
}

/// Minimal shell-style glob: `*` (any run of characters) and `?` (exactly
/// one character), anchored at both ends. No crate in the teacher's stack
/// provides this, and the alphabet is small enough to hand-roll.
#[must_use] pub fn glob_match(pattern: &str, text: &str) -> bool {
  fn go(p: &[u8], t: &[u8]) -> bool {
    match p.first() {
      None => t.is_empty(),
      Some(b'*') => go(&p[1..], t) || (!t.is_empty() && go(p, &t[1..])),
      Some(b'?') => !t.is_empty() && go(&p[1..], &t[1..]),
      Some(&c) => t.first() == Some(&c) && go(&p[1..], &t[1..]),
    }
  }
  go(pattern.as_bytes(), text.as_bytes())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn glob_basic() {
    assert!(glob_match("foo*", "foobar"));
    assert!(glob_match("*bar", "foobar"));
    assert!(glob_match("f?o", "foo"));
    assert!(!glob_match("f?o", "fooo"));
    assert!(glob_match("*", "anything"));
  }

  #[test] fn insert_rejects_conflicting_nesting() {
    use crate::ast::AstKind;
    use crate::scoped_name::Scope;
    use crate::symbol::Interner;
    let mut interner = Interner::new();
    let mut store = TypedefStore::new();
    let ns = interner.intern("ns");
    let inner_name = interner.intern("X");
    let a1 = store.arena_mut().new_node(AstKind::Placeholder, 0, SourceSpan::synthetic());
    let outer = ScopedName(smallvec::smallvec![
      Scope { ident: ns, kind: ScopeKind::Namespace },
      Scope { ident: inner_name, kind: ScopeKind::None },
    ]);
    store.insert(outer, a1, SourceSpan::synthetic()).unwrap();

    let a2 = store.arena_mut().new_node(AstKind::Placeholder, 0, SourceSpan::synthetic());
    let conflicting = ScopedName(smallvec::smallvec![
      Scope { ident: ns, kind: ScopeKind::Class },
      Scope { ident: inner_name, kind: ScopeKind::None },
    ]);
    assert!(store.insert(conflicting, a2, SourceSpan::synthetic()).is_err());
  }
}
