//! Warnings pass (spec.md §4.4.3). Never aborts: every warning is pushed and
//! traversal continues, visiting leaves as well as the root (spec.md §7:
//! "leaves inclusive for warnings").

use crate::ast::{Arena, AstKind, AstRef};
use crate::context::Context;
use crate::dialect::{Dialect::*, DialectSet, Family, LangMatrix};
use crate::diag::{DiagKind, Diagnostic, Diagnostics};
use crate::typebits::{Attr, Store};

pub(super) fn check(arena: &Arena, ctx: &Context, root: AstRef, diags: &mut Diagnostics) {
  walk(arena, ctx, root, diags);
}

fn walk(arena: &Arena, ctx: &Context, ast: AstRef, diags: &mut Diagnostics) {
  check_node(arena, ctx, ast, diags);
  let node = arena.get(ast);
  if let Some(child) = node.kind.child_of() {
    walk(arena, ctx, child, diags);
  }
  for &p in node.kind.params() {
    walk(arena, ctx, p, diags);
  }
  if let AstKind::Typedef { for_ast, .. } = &node.kind {
    walk(arena, ctx, for_ast.0, diags);
  }
}

fn check_node(arena: &Arena, ctx: &Context, ast: AstRef, diags: &mut Diagnostics) {
  let node = arena.get(ast);
  let loc = node.loc;
  let dialect = ctx.current_dialect();

  // User-defined literals whose local name does not start with `_` are reserved.
  if let AstKind::UserDefLiteral { .. } = &node.kind {
    let starts_with_underscore = node.sname.local_name()
      .is_some_and(|s| ctx.interner.resolve(s).starts_with('_'));
    if !starts_with_underscore {
      diags.push(Diagnostic::new(loc, DiagKind::ReservedIdent,
        "user-defined literal suffixes not beginning with '_' are reserved for the standard library"));
    }
  }

  // `[[nodiscard]]` on a void-returning function.
  if node.typ.attr.contains(Attr::NODISCARD) {
    let returns_void = match &node.kind {
      AstKind::Function { ret_ast, .. } | AstKind::Operator { ret_ast, .. } =>
        ret_ast.is_none_or(|r| arena.get(r).typ.base == crate::typebits::Base::VOID),
      _ => false,
    };
    if returns_void {
      diags.push(Diagnostic::new(loc, DiagKind::DeprecatedFeature,
        "[[nodiscard]] on a function returning void has no effect"));
    }
  }

  // `register` in C++11+ is deprecated.
  if node.typ.store.contains(Store::REGISTER) {
    let cpp11_up = DialectSet::from_dialects([Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]);
    if cpp11_up.contains(dialect) {
      diags.push(Diagnostic::new(loc, DiagKind::DeprecatedFeature, "register is deprecated since C++11"));
    }
  }

  // `throw` spec: deprecated in C++11+, an error (suggesting noexcept) in C++20+.
  if node.typ.store.contains(Store::THROW) {
    let cpp20_up = DialectSet::from_dialects([Cpp20, Cpp23]);
    let cpp11_up = DialectSet::from_dialects([Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]);
    if cpp20_up.contains(dialect) {
      diags.push(Diagnostic::new(loc, DiagKind::NotSupported,
        "dynamic exception specifications were removed in C++20")
        .with_hint("did you mean noexcept?"));
    } else if cpp11_up.contains(dialect) {
      diags.push(Diagnostic::new(loc, DiagKind::DeprecatedFeature,
        "dynamic exception specifications are deprecated since C++11")
        .with_hint("did you mean noexcept?"));
    }
  }

  // K&R-style missing type specifier (implicit int) in C89+.
  if let AstKind::Builtin { .. } = &node.kind {
    let c89_up = DialectSet::from_dialects([C89, C95, C99, C11, C17, C23]);
    if node.typ.base.is_empty() && !node.typ.store.contains(Store::TYPEDEF) && c89_up.contains(dialect) && dialect != KnrC {
      diags.push(Diagnostic::new(loc, DiagKind::DeprecatedFeature,
        "missing type specifier, implicit \"int\" is a K&R-ism"));
    }
  }

  // Reserved-identifier and keyword-in-other-dialect checks, once per scope
  // component of this node's name.
  for scope in &node.sname.0 {
    let text = ctx.interner.resolve(scope.ident);
    let is_cpp = dialect.family() == Family::Cpp;
    if crate::scoped_name::ScopedName::is_reserved_ident(text, is_cpp) {
      let family = if is_cpp { "C++" } else { "C" };
      diags.push(Diagnostic::new(loc, DiagKind::ReservedIdent,
        format!("'{text}' is reserved for the implementation in {family}")));
    }
    if let Some(kw_dialects) = keyword_dialects(text) {
      if !kw_dialects.contains(dialect) {
        if let Some(oldest) = LangMatrix::oldest(kw_dialects) {
          diags.push(Diagnostic::new(loc, DiagKind::ReservedIdent,
            format!("'{text}' is a keyword in {}", oldest.name())));
        }
      }
    }
  }
}

/// A small sample of the keyword table: dialects in which `text` is a
/// reserved word, for the "is a keyword in a dialect not currently
/// selected" warning (spec.md §4.4.3). Not exhaustive — a full keyword
/// table belongs to the external lexer, which already rejects keywords
/// used as identifiers in its own dialect; this crate only needs enough
/// to warn about *other* dialects' keywords appearing as plain names.
fn keyword_dialects(text: &str) -> Option<DialectSet> {
  let cpp11_up = DialectSet::from_dialects([Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]);
  let cpp_all = DialectSet::from_dialects([Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]);
  let c23 = DialectSet::single(C23);
  match text {
    "alignas" | "alignof" | "static_assert" | "thread_local" => cpp11_up.union(c23),
    "nullptr" => cpp11_up,
    "class" | "template" | "namespace" | "typename" | "new" | "delete" | "this" | "virtual"
    | "explicit" | "friend" | "mutable" | "operator" | "try" | "catch" | "throw" | "using"
    | "public" | "private" | "protected" => cpp_all,
    "bool" | "true" | "false" => {
      let c99_up = DialectSet::from_dialects([C99, C11, C17, C23]);
      cpp_all.union(c99_up)
    }
    "restrict" | "_Complex" | "_Imaginary" => DialectSet::from_dialects([C99, C11, C17, C23]),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::AstKind;
  use crate::context::{Context, Options};
  use crate::scoped_name::{Scope, ScopeKind, ScopedName};
  use crate::span::SourceSpan;
  use crate::typebits::Base;

  #[test] fn register_deprecated_in_cpp11() {
    let mut arena = Arena::new();
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::INT;
    arena.get_mut(r).typ.store = Store::REGISTER;
    let ctx = Context::new(Cpp11, Options::default());
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, r, &mut diags);
    assert!(diags.warnings().any(|d| d.message.contains("register")));
    assert!(!diags.has_errors());
  }

  #[test] fn reserved_identifier_warns() {
    let mut arena = Arena::new();
    let mut ctx = Context::new(Cpp17, Options::default());
    let sym = ctx.interner.intern("_Reserved");
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::INT;
    arena.get_mut(r).sname = ScopedName(smallvec::smallvec![Scope { ident: sym, kind: ScopeKind::None }]);
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, r, &mut diags);
    assert!(diags.warnings().any(|d| d.kind == DiagKind::ReservedIdent));
  }

  #[test] fn reserved_check_is_per_scope_not_whole_name() {
    let mut arena = Arena::new();
    let mut ctx = Context::new(Cpp17, Options::default());

    // `ns::_Foo`: only `_Foo` is reserved, `ns` must not be flagged.
    let ns = ctx.interner.intern("ns");
    let foo = ctx.interner.intern("_Foo");
    let r1 = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r1).typ.base = Base::INT;
    arena.get_mut(r1).sname = ScopedName(smallvec::smallvec![
      Scope { ident: ns, kind: ScopeKind::Namespace },
      Scope { ident: foo, kind: ScopeKind::None },
    ]);
    let mut diags1 = Diagnostics::new();
    check(&arena, &ctx, r1, &mut diags1);
    let messages: Vec<&str> = diags1.warnings().filter(|d| d.kind == DiagKind::ReservedIdent)
      .map(|d| d.message.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains("_Foo")));
    assert!(!messages.iter().any(|m| m.contains("'ns'")));

    // `_Outer::bar`: the outer scope is reserved even though the local name isn't.
    let outer = ctx.interner.intern("_Outer");
    let bar = ctx.interner.intern("bar");
    let r2 = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r2).typ.base = Base::INT;
    arena.get_mut(r2).sname = ScopedName(smallvec::smallvec![
      Scope { ident: outer, kind: ScopeKind::Namespace },
      Scope { ident: bar, kind: ScopeKind::None },
    ]);
    let mut diags2 = Diagnostics::new();
    check(&arena, &ctx, r2, &mut diags2);
    assert!(diags2.warnings().any(|d| d.kind == DiagKind::ReservedIdent && d.message.contains("_Outer")));
  }

  #[test] fn throw_spec_is_error_in_cpp20() {
    let mut arena = Arena::new();
    let func = arena.new_node(
      AstKind::Function { ret_ast: None, params: vec![], flags: crate::ast::MemberFlags::default() },
      0, SourceSpan::synthetic(),
    );
    arena.get_mut(func).typ.store = Store::THROW;
    let ctx = Context::new(Cpp20, Options::default());
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, func, &mut diags);
    assert!(diags.has_errors());
  }
}
