//! Type-legality pass (spec.md §4.4.2): runs [`TypeBits::check`] on every
//! node and reports dialect mismatches, plus a handful of cross-kind checks
//! that only make sense once every node's own bits are known to be legal.

use crate::ast::{Arena, AstKind, AstRef};
use crate::context::Context;
use crate::dialect::{Dialect::*, DialectSet, LangMatrix};
use crate::diag::{DiagKind, Diagnostic, Diagnostics};
use crate::typebits::{Attr, Base, Store, TypeBits};

pub(super) fn check(arena: &Arena, ctx: &Context, root: AstRef, diags: &mut Diagnostics) {
  let mut aborted = false;
  walk(arena, ctx, root, false, diags, &mut aborted);
}

fn err(diags: &mut Diagnostics, aborted: &mut bool, d: Diagnostic) { diags.push(d); *aborted = true; }

/// The word used in `"'X' is illegal for <kind>"` messages (spec.md §4.4.2).
fn kind_word(kind: &AstKind) -> &'static str {
  match kind {
    AstKind::Placeholder => "declaration",
    AstKind::Name => "name",
    AstKind::Variadic => "\"...\"",
    AstKind::Builtin { .. } => "variable",
    AstKind::Typedef { .. } => "typedef",
    AstKind::Array { .. } => "array",
    AstKind::Pointer { .. } => "pointer",
    AstKind::Reference { .. } => "reference",
    AstKind::RvalueReference { .. } => "rvalue reference",
    AstKind::PointerToMember { .. } => "pointer to member",
    AstKind::Function { .. } => "function",
    AstKind::AppleBlock { .. } => "block",
    AstKind::Operator { .. } => "operator",
    AstKind::Constructor { .. } => "constructor",
    AstKind::Destructor { .. } => "destructor",
    AstKind::UserDefConversion { .. } => "user-defined conversion operator",
    AstKind::UserDefLiteral { .. } => "user-defined literal",
    AstKind::ClassStructUnion { .. } => "class/struct/union",
    AstKind::Enum { .. } => "enum",
    AstKind::Lambda { .. } => "lambda",
    AstKind::Cast { .. } => "cast",
  }
}

fn walk(arena: &Arena, ctx: &Context, ast: AstRef, in_params: bool, diags: &mut Diagnostics, aborted: &mut bool) {
  if *aborted { return }
  check_node(arena, ctx, ast, in_params, diags, aborted);
  if *aborted { return }
  let node = arena.get(ast);
  if let Some(child) = node.kind.child_of() {
    walk(arena, ctx, child, false, diags, aborted);
  }
  for &p in node.kind.params() {
    walk(arena, ctx, p, true, diags, aborted);
    if *aborted { return }
  }
  // Typedef referrers are immutable once stored and already passed the
  // checker at definition time; re-checking would double-report.
}

fn check_node(arena: &Arena, ctx: &Context, ast: AstRef, in_params: bool, diags: &mut Diagnostics, aborted: &mut bool) {
  let node = arena.get(ast);
  let loc = node.loc;
  let dialect = ctx.current_dialect();
  let legal = TypeBits::check(node.typ);

  if legal.is_empty() {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
      format!("'{}' is illegal for {}", TypeBits::name_c(node.typ, ctx.options.east_const), kind_word(&node.kind))));
    return;
  }
  if !legal.contains(dialect) {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
      format!("'{}' is illegal{}", TypeBits::name_c(node.typ, ctx.options.east_const), LangMatrix::which_phrase(legal))));
    return;
  }

  // `constexpr` function returning `void` is illegal before C++14.
  if node.typ.store.contains(Store::CONSTEXPR) {
    if let AstKind::Function { ret_ast, .. } | AstKind::Operator { ret_ast, .. } = &node.kind {
      let returns_void = ret_ast.is_none_or(|r| arena.get(r).typ.base == Base::VOID);
      let cpp14_up = DialectSet::from_dialects([Cpp14, Cpp17, Cpp20, Cpp23]);
      if returns_void && !cpp14_up.contains(dialect) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
          "a constexpr function returning void is not supported before C++14"));
        return;
      }
    }
  }

  // `[[carries_dependency]]` only on functions/operators and their parameters.
  if node.typ.attr.contains(Attr::CARRIES_DEPENDENCY) && !node.kind.is_function_like() && !in_params {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
      "[[carries_dependency]] is only legal on functions and their parameters"));
    return;
  }

  // `[[noreturn]]` only on functions.
  if node.typ.attr.contains(Attr::NORETURN) && !node.kind.is_function_like() {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
      "[[noreturn]] is only legal on functions"));
    return;
  }

  // `restrict` only on function, operator, reference, rvalue reference,
  // user-defined conversion, and pointer kinds.
  if node.typ.store.contains(Store::RESTRICT) {
    let ok = matches!(node.kind,
      AstKind::Function { .. } | AstKind::Operator { .. } | AstKind::Reference { .. }
      | AstKind::RvalueReference { .. } | AstKind::UserDefConversion { .. } | AstKind::Pointer { .. });
    if !ok {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
        format!("restrict is illegal for {}", kind_word(&node.kind))));
      return;
    }
  }

  // `_BitInt(0)` has no legal width; the specifier requires a positive bit count.
  if let AstKind::Builtin { bit_int_width: Some(0), .. } = &node.kind {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
      "_BitInt(0) is illegal, bit-precise integers require a width of at least 1"));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::{Arena, MemberFlags};
  use crate::context::{Context, Options};
  use crate::span::SourceSpan;

  fn ctx(d: crate::dialect::Dialect) -> Context { Context::new(d, Options::default()) }

  #[test] fn long_long_rejected_before_c99() {
    let mut arena = Arena::new();
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::LONG_LONG | Base::INT;
    let ctx = ctx(C89);
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, r, &mut diags);
    assert!(diags.has_errors());
  }

  #[test] fn long_long_accepted_in_c99() {
    let mut arena = Arena::new();
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::LONG_LONG | Base::INT;
    let ctx = ctx(C99);
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, r, &mut diags);
    assert!(!diags.has_errors());
  }

  #[test] fn noreturn_rejected_on_variable() {
    let mut arena = Arena::new();
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::INT;
    arena.get_mut(r).typ.attr = Attr::NORETURN;
    let ctx = ctx(Cpp17);
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, r, &mut diags);
    assert!(diags.has_errors());
  }

  #[test] fn bit_int_width_zero_rejected() {
    let mut arena = Arena::new();
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: Some(0) }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::BITINT;
    let ctx = ctx(crate::dialect::Dialect::C23);
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, r, &mut diags);
    assert!(diags.has_errors());
  }

  #[test] fn bit_int_width_nonzero_accepted() {
    let mut arena = Arena::new();
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: Some(8) }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::BITINT;
    let ctx = ctx(crate::dialect::Dialect::C23);
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, r, &mut diags);
    assert!(!diags.has_errors());
  }

  #[test] fn constexpr_void_function_rejected_before_cpp14() {
    let mut arena = Arena::new();
    let func = arena.new_node(
      AstKind::Function { ret_ast: None, params: vec![], flags: MemberFlags::default() },
      0, SourceSpan::synthetic(),
    );
    arena.get_mut(func).typ.store = Store::CONSTEXPR;
    let ctx = ctx(Cpp11);
    let mut diags = Diagnostics::new();
    check(&arena, &ctx, func, &mut diags);
    assert!(diags.has_errors());
  }
}
