//! Two-pass semantic checker plus a non-fatal warnings pass (spec.md §4.4).

mod legality;
mod structural;
mod warnings;

use crate::ast::{Arena, AstRef};
use crate::context::Context;
use crate::diag::Diagnostics;

/// Walks a completed tree and decides whether it is legal in the context's
/// current dialect. `check` never mutates the tree or the context; it only
/// reads them (spec.md §5).
pub struct Checker;

impl Checker {
  /// Runs the structural pass, then (if it found no error) the
  /// type-legality pass, then always the warnings pass. The first error in
  /// either fatal pass aborts that pass; the warnings pass never aborts
  /// (spec.md §7). Returns `Ok` with any warnings when no error was found,
  /// `Err` with errors-then-warnings otherwise.
  pub fn check(arena: &Arena, ctx: &Context, root: AstRef) -> Result<Diagnostics, Diagnostics> {
    let mut diags = Diagnostics::new();
    structural::check(arena, ctx, root, &mut diags);
    if !diags.has_errors() {
      legality::check(arena, ctx, root, &mut diags);
    }
    warnings::check(arena, ctx, root, &mut diags);
    if diags.has_errors() { Err(diags) } else { Ok(diags) }
  }

  /// `true` if `ast` carries `register` storage (spec.md §4.4 helper list).
  #[must_use] pub fn is_register(arena: &Arena, ast: AstRef) -> bool {
    arena.get(ast).typ.store.contains(crate::typebits::Store::REGISTER)
  }

  /// Number of scopes in `ast`'s name (spec.md §4.4 helper list).
  #[must_use] pub fn count_name(arena: &Arena, ast: AstRef) -> usize {
    arena.get(ast).sname.count_name()
  }
}
