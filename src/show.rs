//! `show` (spec.md §4.7, §6.3): lists typedef-store entries matching a glob
//! and a dialect filter, rendered in either English or gibberish. This is
//! the one command-shaped surface this crate exposes directly rather than
//! leaving entirely to the external REPL, since it reads straight out of
//! [`TypedefStore`] without needing a parser.

use crate::context::Context;
use crate::dialect::DialectSet;
use crate::render::{english, gibberish};
use crate::typedef_store::{ShowFormat, TypedefStore};

/// One rendered line of `show`'s output: the qualified name (for sorting or
/// filtering upstream) paired with its rendered declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowLine {
  pub name: String,
  pub text: String,
}

/// Runs `glob` against every typedef name in `store`, keeping entries legal
/// in every dialect of `dialect_filter`, and renders each in `format`.
/// Entries are returned in insertion order (spec.md §4.7); the caller sorts
/// or paginates if it wants something else.
#[must_use] pub fn run(store: &TypedefStore, ctx: &Context, glob: &str, dialect_filter: DialectSet, format: ShowFormat) -> Vec<ShowLine> {
  store.show(glob, dialect_filter, format, &ctx.interner)
    .map(|(sname, ast, fmt)| {
      let name = sname.local_name().map_or_else(String::new, |s| ctx.interner.resolve(s).to_string());
      let text = match fmt {
        ShowFormat::English => english::render_typedef_define(store.arena(), ctx, sname, ast),
        ShowFormat::Gibberish => gibberish::render_typedef(store.arena(), ctx, sname, ast),
      };
      ShowLine { name, text }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::AstKind;
  use crate::context::Options;
  use crate::dialect::{Dialect, ALL};
  use crate::scoped_name::{Scope, ScopeKind, ScopedName};
  use crate::span::SourceSpan;
  use crate::typebits::Base;

  fn define_float_typedef(ctx: &mut Context, store: &mut TypedefStore, name: &str) {
    let sym = ctx.interner.intern(name);
    let float = store.arena_mut().new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    store.arena_mut().get_mut(float).typ.base = Base::FLOAT;
    let sname = ScopedName(smallvec::smallvec![Scope { ident: sym, kind: ScopeKind::None }]);
    store.insert(sname, float, SourceSpan::synthetic()).unwrap();
  }

  #[test] fn show_renders_english_and_gibberish() {
    let mut ctx = Context::new(Dialect::Cpp17, Options::default());
    let mut store = TypedefStore::new();
    define_float_typedef(&mut ctx, &mut store, "PI");

    let english_lines = run(&store, &ctx, "P*", ALL, ShowFormat::English);
    assert_eq!(english_lines.len(), 1);
    assert_eq!(english_lines[0].text, "define PI as float");

    let gibberish_lines = run(&store, &ctx, "P*", ALL, ShowFormat::Gibberish);
    assert_eq!(gibberish_lines[0].text, "typedef float PI;");
  }

  #[test] fn glob_filters_out_non_matching_names() {
    let mut ctx = Context::new(Dialect::Cpp17, Options::default());
    let mut store = TypedefStore::new();
    define_float_typedef(&mut ctx, &mut store, "PI");
    assert!(run(&store, &ctx, "Q*", ALL, ShowFormat::English).is_empty());
  }
}
