//! The option surface (spec.md §6.4) and the injected per-parse context
//! (spec.md §9: "treat as an injected context threaded through checker and
//! renderer calls; exposed only through an accessor object so tests can
//! instantiate per-dialect contexts independently").

use crate::dialect::{CurrentDialect, Dialect};
use crate::symbol::Interner;

/// Flags consumed (not produced) by this crate; the REPL's `set` command is
/// the external collaborator that mutates them (spec.md §6.4).
#[derive(Clone, Copy, Debug)]
pub struct Options {
  /// `T const *` (true) vs `const T *` (false).
  pub east_const: bool,
  /// Whether a bare `int` must be written explicitly rather than implied.
  pub explicit_int: bool,
  /// Whether `enum`/`class`/`struct`/`union` must be written explicitly.
  pub explicit_ecsu: bool,
  /// Alternative operator tokens (`and`, `bitor`, ...) accepted/emitted.
  pub alt_tokens: bool,
  pub digraphs: bool,
  pub trigraphs: bool,
  /// `auto f() -> int` rather than `int f()`.
  pub trailing_return: bool,
  /// C++11 alias syntax (`using`) rather than `typedef`.
  pub using: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      east_const: false,
      explicit_int: true,
      explicit_ecsu: false,
      alt_tokens: false,
      digraphs: false,
      trigraphs: false,
      trailing_return: false,
      using: false,
    }
  }
}

/// Owns everything that is process-wide-but-mutable for the duration of a
/// parse: the current dialect, the option flags, and the symbol interner.
/// Neither the checker nor the renderers mutate this except through
/// [`Context::set_dialect`]; nothing here is behind a global/`static`.
pub struct Context {
  dialect: CurrentDialect,
  pub options: Options,
  pub interner: Interner,
}

impl Context {
  #[must_use] pub fn new(dialect: Dialect, options: Options) -> Self {
    Self { dialect: CurrentDialect::new(dialect), options, interner: Interner::new() }
  }

  #[must_use] pub fn current_dialect(&self) -> Dialect { self.dialect.get() }

  /// Switch the current dialect. Idempotent: setting the same dialect twice
  /// is a no-op from the caller's perspective. The caller (typically the
  /// REPL) is responsible for re-running the warnings pass afterwards, per
  /// spec.md §3.1.
  pub fn set_dialect(&self, d: Dialect) {
    if self.dialect.get() != d {
      log::debug!("switching current dialect to {}", d.name());
    }
    self.dialect.set(d);
  }
}

impl Default for Context {
  fn default() -> Self { Self::new(Dialect::Cpp17, Options::default()) }
}
