//! Source spans, threaded explicitly rather than tracked as global state
//! (spec.md §9: "no global current location").

use std::fmt;

/// A half-open range of source columns, `(first_column, last_column)` as
/// specified in spec.md §6.2. Columns are `0`-based byte offsets into
/// whatever single line the external parser is currently scanning; this
/// crate never interprets them beyond carrying them to diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SourceSpan {
  pub first_column: u32,
  pub last_column: u32,
}

impl SourceSpan {
  /// A span covering a single column, used for synthesized nodes that have
  /// no real source (e.g. primitives materialized by the checker).
  #[must_use] pub fn synthetic() -> Self { Self { first_column: 0, last_column: 0 } }

  /// The smallest span covering both `self` and `other`.
  #[must_use] pub fn to(self, other: Self) -> Self {
    Self {
      first_column: self.first_column.min(other.first_column),
      last_column: self.last_column.max(other.last_column),
    }
  }
}

impl fmt::Debug for SourceSpan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.first_column, self.last_column)
  }
}

/// Pairs a value with the span it was parsed from, mirroring the teacher's
/// `Spanned<T>` (`types::Spanned`, used pervasively for `VarId`, `TypeTc`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spanned<T> {
  pub span: SourceSpan,
  pub k: T,
}

impl<T> Spanned<T> {
  pub fn new(span: SourceSpan, k: T) -> Self { Self { span, k } }
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> { Spanned { span: self.span, k: f(self.k) } }
}
