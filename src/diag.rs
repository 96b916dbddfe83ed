//! Diagnostic taxonomy (spec.md §7) and the sink the checker writes into.

use crate::span::SourceSpan;

/// The error/warning taxonomy. Variants name what went wrong, not where;
/// the accompanying message carries the specifics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagKind {
  UnknownName,
  NotSupported,
  IllegalCombination,
  IllegalRelation,
  BadReturn,
  BadParam,
  BadOperator,
  BadMain,
  BadCast,
  ReservedIdent,
  DeprecatedFeature,
}

impl DiagKind {
  /// Warnings never abort a pass (spec.md §7); everything else is fatal.
  #[must_use] pub fn is_warning(self) -> bool {
    matches!(self, DiagKind::ReservedIdent | DiagKind::DeprecatedFeature)
  }
}

/// One diagnostic: a location, a kind, a message, and an optional one-line
/// hint suggesting the likely correct form (spec.md §7).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
  pub span: SourceSpan,
  pub kind: DiagKind,
  pub message: String,
  pub hint: Option<String>,
}

impl Diagnostic {
  #[must_use] pub fn new(span: SourceSpan, kind: DiagKind, message: impl Into<String>) -> Self {
    Self { span, kind, message: message.into(), hint: None }
  }

  #[must_use] pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
    self.hint = Some(hint.into());
    self
  }

  #[must_use] pub fn is_warning(&self) -> bool { self.kind.is_warning() }
}

/// Collects diagnostics in discovery order (spec.md §7: "root first for
/// errors, leaves inclusive for warnings"). A checker pass stops emitting
/// further errors after the first one but keeps running the warnings pass.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
  #[must_use] pub fn new() -> Self { Self::default() }

  pub fn push(&mut self, d: Diagnostic) {
    if d.is_warning() { log::warn!("{}", d.message); } else { log::error!("{}", d.message); }
    self.0.push(d);
  }

  #[must_use] pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
    self.0.iter().filter(|d| !d.is_warning())
  }

  #[must_use] pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
    self.0.iter().filter(|d| d.is_warning())
  }

  #[must_use] pub fn has_errors(&self) -> bool { self.errors().next().is_some() }
  #[must_use] pub fn all(&self) -> &[Diagnostic] { &self.0 }
  #[must_use] pub fn is_empty(&self) -> bool { self.0.is_empty() }
  #[must_use] pub fn len(&self) -> usize { self.0.len() }

  pub fn extend(&mut self, other: Diagnostics) { self.0.extend(other.0); }
}

impl IntoIterator for Diagnostics {
  type Item = Diagnostic;
  type IntoIter = std::vec::IntoIter<Diagnostic>;
  fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn warnings_do_not_count_as_errors() {
    let mut d = Diagnostics::new();
    d.push(Diagnostic::new(SourceSpan::synthetic(), DiagKind::ReservedIdent, "reserved"));
    assert!(!d.has_errors());
    d.push(Diagnostic::new(SourceSpan::synthetic(), DiagKind::BadMain, "main() must return int"));
    assert!(d.has_errors());
    assert_eq!(d.errors().count(), 1);
    assert_eq!(d.warnings().count(), 1);
  }
}
