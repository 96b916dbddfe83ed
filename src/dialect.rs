//! `LangMatrix`: the closed set of dialects and the bitset of dialects a
//! construct is legal in (spec.md §3.1, §4.1).

use std::cell::Cell;
use std::fmt;

/// One specific version of C or C++ recognised by the checker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Dialect {
  KnrC, C89, C95, C99, C11, C17, C23,
  Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23,
  EmbeddedC, Upc,
}

/// The family a [`Dialect`] belongs to, for family-scoped warnings
/// (spec.md §4.4.3: "tagged with the coarse language family").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family { C, Cpp }

use Dialect::*;

/// All dialects, oldest first; index into this array is the dialect's rank.
pub const ALL_DIALECTS: [Dialect; 16] = [
  KnrC, C89, C95, C99, C11, C17, C23,
  Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23,
  EmbeddedC, Upc,
];

impl Dialect {
  /// Canonical rank used for chronological ordering within a family.
  /// `EmbeddedC` and `Upc` are vendor dialects layered on top of C99 and do
  /// not participate in the C/C++ chronology, so they rank alongside C99.
  #[must_use] pub fn rank(self) -> u8 {
    match self {
      KnrC => 0, C89 => 1, C95 => 2, C99 => 3, C11 => 4, C17 => 5, C23 => 6,
      Cpp98 => 10, Cpp03 => 11, Cpp11 => 12, Cpp14 => 13, Cpp17 => 14, Cpp20 => 15, Cpp23 => 16,
      EmbeddedC => 3, Upc => 3,
    }
  }

  #[must_use] pub fn family(self) -> Family {
    match self {
      KnrC | C89 | C95 | C99 | C11 | C17 | C23 | EmbeddedC | Upc => Family::C,
      Cpp98 | Cpp03 | Cpp11 | Cpp14 | Cpp17 | Cpp20 | Cpp23 => Family::Cpp,
    }
  }

  /// Canonical display name, e.g. `"C99"`, `"C++11"`.
  #[must_use] pub fn name(self) -> &'static str {
    match self {
      KnrC => "K&R C", C89 => "C89", C95 => "C95", C99 => "C99", C11 => "C11",
      C17 => "C17", C23 => "C23",
      Cpp98 => "C++98", Cpp03 => "C++03", Cpp11 => "C++11", Cpp14 => "C++14",
      Cpp17 => "C++17", Cpp20 => "C++20", Cpp23 => "C++23",
      EmbeddedC => "Embedded C", Upc => "UPC",
    }
  }

  fn bit(self) -> u16 { 1 << ALL_DIALECTS.iter().position(|&d| d == self).expect("exhaustive") }
}

/// A set of [`Dialect`]s, represented as a 16-bit mask (one bit per entry of
/// [`ALL_DIALECTS`]). All set operations are total: union/intersection never
/// fail, and the empty set is a legitimate (if always-illegal) result of
/// [`crate::typebits::TypeBits::check`].
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DialectSet(u16);

pub const NO_DIALECTS: DialectSet = DialectSet(0);
pub const ALL: DialectSet = DialectSet(0xFFFF >> (16 - ALL_DIALECTS.len()));

impl DialectSet {
  #[must_use] pub fn single(d: Dialect) -> Self { Self(d.bit()) }

  #[must_use] pub fn from_dialects(ds: impl IntoIterator<Item = Dialect>) -> Self {
    ds.into_iter().fold(NO_DIALECTS, |acc, d| acc.union(Self::single(d)))
  }

  #[must_use] pub fn union(self, other: Self) -> Self { Self(self.0 | other.0) }
  #[must_use] pub fn intersection(self, other: Self) -> Self { Self(self.0 & other.0) }
  #[must_use] pub fn complement(self) -> Self { Self(!self.0 & ALL.0) }
  #[must_use] pub fn is_empty(self) -> bool { self.0 == 0 }
  #[must_use] pub fn is_all(self) -> bool { self.0 == ALL.0 }
  #[must_use] pub fn contains(self, d: Dialect) -> bool { self.0 & d.bit() != 0 }
  #[must_use] pub fn is_subset(self, other: Self) -> bool { self.0 & !other.0 == 0 }

  /// Every dialect any of whose family is represented, i.e. "is any C" or
  /// "is any C++" queries from spec.md §3.1.
  #[must_use] pub fn is_any(self, family: Family) -> bool {
    ALL_DIALECTS.iter().any(|&d| self.contains(d) && d.family() == family)
  }

  #[must_use] pub fn iter(self) -> impl Iterator<Item = Dialect> {
    ALL_DIALECTS.into_iter().filter(move |&d| self.contains(d))
  }
}

impl fmt::Debug for DialectSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter().map(Dialect::name)).finish()
  }
}

impl FromIterator<Dialect> for DialectSet {
  fn from_iter<I: IntoIterator<Item = Dialect>>(iter: I) -> Self { Self::from_dialects(iter) }
}

/// Pure-functional queries over the dialect matrix (spec.md §4.1).
pub struct LangMatrix;

impl LangMatrix {
  #[must_use] pub fn name(d: Dialect) -> &'static str { d.name() }

  /// The chronologically earliest dialect in a non-empty set.
  #[must_use] pub fn oldest(set: DialectSet) -> Option<Dialect> {
    set.iter().min_by_key(|d| d.rank())
  }

  /// The chronologically latest dialect in a non-empty set.
  #[must_use] pub fn newest(set: DialectSet) -> Option<Dialect> {
    set.iter().max_by_key(|d| d.rank())
  }

  #[must_use] pub fn rank_order(d1: Dialect, d2: Dialect) -> std::cmp::Ordering {
    d1.rank().cmp(&d2.rank())
  }

  /// The diagnostic clause used verbatim in messages (spec.md §4.1):
  /// `""` when `set` is all dialects, `" until <name>"`/`" since <name>"`
  /// when `set` is a contiguous prefix/suffix of one family's chronology,
  /// otherwise `" in <range>"`.
  #[must_use] pub fn which_phrase(set: DialectSet) -> String {
    if set.is_all() { return String::new() }
    if set.is_empty() { return " in no dialect".into() }
    let Some(oldest) = Self::oldest(set) else { return String::new() };
    let Some(newest) = Self::newest(set) else { return String::new() };
    let family = oldest.family();
    let family_all: DialectSet = ALL_DIALECTS.iter().copied().filter(|d| d.family() == family).collect();
    let prefix: DialectSet = family_all.iter().filter(|d| d.rank() <= newest.rank()).collect();
    let suffix: DialectSet = family_all.iter().filter(|d| d.rank() >= oldest.rank()).collect();
    if set == prefix { format!(" until {}", newest.name()) }
    else if set == suffix { format!(" since {}", oldest.name()) }
    else { format!(" in {}-{}", oldest.name(), newest.name()) }
  }
}

/// The single current dialect, re-run-on-change per spec.md §3.1 ("switching
/// dialects is idempotent and re-runs warnings that depend on the dialect").
/// Held in a `Cell` rather than a global so a [`crate::context::Context`]
/// owns it explicitly (design note in spec.md §9).
pub struct CurrentDialect(Cell<Dialect>);

impl CurrentDialect {
  #[must_use] pub fn new(d: Dialect) -> Self { Self(Cell::new(d)) }
  #[must_use] pub fn get(&self) -> Dialect { self.0.get() }
  pub fn set(&self, d: Dialect) { self.0.set(d) }
}

impl Default for CurrentDialect {
  fn default() -> Self { Self::new(Dialect::Cpp17) }
}
