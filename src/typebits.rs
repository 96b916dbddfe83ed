//! Three orthogonal bitsets describing a declaration's type (spec.md §3.2,
//! §4.2): `Base` (underlying kind), `Store` (storage/linkage/qualifiers) and
//! `Attr` (`[[...]]` attributes). Each bit carries the [`DialectSet`] it is
//! legal in and its canonical C and English spellings.

use bitflags::bitflags;
use crate::dialect::{Dialect, DialectSet, ALL};

bitflags! {
  /// The underlying kind of a type (spec.md §3.2 Base).
  #[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
  pub struct Base: u32 {
    const VOID       = 1 << 0;
    const BOOL       = 1 << 1;
    const CHAR       = 1 << 2;
    const WCHAR_T    = 1 << 3;
    const CHAR8_T    = 1 << 4;
    const CHAR16_T   = 1 << 5;
    const CHAR32_T   = 1 << 6;
    const SHORT      = 1 << 7;
    const INT        = 1 << 8;
    const LONG       = 1 << 9;
    const LONG_LONG  = 1 << 10;
    const SIGNED     = 1 << 11;
    const UNSIGNED   = 1 << 12;
    const FLOAT      = 1 << 13;
    const DOUBLE     = 1 << 14;
    const COMPLEX    = 1 << 15;
    const IMAGINARY  = 1 << 16;
    const BITINT     = 1 << 17;
    const AUTO       = 1 << 18;
    const ENUM       = 1 << 19;
    const CLASS      = 1 << 20;
    const STRUCT     = 1 << 21;
    const UNION      = 1 << 22;
    const TYPEDEF     = 1 << 23;
    const ACCUM      = 1 << 24;
    const FRACT      = 1 << 25;
    const SAT        = 1 << 26;
  }
}

bitflags! {
  /// Storage duration, linkage, and function-like qualifiers (spec.md §3.2 Store).
  #[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
  pub struct Store: u32 {
    const EXTERN       = 1 << 0;
    const STATIC       = 1 << 1;
    const REGISTER     = 1 << 2;
    const THREAD_LOCAL = 1 << 3;
    const TYPEDEF      = 1 << 4;
    const MUTABLE      = 1 << 5;
    const AUTO         = 1 << 6;
    const INLINE       = 1 << 7;
    const VIRTUAL      = 1 << 8;
    const EXPLICIT     = 1 << 9;
    const PURE         = 1 << 10;
    const FINAL        = 1 << 11;
    const OVERRIDE     = 1 << 12;
    const CONST        = 1 << 13;
    const VOLATILE     = 1 << 14;
    const RESTRICT     = 1 << 15;
    const CONSTEXPR    = 1 << 16;
    const CONSTEVAL    = 1 << 17;
    const CONSTINIT    = 1 << 18;
    const NOEXCEPT     = 1 << 19;
    const THROW        = 1 << 20;
    const FRIEND       = 1 << 21;
    const DEFAULT      = 1 << 22;
    const DELETE       = 1 << 23;
    const REF          = 1 << 24;
    const RVALUE_REF   = 1 << 25;
    const SHARED       = 1 << 26;
    const RELAXED      = 1 << 27;
    const STRICT       = 1 << 28;
  }
}

bitflags! {
  /// `[[...]]` attributes (spec.md §3.2 Attr).
  #[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
  pub struct Attr: u16 {
    const CARRIES_DEPENDENCY  = 1 << 0;
    const DEPRECATED          = 1 << 1;
    const MAYBE_UNUSED        = 1 << 2;
    const NODISCARD           = 1 << 3;
    const NORETURN            = 1 << 4;
    const NO_UNIQUE_ADDRESS   = 1 << 5;
    const REPRODUCIBLE        = 1 << 6;
    const UNSEQUENCED         = 1 << 7;
  }
}

/// Canonical storage-word order used by both renderers (spec.md §4.2):
/// `extern static thread_local inline constexpr virtual explicit mutable
/// friend register typedef`, followed elsewhere by qualifiers and finally
/// base words in size order. Bits not in this list (the ones that never
/// appear as a leading storage word, e.g. `const`/`volatile`) are rendered
/// by their own call sites.
const STORE_ORDER: &[(Store, &str)] = &[
  (Store::EXTERN, "extern"),
  (Store::STATIC, "static"),
  (Store::THREAD_LOCAL, "thread_local"),
  (Store::INLINE, "inline"),
  (Store::CONSTEXPR, "constexpr"),
  (Store::CONSTEVAL, "consteval"),
  (Store::CONSTINIT, "constinit"),
  (Store::VIRTUAL, "virtual"),
  (Store::EXPLICIT, "explicit"),
  (Store::MUTABLE, "mutable"),
  (Store::FRIEND, "friend"),
  (Store::REGISTER, "register"),
  (Store::TYPEDEF, "typedef"),
];

const QUALIFIER_ORDER: &[(Store, &str)] = &[
  (Store::CONST, "const"),
  (Store::VOLATILE, "volatile"),
  (Store::RESTRICT, "restrict"),
];

const ATTR_ORDER: &[(Attr, &str)] = &[
  (Attr::CARRIES_DEPENDENCY, "carries_dependency"),
  (Attr::DEPRECATED, "deprecated"),
  (Attr::MAYBE_UNUSED, "maybe_unused"),
  (Attr::NODISCARD, "nodiscard"),
  (Attr::NORETURN, "noreturn"),
  (Attr::NO_UNIQUE_ADDRESS, "no_unique_address"),
  (Attr::REPRODUCIBLE, "reproducible"),
  (Attr::UNSEQUENCED, "unsequenced"),
];

/// Base words in size order (spec.md §4.2): `signed unsigned short long long
/// long int`, with the non-integer/CSU kinds interspersed where they'd sort.
const BASE_ORDER: &[(Base, &str, &str)] = &[
  // (bit, C spelling, English spelling)
  (Base::SIGNED, "signed", "signed"),
  (Base::UNSIGNED, "unsigned", "unsigned"),
  (Base::SHORT, "short", "short"),
  (Base::LONG_LONG, "long long", "long long"),
  (Base::LONG, "long", "long"),
  (Base::INT, "int", "int"),
  (Base::VOID, "void", "void"),
  (Base::BOOL, "bool", "bool"),
  (Base::CHAR, "char", "char"),
  (Base::WCHAR_T, "wchar_t", "wide char"),
  (Base::CHAR8_T, "char8_t", "8-bit char"),
  (Base::CHAR16_T, "char16_t", "16-bit char"),
  (Base::CHAR32_T, "char32_t", "32-bit char"),
  (Base::FLOAT, "float", "float"),
  (Base::DOUBLE, "double", "double"),
  (Base::COMPLEX, "_Complex", "complex"),
  (Base::IMAGINARY, "_Imaginary", "imaginary"),
  (Base::AUTO, "auto", "auto"),
  (Base::ENUM, "enum", "enum"),
  (Base::CLASS, "class", "class"),
  (Base::STRUCT, "struct", "struct"),
  (Base::UNION, "union", "union"),
  (Base::TYPEDEF, "", ""),
  (Base::ACCUM, "_Accum", "accum"),
  (Base::FRACT, "_Fract", "fract"),
  (Base::SAT, "_Sat", "saturating"),
];

/// `(Base, Store, Attr)` triple naming a complete type (spec.md §3.2).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Type {
  pub base: Base,
  pub store: Store,
  pub attr: Attr,
  /// Present only for `Base::BITINT`, the `N` of `_BitInt(N)`.
  pub bit_int_width: Option<u32>,
}

fn base_legality(b: Base) -> DialectSet {
  use Dialect::*;
  match b {
    Base::VOID | Base::CHAR | Base::SHORT | Base::INT | Base::LONG
    | Base::SIGNED | Base::UNSIGNED | Base::FLOAT | Base::DOUBLE
    | Base::ENUM | Base::STRUCT | Base::UNION | Base::TYPEDEF => ALL,
    Base::BOOL => DialectSet::from_dialects([C99, C11, C17, C23])
      .union(DialectSet::from_dialects([Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23])),
    Base::WCHAR_T => DialectSet::from_dialects([C95, C99, C11, C17, C23])
      .union(DialectSet::from_dialects([Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23])),
    Base::CHAR16_T | Base::CHAR32_T =>
      DialectSet::from_dialects([C11, C17, C23, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Base::CHAR8_T => DialectSet::from_dialects([C23, Cpp20, Cpp23]),
    Base::LONG_LONG => DialectSet::from_dialects([C99, C11, C17, C23, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Base::COMPLEX | Base::IMAGINARY => DialectSet::from_dialects([C99, C11, C17, C23]),
    Base::BITINT => DialectSet::from_dialects([C23]),
    Base::AUTO => DialectSet::from_dialects([C23, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Base::CLASS => DialectSet::from_dialects([Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Base::ACCUM | Base::FRACT | Base::SAT => DialectSet::from_dialects([EmbeddedC]),
    _ => ALL,
  }
}

fn store_legality(s: Store) -> DialectSet {
  use Dialect::*;
  match s {
    Store::EXTERN | Store::STATIC | Store::REGISTER | Store::CONST
    | Store::VOLATILE | Store::TYPEDEF | Store::FRIEND => ALL,
    Store::RESTRICT => DialectSet::from_dialects([C99, C11, C17, C23]),
    Store::THREAD_LOCAL => DialectSet::from_dialects([C11, C17, C23, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Store::MUTABLE | Store::VIRTUAL | Store::EXPLICIT | Store::PURE
    | Store::DEFAULT | Store::DELETE | Store::REF | Store::RVALUE_REF =>
      DialectSet::from_dialects([Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Store::FINAL | Store::OVERRIDE | Store::CONSTEXPR | Store::NOEXCEPT =>
      DialectSet::from_dialects([Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Store::CONSTEVAL | Store::CONSTINIT => DialectSet::from_dialects([Cpp20, Cpp23]),
    Store::THROW => DialectSet::from_dialects([Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Store::AUTO => ALL, // storage-class `auto`, legal pre-C++11/C23 (checker flags the conflict)
    Store::INLINE => DialectSet::from_dialects([C99, C11, C17, C23, Cpp98, Cpp03, Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]),
    Store::SHARED | Store::RELAXED | Store::STRICT => DialectSet::from_dialects([Upc]),
    _ => ALL,
  }
}

fn attr_legality(a: Attr) -> DialectSet {
  use Dialect::*;
  let cpp11_up = DialectSet::from_dialects([Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]);
  let c23_cpp11_up = cpp11_up.union(DialectSet::from_dialects([C23]));
  match a {
    Attr::DEPRECATED => c23_cpp11_up.union(DialectSet::from_dialects([Cpp14, Cpp17, Cpp20, Cpp23])),
    Attr::MAYBE_UNUSED | Attr::NODISCARD =>
      c23_cpp11_up.union(DialectSet::from_dialects([Cpp17, Cpp20, Cpp23])),
    Attr::NORETURN => c23_cpp11_up,
    Attr::CARRIES_DEPENDENCY => cpp11_up,
    Attr::NO_UNIQUE_ADDRESS => DialectSet::from_dialects([Cpp20, Cpp23]),
    Attr::REPRODUCIBLE | Attr::UNSEQUENCED => DialectSet::from_dialects([C23]),
    _ => ALL,
  }
}

impl Base {
  /// All set bits, in canonical order.
  fn bits_in_order(self) -> impl Iterator<Item = Base> {
    BASE_ORDER.iter().filter_map(move |&(b, _, _)| (self.contains(b)).then_some(b))
  }
}

/// `TypeBits::check`/rendering operations over a [`Type`] triple (spec.md §4.2).
pub struct TypeBits;

impl TypeBits {
  /// The dialect set in which every bit of `t` (base, store, and attr) is
  /// simultaneously legal, or the empty set if no dialect admits `t`.
  #[must_use] pub fn check(t: Type) -> DialectSet {
    let mut set = ALL;
    for b in t.base.iter() { set = set.intersection(base_legality(b)); }
    for s in t.store.iter() { set = set.intersection(store_legality(s)); }
    for a in t.attr.iter() { set = set.intersection(attr_legality(a)); }
    set
  }

  /// `true` if `t` is legal in every dialect.
  #[must_use] pub fn is_universal(t: Type) -> bool { Self::check(t).is_all() }

  /// C/C++ spelling, honouring `east_const` for the const/volatile qualifiers
  /// (the caller decides whether this is a "pointee" position; at the top
  /// level qualifiers always render before the base, as for a plain
  /// variable declaration).
  #[must_use] pub fn name_c(t: Type, east_const: bool) -> String {
    let mut words = Vec::new();
    for &(a, name) in ATTR_ORDER { if t.attr.contains(a) { words.push(format!("[[{name}]]")); } }
    for &(s, name) in STORE_ORDER { if t.store.contains(s) { words.push(name.to_string()); } }
    if east_const {
      for &(b, name, _) in BASE_ORDER { if t.base.contains(b) && !name.is_empty() { words.push(name.to_string()); } }
      for &(q, name) in QUALIFIER_ORDER { if t.store.contains(q) { words.push(name.to_string()); } }
    } else {
      for &(q, name) in QUALIFIER_ORDER { if t.store.contains(q) { words.push(name.to_string()); } }
      for &(b, name, _) in BASE_ORDER { if t.base.contains(b) && !name.is_empty() { words.push(name.to_string()); } }
    }
    if t.base.contains(Base::BITINT) {
      if let Some(n) = t.bit_int_width { words.push(format!("_BitInt({n})")); }
    }
    words.join(" ")
  }

  /// English spelling, hyphenated compound words for multi-word bases
  /// (e.g. `wide char` stays two words in C but the renderer hyphenates
  /// compound attribute names itself; base compounding is handled by the
  /// caller via `bits_in_order`).
  #[must_use] pub fn name_english(t: Type) -> String {
    let mut words = Vec::new();
    for &(a, name) in ATTR_ORDER {
      if t.attr.contains(a) { words.push(format!("[[{}]]", name.replace('_', "-"))); }
    }
    for &(s, name) in STORE_ORDER { if t.store.contains(s) { words.push(name.to_string()); } }
    for &(q, name) in QUALIFIER_ORDER { if t.store.contains(q) { words.push(name.to_string()); } }
    for b in t.base.bits_in_order() {
      let (_, _, english) = BASE_ORDER.iter().find(|&&(bb, _, _)| bb == b).expect("in BASE_ORDER");
      if !english.is_empty() { words.push((*english).to_string()); }
    }
    if t.base.contains(Base::BITINT) {
      if let Some(n) = t.bit_int_width { words.push(format!("{n}-bit int")); }
    }
    words.join(" ")
  }

  /// `true` if `t` carries no base bits besides (optionally) CSU/typedef tags.
  #[must_use] pub fn has_no_base(t: Type) -> bool { t.base.is_empty() }

  /// The attribute/storage/qualifier words of `t`, English spelling, with no
  /// base words — the "non-base portion of the type" the renderer prints
  /// ahead of each kind's own phrase (spec.md §4.5).
  #[must_use] pub fn name_english_non_base(t: Type) -> String {
    let mut words = Vec::new();
    for &(a, name) in ATTR_ORDER {
      if t.attr.contains(a) { words.push(format!("[[{}]]", name.replace('_', "-"))); }
    }
    for &(s, name) in STORE_ORDER { if t.store.contains(s) { words.push(name.to_string()); } }
    for &(q, name) in QUALIFIER_ORDER { if t.store.contains(q) { words.push(name.to_string()); } }
    words.join(" ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dialect::Dialect::*;

  #[test] fn int_is_universal() {
    let t = Type { base: Base::INT, ..Type::default() };
    assert!(TypeBits::is_universal(t));
    assert_eq!(TypeBits::name_c(t, false), "int");
  }

  #[test] fn long_long_requires_c99_or_cpp11() {
    let t = Type { base: Base::LONG_LONG | Base::INT, ..Type::default() };
    let set = TypeBits::check(t);
    assert!(set.contains(C99));
    assert!(!set.contains(C89));
    assert!(set.contains(Cpp11));
    assert!(!set.contains(Cpp03));
  }

  #[test] fn east_vs_west_const() {
    let t = Type { base: Base::CHAR, store: Store::CONST, ..Type::default() };
    assert_eq!(TypeBits::name_c(t, false), "const char");
    assert_eq!(TypeBits::name_c(t, true), "char const");
  }

  #[test] fn unsat_combination_is_empty() {
    let t = Type { base: Base::ACCUM, store: Store::SHARED, ..Type::default() };
    assert!(TypeBits::check(t).is_empty());
  }

  #[test] fn attribute_renders_bracketed() {
    let t = Type { base: Base::INT, attr: Attr::NODISCARD, ..Type::default() };
    assert_eq!(TypeBits::name_c(t, false), "[[nodiscard]] int");
  }
}
