//! The static catalogue of overloadable C++ operators (spec.md §3.5).

use bitflags::bitflags;
use crate::dialect::{Dialect::*, DialectSet};
use crate::symbol::{Interner, Symbol};

bitflags! {
  /// Where an operator may be declared.
  #[derive(Clone, Copy, PartialEq, Eq, Debug)]
  pub struct OverloadKind: u8 {
    const MEMBER     = 1 << 0;
    const NON_MEMBER = 1 << 1;
    const BOTH       = Self::MEMBER.bits() | Self::NON_MEMBER.bits();
  }
}

/// One row of the operator table.
#[derive(Clone, Copy, Debug)]
pub struct OperatorInfo {
  pub id: OperatorId,
  /// The literal spelling after `operator`, e.g. `"+"`, `"new[]"`, `"\"\""`
  /// for user-defined literals (handled separately, not in this table).
  pub spelling: &'static str,
  pub legal: DialectSet,
  pub overload: OverloadKind,
  pub params_min: u8,
  /// `None` means unbounded (`operator()` only).
  pub params_max: Option<u8>,
}

macro_rules! operators {
  ($($variant:ident $spelling:literal $legal:expr, $overload:expr, $min:literal ..= $max:tt;)*) => {
    /// Identifies one overloadable operator; order matches declaration order
    /// in this table, not the spelling alphabet.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum OperatorId { $($variant),* }

    pub const OPERATOR_TABLE: &[OperatorInfo] = &[
      $(OperatorInfo {
        id: OperatorId::$variant,
        spelling: $spelling,
        legal: $legal,
        overload: $overload,
        params_min: $min,
        params_max: operators!(@max $max),
      }),*
    ];
  };
  (@max INF) => { None };
  (@max $n:tt) => { Some($n) };
}

operators! {
  New        "new"     DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  NewArray   "new[]"   DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  Delete     "delete"  DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  DeleteArray "delete[]" DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  Plus       "+"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  Minus      "-"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  Star       "*"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  Slash      "/"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Percent    "%"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Caret      "^"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Amp        "&"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=2;
  Pipe       "|"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Tilde      "~"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 0..=0;
  Not        "!"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 1..=1;
  Assign     "="       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  Lt         "<"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Gt         ">"       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  PlusAssign "+="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  MinusAssign "-="     DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  StarAssign "*="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  SlashAssign "/="     DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  PercentAssign "%="   DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  Shl        "<<"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Shr        ">>"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  ShlAssign  "<<="     DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  ShrAssign  ">>="     DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  Eq         "=="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Ne         "!="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Le         "<="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Ge         ">="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  Spaceship  "<=>"     DialectSet::from_dialects([Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  AndAnd     "&&"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  OrOr       "||"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  PlusPlus   "++"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 0..=1;
  MinusMinus "--"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 0..=1;
  Comma      ","       DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::BOTH, 2..=2;
  AmpAssign  "&="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  PipeAssign "|="      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  CaretAssign "^="     DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  Arrow      "->"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 0..=0;
  ArrowStar  "->*"     DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  Call       "()"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 0..=INF;
  Index      "[]"      DialectSet::from_dialects([Cpp98,Cpp03,Cpp11,Cpp14,Cpp17,Cpp20,Cpp23]), OverloadKind::MEMBER, 1..=1;
  Co_await   "co_await" DialectSet::from_dialects([Cpp20,Cpp23]), OverloadKind::BOTH, 0..=1;
}

impl OperatorId {
  #[must_use] pub fn info(self) -> &'static OperatorInfo {
    OPERATOR_TABLE.iter().find(|o| o.id == self).expect("every OperatorId is in OPERATOR_TABLE")
  }
}

impl PartialEq for OperatorInfo {
  fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

/// Operators restricted to the `new`/`delete` family (spec.md §4.4.1:
/// `TS_NEW_DELETE_OPER`).
#[must_use] pub fn is_new_delete(id: OperatorId) -> bool {
  matches!(id, OperatorId::New | OperatorId::NewArray | OperatorId::Delete | OperatorId::DeleteArray)
}

/// Find a table entry by its literal spelling, e.g. for a parser or for
/// `ShowCommand`'s round-trip checks.
#[must_use] pub fn by_spelling(spelling: &str) -> Option<&'static OperatorInfo> {
  OPERATOR_TABLE.iter().find(|o| o.spelling == spelling)
}

/// Interns every operator spelling into `interner` and builds a dense
/// `Symbol -> OperatorId` table, for a caller (parser, REPL) that already
/// has the token as an interned `Symbol` and wants O(1) resolution instead
/// of a [`by_spelling`] string scan.
#[must_use] pub fn dense_symbol_table(interner: &mut Interner) -> Box<[Option<OperatorId>]> {
  let pairs: Vec<(Symbol, OperatorId)> = OPERATOR_TABLE.iter()
    .map(|o| (interner.intern(o.spelling), o.id))
    .collect();
  interner.init_dense_map(&pairs)
}

/// Infer whether an operator is declared as a member or non-member
/// (spec.md §4.4.1): if the user specified neither and the operator only
/// permits one form, adopt it; if it permits both, infer from `n_params`
/// against `[params_min, params_max]`.
#[must_use] pub fn infer_overload(info: &OperatorInfo, n_params: u8, user_said_member: Option<bool>) -> Option<bool> {
  if let Some(m) = user_said_member { return Some(m) }
  match info.overload {
    OverloadKind::MEMBER => Some(true),
    OverloadKind::NON_MEMBER => Some(false),
    _ if info.overload == OverloadKind::BOTH => {
      // A member form has an implicit `this`, so it needs one fewer explicit
      // parameter than the non-member form for the same arity.
      let member_ok = n_params + 1 >= info.params_min
        && info.params_max.is_none_or(|max| n_params + 1 <= max);
      let non_member_ok = n_params >= info.params_min
        && info.params_max.is_none_or(|max| n_params <= max);
      match (member_ok, non_member_ok) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
      }
    }
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test] fn plus_is_both_with_two_params() {
    let info = OperatorId::Plus.info();
    assert_eq!(infer_overload(info, 2, None), Some(false));
    assert_eq!(infer_overload(info, 1, None), Some(true));
  }

  #[test] fn call_is_unbounded() {
    assert_eq!(OperatorId::Call.info().params_max, None);
  }

  #[test] fn by_spelling_roundtrip() {
    assert_eq!(by_spelling("+").unwrap().id, OperatorId::Plus);
    assert!(by_spelling("nonsense").is_none());
  }

  #[test] fn dense_symbol_table_resolves_interned_spellings() {
    let mut interner = Interner::new();
    let table = dense_symbol_table(&mut interner);
    let plus = interner.intern("+");
    assert_eq!(table[plus.into_usize()], Some(OperatorId::Plus));
    let unrelated = interner.intern("frobnicate");
    assert_eq!(table.get(unrelated.into_usize()).copied().flatten(), None);
  }
}
