//! Structural pass (spec.md §4.4.1): dispatches on [`AstKind`] and reports
//! shape errors that have nothing to do with the current dialect's
//! legality mask (that is [`super::legality`]'s job).

use crate::ast::{Alignas, Arena, AstKind, AstRef, ArraySize};
use crate::context::Context;
use crate::dialect::{Dialect, Dialect::*, DialectSet, Family};
use crate::diag::{DiagKind, Diagnostic, Diagnostics};
use crate::operator::{self, OperatorId};
use crate::scoped_name::ScopedName;
use crate::span::SourceSpan;
use crate::typebits::{Attr, Base, Store};

pub(super) fn check(arena: &Arena, ctx: &Context, root: AstRef, diags: &mut Diagnostics) {
  let mut aborted = false;
  walk(arena, ctx, root, false, diags, &mut aborted);
}

fn err(diags: &mut Diagnostics, aborted: &mut bool, d: Diagnostic) { diags.push(d); *aborted = true; }

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
  if let AstKind::Typedef { for_ast, .. } = &node.kind {
    walk(arena, ctx, for_ast.0, false, diags, aborted);
  }
}

fn is_named(sname: &ScopedName, ctx: &Context, text: &str) -> bool {
  sname.local_name().is_some_and(|s| ctx.interner.resolve(s) == text)
}

fn check_node(arena: &Arena, ctx: &Context, ast: AstRef, in_params: bool, diags: &mut Diagnostics, aborted: &mut bool) {
  let node = arena.get(ast);
  let loc = node.loc;
  let dialect = ctx.current_dialect();

  match &node.kind {
    AstKind::Placeholder => {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported, "incomplete declaration"));
    }

    AstKind::Name | AstKind::Variadic | AstKind::Typedef { .. } => {}

    AstKind::Builtin { bit_width, .. } => {
      let t = node.typ;
      let c99_up = DialectSet::from_dialects([C99, C11, C17, C23]);
      if t.base.is_empty() && !t.store.contains(Store::TYPEDEF) && c99_up.contains(dialect) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
          "implicit \"int\" is not supported in C99 and later"));
        return;
      }
      if t.store.contains(Store::INLINE) && !t.store.contains(Store::TYPEDEF) && !in_params && !t.base.is_empty() {
        let cpp17_up = DialectSet::from_dialects([Cpp17, Cpp20, Cpp23]);
        if dialect.family() == Family::Cpp && !cpp17_up.contains(dialect) {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
            "inline variables are not supported before C++17"));
          return;
        }
      }
      if t.store.contains(Store::TYPEDEF) && *bit_width > 0 {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "typedef can not have a bit-field width"));
        return;
      }
      if node.sname.count_name() > 1 && *bit_width > 0 {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "a scoped name can not have a bit-field width"));
        return;
      }
      if t.base == Base::VOID && node.sname.local_name().is_some() {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination, "variable can not be void")
          .with_hint("did you mean pointer to void?"));
        return;
      }
      if t.base.contains(Base::SAT) && !t.base.intersects(Base::ACCUM | Base::FRACT) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "_Sat requires _Accum or _Fract"));
        return;
      }
      if t.store.intersects(Store::RELAXED | Store::STRICT) && !t.store.contains(Store::SHARED) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "relaxed/strict requires shared"));
      }
    }

    AstKind::Array { of_ast, size, stids } => {
      let of_kind = &arena.get(*of_ast).kind;
      let is_vla_like = matches!(size, ArraySize::Variable) || !stids.is_empty();
      if is_vla_like {
        let c99_up = DialectSet::from_dialects([C99, C11, C17, C23]);
        if !c99_up.contains(dialect) || !in_params {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
            "variable length arrays are only legal in C99 and later, as a parameter"));
          return;
        }
      }
      if matches!(of_kind, AstKind::Builtin { .. }) && arena.get(*of_ast).typ.base == Base::VOID {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation, "array of void is illegal")
          .with_hint("did you mean pointer to void?"));
        return;
      }
      if of_kind.is_function_like() {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation,
          "array of function is illegal")
          .with_hint("did you mean array of pointer to function?"));
        return;
      }
      if matches!(of_kind, AstKind::Name) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation, "array of name is illegal"));
        return;
      }
      if arena.get(*of_ast).typ.store.contains(Store::REGISTER) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation,
          "array of register-qualified type is illegal"));
      }
    }

    AstKind::Pointer { to_ast } | AstKind::Reference { to_ast } | AstKind::RvalueReference { to_ast } => {
      let is_ref = matches!(node.kind, AstKind::Reference { .. } | AstKind::RvalueReference { .. });
      let to = arena.get(*to_ast);
      if is_ref {
        if matches!(to.kind, AstKind::Reference { .. } | AstKind::RvalueReference { .. }) {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation, "reference to reference is illegal"));
          return;
        }
        if to.typ.base == Base::VOID && matches!(to.kind, AstKind::Builtin { .. }) {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation, "reference to void is illegal")
            .with_hint("did you mean pointer to void?"));
          return;
        }
        if node.typ.store.intersects(Store::CONST | Store::VOLATILE) {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
            "cv-qualified reference is illegal")
            .with_hint("did you mean reference to const X?"));
          return;
        }
      } else if matches!(to.kind, AstKind::Reference { .. } | AstKind::RvalueReference { .. }) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation, "pointer to reference is illegal")
          .with_hint("did you mean \"*&\"?"));
        return;
      }
      if to.typ.store.contains(Store::REGISTER) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation,
          "pointer/reference to register-qualified type is illegal"));
      }
    }

    AstKind::ClassStructUnion { .. } => {}

    AstKind::Enum { of_ast, .. } => {
      if let Some(under) = of_ast {
        let cpp11_up = DialectSet::from_dialects([Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]);
        if !cpp11_up.contains(dialect) {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
            "enum with fixed underlying type is not supported before C++11"));
          return;
        }
        let base = arena.get(*under).typ.base;
        let integral = base.intersects(
          Base::BOOL | Base::CHAR | Base::WCHAR_T | Base::CHAR8_T | Base::CHAR16_T | Base::CHAR32_T
          | Base::SHORT | Base::INT | Base::LONG | Base::LONG_LONG | Base::SIGNED | Base::UNSIGNED,
        );
        if !integral {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
            "enum underlying type must be integral"));
        }
      }
    }

    AstKind::Constructor { params, flags } | AstKind::Destructor { params, flags } => {
      let _ = flags;
      if node.sname.count_name() >= 2 && !node.sname.is_constructor() {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation,
          "constructor/destructor definition name must match its class"));
        return;
      }
      check_function_like_common(arena, ctx, ast, params, loc, diags, aborted);
    }

    AstKind::Function { ret_ast, params, flags } | AstKind::AppleBlock { ret_ast, params, flags } => {
      check_return(arena, *ret_ast, loc, diags, aborted);
      if *aborted { return }
      if node.typ.store.contains(Store::EXPLICIT) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "explicit is only legal on a user-defined conversion"));
        return;
      }
      check_member_qualifiers(node.typ.store, loc, dialect, diags, aborted);
      if *aborted { return }
      check_default_delete(node.typ.store, &node.sname, diags, aborted, loc, dialect, None);
      if *aborted { return }
      if node.typ.attr.contains(Attr::NO_UNIQUE_ADDRESS) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "[[no_unique_address]] can not appear on a function"));
        return;
      }
      if node.typ.store.contains(Store::PURE) && !node.typ.store.contains(Store::VIRTUAL) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination, "pure requires virtual"));
        return;
      }
      if is_named(&node.sname, ctx, "main") && node.sname.count_name() <= 1 {
        check_main(arena, ctx, *ret_ast, params, loc, diags, aborted);
        if *aborted { return }
      }
      check_function_like_common(arena, ctx, ast, params, loc, diags, aborted);
      let _ = flags;
    }

    AstKind::Operator { ret_ast, params, flags, op_id } => {
      check_return(arena, *ret_ast, loc, diags, aborted);
      if *aborted { return }
      check_operator(arena, ctx, *op_id, *ret_ast, params, flags, node.typ.store, &node.sname, loc, diags, aborted);
      if *aborted { return }
      check_function_like_common(arena, ctx, ast, params, loc, diags, aborted);
    }

    AstKind::UserDefConversion { to_ast } => {
      let allowed = Store::EXPLICIT | Store::CONST | Store::VIRTUAL | Store::FRIEND | Store::NOEXCEPT;
      if !(node.typ.store & !allowed).is_empty() {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "illegal storage class on a user-defined conversion"));
        return;
      }
      if node.typ.store.contains(Store::FRIEND) && node.sname.count_name() < 2 {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "friend user-defined conversion requires a qualified name"));
        return;
      }
      if matches!(arena.get(*to_ast).kind, AstKind::Array { .. }) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::BadReturn,
          "user-defined conversion to array is illegal")
          .with_hint("did you mean conversion to pointer to array?"));
      }
    }

    AstKind::UserDefLiteral { ret_ast, params } => {
      check_return(arena, *ret_ast, loc, diags, aborted);
      if *aborted { return }
      match params.len() {
        1 => {
          let t = arena.get(params[0]).typ;
          let ok = t.base.intersects(Base::UNSIGNED | Base::LONG_LONG | Base::DOUBLE | Base::LONG
            | Base::CHAR | Base::WCHAR_T | Base::CHAR8_T | Base::CHAR16_T | Base::CHAR32_T)
            || matches!(arena.get(params[0]).kind, AstKind::Pointer { to_ast } if
              arena.get(to_ast).typ.base == Base::CHAR && arena.get(to_ast).typ.store.contains(Store::CONST));
          if !ok {
            err(diags, aborted, Diagnostic::new(loc, DiagKind::BadParam,
              "user-defined literal with one parameter must take unsigned long long, long double, a character type, or const char*"));
          }
        }
        2 => {
          let first_ok = matches!(arena.get(params[0]).kind, AstKind::Pointer { to_ast } if
            arena.get(to_ast).typ.store.contains(Store::CONST));
          if !first_ok {
            err(diags, aborted, Diagnostic::new(loc, DiagKind::BadParam,
              "the first parameter of a two-parameter user-defined literal must be pointer to const"));
          }
        }
        _ => {
          err(diags, aborted, Diagnostic::new(loc, DiagKind::BadParam,
            "user-defined literal must take one or two parameters"));
        }
      }
    }

    AstKind::PointerToMember { to_ast, .. } => {
      if arena.get(*to_ast).typ.store.contains(Store::REGISTER) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalRelation,
          "pointer to member of register-qualified type is illegal"));
      }
    }

    AstKind::Lambda { ret_ast, params, .. } => {
      check_return(arena, *ret_ast, loc, diags, aborted);
      if *aborted { return }
      check_function_like_common(arena, ctx, ast, params, loc, diags, aborted);
    }

    AstKind::Cast { kind, .. } => {
      let _ = kind;
    }
  }

  check_alignas(arena, node.alignas, &node.kind, node.typ.store, loc, diags, aborted);
}

fn check_alignas(
  arena: &Arena,
  alignas: Alignas,
  kind: &AstKind,
  store: Store,
  loc: SourceSpan,
  diags: &mut Diagnostics,
  aborted: &mut bool,
) {
  if *aborted { return }
  match alignas {
    Alignas::None => {}
    Alignas::Expr(n) => {
      if store.contains(Store::TYPEDEF) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination, "alignas is illegal on a typedef"));
        return;
      }
      if store.contains(Store::REGISTER) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination, "alignas is illegal with register"));
        return;
      }
      if !kind.is_object() {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination, "alignas only applies to objects"));
        return;
      }
      if n == 0 || (n & (n - 1)) != 0 {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
          "alignas argument must be a power of two"));
      }
    }
    Alignas::Type(t) => {
      if !kind.is_object() {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination, "alignas only applies to objects"));
        return;
      }
      check_alignas(arena, arena.get(t).alignas, &arena.get(t).kind, arena.get(t).typ.store, loc, diags, aborted);
    }
  }
}

fn check_return(arena: &Arena, ret_ast: Option<AstRef>, loc: SourceSpan, diags: &mut Diagnostics, aborted: &mut bool) {
  let Some(r) = ret_ast else { return };
  let k = &arena.get(r).kind;
  if matches!(k, AstKind::Array { .. }) {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::BadReturn, "function returning array is illegal")
      .with_hint("did you mean function returning pointer?"));
  } else if k.is_function_like() {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::BadReturn, "function returning function is illegal")
      .with_hint("did you mean function returning pointer to function?"));
  }
}

fn check_member_qualifiers(store: Store, loc: SourceSpan, dialect: Dialect, diags: &mut Diagnostics, aborted: &mut bool) {
  if store.intersects(Store::REF | Store::RVALUE_REF) {
    let cpp11_up = DialectSet::from_dialects([Cpp11, Cpp14, Cpp17, Cpp20, Cpp23]);
    if !cpp11_up.contains(dialect) {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
        "reference-qualified member functions are not supported before C++11"));
      return;
    }
    if store.intersects(Store::EXTERN | Store::STATIC) {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
        "a reference-qualified function can not be extern or static"));
    }
  }
}

fn check_default_delete(
  store: Store,
  sname: &crate::scoped_name::ScopedName,
  diags: &mut Diagnostics,
  aborted: &mut bool,
  loc: SourceSpan,
  dialect: Dialect,
  op_id: Option<OperatorId>,
) {
  if !store.intersects(Store::DEFAULT | Store::DELETE) { return }
  let is_ctor_dtor_or_assign = sname.is_constructor() || op_id == Some(OperatorId::Assign);
  let cpp20_up = DialectSet::from_dialects([Cpp20, Cpp23]);
  let is_cpp20_comparison = cpp20_up.contains(dialect)
    && matches!(op_id, Some(OperatorId::Eq | OperatorId::Ne | OperatorId::Lt | OperatorId::Gt
      | OperatorId::Le | OperatorId::Ge | OperatorId::Spaceship));
  if !is_ctor_dtor_or_assign && !is_cpp20_comparison {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
      "= default / = delete is only legal on special member functions or, since C++20, comparison operators"));
  }
}

fn check_main(
  arena: &Arena,
  ctx: &Context,
  ret_ast: Option<AstRef>,
  params: &[AstRef],
  loc: SourceSpan,
  diags: &mut Diagnostics,
  aborted: &mut bool,
) {
  let dialect = ctx.current_dialect();
  let returns_int = ret_ast.is_none_or(|r| arena.get(r).typ.base == Base::INT);
  if !returns_int {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::BadMain, "main() must return int"));
    return;
  }
  match params.len() {
    0 => {}
    1 => {
      if dialect == KnrC {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::BadMain,
          "main() with one parameter is illegal in K&R C"));
        return;
      }
      if arena.get(params[0]).typ.base != Base::VOID {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::BadMain,
          "main() with one parameter must take void"));
      }
    }
    2 | 3 => {
      if !is_char_star_star_or_array(arena, params[1]) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::BadMain,
          "main()'s second parameter must be char*[] or char**"));
        return;
      }
      if params.len() == 3 && !is_char_star_star_or_array(arena, params[2]) {
        err(diags, aborted, Diagnostic::new(loc, DiagKind::BadMain,
          "main()'s third parameter must be char*[] or char**"));
      }
    }
    _ => {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::BadMain,
        "main() takes 0, 1, 2, or 3 parameters"));
    }
  }
}

fn is_char_star_star_or_array(arena: &Arena, r: AstRef) -> bool {
  fn inner(arena: &Arena, r: AstRef, depth: u32) -> bool {
    match &arena.get(r).kind {
      AstKind::Pointer { to_ast } | AstKind::Array { of_ast: to_ast, .. } => {
        if depth == 1 { arena.get(*to_ast).typ.base == Base::CHAR }
        else { inner(arena, *to_ast, depth + 1) }
      }
      _ => false,
    }
  }
  inner(arena, r, 0)
}

fn check_function_like_common(
  arena: &Arena,
  ctx: &Context,
  ast: AstRef,
  params: &[AstRef],
  loc: SourceSpan,
  diags: &mut Diagnostics,
  aborted: &mut bool,
) {
  let _ = ast;
  let dialect = ctx.current_dialect();
  for (i, &p) in params.iter().enumerate() {
    let pnode = arena.get(p);
    if pnode.sname.count_name() > 0 && dialect.family() == Family::Cpp {
      // scoped parameter names are always illegal; for C a bare identifier
      // is a K&R name and is handled by the Name arm below.
      if pnode.sname.count_name() > 1 {
        err(diags, aborted, Diagnostic::new(pnode.loc, DiagKind::BadParam,
          "a parameter name can not be scoped"));
        return;
      }
    }
    // A parameter's only allowed storage class is `register`, and in C++ not
    // even that (spec.md §4.4.1 Function parameters).
    let store_violation = if dialect.family() == Family::Cpp {
      !pnode.typ.store.is_empty()
    } else {
      !(pnode.typ.store & !Store::REGISTER).is_empty()
    };
    if store_violation {
      err(diags, aborted, Diagnostic::new(pnode.loc, DiagKind::BadParam,
        "a parameter's only allowed storage class is register, and C++ allows none"));
      return;
    }
    if pnode.typ.base == Base::VOID && matches!(pnode.kind, AstKind::Builtin { .. }) {
      if params.len() != 1 || pnode.sname.local_name().is_some() {
        err(diags, aborted, Diagnostic::new(pnode.loc, DiagKind::BadParam,
          "named parameters can not be void"));
        return;
      }
    }
    if pnode.typ.base.contains(Base::AUTO) {
      let cpp20_up = DialectSet::from_dialects([Cpp20, Cpp23]);
      if !cpp20_up.contains(dialect) {
        err(diags, aborted, Diagnostic::new(pnode.loc, DiagKind::NotSupported,
          "auto parameters are not supported before C++20"));
        return;
      }
    }
    if matches!(pnode.kind, AstKind::Variadic) {
      if i != params.len() - 1 {
        err(diags, aborted, Diagnostic::new(pnode.loc, DiagKind::BadParam,
          "\"...\" must be the last parameter"));
        return;
      }
      if params.len() == 1 {
        err(diags, aborted, Diagnostic::new(pnode.loc, DiagKind::BadParam,
          "\"...\" can not be the sole parameter"));
        return;
      }
    }
    if let AstKind::Builtin { bit_width, .. } = &pnode.kind {
      if *bit_width > 0 {
        err(diags, aborted, Diagnostic::new(pnode.loc, DiagKind::BadParam,
          "a parameter can not have a bit-field width"));
        return;
      }
    }
  }
}

fn check_operator(
  arena: &Arena,
  ctx: &Context,
  op_id: OperatorId,
  ret_ast: Option<AstRef>,
  params: &[AstRef],
  flags: &crate::ast::MemberFlags,
  store: Store,
  sname: &ScopedName,
  loc: SourceSpan,
  diags: &mut Diagnostics,
  aborted: &mut bool,
) {
  let info = op_id.info();
  let dialect = ctx.current_dialect();
  if !info.legal.contains(dialect) {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::NotSupported,
      format!("operator {} is not supported{}", info.spelling, crate::dialect::LangMatrix::which_phrase(info.legal))));
    return;
  }
  if operator::is_new_delete(op_id) {
    let returns_void_ptr = ret_ast.is_some_and(|r| matches!(arena.get(r).kind, AstKind::Pointer { to_ast }
      if arena.get(to_ast).typ.base == Base::VOID));
    let returns_void = ret_ast.is_none_or(|r| arena.get(r).typ.base == Base::VOID && !matches!(arena.get(r).kind, AstKind::Pointer { .. }));
    let is_delete = matches!(op_id, OperatorId::Delete | OperatorId::DeleteArray);
    if is_delete && !returns_void {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::BadOperator, "operator delete must return void"));
      return;
    }
    if !is_delete && !returns_void_ptr {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::BadOperator, "operator new must return void*"));
      return;
    }
  }
  if matches!(op_id, OperatorId::Arrow) {
    let points_to_class = ret_ast.is_some_and(|r| matches!(arena.get(r).kind, AstKind::Pointer { to_ast }
      if matches!(arena.get(to_ast).kind, AstKind::ClassStructUnion { .. })));
    if !points_to_class {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::BadOperator,
        "operator-> must return a pointer to class/struct/union"));
      return;
    }
  }

  let n_params = u8::try_from(params.len()).unwrap_or(u8::MAX);
  let is_member = operator::infer_overload(info, n_params, flags.user_said_member);
  let Some(is_member) = is_member else {
    err(diags, aborted, Diagnostic::new(loc, DiagKind::BadOperator,
      format!("can not infer whether operator {} is a member or non-member from {} parameters", info.spelling, n_params)));
    return;
  };
  if is_member {
    if store.contains(Store::FRIEND) {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::IllegalCombination,
        "a member operator can not be friend"));
      return;
    }
  } else {
    let has_class_param = params.iter().any(|&p| is_or_refs_class(arena, p));
    if !has_class_param && !operator::is_new_delete(op_id) {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::BadOperator,
        "a non-member operator must take at least one class/struct/union/enum parameter"));
      return;
    }
  }
  if matches!(op_id, OperatorId::PlusPlus | OperatorId::MinusMinus) && is_member {
    // postfix form carries the dummy `int` parameter; prefix has none.
    if params.len() == 1 && arena.get(params[0]).typ.base != Base::INT {
      err(diags, aborted, Diagnostic::new(loc, DiagKind::BadOperator,
        "postfix increment/decrement's dummy parameter must be int"));
      return;
    }
  }
  check_default_delete(store, sname, diags, aborted, loc, dialect, Some(op_id));
}

fn is_or_refs_class(arena: &Arena, r: AstRef) -> bool {
  match &arena.get(r).kind {
    AstKind::ClassStructUnion { .. } | AstKind::Enum { .. } => true,
    AstKind::Reference { to_ast } | AstKind::RvalueReference { to_ast } | AstKind::Pointer { to_ast } =>
      matches!(arena.get(*to_ast).kind, AstKind::ClassStructUnion { .. } | AstKind::Enum { .. }),
    _ => false,
  }
}
