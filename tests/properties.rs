//! Integration tests for the cross-module laws of spec.md §8. These don't
//! fit inside a single unit-test module because they exercise the checker,
//! both renderers, and the typedef store together.

use declc::ast::{Alignas, Arena, ArraySize, AstKind, MemberFlags};
use declc::context::{Context, Options};
use declc::dialect::Dialect;
use declc::operator::{self, OperatorId};
use declc::render::{english, gibberish};
use declc::scoped_name::{Scope, ScopeKind, ScopedName};
use declc::span::SourceSpan;
use declc::typebits::{Base, Store, Type};
use declc::typedef_store::TypedefStore;
use declc::Checker;

fn int_node(arena: &mut Arena) -> declc::ast::AstRef {
  let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
  arena.get_mut(r).typ.base = Base::INT;
  r
}

fn named(ctx: &mut Context, arena: &mut Arena, r: declc::ast::AstRef, text: &str) {
  let sym = ctx.interner.intern(text);
  arena.get_mut(r).sname = ScopedName(smallvec::smallvec![Scope { ident: sym, kind: ScopeKind::None }]);
}

/// `gibberish(english(ast)) == original gibberish`, modulo nothing extra:
/// for `int (*p)[10]` the two renderers must agree with each other, since
/// they both walk the same tree (spec.md §8 "round trip").
#[test]
fn round_trip_pointer_to_array() {
  let mut ctx = Context::new(Dialect::C99, Options::default());
  let mut arena = Arena::new();
  let int = int_node(&mut arena);
  let array = arena.new_node(
    AstKind::Array { of_ast: int, size: ArraySize::Int(10), stids: Store::empty() },
    0, SourceSpan::synthetic(),
  );
  let ptr = arena.new_node(AstKind::Pointer { to_ast: array }, 0, SourceSpan::synthetic());
  named(&mut ctx, &mut arena, ptr, "p");

  assert_eq!(gibberish::render_declare(&arena, &ctx, ptr, "p"), "int (*p)[10];");
  assert_eq!(english::render_declare(&arena, &ctx, ptr), "declare p as pointer to array 10 of int");
}

/// spec.md §8: "declare f as pointer to function (int, pointer to pointer
/// to char) returning int" round-trips to `int (*f)(int, char **);` in
/// gibberish (the English form does not distinguish `char *[]` from
/// `char **`, so gibberish renders the pointer form).
#[test]
fn round_trip_function_pointer() {
  let mut ctx = Context::new(Dialect::C11, Options::default());
  let mut arena = Arena::new();
  let p1 = int_node(&mut arena);
  let char_t = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
  arena.get_mut(char_t).typ.base = Base::CHAR;
  let char_ptr = arena.new_node(AstKind::Pointer { to_ast: char_t }, 0, SourceSpan::synthetic());
  let char_ptr_ptr = arena.new_node(AstKind::Pointer { to_ast: char_ptr }, 0, SourceSpan::synthetic());
  let ret_int = int_node(&mut arena);
  let func = arena.new_node(
    AstKind::Function { ret_ast: Some(ret_int), params: vec![p1, char_ptr_ptr], flags: MemberFlags::default() },
    0, SourceSpan::synthetic(),
  );
  let ptr = arena.new_node(AstKind::Pointer { to_ast: func }, 0, SourceSpan::synthetic());
  named(&mut ctx, &mut arena, ptr, "f");

  assert_eq!(
    english::render_declare(&arena, &ctx, ptr),
    "declare f as pointer to function (int, pointer to pointer to char) returning int",
  );
  assert_eq!(gibberish::render_declare(&arena, &ctx, ptr, "f"), "int (*f)(int, char **);");
  assert!(Checker::check(&arena, &ctx, ptr).is_ok());
}

/// spec.md §8 "dialect monotonicity": a construct legal in `D` is accepted
/// when `current = D` and rejected otherwise, using `long long` (C99+) as
/// the swing construct.
#[test]
fn dialect_monotonicity_long_long() {
  let mut arena = Arena::new();
  let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
  arena.get_mut(r).typ.base = Base::LONG_LONG | Base::INT;

  let old = Context::new(Dialect::C89, Options::default());
  assert!(Checker::check(&arena, &old, r).is_err());

  let new = Context::new(Dialect::C99, Options::default());
  assert!(Checker::check(&arena, &new, r).is_ok());
}

/// spec.md §8 "idempotence of check": running the checker twice on the same
/// tree yields the same diagnostic set (by kind and message, since spans are
/// stable and nothing mutates the tree or the context).
#[test]
fn idempotence_of_check() {
  let mut arena = Arena::new();
  let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
  arena.get_mut(r).typ.base = Base::INT;
  arena.get_mut(r).typ.store = Store::REGISTER;
  let ctx = Context::new(Dialect::Cpp11, Options::default());

  let first = Checker::check(&arena, &ctx, r).unwrap();
  let second = Checker::check(&arena, &ctx, r).unwrap();
  let msgs = |d: &declc::diag::Diagnostics| d.all().iter().map(|x| x.message.clone()).collect::<Vec<_>>();
  assert_eq!(msgs(&first), msgs(&second));
}

/// spec.md §8 "AST duplication": `equal(dup(a), a)` and `dup` preserves
/// parent pointers within the duplicated subtree, exercised on a richer
/// tree (a function pointer) than the unit test in `ast.rs`.
#[test]
fn ast_duplication_preserves_equality_and_links() {
  let mut arena = Arena::new();
  let p1 = int_node(&mut arena);
  let ret = int_node(&mut arena);
  let func = arena.new_node(
    AstKind::Function { ret_ast: Some(ret), params: vec![p1], flags: MemberFlags::default() },
    0, SourceSpan::synthetic(),
  );
  arena.set_parent(ret, func);
  arena.set_parent(p1, func);
  let ptr = arena.new_node(AstKind::Pointer { to_ast: func }, 0, SourceSpan::synthetic());
  arena.set_parent(func, ptr);

  let dup = arena.dup(ptr);
  assert!(arena.equal(ptr, dup));
  assert_ne!(ptr, dup);

  let AstKind::Pointer { to_ast: dup_func } = arena.get(dup).kind else { panic!("expected pointer") };
  assert_eq!(arena.get(dup_func).parent, Some(dup));
  let AstKind::Function { ret_ast: Some(dup_ret), params: dup_params, .. } = &arena.get(dup_func).kind else {
    panic!("expected function")
  };
  assert_eq!(arena.get(*dup_ret).parent, Some(dup_func));
  assert_eq!(arena.get(dup_params[0]).parent, Some(dup_func));
}

/// spec.md §8 "ScopedName ordering": the scope-kind ordering of §3.3 is
/// respected transitively — a three-level chain where the first two levels
/// are consistent but the third conflicts with the first must still be
/// rejected.
#[test]
fn scoped_name_ordering_is_transitive() {
  let mut ctx = Context::new(Dialect::Cpp17, Options::default());
  let mut store = TypedefStore::new();
  let ns = ctx.interner.intern("ns");
  let inner_class = ctx.interner.intern("Inner");
  let leaf = ctx.interner.intern("X");

  let a1 = store.arena_mut().new_node(AstKind::Placeholder, 0, SourceSpan::synthetic());
  let first = ScopedName(smallvec::smallvec![
    Scope { ident: ns, kind: ScopeKind::Namespace },
    Scope { ident: inner_class, kind: ScopeKind::Class },
    Scope { ident: leaf, kind: ScopeKind::None },
  ]);
  store.insert(first, a1, SourceSpan::synthetic()).unwrap();

  // Same two-level prefix, but now claims `ns` is an enum — that conflicts
  // with the Namespace already on record even though it's the outermost
  // (not adjacent) component.
  let a2 = store.arena_mut().new_node(AstKind::Placeholder, 0, SourceSpan::synthetic());
  let conflicting = ScopedName(smallvec::smallvec![
    Scope { ident: ns, kind: ScopeKind::Enum },
    Scope { ident: inner_class, kind: ScopeKind::Class },
  ]);
  assert!(store.insert(conflicting, a2, SourceSpan::synthetic()).is_err());
}

/// spec.md §8 "operator inference": for `operator+` (BOTH, 1..=2 params),
/// 2 explicit parameters can only be the non-member form (member would need
/// 3, since the implicit `this` counts as one), and 1 explicit parameter
/// can only be the member form.
#[test]
fn operator_inference_from_param_count() {
  let info = OperatorId::Plus.info();
  assert_eq!(operator::infer_overload(info, 2, None), Some(false));
  assert_eq!(operator::infer_overload(info, 1, None), Some(true));
  // An explicit choice always wins over inference.
  assert_eq!(operator::infer_overload(info, 2, Some(true)), Some(true));
}

/// spec.md §8 "main signature": every enumerated form is accepted and nothing
/// else is, across dialects.
#[test]
fn main_signatures() {
  fn make_main(arena: &mut Arena, ctx: &mut Context, params: Vec<declc::ast::AstRef>) -> declc::ast::AstRef {
    let ret = int_node(arena);
    let f = arena.new_node(
      AstKind::Function { ret_ast: Some(ret), params, flags: MemberFlags::default() },
      0, SourceSpan::synthetic(),
    );
    named(ctx, arena, f, "main");
    f
  }

  // 0 parameters: always legal.
  let mut ctx = Context::new(Dialect::C99, Options::default());
  let mut arena = Arena::new();
  let f = make_main(&mut arena, &mut ctx, vec![]);
  assert!(Checker::check(&arena, &ctx, f).is_ok());

  // 1 parameter must be void, and is illegal in K&R C.
  let mut arena = Arena::new();
  let void = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
  arena.get_mut(void).typ.base = Base::VOID;
  let f = make_main(&mut arena, &mut ctx, vec![void]);
  assert!(Checker::check(&arena, &ctx, f).is_ok());

  let knr_ctx = Context::new(Dialect::KnrC, Options::default());
  assert!(Checker::check(&arena, &knr_ctx, f).is_err());

  // 2 parameters: argc (int) + argv (char**).
  let mut arena = Arena::new();
  let argc = int_node(&mut arena);
  let char_t = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
  arena.get_mut(char_t).typ.base = Base::CHAR;
  let char_ptr = arena.new_node(AstKind::Pointer { to_ast: char_t }, 0, SourceSpan::synthetic());
  let argv = arena.new_node(AstKind::Pointer { to_ast: char_ptr }, 0, SourceSpan::synthetic());
  let f = make_main(&mut arena, &mut ctx, vec![argc, argv]);
  assert!(Checker::check(&arena, &ctx, f).is_ok());

  // 4 parameters is never legal.
  let mut arena = Arena::new();
  let a = int_node(&mut arena);
  let b = int_node(&mut arena);
  let c = int_node(&mut arena);
  let d = int_node(&mut arena);
  let f = make_main(&mut arena, &mut ctx, vec![a, b, c, d]);
  assert!(Checker::check(&arena, &ctx, f).is_err());

  // main() not returning int is always illegal. (`ret_ast: None` means
  // implicit `int`, so the violation must use an explicit non-int return.)
  let mut arena = Arena::new();
  let void = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
  arena.get_mut(void).typ.base = Base::VOID;
  let f = arena.new_node(
    AstKind::Function { ret_ast: Some(void), params: vec![], flags: MemberFlags::default() },
    0, SourceSpan::synthetic(),
  );
  named(&mut ctx, &mut arena, f, "main");
  assert!(Checker::check(&arena, &ctx, f).is_err());
}

/// `Alignas::Expr` must be a power of two (spec.md §3.6), and `alignas` is
/// illegal on a typedef regardless of the power-of-two check.
#[test]
fn alignas_power_of_two_and_typedef_restriction() {
  let ctx = Context::new(Dialect::Cpp17, Options::default());

  let mut arena = Arena::new();
  let r = int_node(&mut arena);
  arena.get_mut(r).alignas = Alignas::Expr(8);
  assert!(Checker::check(&arena, &ctx, r).is_ok());

  let mut arena = Arena::new();
  let r = int_node(&mut arena);
  arena.get_mut(r).alignas = Alignas::Expr(6);
  assert!(Checker::check(&arena, &ctx, r).is_err());

  let mut arena = Arena::new();
  let r = int_node(&mut arena);
  arena.get_mut(r).typ.store = Store::TYPEDEF;
  arena.get_mut(r).alignas = Alignas::Expr(8);
  assert!(Checker::check(&arena, &ctx, r).is_err());
}

/// Illegal relations named in spec.md §3.6: pointer-to-reference and
/// reference-to-reference are both rejected, with the pointer case
/// suggesting `*&`.
#[test]
fn pointer_to_reference_is_rejected_with_hint() {
  let ctx = Context::new(Dialect::Cpp17, Options::default());
  let mut arena = Arena::new();
  let int = int_node(&mut arena);
  let reference = arena.new_node(AstKind::Reference { to_ast: int }, 0, SourceSpan::synthetic());
  let ptr = arena.new_node(AstKind::Pointer { to_ast: reference }, 0, SourceSpan::synthetic());
  let err = Checker::check(&arena, &ctx, ptr).unwrap_err();
  let diag = err.errors().next().unwrap();
  assert_eq!(diag.hint.as_deref(), Some("did you mean \"*&\"?"));
}

/// `Type::default()` carries no bits and is legal everywhere (used as a
/// sanity check that the dialect matrix's `ALL` constant really is total).
#[test]
fn default_type_is_universal() {
  use declc::typebits::TypeBits;
  assert!(TypeBits::check(Type::default()).is_all());
}
