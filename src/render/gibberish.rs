//! Multi-pass walk producing C/C++ source form, honouring east/west `const`
//! and operator/user-defined-conversion placement rules (spec.md §4.6).
//!
//! The declarator is built with the classic "inside-out" right-left rule:
//! [`declarator_parts`] returns `(left, right)` text to splice around the
//! name, recursing from the outermost AST node toward the base type. Array
//! and function-like nodes contribute their own postfix piece and forward
//! their child's `(left, right)` unchanged on the left; pointer/reference
//! nodes contribute a prefix `*`/`&` and add parentheses whenever the child
//! they wrap is itself a postfix (array or function) kind — this is the one
//! parenthesization rule spec.md §4.6 calls out by name (`T (*x)[N]`, not
//! `T *x[N]`).

use crate::ast::{Arena, AstKind, AstRef, CastKind};
use crate::context::Context;
use crate::dialect::Family;
use crate::scoped_name::ScopedName;
use crate::typebits::{Base, Store, TypeBits, Type};

/// Declares `name` (an already-gibberish-escaped identifier, or `""` for an
/// abstract declarator) with the type described by `ast`, terminated with
/// `;`. This is the entry point `TypedefStore::show` and `declare` use.
#[must_use] pub fn render_declare(arena: &Arena, ctx: &Context, ast: AstRef, name: &str) -> String {
  format!("{};", declare_no_semi(arena, ctx, ast, name))
}

fn declare_no_semi(arena: &Arena, ctx: &Context, ast: AstRef, name: &str) -> String {
  if ctx.options.trailing_return {
    if let AstKind::Function { ret_ast, params, .. } = &arena.get(ast).kind {
      let plist = render_params(arena, ctx, params);
      let quals = trailing_function_quals(arena.get(ast).typ.store);
      let ret = ret_ast.map_or_else(|| "int".to_string(), |r| declare_no_semi(arena, ctx, r, ""));
      return format!("auto {name}{plist}{quals} -> {ret}");
    }
  }
  let spec = specifier(arena, ctx, ast);
  let (l, r) = declarator_parts(arena, ctx, ast);
  let decl = format!("{l}{name}{r}");
  if spec.is_empty() { decl } else if decl.is_empty() { spec } else { format!("{spec} {decl}") }
}

/// `typedef <specifiers> <declarator>;` (spec.md §4.7: the typedef store's
/// `show` command must round-trip through gibberish as well as English;
/// this crate follows C's own typedef declarator grammar).
#[must_use] pub fn render_typedef(arena: &Arena, ctx: &Context, sname: &ScopedName, ast: AstRef) -> String {
  let name = sname.local_name().map_or_else(String::new, |s| ctx.interner.resolve(s).to_string());
  if ctx.options.using {
    format!("using {name} = {};", declare_no_semi(arena, ctx, ast, ""))
  } else {
    format!("typedef {};", declare_no_semi(arena, ctx, ast, &name))
  }
}

/// `<cast-kind>_cast<name>(<type>)` (C-style cast has no keyword).
#[must_use] pub fn render_cast(arena: &Arena, ctx: &Context, ast: AstRef) -> String {
  let node = arena.get(ast);
  let AstKind::Cast { to_ast, kind } = &node.kind else { return declare_no_semi(arena, ctx, ast, "") };
  let target = declare_no_semi(arena, ctx, *to_ast, "");
  let name = node.sname.local_name().map_or_else(String::new, |s| ctx.interner.resolve(s).to_string());
  match kind {
    CastKind::C => format!("({target}){name}"),
    CastKind::Const => format!("const_cast<{target}>({name})"),
    CastKind::Dynamic => format!("dynamic_cast<{target}>({name})"),
    CastKind::Reinterpret => format!("reinterpret_cast<{target}>({name})"),
    CastKind::Static => format!("static_cast<{target}>({name})"),
  }
}

fn is_postfix_kind(kind: &AstKind) -> bool {
  matches!(kind,
    AstKind::Array { .. } | AstKind::Function { .. } | AstKind::AppleBlock { .. }
    | AstKind::Operator { .. } | AstKind::Constructor { .. } | AstKind::Destructor { .. }
    | AstKind::UserDefLiteral { .. } | AstKind::Lambda { .. })
}

fn ptr_qualifiers(store: Store) -> String {
  let mut words = Vec::new();
  if store.contains(Store::CONST) { words.push("const"); }
  if store.contains(Store::VOLATILE) { words.push("volatile"); }
  if words.is_empty() { String::new() } else { format!(" {}", words.join(" ")) }
}

/// Recursively builds the `(left, right)` splice for the declarator of
/// `ast`. Leaves (the base type) contribute nothing; every other kind
/// forwards its child's parts, adding its own prefix or postfix chrome.
fn declarator_parts(arena: &Arena, ctx: &Context, ast: AstRef) -> (String, String) {
  let node = arena.get(ast);
  match &node.kind {
    AstKind::Pointer { to_ast } => {
      let (cl, cr) = declarator_parts(arena, ctx, *to_ast);
      let star = format!("*{}", ptr_qualifiers(node.typ.store));
      wrap_prefix(arena, *to_ast, cl, cr, &star)
    }
    AstKind::Reference { to_ast } => {
      let (cl, cr) = declarator_parts(arena, ctx, *to_ast);
      wrap_prefix(arena, *to_ast, cl, cr, "&")
    }
    AstKind::RvalueReference { to_ast } => {
      let (cl, cr) = declarator_parts(arena, ctx, *to_ast);
      wrap_prefix(arena, *to_ast, cl, cr, "&&")
    }
    AstKind::PointerToMember { to_ast, class_sname } => {
      let (cl, cr) = declarator_parts(arena, ctx, *to_ast);
      let prefix = format!("{}::*{}", render_sname_gibberish(class_sname, ctx), ptr_qualifiers(node.typ.store));
      wrap_prefix(arena, *to_ast, cl, cr, &prefix)
    }
    AstKind::Array { of_ast, size, stids } => {
      let (l, r) = declarator_parts(arena, ctx, *of_ast);
      let stid_words = if stids.is_empty() { String::new() } else { format!("{} ", TypeBits::name_english_non_base(Type { store: *stids, ..Type::default() })) };
      let size_str = match size {
        crate::ast::ArraySize::Int(n) => n.to_string(),
        crate::ast::ArraySize::Named(s) => ctx.interner.resolve(*s).to_string(),
        crate::ast::ArraySize::Variable => "*".to_string(),
        crate::ast::ArraySize::None => String::new(),
      };
      (l, format!("[{stid_words}{size_str}]{r}"))
    }
    AstKind::Function { ret_ast, params, .. } | AstKind::AppleBlock { ret_ast, params, .. } => {
      let (l, r) = ret_ast.map_or((String::new(), String::new()), |r| declarator_parts(arena, ctx, r));
      let block = matches!(node.kind, AstKind::AppleBlock { .. });
      let plist = render_params(arena, ctx, params);
      let quals = trailing_function_quals(node.typ.store);
      if block { (format!("(^{l}"), format!("){r}{plist}{quals}")) } else { (l, format!("{plist}{quals}{r}")) }
    }
    AstKind::Operator { ret_ast, params, .. } => {
      let (l, r) = ret_ast.map_or((String::new(), String::new()), |r| declarator_parts(arena, ctx, r));
      let plist = render_params(arena, ctx, params);
      let quals = trailing_function_quals(node.typ.store);
      (l, format!("{plist}{quals}{r}"))
    }
    AstKind::Constructor { params, .. } | AstKind::Destructor { params, .. } => {
      (String::new(), render_params(arena, ctx, params))
    }
    AstKind::UserDefLiteral { ret_ast, params } => {
      let (l, r) = ret_ast.map_or((String::new(), String::new()), |r| declarator_parts(arena, ctx, r));
      (l, format!("{}{r}", render_params(arena, ctx, params)))
    }
    AstKind::Lambda { ret_ast, params, captures } => {
      let caps: Vec<&str> = captures.iter().map(|c| match c.kind {
        crate::ast::CaptureKind::Copy | crate::ast::CaptureKind::Variable => "=",
        crate::ast::CaptureKind::Reference => "&",
        crate::ast::CaptureKind::This => "this",
        crate::ast::CaptureKind::StarThis => "*this",
      }).collect();
      let ret = ret_ast.map(|r| format!(" -> {}", declare_no_semi(arena, ctx, r, "")));
      (format!("[{}]", caps.join(", ")), format!("{}{}", render_params(arena, ctx, params), ret.unwrap_or_default()))
    }
    AstKind::UserDefConversion { to_ast } => {
      // `operator <type>` carries its own name; nothing is spliced around
      // the caller-supplied name here (see [`render_udc`]).
      let _ = to_ast;
      (String::new(), String::new())
    }
    AstKind::Cast { .. } | AstKind::Placeholder | AstKind::Name | AstKind::Variadic
    | AstKind::Builtin { .. } | AstKind::Typedef { .. } | AstKind::ClassStructUnion { .. } | AstKind::Enum { .. } =>
      (String::new(), String::new()),
  }
}

fn wrap_prefix(arena: &Arena, child: AstRef, cl: String, cr: String, prefix: &str) -> (String, String) {
  if is_postfix_kind(&arena.get(child).kind) {
    (format!("{cl}({prefix}"), format!("){cr}"))
  } else {
    (format!("{cl}{prefix}"), cr)
  }
}

fn trailing_function_quals(store: Store) -> String {
  let mut words = Vec::new();
  if store.contains(Store::CONST) { words.push(" const".to_string()); }
  if store.contains(Store::VOLATILE) { words.push(" volatile".to_string()); }
  if store.contains(Store::REF) { words.push(" &".to_string()); }
  if store.contains(Store::RVALUE_REF) { words.push(" &&".to_string()); }
  if store.contains(Store::NOEXCEPT) { words.push(" noexcept".to_string()); }
  if store.contains(Store::OVERRIDE) { words.push(" override".to_string()); }
  if store.contains(Store::FINAL) { words.push(" final".to_string()); }
  words.concat()
}

fn render_params(arena: &Arena, ctx: &Context, params: &[AstRef]) -> String {
  let rendered: Vec<String> = params.iter().map(|&p| {
    let node = arena.get(p);
    if matches!(node.kind, AstKind::Variadic) { return "...".to_string() }
    let name = node.sname.local_name().map_or_else(String::new, |s| ctx.interner.resolve(s).to_string());
    declare_no_semi(arena, ctx, p, &name)
  }).collect();
  format!("({})", rendered.join(", "))
}

/// The base-type specifier sequence: the declaration's own storage/attribute
/// words (taken from the root node, since that is where checker.rs reads
/// function-level storage like `inline`/`virtual`/`constexpr`) followed by
/// the leaf type's full spelling (base words plus the leaf's own
/// qualifiers, honouring `east_const`).
fn specifier(arena: &Arena, ctx: &Context, root: AstRef) -> String {
  let root_node = arena.get(root);
  let leaf = find_leaf(arena, root);
  let mut words = Vec::new();
  if root != leaf {
    let root_only = Type { store: root_node.typ.store & !(Store::CONST | Store::VOLATILE | Store::RESTRICT), attr: root_node.typ.attr, ..Type::default() };
    let w = TypeBits::name_c(root_only, ctx.options.east_const);
    if !w.is_empty() { words.push(w); }
  }
  words.push(leaf_spec(arena, ctx, leaf));
  words.join(" ")
}

fn find_leaf(arena: &Arena, ast: AstRef) -> AstRef {
  match arena.get(ast).kind.child_of() {
    Some(child) => find_leaf(arena, child),
    None => ast,
  }
}

/// `true` if `base` names only sign/size modifiers (`signed`, `unsigned`,
/// `short`, `long`, `long long`) with no primary type of their own, i.e. a
/// bare `int` is implied (`long x;` means `long int x;`).
fn implies_int(base: Base) -> bool {
  let modifiers = Base::SIGNED | Base::UNSIGNED | Base::SHORT | Base::LONG | Base::LONG_LONG;
  !base.is_empty() && modifiers.contains(base)
}

/// Whether `csu`/`enum` tag keywords are required ahead of the name:
/// always in C (no elaborated-type-specifier elision), and in C++ only
/// when `explicit_ecsu` asks for it (spec.md §6.4).
fn tag_keyword_required(ctx: &Context) -> bool {
  ctx.current_dialect().family() != Family::Cpp || ctx.options.explicit_ecsu
}

fn leaf_spec(arena: &Arena, ctx: &Context, leaf: AstRef) -> String {
  let node = arena.get(leaf);
  match &node.kind {
    AstKind::ClassStructUnion { csu_sname } => {
      let word = if node.typ.base.contains(Base::CLASS) { "class" }
        else if node.typ.base.contains(Base::UNION) { "union" }
        else { "struct" };
      let name = render_sname_gibberish(csu_sname, ctx);
      if tag_keyword_required(ctx) { format!("{word} {name}") } else { name }
    }
    AstKind::Enum { enum_sname, of_ast } => {
      let under = of_ast.map(|u| format!(" : {}", leaf_spec(arena, ctx, u))).unwrap_or_default();
      let name = render_sname_gibberish(enum_sname, ctx);
      if tag_keyword_required(ctx) { format!("enum {name}{under}") } else { format!("{name}{under}") }
    }
    AstKind::Typedef { .. } => render_sname_gibberish(&node.sname, ctx),
    AstKind::Name => node.sname.local_name().map_or_else(String::new, |s| ctx.interner.resolve(s).to_string()),
    AstKind::UserDefConversion { to_ast } => format!("operator {}", declare_no_semi(arena, ctx, *to_ast, "")),
    _ => {
      let spelled = TypeBits::name_c(node.typ, ctx.options.east_const);
      if ctx.options.explicit_int && implies_int(node.typ.base) { format!("{spelled} int") } else { spelled }
    }
  }
}

fn render_sname_gibberish(sname: &ScopedName, ctx: &Context) -> String {
  sname.0.iter().map(|s| ctx.interner.resolve(s.ident)).collect::<Vec<_>>().join("::")
}

/// An operator's declared name, `operator<spelling>` (a space precedes
/// word-like spellings such as `new`/`delete`; symbolic spellings like `+`
/// attach directly, matching the common idiom `operator+` over
/// `operator +`).
#[must_use] pub fn operator_name(spelling: &str) -> String {
  if spelling.chars().next().is_some_and(char::is_alphabetic) { format!("operator {spelling}") }
  else { format!("operator{spelling}") }
}

/// `TypedefStore`/`ShowCommand` and `declare operator ...` both need the
/// operator's own declarator built with `operator_name` as the name.
#[must_use] pub fn render_operator(arena: &Arena, ctx: &Context, ast: AstRef) -> String {
  let AstKind::Operator { op_id, .. } = &arena.get(ast).kind else { return declare_no_semi(arena, ctx, ast, "") };
  format!("{};", declare_no_semi(arena, ctx, ast, &operator_name(op_id.info().spelling)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::{Arena, ArraySize, MemberFlags};
  use crate::context::{Context, Options};
  use crate::dialect::Dialect;
  use crate::operator::OperatorId;
  use crate::span::SourceSpan;

  #[test] fn pointer_to_array_of_int() {
    let ctx = Context::new(Dialect::C99, Options::default());
    let mut arena = Arena::new();
    let int = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(int).typ.base = Base::INT;
    let array = arena.new_node(
      AstKind::Array { of_ast: int, size: ArraySize::Int(10), stids: Store::empty() },
      0, SourceSpan::synthetic(),
    );
    let ptr = arena.new_node(AstKind::Pointer { to_ast: array }, 0, SourceSpan::synthetic());
    assert_eq!(render_declare(&arena, &ctx, ptr, "p"), "int (*p)[10];");
  }

  #[test] fn function_pointer_returning_int() {
    let ctx = Context::new(Dialect::C11, Options::default());
    let mut arena = Arena::new();
    let p1 = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(p1).typ.base = Base::INT;
    let char_t = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(char_t).typ.base = Base::CHAR;
    let char_ptr = arena.new_node(AstKind::Pointer { to_ast: char_t }, 0, SourceSpan::synthetic());
    let array = arena.new_node(AstKind::Array { of_ast: char_ptr, size: ArraySize::None, stids: Store::empty() }, 0, SourceSpan::synthetic());
    let ret_int = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(ret_int).typ.base = Base::INT;
    let func = arena.new_node(
      AstKind::Function { ret_ast: Some(ret_int), params: vec![p1, array], flags: MemberFlags::default() },
      0, SourceSpan::synthetic(),
    );
    let ptr = arena.new_node(AstKind::Pointer { to_ast: func }, 0, SourceSpan::synthetic());
    assert_eq!(render_declare(&arena, &ctx, ptr, "f"), "int (*f)(int, char *[]);");
  }

  #[test] fn operator_plus_two_ints() {
    let ctx = Context::new(Dialect::Cpp14, Options::default());
    let mut arena = Arena::new();
    let a = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(a).typ.base = Base::INT;
    let b = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(b).typ.base = Base::INT;
    let ret = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(ret).typ.base = Base::INT;
    let op = arena.new_node(
      AstKind::Operator { ret_ast: Some(ret), params: vec![a, b], flags: MemberFlags::default(), op_id: OperatorId::Plus },
      0, SourceSpan::synthetic(),
    );
    assert_eq!(render_operator(&arena, &ctx, op), "int operator+(int, int);");
  }

  #[test] fn explicit_int_appends_int_to_bare_modifiers() {
    let ctx = Context::new(Dialect::C99, Options { explicit_int: true, ..Options::default() });
    let mut arena = Arena::new();
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = Base::LONG;
    assert_eq!(render_declare(&arena, &ctx, r, "x"), "long int x;");

    let ctx_implicit = Context::new(Dialect::C99, Options { explicit_int: false, ..Options::default() });
    assert_eq!(render_declare(&arena, &ctx_implicit, r, "x"), "long x;");
  }

  #[test] fn explicit_ecsu_controls_struct_keyword_in_cpp() {
    use crate::scoped_name::{Scope, ScopeKind, ScopedName};
    let mut arena = Arena::new();
    let mut ctx = Context::new(Dialect::Cpp17, Options { explicit_ecsu: false, ..Options::default() });
    let sym = ctx.interner.intern("Foo");
    let csu = arena.new_node(
      AstKind::ClassStructUnion { csu_sname: ScopedName(smallvec::smallvec![Scope { ident: sym, kind: ScopeKind::Struct }]) },
      0, SourceSpan::synthetic(),
    );
    arena.get_mut(csu).typ.base = Base::STRUCT;
    assert_eq!(render_declare(&arena, &ctx, csu, "x"), "Foo x;");

    let ctx_explicit = Context::new(Dialect::Cpp17, Options { explicit_ecsu: true, ..Options::default() });
    assert_eq!(render_declare(&arena, &ctx_explicit, csu, "x"), "struct Foo x;");

    // C always keeps the tag keyword regardless of explicit_ecsu.
    let ctx_c = Context::new(Dialect::C99, Options { explicit_ecsu: false, ..Options::default() });
    assert_eq!(render_declare(&arena, &ctx_c, csu, "x"), "struct Foo x;");
  }

  #[test] fn trailing_return_renders_arrow_syntax() {
    let ctx = Context::new(Dialect::Cpp14, Options { trailing_return: true, ..Options::default() });
    let mut arena = Arena::new();
    let ret = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(ret).typ.base = Base::INT;
    let func = arena.new_node(
      AstKind::Function { ret_ast: Some(ret), params: vec![], flags: MemberFlags::default() },
      0, SourceSpan::synthetic(),
    );
    assert_eq!(render_declare(&arena, &ctx, func, "f"), "auto f() -> int;");
  }

  #[test] fn east_const_pointer_to_char() {
    let ctx = Context::new(Dialect::Cpp17, Options { east_const: true, ..Options::default() });
    let mut arena = Arena::new();
    let c = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(c).typ.base = Base::CHAR;
    arena.get_mut(c).typ.store = Store::CONST;
    let ptr = arena.new_node(AstKind::Pointer { to_ast: c }, 0, SourceSpan::synthetic());
    assert_eq!(render_declare(&arena, &ctx, ptr, "p"), "char const *p;");
  }
}
