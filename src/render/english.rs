//! Pre-order walk producing pseudo-English prose for declarations, casts,
//! and typedef definitions (spec.md §4.5). Every phrasing below is
//! contractual — the wording comes verbatim from the specification, not an
//! implementer's taste.

use crate::ast::{Alignas, Arena, AstKind, AstRef, CaptureKind, CastKind};
use crate::context::Context;
use crate::scoped_name::{ScopeKind, ScopedName};
use crate::typebits::{Base, TypeBits};

/// `"declare <name> as <description>"`, the phrasing produced for `explain`
/// (spec.md §8: `explain int (*f)(...)` → `declare f as pointer to ...`).
/// If `ast` carries no name (an anonymous cast target, say), only the
/// description is returned.
#[must_use] pub fn render_declare(arena: &Arena, ctx: &Context, ast: AstRef) -> String {
  let node = arena.get(ast);
  let body = describe(arena, ctx, ast);
  if node.sname.is_empty() { body } else { format!("declare {} as {body}", render_sname(&node.sname, ctx)) }
}

/// `"define <name> as <description>"`, the phrasing `TypedefStore::show`
/// uses for its English form (spec.md §4.7, §8: `define PI as float`).
#[must_use] pub fn render_typedef_define(arena: &Arena, ctx: &Context, sname: &ScopedName, ast: AstRef) -> String {
  format!("define {} as {}", render_sname(sname, ctx), describe(arena, ctx, ast))
}

/// A cast's own phrasing already includes everything (spec.md §4.5 Cast
/// bullet); this is an alias of [`describe`] for callers that only have a
/// `Cast` node, so they don't have to reach into this module's internals.
#[must_use] pub fn render_cast(arena: &Arena, ctx: &Context, ast: AstRef) -> String {
  describe(arena, ctx, ast)
}

fn render_sname(sname: &ScopedName, ctx: &Context) -> String {
  let Some(local) = sname.local_name() else { return String::new() };
  let mut s = ctx.interner.resolve(local).to_string();
  for scope in sname.0[..sname.0.len().saturating_sub(1)].iter().rev() {
    let word = scope_kind_word(scope.kind);
    s.push_str(" of ");
    if !word.is_empty() { s.push_str(word); s.push(' '); }
    s.push_str(ctx.interner.resolve(scope.ident));
  }
  s
}

fn scope_kind_word(kind: ScopeKind) -> &'static str {
  match kind {
    ScopeKind::None => "",
    ScopeKind::Namespace => "namespace",
    ScopeKind::InlineNamespace => "inline namespace",
    ScopeKind::Class => "class",
    ScopeKind::Struct => "struct",
    ScopeKind::Union => "union",
    ScopeKind::Enum => "enum",
  }
}

fn csu_word(base: Base) -> &'static str {
  if base.contains(Base::CLASS) { "class" }
  else if base.contains(Base::STRUCT) { "struct" }
  else if base.contains(Base::UNION) { "union" }
  else { "enum" }
}

fn push_word(s: &mut String, w: &str) {
  if w.is_empty() { return }
  if !s.is_empty() && !s.ends_with(' ') { s.push(' '); }
  s.push_str(w);
}

fn describe(arena: &Arena, ctx: &Context, ast: AstRef) -> String {
  let node = arena.get(ast);
  let mut s = String::new();
  match node.alignas {
    Alignas::None => {}
    Alignas::Expr(n) => push_word(&mut s, &format!("aligned as {n} bytes")),
    Alignas::Type(t) => push_word(&mut s, &format!("aligned as {}", describe(arena, ctx, t))),
  }
  let non_base = TypeBits::name_english_non_base(node.typ);

  match &node.kind {
    AstKind::Placeholder => push_word(&mut s, "<incomplete declaration>"),

    AstKind::Name => {
      if let Some(n) = node.sname.local_name() { push_word(&mut s, ctx.interner.resolve(n)); }
    }

    AstKind::Variadic => push_word(&mut s, "..."),

    AstKind::Builtin { .. } => push_word(&mut s, &TypeBits::name_english(node.typ)),

    AstKind::Typedef { .. } => {
      if !non_base.is_empty() { push_word(&mut s, &non_base); }
      push_word(&mut s, &render_sname(&node.sname, ctx));
    }

    AstKind::Array { of_ast, size, stids } => {
      push_word(&mut s, &non_base);
      if matches!(size, crate::ast::ArraySize::Variable) { push_word(&mut s, "variable length"); }
      push_word(&mut s, "array");
      if !stids.is_empty() {
        let t = crate::typebits::Type { store: *stids, ..Default::default() };
        push_word(&mut s, &TypeBits::name_english_non_base(t));
      }
      match size {
        crate::ast::ArraySize::Int(n) => push_word(&mut s, &n.to_string()),
        crate::ast::ArraySize::Named(sym) => push_word(&mut s, ctx.interner.resolve(*sym)),
        crate::ast::ArraySize::None | crate::ast::ArraySize::Variable => {}
      }
      push_word(&mut s, "of");
      push_word(&mut s, &describe(arena, ctx, *of_ast));
    }

    AstKind::Pointer { to_ast } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "pointer to");
      push_word(&mut s, &describe(arena, ctx, *to_ast));
    }
    AstKind::Reference { to_ast } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "reference to");
      push_word(&mut s, &describe(arena, ctx, *to_ast));
    }
    AstKind::RvalueReference { to_ast } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "rvalue reference to");
      push_word(&mut s, &describe(arena, ctx, *to_ast));
    }

    AstKind::PointerToMember { to_ast, class_sname } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "pointer to member of");
      push_word(&mut s, csu_word(arena.get(*to_ast).typ.base));
      push_word(&mut s, &render_sname(class_sname, ctx));
    }

    AstKind::ClassStructUnion { csu_sname } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, csu_word(node.typ.base));
      push_word(&mut s, &render_sname(csu_sname, ctx));
    }

    AstKind::Enum { enum_sname, of_ast } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "enum");
      push_word(&mut s, &render_sname(enum_sname, ctx));
      if let Some(u) = of_ast {
        push_word(&mut s, "of type");
        push_word(&mut s, &describe(arena, ctx, *u));
      }
    }

    AstKind::Function { ret_ast, params, flags }
    | AstKind::AppleBlock { ret_ast, params, flags } => {
      push_word(&mut s, &non_base);
      push_member_word(&mut s, flags);
      let word = if matches!(node.kind, AstKind::AppleBlock { .. }) { "block" } else { "function" };
      push_word(&mut s, word);
      push_params(&mut s, arena, ctx, params);
      push_returning(&mut s, arena, ctx, *ret_ast);
    }

    AstKind::Operator { ret_ast, params, flags, op_id } => {
      push_word(&mut s, &non_base);
      push_member_word(&mut s, flags);
      push_word(&mut s, &format!("operator {}", op_id.info().spelling));
      push_params(&mut s, arena, ctx, params);
      push_returning(&mut s, arena, ctx, *ret_ast);
    }

    AstKind::Constructor { params, flags } => {
      push_word(&mut s, &non_base);
      push_member_word(&mut s, flags);
      push_word(&mut s, "constructor");
      push_params(&mut s, arena, ctx, params);
    }
    AstKind::Destructor { params, flags } => {
      push_word(&mut s, &non_base);
      push_member_word(&mut s, flags);
      push_word(&mut s, "destructor");
      push_params(&mut s, arena, ctx, params);
    }

    AstKind::UserDefConversion { to_ast } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "user-defined conversion operator");
      if !node.sname.is_empty() {
        push_word(&mut s, "of");
        push_word(&mut s, &render_sname(&node.sname, ctx));
      }
      push_word(&mut s, "returning");
      push_word(&mut s, &describe(arena, ctx, *to_ast));
    }

    AstKind::UserDefLiteral { ret_ast, params } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "user-defined literal");
      push_params(&mut s, arena, ctx, params);
      push_returning(&mut s, arena, ctx, *ret_ast);
    }

    AstKind::Lambda { ret_ast, params, captures } => {
      push_word(&mut s, &non_base);
      push_word(&mut s, "lambda");
      if !captures.is_empty() {
        push_word(&mut s, "capturing");
        let rendered: Vec<String> = captures.iter().map(|c| render_capture(c, ctx)).collect();
        push_word(&mut s, &rendered.join(", "));
      }
      push_params(&mut s, arena, ctx, params);
      push_returning(&mut s, arena, ctx, *ret_ast);
    }

    AstKind::Cast { to_ast, kind } => {
      push_word(&mut s, cast_kind_word(*kind));
      push_word(&mut s, "cast");
      if !node.sname.is_empty() { push_word(&mut s, &render_sname(&node.sname, ctx)); }
      push_word(&mut s, "into");
      push_word(&mut s, &describe(arena, ctx, *to_ast));
    }
  }
  s
}

fn push_member_word(s: &mut String, flags: &crate::ast::MemberFlags) {
  match flags.user_said_member {
    Some(true) => push_word(s, "member"),
    Some(false) => push_word(s, "non-member"),
    None => {}
  }
}

fn push_params(s: &mut String, arena: &Arena, ctx: &Context, params: &[AstRef]) {
  let rendered: Vec<String> = params.iter().map(|&p| {
    let node = arena.get(p);
    let mut ps = String::new();
    if let Some(n) = node.sname.local_name() {
      if !matches!(node.kind, AstKind::Variadic) {
        ps.push_str(ctx.interner.resolve(n));
        ps.push_str(" as ");
      }
    }
    ps.push_str(&describe(arena, ctx, p));
    ps
  }).collect();
  s.push_str(" (");
  s.push_str(&rendered.join(", "));
  s.push(')');
}

fn push_returning(s: &mut String, arena: &Arena, ctx: &Context, ret_ast: Option<AstRef>) {
  if let Some(r) = ret_ast {
    push_word(s, "returning");
    push_word(s, &describe(arena, ctx, r));
  }
}

fn render_capture(c: &crate::ast::Capture, ctx: &Context) -> String {
  let word = match c.kind {
    CaptureKind::Copy => "copy",
    CaptureKind::Reference => "reference",
    CaptureKind::This => "this",
    CaptureKind::StarThis => "*this",
    CaptureKind::Variable => "copy",
  };
  match &c.sname {
    Some(sname) => format!("{word} {}", render_sname(sname, ctx)),
    None => word.to_string(),
  }
}

fn cast_kind_word(kind: CastKind) -> &'static str {
  match kind {
    CastKind::C => "c",
    CastKind::Const => "const",
    CastKind::Dynamic => "dynamic",
    CastKind::Reinterpret => "reinterpret",
    CastKind::Static => "static",
  }
}
