//! The declaration AST: a tagged-union node kept in a vector-backed arena
//! (spec.md §3.4, §9). `AstRef` is a `u32` index rather than a pointer, so
//! `dup` is a plain copy-and-relink and there is no cyclic-pointer hazard.

use smallvec::SmallVec;
use crate::operator::OperatorId;
use crate::scoped_name::ScopedName;
use crate::span::SourceSpan;
use crate::symbol::Symbol;
use crate::typebits::{Store, Type};

/// Index into an [`Arena`]. Never valid across arenas.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AstRef(u32);

impl std::fmt::Debug for AstRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

/// `Typedef.for_ast`'s edge type: it points at another tree without owning
/// it (spec.md §9's "referrer"), so it is a distinct type from [`AstRef`]
/// even though the representation is identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypedefRef(pub AstRef);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Alignas {
  #[default]
  None,
  /// A power-of-two byte count (spec.md §3.6).
  Expr(u32),
  Type(AstRef),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArraySize { None, Variable, Named(Symbol), Int(i64) }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureKind { Copy, Reference, This, StarThis, Variable }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastKind { C, Const, Dynamic, Reinterpret, Static }

/// Member/non-member declaration intent, carried alongside storage bits so
/// the checker's inference rule (spec.md §4.4.1 Operator) has both the
/// user's explicit choice and the bits to fall back on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MemberFlags {
  pub user_said_member: Option<bool>,
}

/// A lambda capture (spec.md §3.4 `Capture`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capture {
  pub kind: CaptureKind,
  pub sname: Option<ScopedName>,
}

/// The tagged union of declaration node kinds (spec.md §3.4).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AstKind {
  /// Temporary; must not appear in a completed tree.
  Placeholder,
  /// Legal only as a K&R parameter; `sname` on the owning node carries it.
  Name,
  /// `...` parameter.
  Variadic,
  Builtin { bit_width: u32, bit_int_width: Option<u32> },
  Typedef { for_ast: TypedefRef, bit_width: u32 },
  Array { of_ast: AstRef, size: ArraySize, stids: Store },
  Pointer { to_ast: AstRef },
  Reference { to_ast: AstRef },
  RvalueReference { to_ast: AstRef },
  PointerToMember { to_ast: AstRef, class_sname: ScopedName },
  Function { ret_ast: Option<AstRef>, params: Vec<AstRef>, flags: MemberFlags },
  AppleBlock { ret_ast: Option<AstRef>, params: Vec<AstRef>, flags: MemberFlags },
  Operator { ret_ast: Option<AstRef>, params: Vec<AstRef>, flags: MemberFlags, op_id: OperatorId },
  Constructor { params: Vec<AstRef>, flags: MemberFlags },
  Destructor { params: Vec<AstRef>, flags: MemberFlags },
  UserDefConversion { to_ast: AstRef },
  UserDefLiteral { ret_ast: Option<AstRef>, params: Vec<AstRef> },
  ClassStructUnion { csu_sname: ScopedName },
  Enum { enum_sname: ScopedName, of_ast: Option<AstRef> },
  Lambda { ret_ast: Option<AstRef>, params: Vec<AstRef>, captures: Vec<Capture> },
  Cast { to_ast: AstRef, kind: CastKind },
}

impl AstKind {
  /// *Function-like* kinds accept parameters (spec.md §3.4).
  #[must_use] pub fn is_function_like(&self) -> bool {
    matches!(self,
      AstKind::AppleBlock { .. } | AstKind::Constructor { .. } | AstKind::Destructor { .. }
      | AstKind::Function { .. } | AstKind::Operator { .. } | AstKind::Lambda { .. }
      | AstKind::UserDefConversion { .. } | AstKind::UserDefLiteral { .. })
  }

  /// *Object* kinds: things that can be aligned or be variables (everything
  /// but `Name`, `Variadic`, `Placeholder`, `Cast`).
  #[must_use] pub fn is_object(&self) -> bool {
    !matches!(self, AstKind::Name | AstKind::Variadic | AstKind::Placeholder | AstKind::Cast { .. })
  }

  /// The single owned child at a fixed logical position, for generic
  /// "parent" traversal (spec.md §9: one `match`, no layout tricks).
  /// `Typedef`'s edge is deliberately excluded: it is a referrer, not an
  /// owner (spec.md §3.4).
  #[must_use] pub fn child_of(&self) -> Option<AstRef> {
    match self {
      AstKind::Array { of_ast, .. } => Some(*of_ast),
      AstKind::Pointer { to_ast } | AstKind::Reference { to_ast } | AstKind::RvalueReference { to_ast }
      | AstKind::PointerToMember { to_ast, .. } | AstKind::UserDefConversion { to_ast }
      | AstKind::Cast { to_ast, .. } => Some(*to_ast),
      AstKind::Function { ret_ast, .. } | AstKind::AppleBlock { ret_ast, .. }
      | AstKind::Operator { ret_ast, .. } | AstKind::UserDefLiteral { ret_ast, .. }
      | AstKind::Lambda { ret_ast, .. } => *ret_ast,
      _ => None,
    }
  }

  #[must_use] pub fn params(&self) -> &[AstRef] {
    match self {
      AstKind::Function { params, .. } | AstKind::AppleBlock { params, .. }
      | AstKind::Operator { params, .. } | AstKind::Constructor { params, .. }
      | AstKind::Destructor { params, .. } | AstKind::UserDefLiteral { params, .. }
      | AstKind::Lambda { params, .. } => params,
      _ => &[],
    }
  }
}

/// One node of the tree (spec.md §3.4).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AstNode {
  pub sname: ScopedName,
  /// Parenthesis nesting depth at which the node was produced; used only by
  /// the gibberish renderer to decide whether to re-emit parentheses.
  pub depth: u32,
  pub typ: Type,
  pub alignas: Alignas,
  pub loc: SourceSpan,
  /// Written only by [`Arena::set_parent`]; the orphan predicate
  /// (`parent.child != self`) is an observable consequence, not invalid
  /// state (spec.md §9).
  pub parent: Option<AstRef>,
  pub kind: AstKind,
}

/// Which way [`Arena::visit`] iterates a node's children. Most callers want
/// `Forward`; the gibberish renderer switches to `Reverse` to unwind a
/// pointer chain right-to-left without a second traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction { Forward, Reverse }

/// A per-parse (or, for [`crate::typedef_store::TypedefStore`], persistent)
/// node arena. Nodes are appended and never individually freed; releasing
/// the whole arena is the only deallocation (spec.md §3.4, §5).
#[derive(Clone, Debug, Default)]
pub struct Arena(Vec<AstNode>);

impl Arena {
  #[must_use] pub fn new() -> Self { Self::default() }

  /// Allocates a new node and returns its reference.
  pub fn new_node(&mut self, kind: AstKind, depth: u32, loc: SourceSpan) -> AstRef {
    self.0.push(AstNode {
      sname: ScopedName::default(),
      depth,
      typ: Type::default(),
      alignas: Alignas::None,
      loc,
      parent: None,
      kind,
    });
    AstRef(u32::try_from(self.0.len() - 1).expect("arena index overflow"))
  }

  #[must_use] pub fn get(&self, r: AstRef) -> &AstNode { &self.0[r.0 as usize] }
  pub fn get_mut(&mut self, r: AstRef) -> &mut AstNode { &mut self.0[r.0 as usize] }
  #[must_use] pub fn len(&self) -> usize { self.0.len() }
  #[must_use] pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Overwrites both halves of the parent/child link: `child.parent` is set
  /// to `parent`, and nothing about `parent`'s stored child reference is
  /// touched here (the caller must also update that reference, e.g. by
  /// replacing `Pointer.to_ast`) — this is the sole API that may write
  /// [`AstNode::parent`] (spec.md §9).
  pub fn set_parent(&mut self, child: AstRef, parent: AstRef) {
    self.get_mut(child).parent = Some(parent);
  }

  /// `true` if `child`'s recorded parent no longer actually owns it — the
  /// "orphan" state spec.md §9 treats as a first-class intermediate, not an
  /// error (e.g. after a `Pointer.to_ast` is overwritten to point elsewhere).
  #[must_use] pub fn is_orphan(&self, child: AstRef) -> bool {
    match self.get(child).parent {
      None => false,
      Some(p) => {
        let node = self.get(p);
        node.kind.child_of() != Some(child) && !node.kind.params().contains(&child)
      }
    }
  }

  /// Deep-copies the subtree rooted at `r`, preserving parent pointers
  /// within the duplicate (spec.md §8 "AST duplication"). Scoped names,
  /// types, and alignment are copied verbatim; this is a structural clone,
  /// not a re-derivation.
  pub fn dup(&mut self, r: AstRef) -> AstRef {
    let node = self.get(r).clone();
    let new_kind = self.dup_kind(node.kind);
    let new_ref = self.new_node(new_kind, node.depth, node.loc);
    {
      let n = self.get_mut(new_ref);
      n.sname = node.sname;
      n.typ = node.typ;
      n.alignas = match node.alignas {
        Alignas::Type(t) => Alignas::Type(t),
        other => other,
      };
    }
    if let Some(child) = self.get(new_ref).kind.child_of() {
      self.set_parent(child, new_ref);
    }
    let params: SmallVec<[AstRef; 8]> = self.get(new_ref).kind.params().iter().copied().collect();
    for p in params { self.set_parent(p, new_ref); }
    new_ref
  }

  fn dup_kind(&mut self, kind: AstKind) -> AstKind {
    match kind {
      AstKind::Array { of_ast, size, stids } => AstKind::Array { of_ast: self.dup(of_ast), size, stids },
      AstKind::Pointer { to_ast } => AstKind::Pointer { to_ast: self.dup(to_ast) },
      AstKind::Reference { to_ast } => AstKind::Reference { to_ast: self.dup(to_ast) },
      AstKind::RvalueReference { to_ast } => AstKind::RvalueReference { to_ast: self.dup(to_ast) },
      AstKind::PointerToMember { to_ast, class_sname } =>
        AstKind::PointerToMember { to_ast: self.dup(to_ast), class_sname },
      AstKind::UserDefConversion { to_ast } => AstKind::UserDefConversion { to_ast: self.dup(to_ast) },
      AstKind::Cast { to_ast, kind } => AstKind::Cast { to_ast: self.dup(to_ast), kind },
      AstKind::Function { ret_ast, params, flags } =>
        AstKind::Function { ret_ast: ret_ast.map(|r| self.dup(r)), params: self.dup_params(params), flags },
      AstKind::AppleBlock { ret_ast, params, flags } =>
        AstKind::AppleBlock { ret_ast: ret_ast.map(|r| self.dup(r)), params: self.dup_params(params), flags },
      AstKind::Operator { ret_ast, params, flags, op_id } =>
        AstKind::Operator { ret_ast: ret_ast.map(|r| self.dup(r)), params: self.dup_params(params), flags, op_id },
      AstKind::Constructor { params, flags } => AstKind::Constructor { params: self.dup_params(params), flags },
      AstKind::Destructor { params, flags } => AstKind::Destructor { params: self.dup_params(params), flags },
      AstKind::UserDefLiteral { ret_ast, params } =>
        AstKind::UserDefLiteral { ret_ast: ret_ast.map(|r| self.dup(r)), params: self.dup_params(params) },
      AstKind::Lambda { ret_ast, params, captures } =>
        AstKind::Lambda { ret_ast: ret_ast.map(|r| self.dup(r)), params: self.dup_params(params), captures },
      other => other,
    }
  }

  fn dup_params(&mut self, params: Vec<AstRef>) -> Vec<AstRef> {
    params.into_iter().map(|p| self.dup(p)).collect()
  }

  /// Structural equality ignoring scoped names (spec.md §4.3).
  #[must_use] pub fn equal(&self, a: AstRef, b: AstRef) -> bool {
    let (na, nb) = (self.get(a), self.get(b));
    if na.typ != nb.typ || na.alignas_shape() != nb.alignas_shape() { return false }
    match (&na.kind, &nb.kind) {
      (AstKind::Placeholder, AstKind::Placeholder)
      | (AstKind::Name, AstKind::Name)
      | (AstKind::Variadic, AstKind::Variadic) => true,
      (AstKind::Builtin { bit_width: w1, bit_int_width: b1 }, AstKind::Builtin { bit_width: w2, bit_int_width: b2 }) =>
        w1 == w2 && b1 == b2,
      (AstKind::Typedef { for_ast: f1, bit_width: w1 }, AstKind::Typedef { for_ast: f2, bit_width: w2 }) =>
        self.equal(f1.0, f2.0) && w1 == w2,
      (AstKind::Array { of_ast: o1, size: s1, stids: t1 }, AstKind::Array { of_ast: o2, size: s2, stids: t2 }) =>
        self.equal(*o1, *o2) && s1 == s2 && t1 == t2,
      (AstKind::Pointer { to_ast: t1 }, AstKind::Pointer { to_ast: t2 })
      | (AstKind::Reference { to_ast: t1 }, AstKind::Reference { to_ast: t2 })
      | (AstKind::RvalueReference { to_ast: t1 }, AstKind::RvalueReference { to_ast: t2 })
      | (AstKind::UserDefConversion { to_ast: t1 }, AstKind::UserDefConversion { to_ast: t2 }) =>
        self.equal(*t1, *t2),
      (AstKind::PointerToMember { to_ast: t1, class_sname: s1 }, AstKind::PointerToMember { to_ast: t2, class_sname: s2 }) =>
        self.equal(*t1, *t2) && s1 == s2,
      (AstKind::Cast { to_ast: t1, kind: k1 }, AstKind::Cast { to_ast: t2, kind: k2 }) =>
        self.equal(*t1, *t2) && k1 == k2,
      (AstKind::Function { ret_ast: r1, params: p1, flags: f1 }, AstKind::Function { ret_ast: r2, params: p2, flags: f2 })
      | (AstKind::AppleBlock { ret_ast: r1, params: p1, flags: f1 }, AstKind::AppleBlock { ret_ast: r2, params: p2, flags: f2 }) =>
        self.equal_opt(*r1, *r2) && f1 == f2 && self.equal_params(p1, p2),
      (AstKind::Constructor { params: p1, flags: f1 }, AstKind::Constructor { params: p2, flags: f2 }) =>
        f1 == f2 && self.equal_params(p1, p2),
      (AstKind::Operator { ret_ast: r1, params: p1, flags: f1, op_id: o1 }, AstKind::Operator { ret_ast: r2, params: p2, flags: f2, op_id: o2 }) =>
        self.equal_opt(*r1, *r2) && f1 == f2 && o1 == o2 && self.equal_params(p1, p2),
      (AstKind::Destructor { params: p1, flags: f1 }, AstKind::Destructor { params: p2, flags: f2 }) =>
        f1 == f2 && self.equal_params(p1, p2),
      (AstKind::UserDefLiteral { ret_ast: r1, params: p1 }, AstKind::UserDefLiteral { ret_ast: r2, params: p2 }) =>
        self.equal_opt(*r1, *r2) && self.equal_params(p1, p2),
      (AstKind::ClassStructUnion { csu_sname: s1 }, AstKind::ClassStructUnion { csu_sname: s2 }) => s1 == s2,
      (AstKind::Enum { enum_sname: s1, of_ast: o1 }, AstKind::Enum { enum_sname: s2, of_ast: o2 }) =>
        s1 == s2 && self.equal_opt(*o1, *o2),
      (AstKind::Lambda { ret_ast: r1, params: p1, captures: c1 }, AstKind::Lambda { ret_ast: r2, params: p2, captures: c2 }) =>
        self.equal_opt(*r1, *r2) && self.equal_params(p1, p2) && c1 == c2,
      _ => false,
    }
  }

  fn equal_opt(&self, a: Option<AstRef>, b: Option<AstRef>) -> bool {
    match (a, b) {
      (None, None) => true,
      (Some(a), Some(b)) => self.equal(a, b),
      _ => false,
    }
  }

  fn equal_params(&self, a: &[AstRef], b: &[AstRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.equal(x, y))
  }

  /// Pre-order traversal that does not descend into function-like
  /// parameters, which are distinct subtrees (spec.md §4.3). Returns the
  /// first node for which `f` returns `true`.
  #[must_use] pub fn visit(&self, root: AstRef, direction: Direction, f: &mut impl FnMut(AstRef) -> bool) -> Option<AstRef> {
    if f(root) { return Some(root) }
    let node = self.get(root);
    let mut children: SmallVec<[AstRef; 2]> = SmallVec::new();
    children.extend(node.kind.child_of());
    if let AstKind::Typedef { for_ast, .. } = &node.kind { children.push(for_ast.0); }
    if let Direction::Reverse = direction { children.reverse(); }
    for c in children {
      if let Some(found) = self.visit(c, direction, f) { return Some(found) }
    }
    None
  }
}

impl AstNode {
  fn alignas_shape(&self) -> (bool, Option<u32>) {
    match self.alignas {
      Alignas::None => (false, None),
      Alignas::Expr(n) => (true, Some(n)),
      Alignas::Type(_) => (true, None),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::typebits::Base;

  fn leaf(arena: &mut Arena, base: Base) -> AstRef {
    let r = arena.new_node(AstKind::Builtin { bit_width: 0, bit_int_width: None }, 0, SourceSpan::synthetic());
    arena.get_mut(r).typ.base = base;
    r
  }

  #[test] fn dup_preserves_equality_and_parent_links() {
    let mut arena = Arena::new();
    let inner = leaf(&mut arena, Base::INT);
    let ptr = arena.new_node(AstKind::Pointer { to_ast: inner }, 0, SourceSpan::synthetic());
    arena.set_parent(inner, ptr);
    let dup = arena.dup(ptr);
    assert!(arena.equal(ptr, dup));
    let AstKind::Pointer { to_ast } = arena.get(dup).kind else { panic!("expected pointer") };
    assert_eq!(arena.get(to_ast).parent, Some(dup));
    assert_ne!(to_ast, inner);
  }

  #[test] fn orphan_after_relink() {
    let mut arena = Arena::new();
    let a = leaf(&mut arena, Base::INT);
    let b = leaf(&mut arena, Base::CHAR);
    let p1 = arena.new_node(AstKind::Pointer { to_ast: a }, 0, SourceSpan::synthetic());
    arena.set_parent(a, p1);
    assert!(!arena.is_orphan(a));
    let p2 = arena.new_node(AstKind::Pointer { to_ast: b }, 0, SourceSpan::synthetic());
    arena.get_mut(p1).kind = AstKind::Pointer { to_ast: b };
    arena.set_parent(b, p1);
    assert!(arena.is_orphan(a));
    let _ = p2;
  }

  #[test] fn visit_skips_function_parameters() {
    let mut arena = Arena::new();
    let param = leaf(&mut arena, Base::CHAR);
    let ret = leaf(&mut arena, Base::INT);
    let func = arena.new_node(
      AstKind::Function { ret_ast: Some(ret), params: vec![param], flags: MemberFlags::default() },
      0, SourceSpan::synthetic(),
    );
    let mut seen = Vec::new();
    arena.visit(func, Direction::Forward, &mut |r| { seen.push(r); false });
    assert!(seen.contains(&func));
    assert!(seen.contains(&ret));
    assert!(!seen.contains(&param));
  }
}
