//! `declc`: the semantic model and bidirectional renderer behind a `cdecl`-
//! style C/C++ declaration translator.
//!
//! This crate owns the declaration AST (`ast`), the language-version matrix
//! (`dialect`), the `(Base, Store, Attr)` type bitsets (`typebits`), scoped
//! names and the operator table (`scoped_name`, `operator`), the two-pass
//! semantic checker (`checker`), the persistent typedef store (`typedef_store`,
//! `show`) and the bidirectional renderer (`render`). Lexing, parsing, the
//! REPL, file I/O, and macro expansion are external collaborators: this
//! crate only ever consumes an already-built [`ast::Arena`] and hands back
//! text or diagnostics.

pub mod ast;
pub mod checker;
pub mod context;
pub mod diag;
pub mod dialect;
pub mod operator;
pub mod render;
pub mod scoped_name;
pub mod show;
pub mod span;
pub mod symbol;
pub mod typebits;
pub mod typedef_store;

pub use checker::Checker;
pub use context::{Context, Options};
pub use diag::{DiagKind, Diagnostic, Diagnostics};
pub use dialect::Dialect;
