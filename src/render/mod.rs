//! Bidirectional renderer: English form from an AST (`english`) and C/C++
//! source form from an AST (`gibberish`) (spec.md §4.5, §4.6). Parsing
//! English or gibberish back into an AST is the parser's job (spec.md §6.1);
//! this crate only produces text.

pub mod english;
pub mod gibberish;

/// A text sink, optionally colour-aware in a real REPL (spec.md §6.2). The
/// renderers only ever call [`Writer::write_str`]; a colouring terminal
/// front-end can wrap that to inject ANSI escapes around specific calls
/// without this crate knowing about colour at all.
pub trait Writer {
  fn write_str(&mut self, s: &str);
}

impl Writer for String {
  fn write_str(&mut self, s: &str) { self.push_str(s) }
}

impl Writer for std::fmt::Formatter<'_> {
  fn write_str(&mut self, s: &str) { let _ = std::fmt::Write::write_str(self, s); }
}
