//! Lexical analysis core of a C11 compiler.
//!
//! Input flows through three layers. A stacked character stream
//! canonicalizes line endings, splices backslash-newline pairs and
//! guarantees a trailing newline per file. A hand-written lexer turns the
//! character stream into C11 preprocessing tokens. A token buffer stack on
//! top gives the preprocessor pushback, isolated token lists for macro
//! expansion, and `#include` stream redirection.

pub mod diagnostics;
pub mod lexer;
pub mod support;
