//! Lexical diagnostics: fatal errors and collectable warnings.
//!
//! Every lexical error carries the position of the construct it points at
//! and renders as `file:line:column: message`. Warnings are not fatal;
//! the lexer collects them and the driver decides what to do.

use std::io;

use thiserror::Error;

use crate::lexer::position::Position;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("{pos}: unterminated string literal")]
    UnterminatedString { pos: Position },

    #[error("{pos}: unterminated character literal")]
    UnterminatedChar { pos: Position },

    #[error("{pos}: premature end of block comment")]
    UnterminatedComment { pos: Position },

    #[error("{pos}: \\x is not followed by a hexadecimal digit")]
    MissingHexDigit { pos: Position },

    #[error("{pos}: invalid universal character")]
    BadUniversalChar { pos: Position },

    #[error("{pos}: invalid universal character \\{spelling}")]
    InvalidUniversalValue { pos: Position, spelling: String },

    #[error("{pos}: invalid UCS character \\U{rune:08x}")]
    UnencodableChar { pos: Position, rune: u32 },

    #[error("{pos}: premature end of header name")]
    UnterminatedHeaderName { pos: Position },

    #[error("{pos}: header name should not be empty")]
    EmptyHeaderName { pos: Position },

    #[error("{pos}: unconsumed input: {input}")]
    UnconsumedInput { pos: Position, input: String },

    #[error("cannot open {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("cannot stat {path}: {source}")]
    Stat { path: String, source: io::Error },

    #[error("read error on {file}: {source}")]
    Read { file: String, source: io::Error },
}

/// A non-fatal lexical diagnostic, promotable to an error by the driver.
#[derive(Debug, Clone)]
pub struct LexWarning {
    pub message: String,
    pub pos: Position,
}
