//! Source files and positions.

use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

/// One input known to the lexer: a file on disk, standard input, or an
/// in-memory string buffer.
///
/// Shared between the stream reading it and every token minted from it,
/// so positions stay printable after the stream is gone.
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub mtime: Option<SystemTime>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, mtime: Option<SystemTime>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            mtime,
        })
    }
}

/// A `file:line:column` location. Lines and columns are 1-based.
#[derive(Debug, Clone)]
pub struct Position {
    pub file: Rc<SourceFile>,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.name, self.line, self.column)
    }
}
