//! Preprocessing tokens.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::support::buf::{quote_char, quote_cstring_len};

use super::position::{Position, SourceFile};

/// Macro names suppressed from re-expansion on a token. The set belongs to
/// the preprocessor; the lexer only reserves the slot and leaves it unset.
pub type Hideset = HashSet<String>;

/// String and character constant encodings (C11 6.4.4.4, 6.4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    None,
    Char16,
    Char32,
    Utf8,
    Wchar,
}

impl Encoding {
    /// The literal prefix that spells this encoding.
    pub fn prefix(self) -> &'static str {
        match self {
            Encoding::None => "",
            Encoding::Char16 => "u",
            Encoding::Char32 => "U",
            Encoding::Utf8 => "u8",
            Encoding::Wchar => "L",
        }
    }
}

/// Punctuators and multi-character operators.
///
/// Single-character punctuators are identified by their ASCII byte, so
/// digraphs can map onto the punctuator they spell. Everything longer
/// lives in its own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punct {
    Byte(u8),
    Arrow,
    Inc,
    Dec,
    Ellipsis,
    HashHash,
    Eq,
    NotEq,
    Le,
    Ge,
    LogicalAnd,
    LogicalOr,
    Shl,
    Shr,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
}

impl fmt::Display for Punct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Punct::Byte(b) => return write!(f, "{}", *b as char),
            Punct::Arrow => "->",
            Punct::Inc => "++",
            Punct::Dec => "--",
            Punct::Ellipsis => "...",
            Punct::HashHash => "##",
            Punct::Eq => "==",
            Punct::NotEq => "!=",
            Punct::Le => "<=",
            Punct::Ge => ">=",
            Punct::LogicalAnd => "&&",
            Punct::LogicalOr => "||",
            Punct::Shl => "<<",
            Punct::Shr => ">>",
            Punct::AddAssign => "+=",
            Punct::SubAssign => "-=",
            Punct::MulAssign => "*=",
            Punct::DivAssign => "/=",
            Punct::ModAssign => "%=",
            Punct::AndAssign => "&=",
            Punct::OrAssign => "|=",
            Punct::XorAssign => "^=",
            Punct::ShlAssign => "<<=",
            Punct::ShrAssign => ">>=",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Punct(Punct),
    /// A preprocessing number, kept verbatim; later phases parse it.
    Number(String),
    Char {
        value: i32,
        enc: Encoding,
    },
    /// Cooked string payload. The terminating NUL is stored, C-string
    /// style; [`Token::str_len`] reports the length without it.
    Str {
        value: Vec<u8>,
        enc: Encoding,
    },
    Space,
    Newline,
    /// A byte no token starts with; the parser reports it.
    Invalid(u8),
    Eof,
}

/// One preprocessing token.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub file: Rc<SourceFile>,
    pub line: u32,
    pub column: u32,
    /// Ordinal of the token within its file; strictly increasing.
    pub count: u32,
    /// First token of a logical line, ignoring whitespace and comments.
    pub bol: bool,
    /// Preceded by whitespace or a comment.
    pub space: bool,
    pub hideset: Option<Rc<Hideset>>,
}

impl Token {
    pub fn pos(&self) -> Position {
        Position {
            file: Rc::clone(&self.file),
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_keyword(&self, p: Punct) -> bool {
        matches!(&self.kind, TokenKind::Punct(q) if *q == p)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(s) if s == name)
    }

    /// Length of a string literal payload, excluding the NUL terminator.
    pub fn str_len(&self) -> Option<usize> {
        match &self.kind {
            TokenKind::Str { value, .. } => Some(value.len().saturating_sub(1)),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) | TokenKind::Number(s) => f.write_str(s),
            TokenKind::Punct(p) => write!(f, "{p}"),
            TokenKind::Char { value, enc } => {
                if *value > 0xFF {
                    write!(f, "{}'\\u{:04x}'", enc.prefix(), value)
                } else {
                    write!(f, "{}'{}'", enc.prefix(), quote_char(*value as u8))
                }
            }
            TokenKind::Str { value, enc } => {
                let body = value.strip_suffix(&[0]).unwrap_or(value);
                write!(f, "{}\"{}\"", enc.prefix(), quote_cstring_len(body))
            }
            TokenKind::Space => f.write_str("(space)"),
            TokenKind::Newline => f.write_str("(newline)"),
            TokenKind::Invalid(b) => write!(f, "{}", *b as char),
            TokenKind::Eof => f.write_str("(eof)"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
