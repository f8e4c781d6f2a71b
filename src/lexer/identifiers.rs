//! Identifier scanning.

use crate::diagnostics::LexError;
use crate::support::Buf;

use super::Lexer;
use super::position::Position;
use super::token::{Token, TokenKind};

/// Identifier continuation set: alphanumerics, `_`, `$`, and any byte past
/// ASCII. Bytes past ASCII are not validated as UTF-8 here.
fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80
}

impl Lexer {
    pub(super) fn read_ident(&mut self, first: u8, pos: Position) -> Result<Token, LexError> {
        let mut b = Buf::new();
        b.write(first);
        self.read_ident_rest(b, pos)
    }

    /// An identifier opening with a universal character name; the
    /// backslash is consumed and `u`/`U` is next.
    pub(super) fn read_ident_ucn(&mut self, pos: Position) -> Result<Token, LexError> {
        let mut b = Buf::new();
        let rune = self.read_escaped_char()?;
        self.write_utf8_checked(&mut b, rune)?;
        self.read_ident_rest(b, pos)
    }

    fn read_ident_rest(&mut self, mut b: Buf, pos: Position) -> Result<Token, LexError> {
        loop {
            let c = self.stream.read_char()?;
            if let Some(ch) = c {
                if is_ident_continue(ch) {
                    b.write(ch);
                    continue;
                }
                // \u and \U may continue an identifier (C11 6.4.2.1); the
                // decoded code point lands in the name as UTF-8.
                if ch == b'\\' && matches!(self.stream.peek_char()?, Some(b'u' | b'U')) {
                    let rune = self.read_escaped_char()?;
                    self.write_utf8_checked(&mut b, rune)?;
                    continue;
                }
            }
            self.stream.unread(c);
            let name = String::from_utf8_lossy(b.body()).into_owned();
            return Ok(self.token(TokenKind::Ident(name), pos));
        }
    }
}
