//! String and character constants, all five encodings.
//!
//! String payloads are cooked here: escapes decode to bytes, UCNs decode
//! to code points and land as UTF-8. The stored payload keeps the
//! C-string NUL terminator.

use crate::diagnostics::LexError;
use crate::support::Buf;

use super::Lexer;
use super::position::Position;
use super::token::{Encoding, Token, TokenKind};

impl Lexer {
    /// Body of a string literal; the opening quote is consumed. Newlines
    /// pass through uncooked; rejecting them is the parser's business.
    pub(super) fn read_string(&mut self, enc: Encoding, pos: Position) -> Result<Token, LexError> {
        let mut b = Buf::new();
        loop {
            let Some(c) = self.stream.read_char()? else {
                return Err(LexError::UnterminatedString { pos: pos.clone() });
            };
            if c == b'"' {
                break;
            }
            if c != b'\\' {
                b.write(c);
                continue;
            }
            let is_ucn = matches!(self.stream.peek_char()?, Some(b'u' | b'U'));
            let rune = self.read_escaped_char()?;
            if is_ucn {
                self.write_utf8_checked(&mut b, rune)?;
            } else {
                b.write(rune as u8);
            }
        }
        b.write(0);
        Ok(self.token(
            TokenKind::Str {
                value: b.into_bytes(),
                enc,
            },
            pos,
        ))
    }

    /// A character constant; the opening quote is consumed. Anything but
    /// one (possibly escaped) character before the closing quote is an
    /// error.
    pub(super) fn read_char_literal(
        &mut self,
        enc: Encoding,
        pos: Position,
    ) -> Result<Token, LexError> {
        let Some(c) = self.stream.read_char()? else {
            return Err(LexError::UnterminatedChar { pos: pos.clone() });
        };
        let rune = if c == b'\\' {
            self.read_escaped_char()?
        } else {
            u32::from(c)
        };
        if self.stream.read_char()? != Some(b'\'') {
            return Err(LexError::UnterminatedChar { pos: pos.clone() });
        }
        let value = if enc == Encoding::None {
            // Narrowed through signed char, the way the compiler stores a
            // plain character constant.
            i32::from(rune as u8 as i8)
        } else {
            rune as i32
        };
        Ok(self.token(TokenKind::Char { value, enc }, pos))
    }
}
