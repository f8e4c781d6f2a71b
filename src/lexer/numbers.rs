//! Preprocessing numbers (C11 6.4.8).
//!
//! The grammar here is deliberately loose: anything number-shaped is
//! collected verbatim, and invalid spellings are rejected by the phases
//! that actually convert the value.

use crate::diagnostics::LexError;
use crate::support::Buf;

use super::Lexer;
use super::position::Position;
use super::token::{Punct, Token, TokenKind};

impl Lexer {
    /// Digits, letters, `.`, and a sign right after an exponent marker.
    pub(super) fn read_number(&mut self, first: u8, pos: Position) -> Result<Token, LexError> {
        let mut b = Buf::new();
        b.write(first);
        let mut last = first;
        loop {
            let c = self.stream.read_char()?;
            let Some(ch) = c else {
                break;
            };
            let exp_sign =
                matches!(last, b'e' | b'E' | b'p' | b'P') && (ch == b'+' || ch == b'-');
            if !ch.is_ascii_alphanumeric() && ch != b'.' && !exp_sign {
                self.stream.unread(Some(ch));
                break;
            }
            b.write(ch);
            last = ch;
        }
        let text = String::from_utf8_lossy(b.body()).into_owned();
        Ok(self.token(TokenKind::Number(text), pos))
    }

    /// `.` opens a number, `...`, the stray identifier `..`, or stands
    /// alone.
    pub(super) fn read_dot(&mut self, pos: Position) -> Result<Token, LexError> {
        if matches!(self.stream.peek_char()?, Some(b'0'..=b'9')) {
            return self.read_number(b'.', pos);
        }
        if self.stream.next_is(b'.')? {
            if self.stream.next_is(b'.')? {
                return Ok(self.token(TokenKind::Punct(Punct::Ellipsis), pos));
            }
            // ".." is not a punctuator; it goes out as an identifier for
            // the parser to reject.
            return Ok(self.token(TokenKind::Ident("..".into()), pos));
        }
        Ok(self.token(TokenKind::Punct(Punct::Byte(b'.')), pos))
    }
}
