//! Whitespace and comment folding.
//!
//! Comments count as whitespace at this level; newlines do not, because
//! the preprocessor is line-oriented and gets them as tokens.

use crate::diagnostics::LexError;

use super::Lexer;

impl Lexer {
    /// Consume a run of whitespace and comments. True if anything was
    /// consumed.
    pub(super) fn skip_space(&mut self) -> Result<bool, LexError> {
        if !self.skip_one_space()? {
            return Ok(false);
        }
        while self.skip_one_space()? {}
        Ok(true)
    }

    fn skip_one_space(&mut self) -> Result<bool, LexError> {
        let Some(c) = self.stream.read_char()? else {
            return Ok(false);
        };
        match c {
            b' ' | b'\t' | 0x0B | 0x0C => Ok(true),
            b'/' => {
                if self.stream.next_is(b'*')? {
                    self.skip_block_comment()?;
                    return Ok(true);
                }
                if self.stream.next_is(b'/')? {
                    self.skip_line()?;
                    return Ok(true);
                }
                self.stream.unread(Some(c));
                Ok(false)
            }
            _ => {
                self.stream.unread(Some(c));
                Ok(false)
            }
        }
    }

    /// Body of `/* ... */`; the opener is already consumed. Reaching EOF
    /// first is an error at the comment's opening position.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let pos = self.stream.pos(-2);
        let mut maybe_end = false;
        loop {
            let Some(c) = self.stream.read_char()? else {
                return Err(LexError::UnterminatedComment { pos: pos.clone() });
            };
            if c == b'/' && maybe_end {
                return Ok(());
            }
            maybe_end = c == b'*';
        }
    }

    /// Consume up to, but not including, the next newline.
    pub(super) fn skip_line(&mut self) -> Result<(), LexError> {
        loop {
            let c = self.stream.read_char()?;
            match c {
                None => return Ok(()),
                Some(b'\n') => {
                    self.stream.unread(c);
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }
}
