//! Conditional-inclusion skipping and `#include` header names.
//!
//! Both run below the preprocessor proper: one fast-forwards over regions
//! conditional inclusion excluded, the other applies the special quoting
//! rules of `#include` operands. Skipped content is deliberately not
//! tokenized or validated (C11 6.10 asks for valid pp-tokens there, but
//! compilers do not check, and neither does this one).

use crate::diagnostics::LexError;
use crate::support::Buf;

use super::Lexer;
use super::token::{Punct, TokenKind};

/// An `#include` operand: the spelled name, and whether it was `<...>`
/// (a system header) rather than `"..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderName {
    pub name: String,
    pub std: bool,
}

impl Lexer {
    /// Skip a region excluded by `#if`-family directives, as fast as
    /// possible. Stops either at end of input or after pushing back the
    /// matching `#else`/`#elif`/`#endif` as two tokens (a `#` marked bol,
    /// then the directive name) for the preprocessor to resume on.
    pub fn skip_cond_incl(&mut self) -> Result<(), LexError> {
        let mut nest = 0u32;
        loop {
            let bol = self.stream.column() == 1;
            self.skip_space()?;
            let Some(c) = self.stream.read_char()? else {
                return Ok(());
            };
            if c == b'\'' {
                self.skip_char_literal()?;
                continue;
            }
            if c == b'"' {
                self.skip_string_literal()?;
                continue;
            }
            if c != b'#' || !bol {
                continue;
            }
            let column = self.stream.column() - 1;
            let tok = self.next_token()?;
            let name = match &tok.kind {
                TokenKind::Ident(s) => s.clone(),
                _ => continue,
            };
            if nest == 0 && (name == "else" || name == "elif" || name == "endif") {
                self.unget_token(tok);
                let pos = self.stream.pos(0);
                let mut hash = self.token(TokenKind::Punct(Punct::Byte(b'#')), pos);
                hash.bol = true;
                hash.column = column;
                self.unget_token(hash);
                return Ok(());
            }
            if name == "if" || name == "ifdef" || name == "ifndef" {
                nest += 1;
            } else if nest > 0 && name == "endif" {
                nest -= 1;
            }
            self.skip_line()?;
        }
    }

    // A backslash hides the next byte; nothing else in the body is
    // interpreted.
    fn skip_char_literal(&mut self) -> Result<(), LexError> {
        if self.stream.read_char()? == Some(b'\\') {
            self.stream.read_char()?;
        }
        let mut c = self.stream.read_char()?;
        while let Some(ch) = c {
            if ch == b'\'' {
                break;
            }
            c = self.stream.read_char()?;
        }
        Ok(())
    }

    fn skip_string_literal(&mut self) -> Result<(), LexError> {
        loop {
            match self.stream.read_char()? {
                None | Some(b'"') => return Ok(()),
                Some(b'\\') => {
                    self.stream.read_char()?;
                }
                Some(_) => {}
            }
        }
    }

    /// The operand of `#include`, read with header-name quoting: bytes are
    /// taken verbatim up to the closing delimiter, no escapes. `None`
    /// means the next input is not a quoted name and should be lexed
    /// normally (macro-expanded operands take that path). Only meaningful
    /// while the token buffer is empty.
    pub fn read_header_file_name(&mut self) -> Result<Option<HeaderName>, LexError> {
        if !self.buffer_empty() {
            return Ok(None);
        }
        self.skip_space()?;
        let pos = self.stream.pos(0);
        let (close, std) = if self.stream.next_is(b'"')? {
            (b'"', false)
        } else if self.stream.next_is(b'<')? {
            (b'>', true)
        } else {
            return Ok(None);
        };
        let mut b = Buf::new();
        while !self.stream.next_is(close)? {
            match self.stream.read_char()? {
                None | Some(b'\n') => {
                    return Err(LexError::UnterminatedHeaderName { pos: pos.clone() });
                }
                Some(c) => b.write(c),
            }
        }
        if b.is_empty() {
            return Err(LexError::EmptyHeaderName { pos });
        }
        Ok(Some(HeaderName {
            name: String::from_utf8_lossy(b.body()).into_owned(),
            std,
        }))
    }
}
