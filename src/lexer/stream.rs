//! Stacked character input with canonicalized line endings.
//!
//! Invariants:
//! - A delivered byte is never `\r`; CRLF and lone CR both come out as
//!   `\n`.
//! - Every stream appears to end with exactly one `\n` before EOF, even
//!   when the underlying bytes do not.
//! - Backslash-newline pairs vanish before the caller sees them, with
//!   line/column accounting already applied.
//! - At most [`PUSHBACK`] bytes may be unread at once.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::rc::Rc;

use crate::diagnostics::LexError;
use crate::support::Seq;

use super::position::{Position, SourceFile};

/// Pushback depth. The deepest consumer is the `%:%:` digraph scan, which
/// queues two unreads on its backtrack path.
const PUSHBACK: usize = 3;

enum Source {
    /// An OS handle read byte-wise: a file on disk or standard input.
    /// `lookahead` holds the byte peeked past a `\r`.
    Handle {
        reader: Box<dyn Read>,
        lookahead: Option<u8>,
    },
    /// An in-memory buffer with a read cursor.
    Text { bytes: Vec<u8>, cursor: usize },
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Handle { .. } => f.write_str("Handle"),
            Source::Text { bytes, cursor } => f
                .debug_struct("Text")
                .field("len", &bytes.len())
                .field("cursor", cursor)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Byte(u8),
    Eof,
}

/// One input stream with its own position and token counter.
#[derive(Debug)]
pub struct Stream {
    file: Rc<SourceFile>,
    source: Source,
    line: u32,
    column: u32,
    ntok: u32,
    last: Last,
    pushback: [u8; PUSHBACK],
    npushback: usize,
}

impl Stream {
    /// Open a file on disk. Open and metadata failures are fatal, the way
    /// a compiler treats a missing translation unit.
    pub fn open(path: &str) -> Result<Stream, LexError> {
        let file = File::open(path).map_err(|e| LexError::Open {
            path: path.into(),
            source: e,
        })?;
        let mtime = file
            .metadata()
            .map_err(|e| LexError::Stat {
                path: path.into(),
                source: e,
            })?
            .modified()
            .ok();
        Ok(Self::with_source(
            SourceFile::new(path, mtime),
            Source::Handle {
                reader: Box::new(file),
                lookahead: None,
            },
        ))
    }

    /// Read from standard input, named `-`.
    pub fn from_stdin() -> Stream {
        Self::with_source(
            SourceFile::new("-", None),
            Source::Handle {
                reader: Box::new(io::stdin()),
                lookahead: None,
            },
        )
    }

    /// Read from an in-memory string, named `(string)`.
    pub fn from_string(s: impl Into<String>) -> Stream {
        Self::with_source(
            SourceFile::new("(string)", None),
            Source::Text {
                bytes: s.into().into_bytes(),
                cursor: 0,
            },
        )
    }

    fn with_source(file: Rc<SourceFile>, source: Source) -> Stream {
        Stream {
            file,
            source,
            line: 1,
            column: 1,
            ntok: 0,
            last: Last::Start,
            pushback: [0; PUSHBACK],
            npushback: 0,
        }
    }

    pub fn file(&self) -> &Rc<SourceFile> {
        &self.file
    }

    fn read_raw(&mut self) -> Result<Option<u8>, LexError> {
        match &mut self.source {
            Source::Handle { reader, lookahead } => {
                if let Some(b) = lookahead.take() {
                    return Ok(Some(b));
                }
                let mut byte = [0u8; 1];
                loop {
                    match reader.read(&mut byte) {
                        Ok(0) => return Ok(None),
                        Ok(_) => return Ok(Some(byte[0])),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            return Err(LexError::Read {
                                file: self.file.name.clone(),
                                source: e,
                            });
                        }
                    }
                }
            }
            Source::Text { bytes, cursor } => {
                let b = bytes.get(*cursor).copied();
                if b.is_some() {
                    *cursor += 1;
                }
                Ok(b)
            }
        }
    }

    fn unread_raw(&mut self, b: u8) {
        match &mut self.source {
            Source::Handle { lookahead, .. } => {
                debug_assert!(lookahead.is_none(), "raw lookahead is one byte deep");
                *lookahead = Some(b);
            }
            Source::Text { cursor, .. } => {
                debug_assert!(*cursor > 0);
                *cursor -= 1;
            }
        }
    }

    /// One byte with CRLF folding and end-of-stream newline synthesis.
    fn getc(&mut self) -> Result<Option<u8>, LexError> {
        let c = match self.read_raw()? {
            None => match self.last {
                Last::Eof | Last::Byte(b'\n') => None,
                Last::Start | Last::Byte(_) => Some(b'\n'),
            },
            Some(b'\r') => {
                if let Some(next) = self.read_raw()? {
                    if next != b'\n' {
                        self.unread_raw(next);
                    }
                }
                Some(b'\n')
            }
            c => c,
        };
        self.last = match c {
            None => Last::Eof,
            Some(b) => Last::Byte(b),
        };
        Ok(c)
    }

    /// One byte through the pushback buffer, with position accounting.
    fn get(&mut self) -> Result<Option<u8>, LexError> {
        let c = if self.npushback > 0 {
            self.npushback -= 1;
            Some(self.pushback[self.npushback])
        } else {
            self.getc()?
        };
        match c {
            Some(b'\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        Ok(c)
    }

    fn unget(&mut self, c: u8) {
        debug_assert!(self.npushback < PUSHBACK, "pushback overflow");
        self.pushback[self.npushback] = c;
        self.npushback += 1;
        if c == b'\n' {
            self.column = 1;
            self.line -= 1;
        } else {
            self.column -= 1;
        }
    }

    pub(crate) fn bump_token_count(&mut self) -> u32 {
        let n = self.ntok;
        self.ntok += 1;
        n
    }
}

/// The stack of active input streams plus the stash used to lex standalone
/// strings without disturbing it.
///
/// `#include` pushes a stream; reaching its end pops it, and characters
/// keep flowing from the stream underneath.
#[derive(Debug, Default)]
pub struct CharStream {
    streams: Seq<Stream>,
    stashed: Seq<Seq<Stream>>,
}

impl CharStream {
    pub fn new() -> Self {
        Self {
            streams: Seq::new(),
            stashed: Seq::new(),
        }
    }

    pub fn push(&mut self, s: Stream) {
        self.streams.push(s);
    }

    pub fn depth(&self) -> usize {
        self.streams.len()
    }

    pub fn current_file(&self) -> Option<&Rc<SourceFile>> {
        self.streams.tail().map(Stream::file)
    }

    pub fn base_file(&self) -> Option<&Rc<SourceFile>> {
        self.streams.head().map(Stream::file)
    }

    /// Rendered location of the next unread character.
    pub fn input_position(&self) -> String {
        match self.streams.tail() {
            Some(s) => format!("{}:{}:{}", s.file.name, s.line, s.column),
            None => "(unknown)".to_string(),
        }
    }

    /// Location of the next unread character, with `delta` applied to the
    /// column; escape scanners use it to point at the backslash.
    pub(crate) fn pos(&self, delta: i32) -> Position {
        let s = self.streams.tail().expect("an active stream");
        let column = (i64::from(s.column) + i64::from(delta)).max(0) as u32;
        Position {
            file: Rc::clone(&s.file),
            line: s.line,
            column,
        }
    }

    pub(crate) fn column(&self) -> u32 {
        self.streams.tail().map_or(1, |s| s.column)
    }

    pub(crate) fn bump_token_count(&mut self) -> u32 {
        self.streams.tail_mut().map_or(0, Stream::bump_token_count)
    }

    fn get_top(&mut self) -> Result<Option<u8>, LexError> {
        match self.streams.tail_mut() {
            Some(s) => s.get(),
            None => Ok(None),
        }
    }

    /// Read one character. Finished streams are popped so input continues
    /// seamlessly from the stream underneath; backslash-newline pairs are
    /// removed here, after position accounting has seen them.
    pub fn read_char(&mut self) -> Result<Option<u8>, LexError> {
        loop {
            match self.get_top()? {
                None => {
                    if self.streams.len() <= 1 {
                        return Ok(None);
                    }
                    self.streams.pop();
                }
                Some(b'\\') => {
                    let c2 = self.get_top()?;
                    if c2 == Some(b'\n') {
                        continue;
                    }
                    self.unread(c2);
                    return Ok(Some(b'\\'));
                }
                c => return Ok(c),
            }
        }
    }

    /// Push back `c` so the next `read_char` returns it. EOF is ignored.
    pub fn unread(&mut self, c: Option<u8>) {
        let Some(c) = c else { return };
        let s = self.streams.tail_mut().expect("an active stream");
        s.unget(c);
    }

    /// Lookahead without consuming.
    pub fn peek_char(&mut self) -> Result<Option<u8>, LexError> {
        let c = self.read_char()?;
        self.unread(c);
        Ok(c)
    }

    /// Consume `expect` if it is the next character.
    pub fn next_is(&mut self, expect: u8) -> Result<bool, LexError> {
        let c = self.read_char()?;
        if c == Some(expect) {
            return Ok(true);
        }
        self.unread(c);
        Ok(false)
    }

    /// Set aside the whole stream stack and continue from `s` alone, until
    /// [`CharStream::unstash`].
    pub fn stash(&mut self, s: Stream) {
        let old = std::mem::replace(&mut self.streams, Seq::single(s));
        self.stashed.push(old);
    }

    /// Restore the most recently stashed stream stack.
    pub fn unstash(&mut self) {
        if let Some(streams) = self.stashed.pop() {
            self.streams = streams;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over(s: &str) -> CharStream {
        let mut cs = CharStream::new();
        cs.push(Stream::from_string(s));
        cs
    }

    fn drain(cs: &mut CharStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(c) = cs.read_char().unwrap() {
            out.push(c);
        }
        out
    }

    #[test]
    fn carriage_returns_never_come_out() {
        let mut cs = over("a\rb\r\nc\r");
        let out = drain(&mut cs);
        assert!(!out.contains(&b'\r'));
        assert_eq!(out, b"a\nb\nc\n");
    }

    #[test]
    fn missing_final_newline_is_synthesized_once() {
        let mut cs = over("abc");
        assert_eq!(drain(&mut cs), b"abc\n");
        let mut cs = over("abc\n");
        assert_eq!(drain(&mut cs), b"abc\n");
    }

    #[test]
    fn empty_input_still_ends_with_a_newline() {
        let mut cs = over("");
        assert_eq!(drain(&mut cs), b"\n");
    }

    #[test]
    fn unread_roundtrip_preserves_position() {
        let mut cs = over("ab\ncd");
        assert_eq!(cs.read_char().unwrap(), Some(b'a'));
        let before = cs.input_position();
        let c = cs.read_char().unwrap();
        assert_eq!(c, Some(b'b'));
        cs.unread(c);
        assert_eq!(cs.input_position(), before);
        assert_eq!(cs.read_char().unwrap(), Some(b'b'));
    }

    #[test]
    fn unread_newline_rewinds_the_line_counter() {
        let mut cs = over("a\nb");
        cs.read_char().unwrap();
        let c = cs.read_char().unwrap();
        assert_eq!(c, Some(b'\n'));
        assert_eq!(cs.input_position(), "(string):2:1");
        cs.unread(c);
        assert_eq!(cs.input_position(), "(string):1:1");
        assert_eq!(cs.read_char().unwrap(), Some(b'\n'));
        assert_eq!(cs.input_position(), "(string):2:1");
    }

    #[test]
    fn three_unreads_replay_in_order() {
        let mut cs = over("xyz");
        let x = cs.read_char().unwrap();
        let y = cs.read_char().unwrap();
        let z = cs.read_char().unwrap();
        cs.unread(z);
        cs.unread(y);
        cs.unread(x);
        assert_eq!(drain(&mut cs), b"xyz\n");
    }

    #[test]
    fn backslash_newline_is_invisible() {
        let mut cs = over("a\\\nb");
        assert_eq!(cs.read_char().unwrap(), Some(b'a'));
        assert_eq!(cs.read_char().unwrap(), Some(b'b'));
        // The spliced line still advanced the line counter.
        assert_eq!(cs.input_position(), "(string):2:2");
    }

    #[test]
    fn lone_backslash_passes_through() {
        let mut cs = over("a\\b");
        assert_eq!(drain(&mut cs), b"a\\b\n");
    }

    #[test]
    fn finished_streams_pop_to_the_one_below() {
        let mut cs = over("base");
        cs.push(Stream::from_string("top"));
        assert_eq!(cs.depth(), 2);
        assert_eq!(drain(&mut cs), b"top\nbase\n");
        assert_eq!(cs.depth(), 1);
    }

    #[test]
    fn stash_isolates_and_unstash_resumes() {
        let mut cs = over("main");
        assert_eq!(cs.read_char().unwrap(), Some(b'm'));
        cs.stash(Stream::from_string("x"));
        assert_eq!(drain(&mut cs), b"x\n");
        // The stashed stack is a single stream, so EOF stays EOF.
        assert_eq!(cs.read_char().unwrap(), None);
        cs.unstash();
        assert_eq!(drain(&mut cs), b"ain\n");
    }

    #[test]
    fn file_open_failure_is_reported() {
        let err = Stream::open("/nonexistent/definitely-missing.c").unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }
}
