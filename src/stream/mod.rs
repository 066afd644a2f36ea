//! The outside world as far as `.` and `,` are concerned.
//!
//! The interpreter never touches stdin/stdout itself, it is handed an
//! [`Input`] and an [`Output`] at construction time so headless runs (tests,
//! batch jobs) need no terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, Read, Write};

/// Pull based character source used by `,`
pub trait Input {
    /// The next character, or `None` once the source is exhausted
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

/// Push based character sink used by `.`
pub trait Output {
    fn write_char(&mut self, c: char) -> io::Result<()>;
}

impl Input for VecDeque<char> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.pop_front())
    }
}

impl Output for String {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.push(c);
        Ok(())
    }
}

impl<T: Input + ?Sized> Input for Box<T> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }
}

impl<T: Output + ?Sized> Output for Box<T> {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        (**self).write_char(c)
    }
}

/// One raw byte per read, each byte taken as the code point of the same value
pub struct ByteInput<R> {
    reader: R,
}

impl<R: Read> ByteInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> Input for ByteInput<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(char::from(buf[0]))),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Interactive mode: every read consumes a whole line and keeps only its
/// first character. An empty line reads as `'\0'`.
pub struct LineInput<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> Input for LineInput<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }

        let line = self.line.trim_end_matches(['\n', '\r']);
        Ok(Some(line.chars().next().unwrap_or('\0')))
    }
}

/// Writes each character UTF-8 encoded and flushes straight away
pub struct Utf8Output<W> {
    writer: W,
}

impl<W: Write> Utf8Output<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for Utf8Output<W> {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.writer.write_all(c.encode_utf8(&mut buf).as_bytes())?;
        self.writer.flush()
    }
}

/// Writes the low byte of each character as is, for programs emitting binary
pub struct ByteOutput<W> {
    writer: W,
}

impl<W: Write> ByteOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for ByteOutput<W> {
    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.writer.write_all(&[c as u32 as u8])?;
        self.writer.flush()
    }
}
