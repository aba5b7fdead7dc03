//! Output sinks and the printer.
//!
//! The interpreter never talks to a destination directly. It writes through
//! a [`Printer`], which wraps a [`Sink`] and remembers the first failure:
//! after a write fails every later write returns the stored error without
//! touching the sink again.
//!
//! [`Sink`] has one required method (`write_bytes`); `write_str` and
//! `write_char` default to it. Destinations with a cheaper native string
//! or char write override those, and the printer always calls the most
//! specific primitive. Output bytes are the same either way.

use std::{fmt, io};

use thiserror::Error;

/// An output destination.
pub trait Sink {
    /// Write all of `buf`.
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Write all of `s`.
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Write one char, UTF-8 encoded.
    fn write_char(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.write_str(c.encode_utf8(&mut buf))
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        (**self).write_bytes(buf)
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (**self).write_str(s)
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        (**self).write_char(c)
    }
}

/// In-memory text. Rejects bytes that are not valid UTF-8.
impl Sink for String {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        let s = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.push_str(s);
        Ok(())
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        self.push(c);
        Ok(())
    }
}

impl Sink for Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Adapter for any [`io::Write`] (files, sockets, stdout).
#[derive(Debug, Default)]
pub struct IoSink<W>(pub W);

impl<W: io::Write> Sink for IoSink<W> {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        io::Write::write_all(&mut self.0, buf)
    }
}

/// Adapter for any [`fmt::Write`] (`String`, `fmt::Formatter`).
///
/// String and char writes go straight to the writer; byte writes must be
/// valid UTF-8.
#[derive(Debug, Default)]
pub struct FmtSink<W>(pub W);

impl<W: fmt::Write> Sink for FmtSink<W> {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        let s = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.write_str(s)
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        fmt::Write::write_str(&mut self.0, s).map_err(fmt_error)
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        fmt::Write::write_char(&mut self.0, c).map_err(fmt_error)
    }
}

fn fmt_error(_: fmt::Error) -> io::Error {
    io::Error::other("formatter error")
}

/// A failed sink write, kept by the printer and replayed on every later
/// write.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("write to sink failed: {message}")]
pub struct PrintError {
    pub kind: io::ErrorKind,
    pub message: String,
}

impl From<io::Error> for PrintError {
    fn from(err: io::Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<PrintError> for io::Error {
    fn from(err: PrintError) -> Self {
        io::Error::new(err.kind, err.message)
    }
}

/// Writes to a [`Sink`] and tracks the first failure.
#[derive(Debug)]
pub struct Printer<S> {
    sink: S,
    written: usize,
    err: Option<PrintError>,
}

impl<S: Sink> Printer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            written: 0,
            err: None,
        }
    }

    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<(), PrintError> {
        self.check()?;
        let res = self.sink.write_bytes(buf);
        self.update(res, buf.len())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), PrintError> {
        self.check()?;
        let res = self.sink.write_str(s);
        self.update(res, s.len())
    }

    pub fn write_char(&mut self, c: char) -> Result<(), PrintError> {
        self.check()?;
        let res = self.sink.write_char(c);
        self.update(res, c.len_utf8())
    }

    /// Bytes successfully written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// The stored failure, if any write has failed.
    pub fn error(&self) -> Option<&PrintError> {
        self.err.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.err.is_some()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn check(&self) -> Result<(), PrintError> {
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn update(&mut self, res: io::Result<()>, len: usize) -> Result<(), PrintError> {
        match res {
            Ok(()) => {
                self.written += len;
                Ok(())
            }
            Err(err) => {
                let err = PrintError::from(err);
                tracing::debug!(error = %err, written = self.written, "sink write failed");
                self.err = Some(err.clone());
                Err(err)
            }
        }
    }
}
