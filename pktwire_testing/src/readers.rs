//! Scripted [`Read`] implementations.

use std::io::{self, Read};

/// Reader handing out at most `step` bytes per call.
#[derive(Debug)]
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    step: usize,
}

impl ChunkedReader {
    /// Create a reader over `data` that returns at most `step` bytes per read.
    ///
    /// A `step` of zero is treated as one.
    #[must_use]
    pub fn new(data: impl Into<Vec<u8>>, step: usize) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            step: step.max(1),
        }
    }

    /// Number of bytes not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize { self.data.len() - self.pos }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.remaining().min(self.step).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Reader that yields its data and then fails with a fixed error kind.
#[derive(Debug)]
pub struct FailingReader {
    inner: ChunkedReader,
    kind: io::ErrorKind,
}

impl FailingReader {
    /// Create a reader that returns `data` and then errors with `kind`.
    #[must_use]
    pub fn new(data: impl Into<Vec<u8>>, kind: io::ErrorKind) -> Self {
        let data = data.into();
        let step = data.len();
        Self {
            inner: ChunkedReader::new(data, step),
            kind,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.inner.remaining() == 0 {
            return Err(io::Error::new(self.kind, "scripted read failure"));
        }
        self.inner.read(buf)
    }
}
