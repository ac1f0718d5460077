//! Simulated-stream shims shared by the serialrec integration tests and
//! benches.
//!
//! Real streams misbehave in ways an in-memory `Cursor` never does:
//! reads come back short, sources run dry with more data pending, sinks
//! stop accepting bytes or fail outright, and the occasional stream can
//! report its position but not restore it. Each shim here reproduces
//! exactly one of those behaviours on top of an ordinary inner stream,
//! so the tests can drive the codec's partial-read/-write and rollback
//! paths deterministically.

use std::io::{self, Read, Seek, SeekFrom, Write};

/// Serves at most `chunk` bytes per read call, regardless of how much
/// the caller asked for. The data itself is unchanged — this only
/// forces the codec's fill loops to issue multiple reads per frame.
pub struct ChunkedReader<R> {
    inner: R,
    chunk: usize,
}

impl<R> ChunkedReader<R> {
    pub fn new(inner: R, chunk: usize) -> Self {
        assert!(chunk > 0, "chunk size must be non-zero");
        Self { inner, chunk }
    }
}

impl<R: Read> Read for ChunkedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.chunk);
        self.inner.read(&mut buf[..n])
    }
}

impl<R: Seek> Seek for ChunkedReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Serves bytes from a budget, then reports end-of-stream while the
/// inner reader may still hold data — a source that has run dry with
/// more data pending. [`refill`](Self::refill) tops the budget back up,
/// standing in for the source becoming ready again.
pub struct StarvedReader<R> {
    inner: R,
    budget: u64,
}

impl<R> StarvedReader<R> {
    pub fn new(inner: R, budget: u64) -> Self {
        Self { inner, budget }
    }

    /// Allow `more` further bytes to be served.
    pub fn refill(&mut self, more: u64) {
        self.budget += more;
    }
}

impl<R: Read> Read for StarvedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Ok(0);
        }
        #[allow(clippy::cast_possible_truncation)]
        let cap = buf.len().min(self.budget as usize);
        let n = self.inner.read(&mut buf[..cap])?;
        self.budget -= n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for StarvedReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Reports its position normally but fails any absolute repositioning —
/// a stream whose rollback path is broken while everything else works.
pub struct FailRewind<R> {
    inner: R,
}

impl<R> FailRewind<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> Read for FailRewind<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Seek> Seek for FailRewind<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(_) => Err(io::Error::other("rewind refused")),
            other => self.inner.seek(other),
        }
    }
}

/// Accepts `limit` bytes, then refuses further writes with `Ok(0)`.
pub struct ChokedWriter {
    buf: Vec<u8>,
    limit: usize,
}

impl ChokedWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            limit,
        }
    }

    /// The bytes the sink accepted before choking.
    pub fn written(&self) -> &[u8] {
        &self.buf
    }
}

impl Write for ChokedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let room = self.limit.saturating_sub(self.buf.len());
        let n = data.len().min(room);
        self.buf.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts `limit` bytes, then fails every write with `BrokenPipe`.
pub struct FailingWriter {
    buf: Vec<u8>,
    limit: usize,
}

impl FailingWriter {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            limit,
        }
    }

    /// The bytes the sink accepted before failing.
    pub fn written(&self) -> &[u8] {
        &self.buf
    }
}

impl Write for FailingWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() >= self.limit {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        let n = data.len().min(self.limit - self.buf.len());
        self.buf.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
