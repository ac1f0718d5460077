use std::io::{self, Read, Seek, SeekFrom};

/// Byte source for [`RecordReader`](crate::RecordReader).
///
/// Extends [`Read`] with an explicit repositioning capability, so the
/// reader can decide at run time whether a failed read can be rolled
/// back. The capability is advertised through
/// [`supports_rewind`](Self::supports_rewind); sources without it report
/// [`io::ErrorKind::Unsupported`] from the positioning calls.
///
/// The two wrappers below cover the whole space: put a `Read + Seek`
/// value in [`Seekable`], or any `Read` value in [`ForwardOnly`].
pub trait Source: Read {
    /// Whether the source can be repositioned.
    fn supports_rewind(&self) -> bool;

    /// Current byte offset from the start of the stream.
    ///
    /// # Errors
    ///
    /// `io::ErrorKind::Unsupported` when repositioning is unavailable,
    /// or whatever the underlying stream reports.
    fn position(&mut self) -> io::Result<u64>;

    /// Reposition the stream.
    ///
    /// # Errors
    ///
    /// `io::ErrorKind::Unsupported` when repositioning is unavailable,
    /// or whatever the underlying stream reports.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;
}

/// A source with repositioning support.
///
/// Reads delegate to the wrapped value; the rewind capability maps onto
/// its [`Seek`] implementation.
pub struct Seekable<R>(pub R);

impl<R: Read> Read for Seekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read + Seek> Source for Seekable<R> {
    fn supports_rewind(&self) -> bool {
        true
    }

    fn position(&mut self) -> io::Result<u64> {
        self.0.stream_position()
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

/// A forward-only source: reads pass through, repositioning is refused.
pub struct ForwardOnly<R>(pub R);

impl<R: Read> Read for ForwardOnly<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read> Source for ForwardOnly<R> {
    fn supports_rewind(&self) -> bool {
        false
    }

    fn position(&mut self) -> io::Result<u64> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }

    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }
}
