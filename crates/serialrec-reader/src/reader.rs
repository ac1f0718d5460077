use std::io::{self, Read, Seek, SeekFrom};

use serialrec_message::Message;
use serialrec_wire::{FrameHeader, LEN_PREFIX_SIZE};

use crate::error::ReadError;
use crate::source::{ForwardOnly, Seekable, Source};

/// Record reader — recovers length-prefixed records from a byte source.
///
/// Each call to [`read_record`](Self::read_record) consumes one frame:
/// a 4-byte big-endian length header followed by exactly that many
/// payload bytes. Records come back strictly in the order they were
/// written; the format carries no index or checksum.
///
/// # Rollback
///
/// When the source supports repositioning, the reader snapshots the
/// stream position before each frame and restores it if the read fails
/// partway — a transient short read (say, the end of a buffered chunk
/// with more data pending) leaves the stream exactly where it was, so
/// the caller can retry once the source is ready again. Without that,
/// a failed read would desynchronize the reader from frame boundaries.
/// On a forward-only source there is no rollback: a failed read leaves
/// the stream consumed up to the failure point and the caller cannot
/// safely retry from the same logical position.
///
/// A reader must not be shared between threads without external
/// serialization: interleaved header and body reads from two callers
/// would corrupt the framing.
pub struct RecordReader<S> {
    source: S,
    max_record_len: Option<u64>,
}

impl<R: Read + Seek> RecordReader<Seekable<R>> {
    /// Wrap a repositionable source. Failed reads roll the stream back.
    #[must_use]
    pub fn seekable(source: R) -> Self {
        Self::new(Seekable(source))
    }
}

impl<R: Read> RecordReader<ForwardOnly<R>> {
    /// Wrap a forward-only source. Failed reads consume the stream up
    /// to the failure point.
    #[must_use]
    pub fn forward_only(source: R) -> Self {
        Self::new(ForwardOnly(source))
    }
}

impl<S: Source> RecordReader<S> {
    /// Wrap a [`Source`] directly.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_record_len: None,
        }
    }

    /// Cap the payload length a header may declare.
    ///
    /// By default the reader allocates exactly what the header asks for,
    /// up to the format's 2^32 − 1 limit. On an untrusted stream that
    /// lets a corrupt or hostile header force a multi-gigabyte
    /// allocation; with a cap in place such headers fail with
    /// [`ReadError::RecordTooLarge`] before any allocation, and the
    /// stream is rolled back to the frame boundary when possible.
    #[must_use]
    pub fn with_max_record_len(mut self, limit: u64) -> Self {
        self.max_record_len = Some(limit);
        self
    }

    /// A reference to the wrapped source.
    #[must_use]
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// A mutable reference to the wrapped source.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the reader, returning the wrapped source.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Read the next record and return its payload.
    ///
    /// Reads the 4-byte length header, then exactly that many payload
    /// bytes into a fresh buffer. On any failure the stream position is
    /// restored to the frame boundary when the source supports rewind —
    /// best-effort: if the restoring seek itself fails, the original
    /// read error is still returned and the stream is left wherever the
    /// failure put it.
    ///
    /// # Errors
    ///
    /// - [`ReadError::Eof`] at a clean frame boundary with no bytes
    ///   remaining.
    /// - [`ReadError::ShortHeaderRead`] if the stream ends inside the
    ///   header.
    /// - [`ReadError::ShortBodyRead`] if the stream ends inside the
    ///   body.
    /// - [`ReadError::RecordTooLarge`] if a cap is configured and the
    ///   header exceeds it.
    /// - [`ReadError::Io`] if the source fails, including interruption.
    pub fn read_record(&mut self) -> Result<Vec<u8>, ReadError> {
        let checkpoint = if self.source.supports_rewind() {
            Some(self.source.position()?)
        } else {
            None
        };

        let mut header = [0u8; LEN_PREFIX_SIZE];
        let got = match self.fill(&mut header) {
            Ok(got) => got,
            Err(e) => return Err(self.roll_back(checkpoint, e.into())),
        };
        if got == 0 {
            return Err(ReadError::Eof);
        }
        if got < LEN_PREFIX_SIZE {
            return Err(self.roll_back(checkpoint, ReadError::ShortHeaderRead { got }));
        }

        let header = FrameHeader::from_bytes(header);
        let len = u64::from(header.payload_len());
        if let Some(limit) = self.max_record_len
            && len > limit
        {
            return Err(self.roll_back(checkpoint, ReadError::RecordTooLarge { len, limit }));
        }

        #[allow(clippy::cast_possible_truncation)]
        let expected = header.payload_len() as usize;
        let mut body = vec![0u8; expected];
        match self.fill(&mut body) {
            Ok(got) if got == expected => {}
            Ok(got) => {
                return Err(self.roll_back(checkpoint, ReadError::ShortBodyRead { expected, got }));
            }
            Err(e) => return Err(self.roll_back(checkpoint, e.into())),
        }

        match checkpoint {
            Some(start) => tracing::debug!(start, payload_len = expected, "record read"),
            None => tracing::debug!(payload_len = expected, "record read"),
        }

        Ok(body)
    }

    /// Read the next record into a caller-provided buffer.
    ///
    /// The record is pulled off the stream with
    /// [`read_record`](Self::read_record) first. A buffer smaller than
    /// the record fails with [`ReadError::BufferTooSmall`] **after** the
    /// record has been consumed — the bytes cannot be put back, and the
    /// reader keeps no hidden buffer that would change the framing
    /// contract. Size the buffer for the largest record the stream may
    /// carry, or use `read_record` directly.
    ///
    /// # Errors
    ///
    /// Everything [`read_record`](Self::read_record) returns, plus
    /// [`ReadError::BufferTooSmall`].
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        let record = self.read_record()?;
        if record.len() > buf.len() {
            return Err(ReadError::BufferTooSmall {
                record_len: record.len(),
                capacity: buf.len(),
            });
        }
        buf[..record.len()].copy_from_slice(&record);
        Ok(record.len())
    }

    /// Read the next record and decode it into `out`.
    ///
    /// # Errors
    ///
    /// Everything [`read_record`](Self::read_record) returns, plus
    /// [`ReadError::Deserialize`] when the payload does not decode. The
    /// record is consumed from the stream regardless of the decode
    /// outcome — deserialization failure does not move the stream back.
    pub fn read_message<M: Message>(&mut self, out: &mut M) -> Result<(), ReadError> {
        let record = self.read_record()?;
        out.merge_from_bytes(&record)?;
        Ok(())
    }

    /// Reposition the underlying source.
    ///
    /// Callers must seek only to frame boundaries (the first byte of a
    /// previously written frame). The reader does not validate the
    /// target: from a mid-frame position the next
    /// [`read_record`](Self::read_record) will interpret payload bytes
    /// as a header. Mostly useful for jumping to offsets recorded by an
    /// external index.
    ///
    /// # Errors
    ///
    /// [`ReadError::SeekUnsupported`] on a forward-only source, or
    /// [`ReadError::Io`] if the source's seek fails.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64, ReadError> {
        if !self.source.supports_rewind() {
            return Err(ReadError::SeekUnsupported);
        }
        Ok(self.source.seek(pos)?)
    }

    /// Read until `buf` is full or the source reports it cannot supply
    /// more. Returns the number of bytes obtained. Errors propagate
    /// immediately, including interruption.
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut got = 0;
        while got < buf.len() {
            let n = self.source.read(&mut buf[got..])?;
            if n == 0 {
                break;
            }
            got += n;
        }
        Ok(got)
    }

    /// Best-effort rollback to `checkpoint`. The original error always
    /// wins: if the restoring seek fails, the stream stays wherever the
    /// failure put it and the read error is returned unchanged.
    fn roll_back(&mut self, checkpoint: Option<u64>, err: ReadError) -> ReadError {
        if let Some(pos) = checkpoint
            && let Err(seek_err) = self.source.seek(SeekFrom::Start(pos))
        {
            tracing::warn!(
                pos,
                error = %seek_err,
                "rollback failed; stream position is inconsistent"
            );
        }
        err
    }
}

/// One whole record per call, copied into `buf`. A clean end of stream
/// reads as `Ok(0)`; a record larger than `buf` is
/// `io::ErrorKind::InvalidInput` (and the record is lost, as documented
/// on [`RecordReader::read_into`]).
impl<S: Source> Read for RecordReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.read_into(buf) {
            Ok(n) => Ok(n),
            Err(ReadError::Eof) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serialrec_writer::RecordWriter;

    use super::*;

    fn stream_of(payloads: &[&[u8]]) -> Cursor<Vec<u8>> {
        let mut writer = RecordWriter::new(Vec::new());
        for payload in payloads {
            writer.write(payload).unwrap();
        }
        Cursor::new(writer.into_inner())
    }

    #[test]
    fn reads_records_in_order() {
        let mut reader = RecordReader::seekable(stream_of(&[b"Hello", b"World"]));
        assert_eq!(reader.read_record().unwrap(), b"Hello");
        assert_eq!(reader.read_record().unwrap(), b"World");
        assert!(matches!(reader.read_record(), Err(ReadError::Eof)));
    }

    #[test]
    fn empty_record_reads_back_empty() {
        let mut reader = RecordReader::seekable(stream_of(&[b""]));
        assert_eq!(reader.read_record().unwrap(), b"");
        assert!(matches!(reader.read_record(), Err(ReadError::Eof)));
    }

    #[test]
    fn read_into_reports_payload_length() {
        let mut reader = RecordReader::seekable(stream_of(&[b"Hello"]));
        let mut buf = [0u8; 20];
        let n = reader.read_into(&mut buf).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf[..n], b"Hello");
    }

    #[test]
    fn read_into_rejects_small_buffer() {
        let mut reader = RecordReader::seekable(stream_of(&[b"Hello"]));
        let mut buf = [0u8; 3];
        assert!(matches!(
            reader.read_into(&mut buf),
            Err(ReadError::BufferTooSmall {
                record_len: 5,
                capacity: 3
            })
        ));
    }

    #[test]
    fn io_read_impl_yields_zero_at_eof() {
        let mut reader = RecordReader::seekable(stream_of(&[b"Hi"]));
        let mut buf = [0u8; 10];
        assert_eq!(Read::read(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(Read::read(&mut reader, &mut buf).unwrap(), 0);
    }

    #[test]
    fn truncated_header_rolls_back() {
        let mut reader = RecordReader::seekable(Cursor::new(vec![0x00, 0x00]));
        assert!(matches!(
            reader.read_record(),
            Err(ReadError::ShortHeaderRead { got: 2 })
        ));
        assert_eq!(reader.get_mut().position().unwrap(), 0);
    }

    #[test]
    fn truncated_body_rolls_back_past_header() {
        // Header claims 5 payload bytes, only 3 follow.
        let mut reader =
            RecordReader::seekable(Cursor::new(b"\x00\x00\x00\x05Hel".to_vec()));
        assert!(matches!(
            reader.read_record(),
            Err(ReadError::ShortBodyRead {
                expected: 5,
                got: 3
            })
        ));
        assert_eq!(reader.get_mut().position().unwrap(), 0);
    }

    #[test]
    fn record_cap_fires_before_allocation() {
        let mut reader = RecordReader::seekable(Cursor::new(b"\x40\x00\x00\x00".to_vec()))
            .with_max_record_len(1 << 20);
        assert!(matches!(
            reader.read_record(),
            Err(ReadError::RecordTooLarge {
                len: 0x4000_0000,
                limit
            }) if limit == 1 << 20
        ));
        assert_eq!(reader.get_mut().position().unwrap(), 0);
    }

    #[test]
    fn seek_passes_through_to_source() {
        let mut reader = RecordReader::seekable(stream_of(&[b"Hello", b"World"]));
        reader.read_record().unwrap();
        reader.read_record().unwrap();

        reader.seek(SeekFrom::Start(9)).unwrap();
        assert_eq!(reader.read_record().unwrap(), b"World");
    }

    #[test]
    fn seek_fails_on_forward_only_source() {
        let data = b"\x00\x00\x00\x02Hi".to_vec();
        let mut reader = RecordReader::forward_only(&data[..]);
        assert!(matches!(
            reader.seek(SeekFrom::Start(0)),
            Err(ReadError::SeekUnsupported)
        ));
        // Reading still works.
        assert_eq!(reader.read_record().unwrap(), b"Hi");
    }
}
