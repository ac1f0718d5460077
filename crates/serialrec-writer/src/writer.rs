use std::io::Write;

use serialrec_message::Message;
use serialrec_wire::{FrameHeader, LEN_PREFIX_SIZE};

use crate::error::WriteError;

/// Record writer — frames opaque payloads onto a byte sink.
///
/// Every call to [`write`](Self::write) emits one frame:
///
/// ```text
/// ┌──────────┬─────────────────────────────────┐
/// │ 4 bytes  │ Payload length (big-endian u32) │
/// │ N bytes  │ Payload                         │
/// └──────────┴─────────────────────────────────┘
/// ```
///
/// The writer holds no state beyond the sink: frames are never buffered
/// or batched across calls, no flush is issued, and no failed write is
/// retried — retry policy belongs to the caller.
///
/// A writer must not be shared between threads without external
/// serialization: interleaved header and payload writes from two callers
/// would corrupt the framing.
pub struct RecordWriter<W> {
    sink: W,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a byte sink.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// A reference to the wrapped sink.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// A mutable reference to the wrapped sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the writer, returning the wrapped sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Frame `payload` as one record and write it to the sink.
    ///
    /// The header and the payload are written as separate sink writes,
    /// in that order. Returns the total number of bytes the sink
    /// accepted — always `4 + payload.len()` on success. On failure the
    /// error's `written` field carries the same running total up to the
    /// point of failure, whether the header or the payload was being
    /// written.
    ///
    /// # Errors
    ///
    /// - [`WriteError::Wire`] if `payload.len()` exceeds the 32-bit
    ///   length field. The sink is not touched.
    /// - [`WriteError::ShortWrite`] if the sink stops accepting bytes
    ///   (a write call returns `Ok(0)`) before the frame is complete.
    /// - [`WriteError::Io`] if the sink reports an error, including
    ///   interruption.
    pub fn write(&mut self, payload: &[u8]) -> Result<usize, WriteError> {
        let header = FrameHeader::new(payload.len())?;
        let frame_len = LEN_PREFIX_SIZE + payload.len();

        let mut written = 0;
        self.write_part(&header.to_bytes(), &mut written, frame_len)?;
        self.write_part(payload, &mut written, frame_len)?;

        tracing::trace!(payload_len = payload.len(), frame_len, "record written");
        Ok(written)
    }

    /// Serialize `msg` and write the resulting bytes as one record.
    ///
    /// # Errors
    ///
    /// Serialization failure surfaces as [`WriteError::Serialize`]
    /// before the sink is touched; sink failures propagate from
    /// [`write`](Self::write) unchanged.
    pub fn write_message<M: Message>(&mut self, msg: &M) -> Result<(), WriteError> {
        let bytes = msg.to_bytes()?;
        self.write(&bytes)?;
        Ok(())
    }

    /// Push one part of a frame into the sink, accumulating the
    /// frame-wide byte count. A sink that returns `Ok(0)` before the
    /// part is complete counts as a short write.
    fn write_part(
        &mut self,
        part: &[u8],
        written: &mut usize,
        frame_len: usize,
    ) -> Result<(), WriteError> {
        let mut sent = 0;
        while sent < part.len() {
            match self.sink.write(&part[sent..]) {
                Ok(0) => {
                    return Err(WriteError::ShortWrite {
                        written: *written,
                        frame_len,
                    });
                }
                Ok(n) => {
                    sent += n;
                    *written += n;
                }
                Err(source) => {
                    return Err(WriteError::Io {
                        written: *written,
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use serialrec_message::MessageError;

    use super::*;

    #[test]
    fn hello_frame_is_nine_bytes() {
        let mut writer = RecordWriter::new(Vec::new());
        let n = writer.write(b"Hello").unwrap();
        assert_eq!(n, 9);

        let buf = writer.into_inner();
        assert_eq!(buf, b"\x00\x00\x00\x05Hello");
    }

    #[test]
    fn frames_are_appended_without_separators() {
        let mut writer = RecordWriter::new(Vec::new());
        assert_eq!(writer.write(b"Hello").unwrap(), 9);
        assert_eq!(writer.write(b"World").unwrap(), 9);

        let buf = writer.into_inner();
        assert_eq!(buf.len(), 18);
        assert_eq!(&buf[..9], b"\x00\x00\x00\x05Hello");
        assert_eq!(&buf[9..], b"\x00\x00\x00\x05World");
    }

    #[test]
    fn empty_payload_emits_bare_header() {
        let mut writer = RecordWriter::new(Vec::new());
        assert_eq!(writer.write(b"").unwrap(), 4);
        assert_eq!(writer.into_inner(), [0u8; 4]);
    }

    /// Sink that accepts `limit` bytes, then refuses with `Ok(0)`.
    struct ChokedSink {
        buf: Vec<u8>,
        limit: usize,
    }

    impl Write for ChokedSink {
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

    #[test]
    fn short_write_mid_payload_reports_total_accepted() {
        let mut writer = RecordWriter::new(ChokedSink {
            buf: Vec::new(),
            limit: 7,
        });
        let result = writer.write(b"Hello");
        assert!(matches!(
            result,
            Err(WriteError::ShortWrite {
                written: 7,
                frame_len: 9
            })
        ));
        assert_eq!(writer.get_ref().buf, b"\x00\x00\x00\x05Hel");
    }

    #[test]
    fn short_write_mid_header_uses_same_convention() {
        let mut writer = RecordWriter::new(ChokedSink {
            buf: Vec::new(),
            limit: 2,
        });
        let result = writer.write(b"Hello");
        assert!(matches!(
            result,
            Err(WriteError::ShortWrite {
                written: 2,
                frame_len: 9
            })
        ));
    }

    /// Sink that fails with an I/O error after accepting `limit` bytes.
    struct FailingSink {
        accepted: usize,
        limit: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if self.accepted >= self.limit {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            let n = data.len().min(self.limit - self.accepted);
            self.accepted += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_error_carries_partial_count() {
        let mut writer = RecordWriter::new(FailingSink {
            accepted: 0,
            limit: 6,
        });
        match writer.write(b"Hello") {
            Err(WriteError::Io { written, source }) => {
                assert_eq!(written, 6);
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    struct RawMessage(Vec<u8>);

    impl Message for RawMessage {
        fn to_bytes(&self) -> Result<Vec<u8>, MessageError> {
            Ok(self.0.clone())
        }

        fn merge_from_bytes(&mut self, bytes: &[u8]) -> Result<(), MessageError> {
            self.0 = bytes.to_vec();
            Ok(())
        }
    }

    #[test]
    fn write_message_frames_serialized_bytes() {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_message(&RawMessage(b"abc".to_vec())).unwrap();
        assert_eq!(writer.into_inner(), b"\x00\x00\x00\x03abc");
    }

    struct BrokenMessage;

    impl Message for BrokenMessage {
        fn to_bytes(&self) -> Result<Vec<u8>, MessageError> {
            Err(MessageError::serialize("no wire form"))
        }

        fn merge_from_bytes(&mut self, _bytes: &[u8]) -> Result<(), MessageError> {
            unreachable!()
        }
    }

    #[test]
    fn serialize_failure_leaves_sink_untouched() {
        let mut writer = RecordWriter::new(Vec::new());
        let result = writer.write_message(&BrokenMessage);
        assert!(matches!(result, Err(WriteError::Serialize(_))));
        assert!(writer.into_inner().is_empty());
    }
}
