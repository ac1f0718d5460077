use std::io;

use serialrec_message::MessageError;

/// Errors from recovering records off a source.
///
/// Error hierarchy:
///
/// ```text
///   ReadError
///   ├── Eof              ← clean end of stream at a frame boundary
///   ├── ShortHeaderRead  ← stream ended inside a 4-byte length header
///   ├── ShortBodyRead    ← stream ended inside a record body
///   ├── BufferTooSmall   ← caller buffer smaller than the next record
///   ├── RecordTooLarge   ← header length above the configured cap
///   ├── SeekUnsupported  ← repositioning on a forward-only source
///   ├── Deserialize      ← Message::merge_from_bytes failed
///   └── Io               ← the source reported an I/O failure
/// ```
///
/// `Eof` is ordinary stream exhaustion, not corruption: no bytes
/// remained where the next header would start. A `ShortHeaderRead` or
/// `ShortBodyRead` on a source that cannot supply more data signals
/// truncation or a desynchronized frame boundary; on a source that can
/// (a draining pipe, a growing file), the reader's rollback makes the
/// failed attempt invisible and the call can simply be repeated.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Clean end of stream: zero bytes available at a frame boundary.
    #[error("end of record stream")]
    Eof,

    /// The stream ended partway through a length header.
    #[error("short read for header: got {got} of 4 bytes")]
    ShortHeaderRead { got: usize },

    /// The stream ended partway through a record body.
    #[error("short read for body: got {got} of {expected} bytes")]
    ShortBodyRead { expected: usize, got: usize },

    /// The caller's buffer is smaller than the record that was read.
    /// The record has already been consumed from the stream.
    #[error("no buffer space available: record is {record_len} bytes, buffer holds {capacity}")]
    BufferTooSmall { record_len: usize, capacity: usize },

    /// The header declared a length above the configured limit.
    #[error("record length {len} exceeds configured limit {limit}")]
    RecordTooLarge { len: u64, limit: u64 },

    /// Repositioning was requested on a forward-only source.
    #[error("underlying source does not support seeking")]
    SeekUnsupported,

    /// The record was read but could not be decoded as a message.
    #[error(transparent)]
    Deserialize(#[from] MessageError),

    /// The source reported an I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<ReadError> for io::Error {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Io(e) => e,
            ReadError::Eof
            | ReadError::ShortHeaderRead { .. }
            | ReadError::ShortBodyRead { .. } => {
                io::Error::new(io::ErrorKind::UnexpectedEof, err)
            }
            ReadError::BufferTooSmall { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            ReadError::SeekUnsupported => io::Error::new(io::ErrorKind::Unsupported, err),
            ReadError::RecordTooLarge { .. } | ReadError::Deserialize(_) => {
                io::Error::new(io::ErrorKind::InvalidData, err)
            }
        }
    }
}
