use crate::error::MessageError;

/// Capability interface for structured messages carried in records.
///
/// The record codec treats a message as an opaque byte sequence: it
/// never inspects message internals or depends on any particular
/// serialization format. A type is a `Message` when it can produce its
/// wire bytes and reconstruct itself from them:
///
/// - `RecordWriter::write_message` calls [`to_bytes`](Self::to_bytes)
///   and frames the result.
/// - `RecordReader::read_message` reads one record and calls
///   [`merge_from_bytes`](Self::merge_from_bytes) on a caller-provided
///   value, mutating it in place.
///
/// See [`Json`](crate::Json) for a ready-made implementation over any
/// serde type.
pub trait Message {
    /// Serialize the message to its byte representation.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Serialize`] wrapping the underlying codec
    /// failure.
    fn to_bytes(&self) -> Result<Vec<u8>, MessageError>;

    /// Replace the message's contents with the value decoded from
    /// `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::Deserialize`] wrapping the underlying
    /// codec failure. On error, implementations should leave `self`
    /// unmodified.
    fn merge_from_bytes(&mut self, bytes: &[u8]) -> Result<(), MessageError>;
}
