/// Boxed source error from an underlying message codec.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from converting a structured message to or from bytes.
///
/// The record codec never produces these itself — they wrap whatever the
/// caller's message implementation reports, preserving it as the source
/// for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// `Message::to_bytes` failed.
    #[error("message serialization failed")]
    Serialize(#[source] BoxError),

    /// `Message::merge_from_bytes` failed.
    #[error("message deserialization failed")]
    Deserialize(#[source] BoxError),
}

impl MessageError {
    /// Wrap an underlying serializer error.
    pub fn serialize(err: impl Into<BoxError>) -> Self {
        Self::Serialize(err.into())
    }

    /// Wrap an underlying deserializer error.
    pub fn deserialize(err: impl Into<BoxError>) -> Self {
        Self::Deserialize(err.into())
    }
}
