use serialrec_message::MessageError;
use serialrec_wire::WireError;

/// Errors from framing records onto a sink.
///
/// Error hierarchy:
///
/// ```text
///   WriteError
///   ├── Wire(WireError)     ← payload too large for the length field
///   ├── ShortWrite          ← sink stopped accepting bytes mid-frame
///   ├── Serialize           ← Message::to_bytes failed (sink untouched)
///   └── Io                  ← sink write failed partway through a frame
/// ```
///
/// `ShortWrite` and `Io` carry a `written` field: the total number of
/// frame bytes (header plus payload) the sink physically accepted before
/// the failure. One convention covers header and body failures alike, so
/// a caller can always tell how much of the frame reached the stream.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The payload cannot be represented in a frame header.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The sink accepted fewer bytes than the frame requires.
    #[error("short write: sink accepted {written} of {frame_len} frame bytes")]
    ShortWrite { written: usize, frame_len: usize },

    /// The message could not be serialized. The sink was not touched.
    #[error(transparent)]
    Serialize(#[from] MessageError),

    /// The sink reported an error partway through a frame.
    #[error("sink write failed after {written} frame bytes")]
    Io {
        written: usize,
        #[source]
        source: std::io::Error,
    },
}
