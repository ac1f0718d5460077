/// Errors from encoding or decoding the fixed-size frame header.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The payload does not fit in the 32-bit length field.
    #[error("payload length {len} exceeds the 32-bit frame limit")]
    OversizedPayload { len: u64 },

    /// The buffer is too short to hold a complete header.
    #[error("unexpected end of input: need {need} bytes, have {have}")]
    UnexpectedEof { need: usize, have: usize },
}
