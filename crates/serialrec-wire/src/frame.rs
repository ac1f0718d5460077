use crate::error::WireError;

/// Size of the length prefix in bytes (fixed).
pub const LEN_PREFIX_SIZE: usize = 4;

/// Largest payload a single frame can carry. The length field is an
/// unsigned 32-bit integer, so 2^32 − 1 bytes.
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64;

/// Record frame header — the 4 bytes preceding every payload.
///
/// ```text
/// ┌────────┬─────────┬─────────────────────────────────────┐
/// │ Offset │ Size    │ Description                         │
/// ├────────┼─────────┼─────────────────────────────────────┤
/// │ 0x00   │ 4 bytes │ Payload length, big-endian unsigned │
/// └────────┴─────────┴─────────────────────────────────────┘
/// ```
///
/// Frames are concatenated back to back with no magic bytes, separators,
/// padding, or trailer: a record stream is nothing but `Frame*`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    payload_len: u32,
}

impl FrameHeader {
    /// Create a header for a payload of `payload_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::OversizedPayload`] if `payload_len` does not
    /// fit in the 32-bit length field.
    pub fn new(payload_len: usize) -> Result<Self, WireError> {
        let len = u32::try_from(payload_len).map_err(|_| WireError::OversizedPayload {
            len: payload_len as u64,
        })?;
        Ok(Self { payload_len: len })
    }

    /// Header for a length already known to fit the field.
    #[must_use]
    pub fn from_raw(payload_len: u32) -> Self {
        Self { payload_len }
    }

    /// Decode a header from exactly [`LEN_PREFIX_SIZE`] bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; LEN_PREFIX_SIZE]) -> Self {
        Self {
            payload_len: u32::from_be_bytes(bytes),
        }
    }

    /// Parse a header from the first 4 bytes of the provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if the buffer is shorter
    /// than [`LEN_PREFIX_SIZE`].
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < LEN_PREFIX_SIZE {
            return Err(WireError::UnexpectedEof {
                need: LEN_PREFIX_SIZE,
                have: buf.len(),
            });
        }
        Ok(Self::from_bytes([buf[0], buf[1], buf[2], buf[3]]))
    }

    /// Write the 4-byte header into the provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// [`LEN_PREFIX_SIZE`].
    pub fn write_to(self, buf: &mut [u8]) -> Result<(), WireError> {
        if buf.len() < LEN_PREFIX_SIZE {
            return Err(WireError::UnexpectedEof {
                need: LEN_PREFIX_SIZE,
                have: buf.len(),
            });
        }
        buf[..LEN_PREFIX_SIZE].copy_from_slice(&self.to_bytes());
        Ok(())
    }

    /// Encode the header as its 4 big-endian bytes.
    #[must_use]
    pub fn to_bytes(self) -> [u8; LEN_PREFIX_SIZE] {
        self.payload_len.to_be_bytes()
    }

    /// The payload length the header declares.
    #[must_use]
    pub fn payload_len(self) -> u32 {
        self.payload_len
    }

    /// Total frame length on the wire: header plus payload.
    #[must_use]
    pub fn frame_len(self) -> u64 {
        LEN_PREFIX_SIZE as u64 + u64::from(self.payload_len)
    }
}
