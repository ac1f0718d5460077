#![warn(clippy::pedantic)]

pub mod error;
pub mod frame;

pub use error::WireError;
pub use frame::{FrameHeader, LEN_PREFIX_SIZE, MAX_PAYLOAD_LEN};
