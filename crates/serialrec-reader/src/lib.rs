#![warn(clippy::pedantic)]

pub mod error;
pub mod reader;
pub mod source;

pub use error::ReadError;
pub use reader::RecordReader;
pub use source::{ForwardOnly, Seekable, Source};
