#![warn(clippy::pedantic)]

pub mod error;
pub mod json;
pub mod message;

pub use error::MessageError;
pub use json::Json;
pub use message::Message;
