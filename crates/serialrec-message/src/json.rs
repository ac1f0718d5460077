use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::MessageError;
use crate::message::Message;

/// JSON-backed [`Message`] adapter.
///
/// Wraps any serde type and satisfies the message capability with
/// `serde_json`, so structured values can travel through
/// `write_message`/`read_message` without the codec knowing their shape:
///
/// ```
/// use serialrec_message::{Json, Message};
///
/// let msg = Json(vec![1u32, 2, 3]);
/// let bytes = msg.to_bytes().unwrap();
///
/// let mut out = Json(Vec::<u32>::new());
/// out.merge_from_bytes(&bytes).unwrap();
/// assert_eq!(out.0, vec![1, 2, 3]);
/// ```
pub struct Json<T>(pub T);

impl<T> Message for Json<T>
where
    T: Serialize + DeserializeOwned,
{
    fn to_bytes(&self) -> Result<Vec<u8>, MessageError> {
        serde_json::to_vec(&self.0).map_err(MessageError::serialize)
    }

    fn merge_from_bytes(&mut self, bytes: &[u8]) -> Result<(), MessageError> {
        self.0 = serde_json::from_slice(bytes).map_err(MessageError::deserialize)?;
        Ok(())
    }
}
