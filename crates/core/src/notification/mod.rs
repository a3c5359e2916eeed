//! Decoding of inbound storage notifications.
//!
//! A notification arrives as a Pub/Sub push body whose `message.data` field
//! is base64 encoded JSON describing the uploaded object. Decoding is pure.

mod decoder;
mod error;
mod types;

pub use decoder::{decode_message_data, decode_notification};
pub use error::PayloadError;
pub use types::{processed_name, ProcessRequest, PushEnvelope, PushMessage, PROCESSED_PREFIX};
