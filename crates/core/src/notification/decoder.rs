use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde_json::{Map, Value};

use super::error::PayloadError;
use super::types::{ProcessRequest, PushEnvelope};

/// Standard alphabet, padding optional. Push senders are not consistent about it.
const MESSAGE_DATA: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a push request body into a [`ProcessRequest`].
pub fn decode_notification(body: &[u8]) -> Result<ProcessRequest, PayloadError> {
    let envelope: PushEnvelope = serde_json::from_slice(body)
        .map_err(|e| PayloadError::MalformedEnvelope(e.to_string()))?;

    let request = decode_message_data(&envelope.message.data)?;
    Ok(request.with_message_id(envelope.message.message_id))
}

/// Decode the base64 `message.data` field on its own.
pub fn decode_message_data(data: &str) -> Result<ProcessRequest, PayloadError> {
    let bytes = MESSAGE_DATA.decode(data.trim())?;
    let text = String::from_utf8(bytes).map_err(|_| PayloadError::InvalidUtf8)?;

    let value: Value =
        serde_json::from_str(&text).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;

    // Arrays, strings and numbers carry no `name` field.
    let Value::Object(event) = value else {
        return Err(PayloadError::MissingName);
    };

    let name = match string_field(&event, "name") {
        Some(name) if !name.is_empty() => name,
        _ => return Err(PayloadError::MissingName),
    };

    // Not usable as object names.
    if name == "." || name == ".." {
        return Err(PayloadError::InvalidName(name));
    }

    Ok(ProcessRequest::new(name).with_context(
        string_field(&event, "bucket"),
        string_field(&event, "contentType"),
    ))
}

fn string_field(event: &Map<String, Value>, key: &str) -> Option<String> {
    event.get(key).and_then(Value::as_str).map(str::to_string)
}
