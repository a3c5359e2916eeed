use serde::Deserialize;

/// Prefix prepended to a raw object name to name its processed output.
pub const PROCESSED_PREFIX: &str = "processed-";

/// Output object name for a raw object name.
pub fn processed_name(raw_name: &str) -> String {
    format!("{}{}", PROCESSED_PREFIX, raw_name)
}

/// Pub/Sub push request body.
#[derive(Debug, Clone, Deserialize)]
pub struct PushEnvelope {
    pub message: PushMessage,
}

/// The message wrapped by a push request.
#[derive(Debug, Clone, Deserialize)]
pub struct PushMessage {
    /// Base64 encoded event JSON.
    pub data: String,
    #[serde(default, rename = "messageId", alias = "message_id")]
    pub message_id: Option<String>,
}

/// A validated request to process one raw video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    name: String,
    bucket: Option<String>,
    content_type: Option<String>,
    message_id: Option<String>,
}

impl ProcessRequest {
    /// Creates a request for the given raw object name.
    ///
    /// Callers are expected to have validated the name; the decoder does.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bucket: None,
            content_type: None,
            message_id: None,
        }
    }

    pub(crate) fn with_context(
        mut self,
        bucket: Option<String>,
        content_type: Option<String>,
    ) -> Self {
        self.bucket = bucket;
        self.content_type = content_type;
        self
    }

    pub(crate) fn with_message_id(mut self, message_id: Option<String>) -> Self {
        self.message_id = message_id;
        self
    }

    /// Raw object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Processed object name.
    pub fn output_name(&self) -> String {
        processed_name(&self.name)
    }

    /// Bucket reported by the notification, if any.
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }
}
