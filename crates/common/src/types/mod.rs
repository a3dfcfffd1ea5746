use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform JSON response body: `{ success, message?, ...data }`.
///
/// `data` is flattened into the top-level object, so it must serialize to a
/// JSON object (or `()` for no extra fields).
#[derive(Serialize, Debug)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: None, data }
    }
}

impl Envelope<Empty> {
    pub fn message(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), data: Empty {} }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()), data: Empty {} }
    }
}

/// Placeholder payload for envelopes that carry no resource data.
#[derive(Serialize, Debug, Default)]
pub struct Empty {}
