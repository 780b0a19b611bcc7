use serde::Deserialize;

pub const INTERACTION_TYPE_PING: u8 = 1;
pub const INTERACTION_TYPE_APPLICATION_COMMAND: u8 = 2;

/// Inbound webhook payload. Untrusted until the signature over the raw
/// request body has been verified.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub interaction_type: u8,
    pub data: Option<InteractionData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

/// A single name/value pair from the interaction payload. Options arrive
/// unordered; the dispatcher reconciles them against the declared route.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    pub value: serde_json::Value,
}

impl InteractionOption {
    /// String options come through as JSON strings; anything else is
    /// rendered through its JSON form.
    pub fn value_as_string(&self) -> String {
        match self.value.as_str() {
            Some(value) => value.to_owned(),
            None => self.value.to_string(),
        }
    }
}
