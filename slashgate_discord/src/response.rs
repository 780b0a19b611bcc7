use serde::Serialize;

pub const CALLBACK_TYPE_PONG: u8 = 1;
pub const CALLBACK_TYPE_CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

/// Outbound reply envelope for a webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub response_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionResponseData>,
}

/// Message payload of a command reply. The embed/component/attachment
/// lists are always emitted, empty; handlers only produce text content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponseData {
    pub content: String,
    pub embeds: Vec<serde_json::Value>,
    pub components: Vec<serde_json::Value>,
    pub attachments: Vec<serde_json::Value>,
}

impl InteractionResponse {
    pub fn pong() -> InteractionResponse {
        InteractionResponse {
            response_type: CALLBACK_TYPE_PONG,
            data: None,
        }
    }

    pub fn channel_message(content: impl Into<String>) -> InteractionResponse {
        InteractionResponse {
            response_type: CALLBACK_TYPE_CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(InteractionResponseData {
                content: content.into(),
                embeds: vec![],
                components: vec![],
                attachments: vec![],
            }),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
