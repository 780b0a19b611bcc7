use std::collections::HashMap;
use std::net::SocketAddr;

use url::Url;

/// Request rebuilt from a command's declared route and the options of an
/// interaction payload, handed to the matched handler.
#[derive(Debug, Clone)]
pub struct SyntheticRequest {
    pub url: Url,
    pub command_name: String,
}

/// Transport-level metadata about the webhook delivery.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionInfo {
    pub remote_addr: Option<SocketAddr>,
}

/// Resolved required-parameter values, keyed by declared name.
pub type ParamMap = HashMap<String, String>;

/// Textual reply a handler produces; becomes the `content` of the reply
/// envelope.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Response {
    pub content: String,
}

impl Response {
    pub fn from_string(string: impl Into<String>) -> Response {
        Response {
            content: string.into(),
        }
    }
}

impl From<String> for Response {
    fn from(value: String) -> Self {
        Self::from_string(value)
    }
}

impl From<&str> for Response {
    fn from(value: &str) -> Self {
        Self::from_string(value)
    }
}

#[async_trait::async_trait]
pub trait CommandHandler {
    async fn run(
        &self,
        request: SyntheticRequest,
        conn: ConnectionInfo,
        params: ParamMap,
    ) -> anyhow::Result<Response>;
}

pub type BoxedHandler = Box<(dyn CommandHandler + Send + Sync)>;
