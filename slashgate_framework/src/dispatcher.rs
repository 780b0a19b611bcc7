use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use slashgate_discord::{
    Interaction, InteractionOption, InteractionResponse, INTERACTION_TYPE_APPLICATION_COMMAND,
    INTERACTION_TYPE_PING,
};

use crate::registry::{CommandEntry, CommandRegistry};
use crate::route::route_url;
use crate::signature::verify_signature;
use crate::{ConnectionInfo, ParamMap, SyntheticRequest};

/// Terminal reply for one webhook delivery. The transport layer turns
/// this into an HTTP response with a UTF-8 JSON content type.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl GatewayReply {
    pub fn ok(body: serde_json::Value) -> GatewayReply {
        GatewayReply { status: 200, body }
    }

    pub fn error(status: u16, message: &str) -> GatewayReply {
        GatewayReply {
            status,
            body: json!({ "error": message }),
        }
    }
}

/// The protocol state machine for inbound interactions: authenticate,
/// classify, rebuild the handler request, wrap the reply.
pub struct InteractionDispatcher {
    registry: Arc<CommandRegistry>,
    public_key: String,
}

impl InteractionDispatcher {
    pub fn new(registry: Arc<CommandRegistry>, public_key: impl Into<String>) -> Self {
        Self {
            registry,
            public_key: public_key.into(),
        }
    }

    /// Handles one delivery. The two authentication failure modes stay
    /// distinguishable by status code: 400 for a missing header, 401 for a
    /// signature that does not verify. The platform probes both.
    pub async fn handle(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
        conn: ConnectionInfo,
    ) -> GatewayReply {
        let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
            return GatewayReply::error(400, "missing signature headers");
        };

        if !verify_signature(body, timestamp, signature, &self.public_key) {
            return GatewayReply::error(401, "invalid request signature");
        }

        let Ok(interaction) = serde_json::from_slice::<Interaction>(body) else {
            return GatewayReply::error(400, "bad request");
        };

        match interaction.interaction_type {
            INTERACTION_TYPE_PING => GatewayReply::ok(InteractionResponse::pong().to_json()),
            INTERACTION_TYPE_APPLICATION_COMMAND => {
                let Some(data) = interaction.data else {
                    return GatewayReply::error(400, "bad request");
                };

                self.dispatch_command(&data.name, &data.options, conn).await
            }
            _ => GatewayReply::error(400, "bad request"),
        }
    }

    async fn dispatch_command(
        &self,
        name: &str,
        options: &[InteractionOption],
        conn: ConnectionInfo,
    ) -> GatewayReply {
        // The platform only sends commands we registered; anything else is
        // a contract violation and fails this request alone.
        let Some(entry) = self.registry.lookup(name) else {
            eprintln!("[GATEWAY] Received unregistered command {name:?}");
            return GatewayReply::error(500, "unknown command");
        };

        let (request, params) = match reconcile_options(entry, options) {
            Ok(reconciled) => reconciled,
            Err(e) => {
                eprintln!("[GATEWAY] Failed to rebuild request for {name:?}: {e}");
                return GatewayReply::error(500, "internal error");
            }
        };

        match entry.handler.run(request, conn, params).await {
            Ok(response) => {
                GatewayReply::ok(InteractionResponse::channel_message(response.content).to_json())
            }
            Err(e) => {
                eprintln!("[GATEWAY] Command {name:?} failed: {e}");
                GatewayReply::error(500, "internal error")
            }
        }
    }
}

/// Partitions the payload's unordered name/value options against the
/// route's declared parameters and rebuilds the request URL from the
/// original pattern.
///
/// First pass consumes every option naming an optional (query) parameter
/// as an override of that key's declared default. Every pair left after
/// that must name a required (path) parameter; those substitute their
/// `:name` segment and populate the handler's parameter map.
fn reconcile_options(
    entry: &CommandEntry,
    options: &[InteractionOption],
) -> anyhow::Result<(SyntheticRequest, ParamMap)> {
    let route = &entry.route;
    let mut url = route_url(&route.pattern)?;

    let mut overrides: HashMap<&str, String> = HashMap::new();
    for option in options {
        if route.is_optional(&option.name) {
            overrides.insert(option.name.as_str(), option.value_as_string());
        }
    }

    if !route.optional.is_empty() {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, default) in &route.optional {
            match overrides.get(key.as_str()) {
                Some(value) => pairs.append_pair(key, value),
                // Absent option keeps the default declared in the pattern.
                None => pairs.append_pair(key, default),
            };
        }
    }

    let mut params = ParamMap::new();
    for option in options {
        if overrides.contains_key(option.name.as_str()) {
            continue;
        }

        if route.is_required(&option.name) {
            params.insert(option.name.clone(), option.value_as_string());
        } else {
            eprintln!(
                "[GATEWAY] Ignoring unexpected option {:?} for command {:?}",
                option.name, route.name
            );
        }
    }

    let mut segments = Vec::with_capacity(route.required.len() + 1);
    segments.push(route.name.clone());
    for param in &route.required {
        let value = params
            .get(param)
            .ok_or_else(|| anyhow::anyhow!("missing required parameter {param:?}"))?;
        segments.push(value.clone());
    }

    url.path_segments_mut()
        .map_err(|()| anyhow::anyhow!("route base cannot be a path"))?
        .clear()
        .extend(&segments);

    let request = SyntheticRequest {
        url,
        command_name: route.name.clone(),
    };

    Ok((request, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile, Response};

    struct NoopHandler;

    #[async_trait::async_trait]
    impl crate::CommandHandler for NoopHandler {
        async fn run(
            &self,
            _request: SyntheticRequest,
            _conn: ConnectionInfo,
            _params: ParamMap,
        ) -> anyhow::Result<Response> {
            Ok(Response::default())
        }
    }

    fn entry(pattern: &str) -> CommandEntry {
        let route = compile(pattern).unwrap();
        let command = route.build_command();
        CommandEntry {
            route,
            command,
            handler: Box::new(NoopHandler),
        }
    }

    fn option(name: &str, value: &str) -> InteractionOption {
        InteractionOption {
            name: name.to_owned(),
            value: serde_json::Value::String(value.to_owned()),
        }
    }

    #[test]
    fn partitions_optional_overrides_from_required_params() {
        let entry = entry("/greet/:name?title=");
        let options = vec![option("title", "Dr"), option("name", "Ada")];

        let (request, params) = reconcile_options(&entry, &options).unwrap();

        assert_eq!(request.url.path(), "/greet/Ada");
        assert_eq!(request.url.query(), Some("title=Dr"));
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("name").map(String::as_str), Some("Ada"));
    }

    #[test]
    fn absent_optional_keeps_pattern_default() {
        let entry = entry("/greet/:name?title=");
        let options = vec![option("name", "Ada")];

        let (request, params) = reconcile_options(&entry, &options).unwrap();

        assert_eq!(request.url.query(), Some("title="));
        assert!(!params.contains_key("title"));
    }

    #[test]
    fn route_without_query_yields_no_query() {
        let entry = entry("/echo/:word");
        let options = vec![option("word", "hi")];

        let (request, params) = reconcile_options(&entry, &options).unwrap();

        assert_eq!(request.url.path(), "/echo/hi");
        assert_eq!(request.url.query(), None);
        assert_eq!(params.get("word").map(String::as_str), Some("hi"));
    }

    #[test]
    fn missing_required_parameter_is_an_error() {
        let entry = entry("/echo/:word");
        assert!(reconcile_options(&entry, &[]).is_err());
    }

    #[test]
    fn unexpected_option_is_ignored() {
        let entry = entry("/ping");
        let options = vec![option("stray", "x")];

        let (request, params) = reconcile_options(&entry, &options).unwrap();

        assert_eq!(request.url.path(), "/ping");
        assert!(params.is_empty());
    }
}
