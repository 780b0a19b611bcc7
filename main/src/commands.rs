use async_trait::async_trait;
use slashgate_framework::{
    CommandHandler, ConnectionInfo, ParamMap, Response, SyntheticRequest,
};

pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn run(
        &self,
        _request: SyntheticRequest,
        _conn: ConnectionInfo,
        _params: ParamMap,
    ) -> anyhow::Result<Response> {
        Ok(Response::from_string("Pong!"))
    }
}

pub struct EchoCommand;

#[async_trait]
impl CommandHandler for EchoCommand {
    async fn run(
        &self,
        _request: SyntheticRequest,
        _conn: ConnectionInfo,
        params: ParamMap,
    ) -> anyhow::Result<Response> {
        let word = params
            .get("word")
            .ok_or(anyhow::anyhow!("word parameter not found"))?;

        Ok(Response::from_string(word))
    }
}

pub struct GreetCommand;

#[async_trait]
impl CommandHandler for GreetCommand {
    async fn run(
        &self,
        request: SyntheticRequest,
        _conn: ConnectionInfo,
        params: ParamMap,
    ) -> anyhow::Result<Response> {
        let name = params
            .get("name")
            .ok_or(anyhow::anyhow!("name parameter not found"))?;

        let title = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "title")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        Ok(Response::from_string(if title.is_empty() {
            format!("Hello, {name}!")
        } else {
            format!("Hello, {title} {name}!")
        }))
    }
}
