use anyhow::Context;

/// Runtime configuration pulled from the environment at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub application_id: String,
    pub public_key: String,
    pub token: String,
    pub token_prefix: String,
    pub webhook_path: String,
    pub guild_id: Option<String>,
    pub serve_only: bool,
    pub port: u16,
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            application_id: std::env::var("DISCORD_APPLICATION_ID")
                .context("DISCORD_APPLICATION_ID is not set")?,
            public_key: std::env::var("DISCORD_PUBLIC_KEY")
                .context("DISCORD_PUBLIC_KEY is not set")?,
            token: std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?,
            token_prefix: std::env::var("DISCORD_TOKEN_PREFIX")
                .unwrap_or_else(|_| "Bot".to_string()),
            webhook_path: std::env::var("WEBHOOK_PATH")
                .unwrap_or_else(|_| "/api/interactions".to_string()),
            guild_id: std::env::var("DISCORD_GUILD_ID").ok(),
            serve_only: std::env::var("SERVE_ONLY").is_ok(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8080),
        })
    }
}
