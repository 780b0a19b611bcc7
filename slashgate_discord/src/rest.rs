use crate::ApiCommand;

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Thin client for the command-registration endpoint. Registration is a
/// bulk replace: the command list sent here becomes the full set.
#[derive(Debug, Clone)]
pub struct DiscordRestClient {
    token_prefix: String,
    token: String,
    client: reqwest::Client,
}

impl DiscordRestClient {
    pub fn new(token_prefix: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token_prefix: token_prefix.into(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn set_global_commands(
        &self,
        application_id: &str,
        commands: &[ApiCommand],
    ) -> anyhow::Result<()> {
        self.put_commands(
            format!("{DISCORD_API_BASE}/applications/{application_id}/commands"),
            commands,
        )
        .await
    }

    pub async fn set_guild_commands(
        &self,
        application_id: &str,
        guild_id: &str,
        commands: &[ApiCommand],
    ) -> anyhow::Result<()> {
        self.put_commands(
            format!("{DISCORD_API_BASE}/applications/{application_id}/guilds/{guild_id}/commands"),
            commands,
        )
        .await
    }

    async fn put_commands(&self, url: String, commands: &[ApiCommand]) -> anyhow::Result<()> {
        let response = self
            .client
            .put(url)
            .header(
                "Authorization",
                format!("{} {}", self.token_prefix, self.token),
            )
            .json(&commands)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "command registration failed with status {status}: {body}"
            ));
        }

        Ok(())
    }
}
