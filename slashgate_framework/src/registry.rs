use std::collections::HashMap;

use slashgate_discord::{ApiCommand, DiscordRestClient};

use crate::{compile, BoxedHandler, CompiledRoute};

pub struct CommandEntry {
    pub route: CompiledRoute,
    pub command: ApiCommand,
    pub handler: BoxedHandler,
}

/// Holds every compiled route with its descriptor and bound handler.
/// Built once at startup, read-only afterward.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles the pattern and binds the handler under the command name.
    /// A pattern the compiler rejects is skipped; the compiler already
    /// emitted its diagnostic and the handler is simply never reachable.
    pub fn register(&mut self, pattern: &str, handler: BoxedHandler) {
        let Some(route) = compile(pattern) else {
            return;
        };

        let command = route.build_command();
        println!("Registering command {}", command.name);

        let entry = CommandEntry {
            route,
            command,
            handler,
        };

        match self.index.get(&entry.route.name) {
            Some(slot) => self.entries[*slot] = entry,
            None => {
                self.index
                    .insert(entry.route.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Snapshot of all bound descriptors, in registration order.
    pub fn descriptors(&self) -> Vec<ApiCommand> {
        self.entries
            .iter()
            .map(|entry| entry.command.clone())
            .collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        self.index.get(name).map(|slot| &self.entries[*slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bulk-replaces the remote command set with the current descriptors,
    /// guild-scoped when a guild id is supplied. Not retried; the outcome
    /// goes back to the caller for logging.
    pub async fn sync_remote(
        &self,
        rest: &DiscordRestClient,
        application_id: &str,
        guild_id: Option<&str>,
    ) -> anyhow::Result<()> {
        let commands = self.descriptors();

        match guild_id {
            Some(guild_id) => {
                rest.set_guild_commands(application_id, guild_id, &commands)
                    .await
            }
            None => rest.set_global_commands(application_id, &commands).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConnectionInfo, ParamMap, Response, SyntheticRequest};

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

    #[test]
    fn descriptors_keep_registration_order() {
        let mut registry = CommandRegistry::new();
        registry.register("/ping", Box::new(NoopHandler));
        registry.register("/echo/:word", Box::new(NoopHandler));
        registry.register("/greet/:name?title=", Box::new(NoopHandler));

        let names = registry
            .descriptors()
            .iter()
            .map(|command| command.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["ping", "echo", "greet"]);
    }

    #[test]
    fn rejected_pattern_is_not_registered() {
        let mut registry = CommandRegistry::new();
        registry.register("/not a command", Box::new(NoopHandler));

        assert!(registry.is_empty());
        assert!(registry.lookup("not a command").is_none());
    }

    #[test]
    fn lookup_finds_bound_entry() {
        let mut registry = CommandRegistry::new();
        registry.register("/echo/:word", Box::new(NoopHandler));

        let entry = registry.lookup("echo").unwrap();
        assert_eq!(entry.route.pattern, "/echo/:word");
        assert_eq!(entry.route.required, vec!["word".to_owned()]);
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn re_registering_a_name_replaces_the_entry() {
        let mut registry = CommandRegistry::new();
        registry.register("/echo/:word", Box::new(NoopHandler));
        registry.register("/echo/:text", Box::new(NoopHandler));

        assert_eq!(registry.len(), 1);
        let entry = registry.lookup("echo").unwrap();
        assert_eq!(entry.route.required, vec!["text".to_owned()]);
    }
}
