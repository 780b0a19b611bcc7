use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use slashgate_discord::{ApiCommand, CommandBuilder, CommandOptionBuilder, OPTION_TYPE_STRING};

/// Fixed base used to parse route patterns and rebuild request URLs; the
/// scheme and host are never observed, only path and query matter.
pub const ROUTE_BASE: &str = "http://slashgate.local";

// Charset the registration endpoint enforces for command names.
static COMMAND_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-_\p{L}\p{N}\p{Devanagari}\p{Thai}]{1,32}$").expect("valid command name regex")
});

/// A route pattern compiled into its command name and parameter lists.
///
/// The original pattern string is kept alongside the compiled lists: the
/// pattern doubles as the template for rebuilding a request URL at
/// dispatch time, while the lists drive descriptor emission and option
/// reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRoute {
    pub pattern: String,
    pub name: String,
    /// Path `:segments`, in declaration order.
    pub required: Vec<String>,
    /// Query keys with their declared default values, in declaration order.
    pub optional: Vec<(String, String)>,
}

/// Compiles a route pattern like `/greet/:name?title=` into a
/// [`CompiledRoute`]. Returns `None` (after a diagnostic) when the command
/// name fails the identifier charset; the route is then simply never
/// registered, which is a recoverable condition.
pub fn compile(pattern: &str) -> Option<CompiledRoute> {
    let url = match route_url(pattern) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("[ROUTE] Failed to parse route {pattern:?}: {e}");
            return None;
        }
    };

    // The URL parser percent-encodes path segments; decode them back so
    // unicode command names validate against the charset they were written in.
    let segments = url
        .path_segments()
        .map(|segments| {
            segments
                .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let name = segments.first().map(String::as_str).unwrap_or_default();
    if !COMMAND_NAME_REGEX.is_match(name) {
        eprintln!("[ROUTE] Ignoring route {pattern:?}: invalid command name {name:?}");
        return None;
    }

    let required = segments
        .iter()
        .skip(1)
        .map(|segment| segment.strip_prefix(':').unwrap_or(segment).to_owned())
        .collect::<Vec<_>>();

    let optional = url
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect::<Vec<_>>();

    Some(CompiledRoute {
        pattern: pattern.to_owned(),
        name: name.to_owned(),
        required,
        optional,
    })
}

pub(crate) fn route_url(pattern: &str) -> anyhow::Result<Url> {
    Ok(Url::parse(ROUTE_BASE)?.join(pattern)?)
}

impl CompiledRoute {
    /// Emits the registration descriptor. Required options always precede
    /// optional ones; the registration endpoint rejects any other order.
    pub fn build_command(&self) -> ApiCommand {
        let mut builder = CommandBuilder::new(&self.name, &self.name);

        for param in &self.required {
            builder = builder.add_option(
                CommandOptionBuilder::new(param, param, OPTION_TYPE_STRING).set_required(true),
            );
        }

        for (param, _) in &self.optional {
            builder = builder.add_option(
                CommandOptionBuilder::new(param, param, OPTION_TYPE_STRING).set_required(false),
            );
        }

        builder.build()
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|param| param == name)
    }

    pub fn is_optional(&self, name: &str) -> bool {
        self.optional.iter().any(|(param, _)| param == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_name_only_route() {
        let route = compile("/ping").unwrap();
        assert_eq!(route.name, "ping");
        assert!(route.required.is_empty());
        assert!(route.optional.is_empty());
    }

    #[test]
    fn compiles_required_and_optional_parameters() {
        let route = compile("/greet/:name?title=").unwrap();
        assert_eq!(route.name, "greet");
        assert_eq!(route.required, vec!["name".to_owned()]);
        assert_eq!(route.optional, vec![("title".to_owned(), String::new())]);
    }

    #[test]
    fn preserves_declaration_order() {
        let route = compile("/deploy/:env/:service?branch=main&dry_run=").unwrap();
        assert_eq!(route.required, vec!["env".to_owned(), "service".to_owned()]);
        assert_eq!(
            route.optional,
            vec![
                ("branch".to_owned(), "main".to_owned()),
                ("dry_run".to_owned(), String::new()),
            ]
        );
    }

    #[test]
    fn descriptor_lists_required_before_optional() {
        let command = compile("/deploy/:env/:service?branch=&dry_run=")
            .unwrap()
            .build_command();

        let flags = command
            .options
            .iter()
            .map(|option| (option.name.as_str(), option.required))
            .collect::<Vec<_>>();
        assert_eq!(
            flags,
            vec![
                ("env", true),
                ("service", true),
                ("branch", false),
                ("dry_run", false),
            ]
        );
    }

    #[test]
    fn options_are_string_typed_with_synthesized_descriptions() {
        let command = compile("/echo/:word").unwrap().build_command();
        assert_eq!(command.description, "echo");
        assert_eq!(command.options[0].kind, OPTION_TYPE_STRING);
        assert_eq!(command.options[0].description, "word");
    }

    #[test]
    fn rejects_invalid_command_names() {
        assert!(compile("/bad name").is_none());
        assert!(compile("/sp@ces").is_none());
        assert!(compile("/").is_none());
        assert!(compile(&format!("/{}", "x".repeat(33))).is_none());
    }

    #[test]
    fn accepts_unicode_hyphen_and_underscore_names() {
        assert!(compile("/olá-mundo").is_some());
        assert!(compile("/snake_case").is_some());
        assert!(compile(&format!("/{}", "x".repeat(32))).is_some());
    }
}
