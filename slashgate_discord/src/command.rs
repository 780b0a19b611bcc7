use serde::Serialize;

pub const COMMAND_TYPE_CHAT_INPUT: u8 = 1;
pub const OPTION_TYPE_STRING: u8 = 3;

/// A command descriptor in the shape the registration endpoint accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCommand {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub options: Vec<ApiCommandOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCommandOption {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandBuilder {
    pub command: ApiCommand,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: ApiCommand {
                name: name.into(),
                description: description.into(),
                kind: COMMAND_TYPE_CHAT_INPUT,
                options: vec![],
            },
        }
    }

    pub fn add_option(mut self, option: CommandOptionBuilder) -> Self {
        self.command.options.push(option.build());
        self
    }

    pub fn set_options(mut self, options: Vec<ApiCommandOption>) -> Self {
        self.command.options = options;
        self
    }

    pub fn build(self) -> ApiCommand {
        self.command
    }
}

pub struct CommandOptionBuilder {
    option: ApiCommandOption,
}

impl CommandOptionBuilder {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: u8) -> Self {
        Self {
            option: ApiCommandOption {
                name: name.into(),
                description: description.into(),
                kind,
                required: false,
            },
        }
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.option.required = required;
        self
    }

    pub fn build(self) -> ApiCommandOption {
        self.option
    }
}
