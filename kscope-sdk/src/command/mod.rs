use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandContext {
    pub command_name: String,
    pub parameters: HashMap<String, serde_json::Value>,
    pub activity_id: Uuid,

    /// Result of the Internal handler, set by the dispatcher so later handlers
    /// can see what was decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    #[serde(skip)]
    pub cancellation_token: CancellationToken,
}

impl CommandContext {
    pub fn new(command_name: &str) -> Self {
        Self {
            command_name: command_name.to_string(),
            parameters: HashMap::new(),
            activity_id: Uuid::new_v4(),
            result: None,
            cancellation_token: CancellationToken::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: serde_json::Value) -> Self {
        self.parameters.insert(name.to_string(), value);
        self
    }

    pub fn get_string_param(&self, name: &str) -> anyhow::Result<String> {
        self.parameters.get(name)
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {}", name))?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("Invalid type for parameter '{}'; expected string", name))
    }

    /// Returns the parameter as a list of strings. A single string is treated
    /// as a one element list.
    pub fn get_string_list_param(&self, name: &str) -> anyhow::Result<Vec<String>> {
        let value = self.parameters.get(name)
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {}", name))?;

        match value {
            serde_json::Value::String(s) => Ok(vec![s.clone()]),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| anyhow::anyhow!("Invalid item in parameter '{}'; expected string", name))
                })
                .collect(),
            _ => Err(anyhow::anyhow!("Invalid type for parameter '{}'; expected list of strings", name)),
        }
    }

    pub fn get_param(&self, name: &str) -> anyhow::Result<String> {
        let parameter = self.parameters.get(name)
            .ok_or_else(|| anyhow::anyhow!("Missing required parameter: {}", name))?;

        Ok(serde_json::to_string(parameter)?)
    }
}

pub type CommandResult = anyhow::Result<Option<serde_json::Value>>;

#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    async fn dispatch(&self, ctx: &mut CommandContext) -> CommandResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Mutator commands rewrite the context before anything else looks at it.
    /// They are executed first in the command pipeline.
    Mutator,

    /// Validator commands reject contexts that cannot be executed.
    /// They are executed after mutator commands and before internal commands.
    Validator,

    /// Internal commands produce the command result.
    /// They are executed after validator commands and before observer commands.
    Internal,

    /// Observer commands are used for observing the state of the system.
    /// They are executed last in the command pipeline.
    Observer,
}

impl CommandType {
    pub fn priority(&self) -> u8 {
        match self {
            CommandType::Mutator => 0,
            CommandType::Validator => 1,
            CommandType::Internal => 2,
            CommandType::Observer => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Mutator => "mutator",
            CommandType::Validator => "validator",
            CommandType::Internal => "internal",
            CommandType::Observer => "observer",
        }
    }
}

#[async_trait]
pub trait ValidationCommand: Send + Sync {
    async fn validate(&self, ctx: &CommandContext) -> CommandResult;
}

#[async_trait]
pub trait MutationCommand: Send + Sync {
    async fn mutate(&self, ctx: &mut CommandContext) -> CommandResult;
}

#[async_trait]
pub trait ExecutableCommand: Send + Sync {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult;
}

pub trait CommandHandler: Send + Sync {
    fn get_type(&self) -> CommandType;

    fn as_validator(&self) -> Option<&dyn ValidationCommand> {
        None
    }

    fn as_mutator(&self) -> Option<&dyn MutationCommand> {
        None
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        None
    }
}
