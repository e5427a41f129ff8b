pub mod commands;
pub mod audit;
mod version;

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use kscope_sdk::command::{CommandContext, CommandDispatcher, CommandHandler, CommandResult, CommandType};
use tracing::debug;

#[derive(Default)]
pub struct CommandExecutor {
    handlers: HashMap<String, Vec<Arc<dyn CommandHandler>>>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn register_handler(
        &mut self,
        name: &str,
        handler: Arc<dyn CommandHandler>,
    ) {
        self.handlers.entry(name.to_string()).or_default().push(handler);
    }

    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    async fn execute_handler(
        &self,
        ctx: &mut CommandContext,
        handler: &Arc<dyn CommandHandler>,
    ) -> CommandResult {
        if let Some(validator) = handler.as_validator() {
            validator.validate(ctx).await?;

            return Ok(None);
        }

        if let Some(mutator) = handler.as_mutator() {
            mutator.mutate(ctx).await?;

            return Ok(None);
        }

        if let Some(executable) = handler.as_executable() {
            return executable.execute(ctx).await;
        }

        Err(anyhow::Error::new(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Handler does not implement any command type: {}", handler.get_type().as_str()),
        )))
    }
}

#[async_trait]
impl CommandDispatcher for CommandExecutor {
    async fn dispatch(&self, ctx: &mut CommandContext) -> CommandResult {
        let Some(handlers) = self.handlers.get(&ctx.command_name) else {
            return Err(anyhow::Error::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Command handler not found for: {}", ctx.command_name),
            )));
        };

        ctx.result = None;

        let mut sorted_handlers = handlers.clone();

        // stable, so handlers of the same type run in registration order
        sorted_handlers.sort_by_key(|handler| handler.get_type().priority());

        for handler in sorted_handlers {
            if ctx.cancellation_token.is_cancelled() {
                return Err(anyhow::Error::new(std::io::Error::new(
                    std::io::ErrorKind::Interrupted,
                    format!("Command cancelled: {}", ctx.command_name),
                )));
            }

            debug!(
                command = %ctx.command_name,
                activity_id = %ctx.activity_id,
                handler_type = handler.get_type().as_str(),
                "running command handler"
            );

            let result = self.execute_handler(ctx, &handler).await?;

            // Take the first non-None result for internal commands, everything else should
            // simply be ignored
            if ctx.result.is_none() && handler.get_type() == CommandType::Internal {
                ctx.result = result;
            }
        }

        Ok(ctx.result.clone())
    }
}
