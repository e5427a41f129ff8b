mod command;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use command::{audit::AccessAuditObserver, commands::{ActionsCommand, CanCommand, GroupVersionJoinMutator, GvrCommand, GvrValidator, SortCommand, VersionCommand}, CommandExecutor};
use kscope_sdk::command::{CommandContext, CommandDispatcher, CommandHandler, CommandResult, CommandType};

pub use command::commands::{ACTION_PARAM, GROUP_VERSION_PARAM, RESOURCES_PARAM, RESOURCE_PARAM, VERBS_PARAM};

pub struct KscopeRuntimeBuilder {
    executor: CommandExecutor,
}

impl Default for KscopeRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KscopeRuntimeBuilder {
    pub fn new() -> Self {
        let mut executor = CommandExecutor::new();
        executor.register_handler("gvr", Arc::new(GroupVersionJoinMutator));
        executor.register_handler("gvr", Arc::new(GvrValidator));
        executor.register_handler("gvr", Arc::new(GvrCommand));
        executor.register_handler("sort", Arc::new(SortCommand));
        executor.register_handler("can", Arc::new(CanCommand));
        executor.register_handler("can", Arc::new(AccessAuditObserver));
        executor.register_handler("actions", Arc::new(ActionsCommand));
        executor.register_handler("version", Arc::new(VersionCommand));

        Self { executor }
    }

    /// Adds a handler to a command. Internal handlers produce command results
    /// and are reserved for the runtime itself.
    pub fn register_handler(
        &mut self,
        name: &str,
        handler: Arc<dyn CommandHandler>
    ) -> anyhow::Result<&mut Self>
    {
        if handler.get_type() == CommandType::Internal {
            anyhow::bail!("Cannot register internal command handler: {}", name);
        }

        self.executor.register_handler(name, handler);

        Ok(self)
    }

    pub fn build(self) -> KscopeRuntime {
        KscopeRuntime {
            executor: Arc::new(self.executor),
        }
    }
}

pub struct KscopeRuntime {
    executor: Arc<CommandExecutor>,
}

impl KscopeRuntime {
    pub fn command_names(&self) -> Vec<String> {
        self.executor.command_names()
    }

    pub async fn execute(&self, context: &mut CommandContext) -> CommandResult {
        self.executor.dispatch(context).await
    }
}
