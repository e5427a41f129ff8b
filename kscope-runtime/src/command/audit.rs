use async_trait::async_trait;
use kscope_sdk::command::{CommandContext, CommandHandler, CommandResult, CommandType, ExecutableCommand};
use tracing::info;

/// Logs the decision the `can` command recorded on the context.
pub struct AccessAuditObserver;

impl CommandHandler for AccessAuditObserver {
    fn get_type(&self) -> CommandType {
        CommandType::Observer
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for AccessAuditObserver {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let Some(decision) = ctx.result.as_ref() else {
            return Ok(None);
        };

        info!(
            activity_id = %ctx.activity_id,
            action = %decision["action"],
            verbs = %decision["verbs"],
            allowed = decision["allowed"].as_bool().unwrap_or(false),
            "capability check"
        );

        Ok(None)
    }
}
