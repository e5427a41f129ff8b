use anyhow::Context;
use async_trait::async_trait;
use kscope_sdk::{
    access,
    command::{CommandContext, CommandHandler, CommandResult, CommandType, ExecutableCommand, MutationCommand, ValidationCommand},
    model::{join_path, Gvr, Gvrs},
};
use serde_json::{json, Value};

pub const RESOURCE_PARAM: &str = "resource";
pub const GROUP_VERSION_PARAM: &str = "groupVersion";
pub const RESOURCES_PARAM: &str = "resources";
pub const ACTION_PARAM: &str = "action";
pub const VERBS_PARAM: &str = "verbs";

fn describe_gvr(gvr: &Gvr) -> Value {
    json!({
        "raw": gvr.to_string(),
        "group": gvr.to_g(),
        "version": gvr.to_v(),
        "resource": gvr.to_r(),
        "subResource": gvr.sub_resource(),
        "resourceName": gvr.as_resource_name(),
        "groupVersion": gvr.as_gv().api_version(),
    })
}

/// Folds a `groupVersion` parameter into the `resource` parameter.
pub struct GroupVersionJoinMutator;

/// Rejects `gvr` requests whose resource does not parse.
pub struct GvrValidator;

pub struct GvrCommand;
pub struct SortCommand;
pub struct CanCommand;
pub struct ActionsCommand;
pub struct VersionCommand;

impl CommandHandler for GroupVersionJoinMutator {
    fn get_type(&self) -> CommandType {
        CommandType::Mutator
    }

    fn as_mutator(&self) -> Option<&dyn MutationCommand> {
        Some(self)
    }
}

#[async_trait]
impl MutationCommand for GroupVersionJoinMutator {
    async fn mutate(&self, ctx: &mut CommandContext) -> CommandResult {
        if !ctx.parameters.contains_key(GROUP_VERSION_PARAM) {
            return Ok(None);
        }

        let group_version = ctx.get_string_param(GROUP_VERSION_PARAM)?;
        let resource = ctx.get_string_param(RESOURCE_PARAM)?;

        ctx.parameters.remove(GROUP_VERSION_PARAM);
        ctx.parameters.insert(
            RESOURCE_PARAM.to_string(),
            json!(join_path(&[group_version.as_str(), resource.as_str()])),
        );

        Ok(None)
    }
}

impl CommandHandler for GvrValidator {
    fn get_type(&self) -> CommandType {
        CommandType::Validator
    }

    fn as_validator(&self) -> Option<&dyn ValidationCommand> {
        Some(self)
    }
}

#[async_trait]
impl ValidationCommand for GvrValidator {
    async fn validate(&self, ctx: &CommandContext) -> CommandResult {
        let resource = ctx.get_string_param(RESOURCE_PARAM)?;

        Gvr::new(&resource)
            .with_context(|| format!("Invalid resource: {}", resource))?;

        Ok(None)
    }
}

impl CommandHandler for GvrCommand {
    fn get_type(&self) -> CommandType {
        CommandType::Internal
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for GvrCommand {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let resource = ctx.get_string_param(RESOURCE_PARAM)?;

        let gvr = Gvr::new(&resource)
            .with_context(|| format!("Invalid resource: {}", resource))?;

        Ok(Some(describe_gvr(&gvr)))
    }
}

impl CommandHandler for SortCommand {
    fn get_type(&self) -> CommandType {
        CommandType::Internal
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for SortCommand {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let resources = ctx.get_string_list_param(RESOURCES_PARAM)?;

        let mut gvrs = resources
            .iter()
            .map(|resource| {
                Gvr::new(resource).with_context(|| format!("Invalid resource: {}", resource))
            })
            .collect::<anyhow::Result<Gvrs>>()?;

        gvrs.sort();

        Ok(Some(serde_json::to_value(&gvrs)?))
    }
}

impl CommandHandler for CanCommand {
    fn get_type(&self) -> CommandType {
        CommandType::Internal
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for CanCommand {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        let action = ctx.get_string_param(ACTION_PARAM)?;

        // no verbs means nothing is granted
        let verbs = if ctx.parameters.contains_key(VERBS_PARAM) {
            ctx.get_string_list_param(VERBS_PARAM)?
        } else {
            Vec::new()
        };

        let allowed = access::can(&verbs, &action);

        Ok(Some(json!({
            "action": action,
            "verbs": verbs,
            "allowed": allowed,
        })))
    }
}

impl CommandHandler for ActionsCommand {
    fn get_type(&self) -> CommandType {
        CommandType::Internal
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for ActionsCommand {
    async fn execute(&self, _: &CommandContext) -> CommandResult {
        let mut table = serde_json::Map::new();

        for action in access::actions() {
            let verbs = access::map_verb(action)?;
            table.insert(action.to_string(), json!(verbs));
        }

        Ok(Some(Value::Object(table)))
    }
}

impl CommandHandler for VersionCommand {
    fn get_type(&self) -> CommandType {
        CommandType::Internal
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for VersionCommand {
    async fn execute(&self, _: &CommandContext) -> CommandResult {
        Ok(Some(serde_json::json!({
            "version": crate::command::version::get_version_string(),
        })))
    }
}
