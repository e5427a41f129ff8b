use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kscope_sdk::command::{CommandContext, CommandHandler, CommandResult, CommandType, ExecutableCommand, ValidationCommand};
use serde_json::{json, Value};

use crate::{KscopeRuntime, KscopeRuntimeBuilder};

fn runtime() -> KscopeRuntime {
    KscopeRuntimeBuilder::new().build()
}

fn io_error_kind(err: &anyhow::Error) -> Option<std::io::ErrorKind> {
    err.downcast_ref::<std::io::Error>().map(|e| e.kind())
}

#[tokio::test]
async fn test_gvr_command_describes_identifier() {
    let mut ctx = CommandContext::new("gvr")
        .with_param("resource", json!("apps/v1/deployments:scale"));

    let result = runtime().execute(&mut ctx).await.unwrap();

    assert_eq!(result, Some(json!({
        "raw": "apps/v1/deployments:scale",
        "group": "apps",
        "version": "v1",
        "resource": "deployments",
        "subResource": "scale",
        "resourceName": "deployments.v1.apps",
        "groupVersion": "apps/v1",
    })));
}

#[tokio::test]
async fn test_gvr_command_joins_group_version() {
    let mut ctx = CommandContext::new("gvr")
        .with_param("groupVersion", json!("v1"))
        .with_param("resource", json!("pods"));

    let result = runtime().execute(&mut ctx).await.unwrap().unwrap();

    assert_eq!(result["raw"], json!("v1/pods"));
    assert_eq!(result["group"], json!(""));
    assert_eq!(result["groupVersion"], json!("v1"));
    assert!(!ctx.parameters.contains_key("groupVersion"));
    assert_eq!(ctx.parameters["resource"], json!("v1/pods"));
}

#[tokio::test]
async fn test_gvr_command_rejects_malformed_resource() {
    let mut ctx = CommandContext::new("gvr")
        .with_param("resource", json!("a/b/c/d"));

    let err = runtime().execute(&mut ctx).await.unwrap_err();

    assert!(err.to_string().contains("Invalid resource: a/b/c/d"));
}

#[tokio::test]
async fn test_gvr_command_requires_resource() {
    let mut ctx = CommandContext::new("gvr");

    let err = runtime().execute(&mut ctx).await.unwrap_err();

    assert!(err.to_string().contains("Missing required parameter: resource"));
}

#[tokio::test]
async fn test_sort_command_orders_groups_naturally() {
    let mut ctx = CommandContext::new("sort")
        .with_param("resources", json!(["group10/v1/a", "group2/v1/b", "group1/v1/c", "v1/pods"]));

    let result = runtime().execute(&mut ctx).await.unwrap();

    assert_eq!(result, Some(json!(["v1/pods", "group1/v1/c", "group2/v1/b", "group10/v1/a"])));
}

#[tokio::test]
async fn test_sort_command_fails_on_malformed_entry() {
    let mut ctx = CommandContext::new("sort")
        .with_param("resources", json!(["v1/pods", "w/x/y/z"]));

    assert!(runtime().execute(&mut ctx).await.is_err());
}

#[tokio::test]
async fn test_can_command() {
    let cases = [
        ("view", json!(["get"]), true),
        ("view", json!(["list"]), true),
        ("view", json!(["watch"]), false),
        ("edit", json!(["patch"]), true),
        ("edit", json!(["create"]), false),
        ("unknown-action", json!(["get"]), false),
    ];

    for (action, verbs, expected) in cases {
        let mut ctx = CommandContext::new("can")
            .with_param("action", json!(action))
            .with_param("verbs", verbs.clone());

        let result = runtime().execute(&mut ctx).await.unwrap();

        assert_eq!(
            result,
            Some(json!({ "action": action, "verbs": verbs, "allowed": expected })),
            "action {}",
            action
        );
    }
}

#[tokio::test]
async fn test_can_command_without_verbs_is_denied() {
    let mut ctx = CommandContext::new("can")
        .with_param("action", json!("describe"));

    let result = runtime().execute(&mut ctx).await.unwrap().unwrap();

    assert_eq!(result["allowed"], json!(false));
}

#[tokio::test]
async fn test_actions_command_lists_table() {
    let mut ctx = CommandContext::new("actions");

    let result = runtime().execute(&mut ctx).await.unwrap();

    assert_eq!(result, Some(json!({
        "describe": ["get"],
        "view": ["get", "list"],
        "delete": ["delete"],
        "edit": ["patch", "update"],
    })));
}

#[tokio::test]
async fn test_version_command() {
    let mut ctx = CommandContext::new("version");

    let result = runtime().execute(&mut ctx).await.unwrap().unwrap();

    assert!(result["version"].as_str().unwrap().starts_with("kscope-runtime v"));
}

#[tokio::test]
async fn test_unknown_command_is_not_found() {
    let mut ctx = CommandContext::new("apply");

    let err = runtime().execute(&mut ctx).await.unwrap_err();

    assert_eq!(io_error_kind(&err), Some(std::io::ErrorKind::NotFound));
}

#[tokio::test]
async fn test_cancelled_context_is_interrupted() {
    let mut ctx = CommandContext::new("actions");
    ctx.cancellation_token.cancel();

    let err = runtime().execute(&mut ctx).await.unwrap_err();

    assert_eq!(io_error_kind(&err), Some(std::io::ErrorKind::Interrupted));
}

#[test]
fn test_command_names() {
    assert_eq!(
        runtime().command_names(),
        vec!["actions", "can", "gvr", "sort", "version"]
    );
}

struct CoreGroupOnly;

impl CommandHandler for CoreGroupOnly {
    fn get_type(&self) -> CommandType {
        CommandType::Validator
    }

    fn as_validator(&self) -> Option<&dyn ValidationCommand> {
        Some(self)
    }
}

#[async_trait]
impl ValidationCommand for CoreGroupOnly {
    async fn validate(&self, ctx: &CommandContext) -> CommandResult {
        let resource = ctx.get_string_param("resource")?;

        if resource.matches('/').count() > 1 {
            anyhow::bail!("only core group resources are allowed: {}", resource);
        }

        Ok(None)
    }
}

struct ShadowGvr;

impl CommandHandler for ShadowGvr {
    fn get_type(&self) -> CommandType {
        CommandType::Internal
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for ShadowGvr {
    async fn execute(&self, _: &CommandContext) -> CommandResult {
        Ok(Some(json!("shadowed")))
    }
}

#[tokio::test]
async fn test_registered_validator_runs_before_execution() {
    let mut builder = KscopeRuntimeBuilder::new();
    builder.register_handler("gvr", Arc::new(CoreGroupOnly)).unwrap();
    let runtime = builder.build();

    let mut allowed = CommandContext::new("gvr")
        .with_param("resource", json!("v1/pods"));
    assert!(runtime.execute(&mut allowed).await.unwrap().is_some());

    let mut rejected = CommandContext::new("gvr")
        .with_param("resource", json!("apps/v1/deployments"));
    let err = runtime.execute(&mut rejected).await.unwrap_err();
    assert!(err.to_string().contains("only core group resources are allowed"));
}

#[test]
fn test_internal_handlers_cannot_be_registered() {
    let mut builder = KscopeRuntimeBuilder::new();

    let err = builder.register_handler("gvr", Arc::new(ShadowGvr)).err().unwrap();

    assert!(err.to_string().contains("Cannot register internal command handler: gvr"));
}

#[tokio::test]
async fn test_internal_result_is_recorded_on_context() {
    let mut ctx = CommandContext::new("can")
        .with_param("action", json!("view"))
        .with_param("verbs", json!(["list"]));

    let result = runtime().execute(&mut ctx).await.unwrap();

    assert_eq!(ctx.result, result);
    assert_eq!(ctx.result.unwrap()["allowed"], json!(true));
}

#[tokio::test]
async fn test_stale_result_is_cleared_before_dispatch() {
    let mut ctx = CommandContext::new("actions");
    ctx.result = Some(json!("stale"));

    let result = runtime().execute(&mut ctx).await.unwrap().unwrap();

    assert_eq!(result["view"], json!(["get", "list"]));
}

struct DecisionRecorder {
    seen: Arc<Mutex<Option<Value>>>,
}

impl CommandHandler for DecisionRecorder {
    fn get_type(&self) -> CommandType {
        CommandType::Observer
    }

    fn as_executable(&self) -> Option<&dyn ExecutableCommand> {
        Some(self)
    }
}

#[async_trait]
impl ExecutableCommand for DecisionRecorder {
    async fn execute(&self, ctx: &CommandContext) -> CommandResult {
        *self.seen.lock().unwrap() = ctx.result.clone();

        Ok(None)
    }
}

#[tokio::test]
async fn test_observers_see_internal_decision() {
    let seen = Arc::new(Mutex::new(None));
    let mut builder = KscopeRuntimeBuilder::new();
    builder.register_handler("can", Arc::new(DecisionRecorder { seen: seen.clone() })).unwrap();
    let runtime = builder.build();

    let mut ctx = CommandContext::new("can")
        .with_param("action", json!("edit"))
        .with_param("verbs", json!(["create"]));

    let result = runtime.execute(&mut ctx).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), result);
    assert_eq!(result.unwrap()["allowed"], json!(false));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_audit_logs_recorded_decision() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut ctx = CommandContext::new("can")
        .with_param("action", json!("unknown-action"))
        .with_param("verbs", json!(["get"]));

    runtime().execute(&mut ctx).await.unwrap();

    let contents = logs.contents();
    assert_eq!(contents.matches("verb mapping failed").count(), 1, "logs: {}", contents);
    assert_eq!(contents.matches("capability check").count(), 1, "logs: {}", contents);
    assert!(contents.contains("allowed=false"), "logs: {}", contents);
}
