use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kscope_runtime::{ACTION_PARAM, GROUP_VERSION_PARAM, RESOURCES_PARAM, RESOURCE_PARAM, VERBS_PARAM};
use kscope_sdk::command::CommandContext;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "kscope", about = "Kubernetes resource identifier and capability inspector")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print output in pretty (indented) format
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Set the output format (standard, json, yaml), default is standard
    #[arg(long, short = 'o', value_enum)]
    pub output: Option<OutputFormat>,

    /// Log filter, e.g. "info" or "kscope_sdk=debug"
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Configuration file (YAML). Falls back to $KSCOPE_CONFIG
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Standard,
    Json,
    Yaml
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a resource identifier such as apps/v1/deployments or v1/pods:log
    Gvr(GvrArgs),

    /// Sort resource identifiers by API group in natural order
    Sort(SortArgs),

    /// Check whether the granted verbs allow an action
    Can(CanArgs),

    /// List the known actions and the verbs that grant them
    Actions,

    Version,
}

#[derive(Args, Debug)]
pub struct GvrArgs {
    /// Resource identifier, or a bare resource name when --group-version is set
    #[arg()]
    pub resource: String,

    /// Group/version to prefix the resource with (e.g. apps/v1)
    #[arg(long = "group-version", short = 'g', value_name = "GROUP_VERSION")]
    pub group_version: Option<String>,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Resource identifiers to sort
    #[arg(required = true)]
    pub resources: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CanArgs {
    /// Action to check (describe, view, delete, edit)
    #[arg()]
    pub action: String,

    /// Granted verbs, repeated or comma separated
    #[arg(long = "verb", value_name = "VERB", value_delimiter = ',', num_args = 0..)]
    pub verbs: Vec<String>,
}

impl Command {
    pub fn into_context(self) -> CommandContext {
        match self {
            Command::Gvr(args) => {
                let mut context = CommandContext::new("gvr")
                    .with_param(RESOURCE_PARAM, serde_json::json!(args.resource));

                if let Some(group_version) = args.group_version {
                    context = context.with_param(GROUP_VERSION_PARAM, serde_json::json!(group_version));
                }

                context
            },
            Command::Sort(args) => CommandContext::new("sort")
                .with_param(RESOURCES_PARAM, serde_json::json!(args.resources)),
            Command::Can(args) => CommandContext::new("can")
                .with_param(ACTION_PARAM, serde_json::json!(args.action))
                .with_param(VERBS_PARAM, serde_json::json!(args.verbs)),
            Command::Actions => CommandContext::new("actions"),
            Command::Version => CommandContext::new("version"),
        }
    }
}
