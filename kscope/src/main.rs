mod cmd;
mod config;
mod formatter;
mod logging;

use clap::Parser;
use cmd::Cli;
use kscope_runtime::KscopeRuntimeBuilder;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    logging::init(log_level);

    let output = cli.output.unwrap_or(config.output);
    let pretty = cli.pretty || config.pretty;

    let runtime = KscopeRuntimeBuilder::new().build();
    let mut context = cli.command.into_context();

    debug!(command = %context.command_name, activity_id = %context.activity_id, "executing command");

    match runtime.execute(&mut context).await {
        Ok(Some(result)) => formatter::print_output(&result, output, pretty)?,
        Ok(None) => {},
        Err(err) => {
            error!(command = %context.command_name, error = %err, "command failed");
            eprintln!("Error executing command: {:#}", err);
            std::process::exit(1);
        }
    }

    Ok(())
}
