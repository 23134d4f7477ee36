//! `bcl`: runs BCL operations over batches of parameter bags.
//!
//! Items are read as JSON (an array of objects, or a single object) from a file or stdin.
//! Result records are written to stdout as a JSON array; logs go to stderr.
//!
//! ```text
//! export BCL_API_TOKEN=...
//! echo '{"options": {"status": "active"}}' | bcl run --resource form --operation list
//! bcl check
//! ```

#![allow(clippy::multiple_crate_versions, reason = "transitive dependencies from reqwest")]

mod observability;

use std::{path::PathBuf, process::ExitCode};

use bcl_bridge::{
    BatchRunner, BclConfig, BridgeError, OperationSelector, ParameterBag, ResultRecord,
    transport::HttpTransport,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

use crate::observability::{HealthCheck, HealthReport, HealthStatus, LogFormat, init_observability};

#[derive(Debug, Parser)]
#[command(name = "bcl", version, about = "BCL payment, form and coupon API client")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API token; overrides the configured token variable.
    #[arg(long, env = "BCL_API_TOKEN", global = true, hide_env_values = true)]
    api_token: Option<String>,

    /// API base URL; overrides the configuration file.
    #[arg(long, env = "BCL_BASE_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one operation for every item.
    Run {
        /// Resource: paymentLink, form or coupon.
        #[arg(long)]
        resource: String,

        /// Operation name, e.g. list or updateStatus.
        #[arg(long)]
        operation: String,

        /// JSON items file, or `-` for stdin.
        #[arg(long, default_value = "-")]
        items: String,

        /// Record per-item failures instead of stopping at the first one.
        #[arg(long)]
        continue_on_fail: bool,
    },
    /// Verify the API token against the self-test endpoint.
    Check,
}

/// Failures that end the process.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("Invalid items input: {0}")]
    Input(String),

    #[error("Cannot write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_observability(LogFormat::from_env());
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "bcl failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<ExitCode, CliError> {
    let config = load_config(&cli)?;
    let credentials = config.credentials(cli.api_token.as_deref())?;
    let transport = HttpTransport::with_config(&config.http)?;
    info!(
        base_url = credentials.base_url(),
        protocol = transport.protocol_name(),
        "client ready"
    );

    match cli.command {
        Command::Run { resource, operation, items, continue_on_fail } => {
            let selector = OperationSelector::parse(&resource, &operation)?;
            let items = parse_items(&read_items(&items).await?)?;
            let runner = BatchRunner::new(transport, credentials)
                .continue_on_fail(continue_on_fail || config.continue_on_fail);

            match runner.run(&selector, &items).await {
                Ok(records) => {
                    print_records(&records)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(BridgeError::BatchAborted { item_index, status_code, message, completed }) => {
                    print_records(&completed)?;
                    error!(item_index, status_code, "batch aborted");
                    eprintln!("BCL API Error [{status_code}]: {message}");
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
        Command::Check => {
            let runner = BatchRunner::new(transport, credentials);
            let check = match runner.verify_credentials().await {
                Ok(_) => HealthCheck::pass("credentials", "API token accepted"),
                Err(failure) => {
                    HealthCheck::fail("credentials", failure.message, failure.status_code)
                }
            };
            let report = HealthReport::new(runner.credentials().base_url(), vec![check]);
            println!("{}", report.to_json()?);

            Ok(match report.status() {
                HealthStatus::Healthy => ExitCode::SUCCESS,
                HealthStatus::Unhealthy => ExitCode::FAILURE,
            })
        }
    }
}

fn load_config(cli: &Cli) -> Result<BclConfig, BridgeError> {
    let mut config = match &cli.config {
        Some(path) => BclConfig::from_file(path)?,
        None => BclConfig::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
        config.validate()?;
    }
    Ok(config)
}

async fn read_items(source: &str) -> Result<String, CliError> {
    let mut contents = String::new();
    if source == "-" {
        tokio::io::stdin()
            .read_to_string(&mut contents)
            .await
            .map_err(|e| CliError::Input(format!("cannot read stdin: {e}")))?;
    } else {
        contents = tokio::fs::read_to_string(source)
            .await
            .map_err(|e| CliError::Input(format!("cannot read {source}: {e}")))?;
    }
    Ok(contents)
}

/// Accepts an array of objects or a single object. Blank input is an empty batch.
fn parse_items(input: &str) -> Result<Vec<ParameterBag>, CliError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str(input).map_err(|e| CliError::Input(e.to_string()))? {
        Value::Object(item) => Ok(vec![item]),
        Value::Array(values) => values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(item) => Ok(item),
                _ => Err(CliError::Input(format!("item {index} is not a JSON object"))),
            })
            .collect(),
        _ => Err(CliError::Input("expected a JSON object or an array of objects".to_owned())),
    }
}

fn print_records(records: &[ResultRecord]) -> Result<(), CliError> {
    let output: Vec<Value> = records.iter().map(ResultRecord::json).collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
