/*
[INPUT]:  CLI arguments, credential configuration, OVH API responses
[OUTPUT]: Pretty-printed JSON results on stdout, logs on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use ovh_api_adapter::ApiMethod;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ovh_api_cli::commands;
use ovh_api_cli::config::{CliConfig, default_config_path};

#[derive(Parser, Debug)]
#[command(name = "ovh-api-cli", version, about = "Signed calls to the OVH API")]
struct Cli {
    /// Credential file (defaults to <config dir>/ovh-api/config.yaml)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Api(ApiCommand),
    /// Interactively write a credential file
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Subcommands that talk to the API
#[derive(Subcommand, Debug)]
enum ApiCommand {
    /// Signed GET
    Get { path: String },
    /// Signed POST with an optional JSON body
    Post {
        path: String,
        #[arg(long)]
        body: Option<String>,
    },
    /// Signed PUT with an optional JSON body
    Put {
        path: String,
        #[arg(long)]
        body: Option<String>,
    },
    /// Signed DELETE
    Delete { path: String },
    /// Show the offset between the local and the API clock
    Time,
    /// Request a consumer key and print its validation URL
    RequestCredentials {
        /// Page the user lands on once the key is validated
        #[arg(long)]
        redirection: String,
        /// Request GET rights only
        #[arg(long)]
        read_only: bool,
        #[arg(long, default_value = "/*")]
        rule_path: String,
        /// Store the new consumer key in the credential file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        config_path,
        log_level,
        command,
    } = Cli::parse();
    init_tracing(&log_level)?;

    match command {
        Command::Init { output } => {
            let output = resolve_path(output.or(config_path))?;
            cli::init::run_init(&output)
        }
        Command::Api(command) => run_api_command(command, config_path).await,
    }
}

async fn run_api_command(command: ApiCommand, config_path: Option<PathBuf>) -> Result<()> {
    let config = CliConfig::load(config_path.as_deref())?;
    info!(endpoint = %config.endpoint, "configuration loaded");
    let client = config.build_client()?;

    let output = match command {
        ApiCommand::Get { path } => commands::call(&client, ApiMethod::Get, &path, None).await?,
        ApiCommand::Post { path, body } => {
            let body = commands::parse_body(body.as_deref())?;
            commands::call(&client, ApiMethod::Post, &path, body.as_ref()).await?
        }
        ApiCommand::Put { path, body } => {
            let body = commands::parse_body(body.as_deref())?;
            commands::call(&client, ApiMethod::Put, &path, body.as_ref()).await?
        }
        ApiCommand::Delete { path } => {
            commands::call(&client, ApiMethod::Delete, &path, None).await?
        }
        ApiCommand::Time => commands::clock_delta(&client).await?,
        ApiCommand::RequestCredentials {
            redirection,
            read_only,
            rule_path,
            save,
        } => {
            let rules = commands::access_rules(read_only, &rule_path);
            let grant = commands::request_credentials(&client, &rules, &redirection).await?;

            // Grant goes to stdout before the save is attempted
            print_json(&json!({
                "consumerKey": grant.consumer_key,
                "validationUrl": grant.validation_url,
            }))?;

            if save {
                let path = resolve_path(config_path)?;
                CliConfig::store_consumer_key(&path, &config, &grant.consumer_key)
                    .with_context(|| format!("consumer key not saved to {}", path.display()))?;
                info!(path = %path.display(), "consumer key saved");
            }
            return Ok(());
        }
    };

    print_json(&output)
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render output")?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(default_config_path)
        .context("no --config given and no user config directory available")
}
