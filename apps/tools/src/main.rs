use std::time::Duration;

use actions::custom_id;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polls_api::{PollsApiClient, PollsApiConfig, DEFAULT_BASE_URL};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "POLLS_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreatePoll {
        #[arg(long)]
        question: String,
        #[arg(long = "option", required = true)]
        options: Vec<String>,
    },
    GetPoll {
        id: String,
    },
    DecodeCustomId {
        raw: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::CreatePoll { question, options } => {
            let client = polls_client(&cli.base_url, &cli.api_key, cli.timeout_secs)?;
            let poll = client
                .create_poll(&question, &options)
                .await
                .context("failed to create poll")?;
            info!(poll_id = %poll.id, "created poll");
            println!("{}", serde_json::to_string_pretty(&poll)?);
        }
        Command::GetPoll { id } => {
            let client = polls_client(&cli.base_url, &cli.api_key, cli.timeout_secs)?;
            let poll = client
                .get_poll(&id)
                .await
                .with_context(|| format!("failed to fetch poll {id}"))?;
            println!("{}", serde_json::to_string_pretty(&poll)?);
        }
        Command::DecodeCustomId { raw } => {
            let id = custom_id::decode(&raw)?;
            println!(
                "namespace={} kind={} discriminator={}",
                id.namespace, id.kind, id.discriminator
            );
        }
    }

    Ok(())
}

fn polls_client(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<PollsApiClient> {
    anyhow::ensure!(
        !api_key.is_empty(),
        "an api key is required (--api-key or POLLS_API_KEY)"
    );
    let mut config = PollsApiConfig::with_base_url(base_url, api_key)?;
    config.timeout = Duration::from_secs(timeout_secs);
    Ok(PollsApiClient::new(config)?)
}
