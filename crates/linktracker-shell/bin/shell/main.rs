mod cli;

use crate::cli::{LogFormatArg, CLI};
use anyhow::Context;
use clap::Parser;
use linktracker_service::{BcryptHasher, LinkTracker};
use linktracker_shell::{LinkHandlers, Shell};
use linktracker_storage::InMemoryRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

/*
    Example session:

    CREATE link:example.com password:secret
    REDIRECT id:1 password:secret
    METRICS id:1
    INACTIVATE id:1
*/

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        bcrypt_cost = config.bcrypt_cost,
        log_format = %config.log_format,
        "starting link tracker shell"
    );

    let hasher = BcryptHasher::with_cost(config.bcrypt_cost)?;
    let service = LinkTracker::new(InMemoryRepository::new(), hasher);

    let mut shell = Shell::new(tokio::io::stdin(), tokio::io::stdout());
    LinkHandlers::new(service).register(&mut shell);

    shell.run().await.context("link tracker shell failed")?;
    Ok(())
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}
