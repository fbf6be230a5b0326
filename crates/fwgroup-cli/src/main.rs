use anyhow::Context;
use clap::Parser;

use fwgroup_cli::{
    Cli, Settings, commands,
    logging::{LoggingConfig, init_logging},
};
use fwgroup_client::GroupMembershipClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?
        .with_cli(&cli);

    let _logging_guard = init_logging(&LoggingConfig::from_settings(&settings))
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    settings.validate()?;

    tracing::debug!(
        changedesk_host = %settings.changedesk_host,
        inventory_host = %settings.inventory_host,
        "Creating client connection"
    );
    let client = GroupMembershipClient::with_config(settings.client_config())?;

    let output = commands::run(cli.command, &client).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
