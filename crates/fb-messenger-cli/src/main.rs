//! fbm: Facebook Messenger Platform command line client
//!
//! Usage:
//!   fbm subscribe                   - Subscribe the app to page webhooks
//!   fbm unsubscribe                 - Unsubscribe the app from page webhooks
//!   fbm send <recipient-id> <text>  - Send a text message
//!   fbm --help                      - Show help

mod cli;

use cli::Command;
use fb_messenger::{MessengerClient, MessengerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            cli::print_help();
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => {
            cli::print_help();
            return Ok(());
        }
        Command::Version => {
            println!("fbm {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = MessengerConfig::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    let access_token = config.require_access_token()?.to_string();

    tracing::debug!("Graph API base URL: {}", config.base_url);

    let client = MessengerClient::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create Messenger client: {}", e))?;

    match command {
        Command::Subscribe => {
            client.subscriptions().subscribe(&access_token).await?;
            println!("subscribed");
        }
        Command::Unsubscribe => {
            client.subscriptions().unsubscribe(&access_token).await?;
            println!("unsubscribed");
        }
        Command::Send { recipient_id, text } => {
            let message_id = client
                .bot()
                .send_text(&access_token, &recipient_id, &text)
                .await?;
            println!("{}", message_id);
        }
        Command::Help | Command::Version => {}
    }

    Ok(())
}
