use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use volition::config::GatewayConfig;
use volition::gateway::client::SlackClient;
use volition::gateway::router::build_router;
use volition::gateway::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    info!("Volition agent booting");

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Configuration error: {err}");
            info!(
                "Export the SLACK_* variables (or create a .env file, \
                 see .env.example) before rerunning."
            );
            std::process::exit(1);
        }
    };

    let slack = SlackClient::new(config.bot_token.clone());

    // Best effort: without the bot's identity, mention stripping and
    // self-message suppression fall back to the event authorizations.
    let bot_user_id = match slack.auth_test().await {
        Ok(id) => {
            info!(bot_user_id = %id, "Slack identity resolved");
            Some(id)
        }
        Err(err) => {
            warn!("auth.test failed, continuing without bot identity: {err:#}");
            None
        }
    };

    if let Some(channel) = &config.home_channel {
        let heartbeat =
            "Volition reporting for duty. Mention me or DM to leave an instruction.";
        if let Err(err) = slack.post_message(channel, heartbeat).await {
            warn!("Unable to post startup heartbeat: {err:#}");
        }
    }

    let addr: SocketAddr = config.bind_addr.parse()?;
    let state = AppState::new(&config, slack, bot_user_id);
    let router = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Volition gateway listening");
    axum::serve(listener, router).await?;
    Ok(())
}
