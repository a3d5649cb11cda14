//! # skillcert-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the SkillCert registry.

use std::path::PathBuf;

use clap::Parser;
use skillcert_api::auth::SecretToken;
use skillcert_api::state::{AppConfig, AppState};
use skillcert_core::AccountId;

/// SkillCert registry API server.
///
/// Serves issuer registration, the skill-category taxonomy, the
/// credential lifecycle, holder profiles, and the administrator console.
#[derive(Parser, Debug)]
#[command(name = "skillcert-api", version, about)]
struct Cli {
    /// TCP port to bind.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Ledger principal of the registry administrator.
    #[arg(long)]
    admin_account: String,

    /// Environment variable holding the bearer token. When the variable
    /// is unset, auth is disabled (development mode).
    #[arg(long, default_value = "SKILLCERT_AUTH_TOKEN")]
    auth_token_env: String,

    /// Optional YAML seed file of skill categories to create at startup.
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let admin_account = AccountId::new(cli.admin_account)
        .map_err(|e| anyhow::anyhow!("invalid --admin-account: {e}"))?;

    let auth_token = match std::env::var(&cli.auth_token_env) {
        Ok(token) => Some(SecretToken::new(token)),
        Err(_) => {
            tracing::warn!(
                "{} is unset — serving without authentication",
                cli.auth_token_env
            );
            None
        }
    };

    let config = AppConfig {
        port: cli.port,
        admin_account,
        auth_token,
    };
    let state = AppState::with_config(config);

    if let Some(path) = &cli.seed {
        let seed = skillcert_api::seed::load_seed(path)?;
        skillcert_api::seed::apply_seed(&state, &seed)?;
    }

    let app = skillcert_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cli.port));
    tracing::info!("SkillCert API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
