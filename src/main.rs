use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use qsofa_core::CoreConfig;
use qsofa_core::config::{history_policy_from_env_value, import_policy_from_env_value};

/// Main entry point for the qSOFA dashboard service
///
/// Serves the REST API (and Swagger UI) that the browser dashboard renders from. The session
/// starts with the built-in sample patients loaded.
///
/// # Environment Variables
/// - `QSOFA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `QSOFA_IMPORT_POLICY`: `fail-whole` (default) or `skip-invalid`
/// - `QSOFA_HISTORY_POLICY`: `normalise` (default) or `preserve`
/// - `RUST_LOG`: tracing filter
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid, or startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qsofa_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("qsofa_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("QSOFA_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let import_policy = import_policy_from_env_value(std::env::var("QSOFA_IMPORT_POLICY").ok())?;
    let history_policy =
        history_policy_from_env_value(std::env::var("QSOFA_HISTORY_POLICY").ok())?;
    let cfg = CoreConfig::new(import_policy, history_policy);

    tracing::info!("++ Starting qSOFA dashboard REST on {}", rest_addr);
    tracing::info!(
        "++ Import policy {:?}, history policy {:?}",
        cfg.import_policy(),
        cfg.history_policy()
    );

    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
