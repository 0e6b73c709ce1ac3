use airtable_oauth_client::application::{
    ports::{
        EntropySource, correlation::CorrelationStore, request_state::RequestStateTracker,
        time::Clock, token_endpoint::TokenEndpoint,
    },
    services::ApplicationServices,
};
use airtable_oauth_client::config::AppConfig;
use airtable_oauth_client::infrastructure::{
    provider::token_client::ReqwestTokenEndpoint,
    security::{
        correlation_store::{InMemoryCorrelationStore, spawn_expiry_sweeper},
        entropy::OsEntropySource,
    },
    state::request_state::InMemoryRequestStateTracker,
    time::SystemClock,
};
use airtable_oauth_client::presentation::http::{
    routes::build_router_with_rate_limiter, state::HttpState,
};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let entropy: Arc<dyn EntropySource> = Arc::new(OsEntropySource);
    let correlation_store: Arc<dyn CorrelationStore> =
        Arc::new(InMemoryCorrelationStore::new(Arc::clone(&clock)));
    let request_state: Arc<dyn RequestStateTracker> = Arc::new(InMemoryRequestStateTracker::new());
    let token_endpoint: Arc<dyn TokenEndpoint> = Arc::new(ReqwestTokenEndpoint::new(
        config.airtable_url(),
        config.client_id(),
        config.client_secret(),
        config.token_request_timeout(),
    )?);

    let services = Arc::new(ApplicationServices::new(
        config.oauth_settings()?,
        Arc::clone(&correlation_store),
        token_endpoint,
        request_state,
        entropy,
        Arc::clone(&clock),
    ));

    let sweeper = spawn_expiry_sweeper(correlation_store, clock, config.sweep_interval());

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let app = build_router_with_rate_limiter(state, config.rate_limit_enabled());
    let service = app.into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        provider = config.airtable_url(),
        redirect_uri = config.redirect_uri(),
        confidential_client = !config.client_secret().is_empty(),
        "listening on {address}"
    );

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
