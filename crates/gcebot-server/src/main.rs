use gcebot_server::{build_router, build_state, BotConfig};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gcebot_server=info,info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = BotConfig::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        project = %config.target.project_id,
        zone = %config.target.zone,
        instance = %config.target.instance_name,
        notify_policy = %config.notify_policy,
        "Starting gcebot server"
    );

    let state = build_state(&config)?;

    if let Some(interval) = config.cost_guard_interval {
        info!(interval_secs = interval.as_secs(), "Scheduling periodic cost checks");
        state.cost_guard().spawn_periodic_checks(interval);
    }

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
