use anyhow::{Context, Result};
use itinera_api::{build_app, ApiSettings};
use itinera_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("itinera_api");

    let settings = ApiSettings::from_env();
    let bind = settings.bind.clone();
    let delay = settings.generator.delay;

    let app = build_app(settings)?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(
        bind = %bind,
        delay_min_ms = delay.min.as_millis() as u64,
        delay_max_ms = delay.max.as_millis() as u64,
        "itinera api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
