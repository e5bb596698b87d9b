use anyhow::Context;
use std::sync::Arc;
use urania::{ChartAssembler, IanaTimezones, SwissEphemerisAdapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = urania_config::load_config().context("Configuration is malformed")?;
    let ephemeris = SwissEphemerisAdapter::new(&config.ephemeris_config())
        .context("Swiss Ephemeris is unavailable")?;
    let assembler = ChartAssembler::new(
        Arc::new(ephemeris),
        Arc::new(IanaTimezones),
        config.chart_settings(),
    );
    log::info!(
        "Charts use {} houses, sextile orb {}°, locale {:?}",
        config.house_system.name(),
        config.sextile_orb,
        config.locale
    );

    let app = chartd::router(chartd::AppState::new(assembler));
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;
    log::info!("chartd listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
