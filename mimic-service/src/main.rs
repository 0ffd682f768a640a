use anyhow::Context;
use mimic_service::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // An explicit path skips the config search
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => Config::load().context("failed to load configuration")?,
    };
    init_tracing(&config)?;

    let server = Server::new(config.clone());

    #[cfg(feature = "database")]
    if let Some(db) = config.database.clone() {
        let pool = create_pool(&db).await?;
        let store = PgWordStore::new(pool);
        store.migrate().await?;
        tracing::info!("Using PostgreSQL word store");

        server.serve(build_router(AppState::new(config, store))).await?;
        return Ok(());
    }

    if config.database.is_some() {
        tracing::warn!("Database configured but the `database` feature is disabled");
    }
    tracing::info!("Using in-memory word store");

    server
        .serve(build_router(AppState::new(config, MemoryWordStore::new())))
        .await?;

    Ok(())
}
