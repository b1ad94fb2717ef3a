use anyhow::Context;
use interview_catalog::{load_initial, Catalog};
use interview_server::{build_router, AppState};
use interview_store::{AnyStore, AppConfig, QuestionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with span durations
    use tracing_subscriber::fmt::format::FmtSpan;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!("Starting interview question API");

    let config = AppConfig::from_env();
    let store = AnyStore::from_config(&config);
    tracing::info!(
        kind = config.backend.as_str(),
        backend = %store.describe(),
        "Using question store"
    );

    store
        .initialize()
        .await
        .context("failed to initialize the question store")?;
    match store.test_connection().await {
        Ok(version) => tracing::info!(%version, "Database connection OK"),
        Err(e) => tracing::warn!(error = %e, "Version query failed"),
    }

    let catalog = Catalog::initial();
    let report = load_initial(&store, &catalog, false)
        .await
        .context("failed to load the initial catalog")?;
    if !report.skipped {
        tracing::info!(
            inserted = report.inserted,
            failed = report.failed,
            "Initial catalog loaded"
        );
    }

    let app = build_router(AppState::new(store, catalog));

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;
    tracing::info!("Server listening on {}", config.http_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
