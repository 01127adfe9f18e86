//! Stencil server entrypoints
//!
//! Default build binds a local listener. With `--features shuttle` the
//! router is handed to Shuttle, which owns the listener.

use stencil_server::{build_router, config::Settings, AppState};

#[cfg(not(feature = "shuttle"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::info!("Stencil API initializing... {:?}", settings);

    let router = build_router(AppState::from_settings(&settings));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on http://localhost:{}", settings.port);
    tracing::info!("Swagger UI: /swagger-ui");

    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(feature = "shuttle")]
#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("Stencil API initializing on Shuttle...");

    let settings = Settings::from_secrets(&secrets)?;
    tracing::info!(
        "Model: {}, environment: {}",
        settings.model,
        settings.environment
    );

    let router = build_router(AppState::from_settings(&settings));

    tracing::info!("Stencil API ready");

    Ok(router.into())
}
