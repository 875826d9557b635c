use anyhow::Context;

use shelfgate_api::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;
    shelfgate_observability::init_with(config.log_format);
    let app = shelfgate_api::app::build_app_from_config(&config)
        .context("failed to build upstream HTTP client")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        "GraphQL gateway listening at http://{}{}",
        listener.local_addr()?,
        shelfgate_api::app::routes::GRAPHQL_PATH
    );

    axum::serve(listener, app).await?;
    Ok(())
}
