use tracing_subscriber::{EnvFilter, fmt};

use report_triage::config::TriageConfig;
use report_triage::shell::{bootstrap, http::router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = TriageConfig::from_env()?;
    let state = bootstrap(&config).await?;
    let app = router(state);

    tracing::info!("triage endpoint: http://{}/triage", config.bind_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
