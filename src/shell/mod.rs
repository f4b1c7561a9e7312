// Composition root for the report triage service.
//
// Responsibilities
// - Instantiate concrete adapters from configuration.
// - Evict expired view state once at session start.
// - Wire adapters into the use case handlers and expose the router.

pub mod graphql;
pub mod http;
pub mod state;

use crate::config::TriageConfig;
use crate::modules::reports::adapters::outbound::http_report_source::HttpReportSource;
use crate::modules::reports::adapters::outbound::view_state_store::ViewStateStore;
use crate::shared::infrastructure::key_value_store::json_file::JsonFileStore;
use crate::shell::state::AppState;
use chrono::Utc;
use std::sync::Arc;

pub async fn bootstrap(config: &TriageConfig) -> anyhow::Result<AppState> {
    let backend = Arc::new(HttpReportSource::new(
        config.api_base_url.clone(),
        config.api_token.clone(),
        config.fetch_timeout,
    )?);
    let view_state = Arc::new(
        ViewStateStore::open(Arc::new(JsonFileStore::new(config.state_dir.clone()))).await,
    );
    view_state
        .evict_older_than(Utc::now(), config.viewed_ttl)
        .await;

    tracing::info!(
        api = %config.api_base_url,
        state_dir = %config.state_dir.display(),
        memory_only = view_state.is_memory_only(),
        "report triage wired"
    );

    Ok(AppState::new(
        backend.clone(),
        Some(backend),
        view_state,
        config,
    ))
}
