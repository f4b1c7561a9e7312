use crate::config::TriageConfig;
use crate::modules::reports::adapters::outbound::in_memory_report_source::InMemoryReportSource;
use crate::modules::reports::adapters::outbound::view_state_store::ViewStateStore;
use crate::modules::reports::core::ports::{RemarkAcknowledger, ReportSource};
use crate::modules::reports::use_cases::acknowledge_report::handler::AcknowledgeReportHandler;
use crate::modules::reports::use_cases::triage_reports::handler::TriageReportsHandler;
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub triage_handler: Arc<TriageReportsHandler>,
    pub acknowledge_handler: Arc<AcknowledgeReportHandler>,
    pub view_state: Arc<ViewStateStore>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ReportSource>,
        acknowledger: Option<Arc<dyn RemarkAcknowledger>>,
        view_state: Arc<ViewStateStore>,
        config: &TriageConfig,
    ) -> Self {
        let triage_handler = Arc::new(TriageReportsHandler::new(
            source,
            view_state.clone(),
            config.classify_policy(),
            config.fetch_timeout,
        ));
        let acknowledge_handler = Arc::new(AcknowledgeReportHandler::new(
            view_state.clone(),
            acknowledger,
            config.admin_email.clone(),
        ));
        Self {
            triage_handler,
            acknowledge_handler,
            view_state,
        }
    }

    /// In-memory wiring for local development and tests. The returned source is shared with the state.
    pub async fn in_memory() -> (Self, Arc<InMemoryReportSource>) {
        let source = Arc::new(InMemoryReportSource::new());
        let view_state =
            Arc::new(ViewStateStore::open(Arc::new(InMemoryKeyValueStore::new())).await);
        let state = Self::new(
            source.clone(),
            Some(source.clone()),
            view_state,
            &TriageConfig::default(),
        );
        (state, source)
    }
}
