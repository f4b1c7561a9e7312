// Acknowledge handler runs when an admin opens a report.
//
// Responsibilities
// - Mark the report viewed locally. Local state alone suppresses "new".
// - Cache a concrete remark so it can still be shown when the backend later omits it.
// - For reports tagged "new", tell the backend once in a background task, best effort.
//   Failures are logged only. `settle` waits for outstanding acknowledgements.

use crate::modules::reports::adapters::outbound::view_state_store::ViewStateStore;
use crate::modules::reports::core::ports::RemarkAcknowledger;
use crate::modules::reports::use_cases::acknowledge_report::command::AcknowledgeReport;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

pub struct AcknowledgeReportHandler {
    view_state: Arc<ViewStateStore>,
    acknowledger: Option<Arc<dyn RemarkAcknowledger>>,
    admin_email: String,
    pending: Mutex<JoinSet<()>>,
}

impl AcknowledgeReportHandler {
    pub fn new(
        view_state: Arc<ViewStateStore>,
        acknowledger: Option<Arc<dyn RemarkAcknowledger>>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            view_state,
            acknowledger,
            admin_email: admin_email.into(),
            pending: Mutex::new(JoinSet::new()),
        }
    }

    pub async fn handle(&self, command: AcknowledgeReport, now: DateTime<Utc>) {
        self.view_state.mark_viewed(&command.report_id, now).await;

        let Some(remark_type) = command.remark_type else {
            return;
        };
        if let Some(remark) = remark_type.remark() {
            self.view_state.cache_remark(&command.report_id, remark).await;
        }
        if !remark_type.is_new() {
            return;
        }
        let Some(acknowledger) = self.acknowledger.clone() else {
            return;
        };
        let admin_email = self.admin_email.clone();
        let report_id = command.report_id;

        let mut pending = self.pending.lock().await;
        while pending.try_join_next().is_some() {}
        pending.spawn(async move {
            if let Err(err) = acknowledger
                .acknowledge_remark(&report_id, &admin_email)
                .await
            {
                tracing::warn!(
                    report_id = %report_id,
                    error = %err,
                    "remote remark acknowledgement failed"
                );
            }
        });
    }

    /// Waits for every acknowledgement spawned so far.
    pub async fn settle(&self) {
        let mut pending = std::mem::take(&mut *self.pending.lock().await);
        while pending.join_next().await.is_some() {}
    }
}
