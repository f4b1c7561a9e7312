// In memory implementation of the ReportSource and RemarkAcknowledger ports.
//
// Purpose
// - Exercise the triage and acknowledge use cases without a backend.
//
// Responsibilities
// - Serve seeded reports per kind, paged the way the backend pages them.
// - Record acknowledged remarks for inspection.

use crate::modules::reports::core::ports::{
    AcknowledgeError, FetchError, PageRequest, RemarkAcknowledger, ReportKind, ReportSource,
};
use crate::modules::reports::core::report::{Report, ReportId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

#[derive(Default)]
pub struct InMemoryReportSource {
    reports: RwLock<HashMap<ReportKind, Vec<Report>>>,
    pub acknowledged: Mutex<Vec<(ReportId, String)>>,
    fetch_count: AtomicUsize,
    delay: Option<Duration>,
    is_offline: bool,
}

impl InMemoryReportSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, kind: ReportKind, reports: Vec<Report>) {
        self.reports.write().await.insert(kind, reports);
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = Some(delay);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ReportSource for InMemoryReportSource {
    async fn fetch_reports(
        &self,
        kind: ReportKind,
        page: PageRequest,
    ) -> Result<Vec<Report>, FetchError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.is_offline {
            return Err(FetchError::Status(503));
        }

        let guard = self.reports.read().await;
        let items = guard.get(&kind).map(Vec::as_slice).unwrap_or_default();
        let start = (page.page as usize).saturating_mul(page.size as usize);
        if start >= items.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(page.size as usize).min(items.len());
        Ok(items[start..end].to_vec())
    }
}

#[async_trait::async_trait]
impl RemarkAcknowledger for InMemoryReportSource {
    async fn acknowledge_remark(
        &self,
        id: &ReportId,
        admin_email: &str,
    ) -> Result<(), AcknowledgeError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.is_offline {
            return Err(AcknowledgeError::Status(503));
        }
        self.acknowledged
            .lock()
            .await
            .push((id.clone(), admin_email.to_string()));
        Ok(())
    }
}
