// Triage handler orchestrates the read flow.
//
// Responsibilities
// - Refuse a second load for the same report kind while one is outstanding.
// - Fetch under a timeout. A failed fetch becomes an empty list with `load_failed` set.
// - Filter, then classify and summarise against one view state snapshot.

use crate::modules::reports::adapters::outbound::view_state_store::ViewStateStore;
use crate::modules::reports::core::classify::{
    ClassifyPolicy, ReportFacets, TriageView, classify, facets,
};
use crate::modules::reports::core::filter::filter_reports;
use crate::modules::reports::core::ports::{FetchError, ReportKind, ReportSource};
use crate::modules::reports::core::report::ReportId;
use crate::modules::reports::core::summary::{TriageSummary, summarize};
use crate::modules::reports::use_cases::triage_reports::query::TriageReports;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TriageError {
    #[error("a load of {0} reports is already in progress")]
    LoadInProgress(ReportKind),

    #[error("invalid triage query: {0}")]
    InvalidQuery(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageOutcome {
    #[serde(flatten)]
    pub view: TriageView,
    pub facets: BTreeMap<ReportId, ReportFacets>,
    pub summary: TriageSummary,
    pub load_failed: bool,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct TriageReportsHandler {
    source: Arc<dyn ReportSource>,
    view_state: Arc<ViewStateStore>,
    policy: ClassifyPolicy,
    fetch_timeout: Duration,
    in_flight: [AtomicBool; 3],
}

impl TriageReportsHandler {
    pub fn new(
        source: Arc<dyn ReportSource>,
        view_state: Arc<ViewStateStore>,
        policy: ClassifyPolicy,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            view_state,
            policy,
            fetch_timeout,
            in_flight: Default::default(),
        }
    }

    fn flag(&self, kind: ReportKind) -> &AtomicBool {
        match kind {
            ReportKind::Unassigned => &self.in_flight[0],
            ReportKind::Assigned => &self.in_flight[1],
            ReportKind::Completed => &self.in_flight[2],
        }
    }

    pub async fn handle(
        &self,
        query: TriageReports,
        now: DateTime<Utc>,
    ) -> Result<TriageOutcome, TriageError> {
        let _guard =
            InFlight::acquire(self.flag(query.kind)).ok_or(TriageError::LoadInProgress(query.kind))?;

        let fetched = match tokio::time::timeout(
            self.fetch_timeout,
            self.source.fetch_reports(query.kind, query.page),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        };
        let (reports, load_failed) = match fetched {
            Ok(reports) => (reports, false),
            Err(err) => {
                tracing::warn!(kind = %query.kind, error = %err, "failed to load reports");
                (Vec::new(), true)
            }
        };

        let view_state = self.view_state.snapshot().await;
        let reports = filter_reports(reports, &query.filter, &view_state);
        let view = classify(&reports, &view_state, now, &self.policy);
        let facets = facets(&reports, &view_state, now, &self.policy);
        let summary = summarize(&reports, &view_state, now, &self.policy);

        Ok(TriageOutcome {
            view,
            facets,
            summary,
            load_failed,
        })
    }
}
