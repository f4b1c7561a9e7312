// ViewState is the locally owned, advisory record of which reports this admin has opened.
//
// Boundaries
// - Pure value type. No input or output here; persistence lives in the view state store adapter.
// - Never sent to the backend. Losing it only degrades "new" highlighting.

use crate::modules::reports::core::report::{Remark, ReportId};
use crate::shared::core::primitives::{EpochMillis, to_epoch_millis};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    viewed: HashMap<ReportId, EpochMillis>,
    cached_remarks: HashMap<ReportId, Remark>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first timestamp when the id is already present.
    pub fn mark_viewed(&mut self, id: &ReportId, now: DateTime<Utc>) {
        self.viewed
            .entry(id.clone())
            .or_insert_with(|| to_epoch_millis(now));
    }

    pub fn is_viewed(&self, id: &ReportId) -> bool {
        self.viewed.contains_key(id)
    }

    pub fn viewed_at(&self, id: &ReportId) -> Option<EpochMillis> {
        self.viewed.get(id).copied()
    }

    pub fn viewed_count(&self) -> usize {
        self.viewed.len()
    }

    pub fn cache_remark(&mut self, id: &ReportId, remark: Remark) {
        self.cached_remarks.insert(id.clone(), remark);
    }

    pub fn cached_remark(&self, id: &ReportId) -> Option<Remark> {
        self.cached_remarks.get(id).copied()
    }

    /// Drops viewed entries strictly older than `now - ttl`, along with the remarks cached for
    /// them. Returns how many viewed entries were removed. A TTL reaching past the earliest
    /// representable time removes nothing.
    pub fn evict_older_than(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let Some(cutoff) = now.checked_sub_signed(ttl).map(to_epoch_millis) else {
            return 0;
        };
        let before = self.viewed.len();
        self.viewed.retain(|_, viewed_at| *viewed_at >= cutoff);
        let viewed = &self.viewed;
        self.cached_remarks.retain(|id, _| viewed.contains_key(id));
        before - self.viewed.len()
    }

    pub fn to_document(&self) -> ViewStateDocument {
        let mut viewed_reports_with_timestamp: Vec<ViewedReport> = self
            .viewed
            .iter()
            .map(|(id, timestamp)| ViewedReport {
                report_id: id.clone(),
                timestamp: *timestamp,
            })
            .collect();
        viewed_reports_with_timestamp.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.report_id.cmp(&b.report_id))
        });

        ViewStateDocument {
            viewed_reports_with_timestamp,
            report_remarks: self
                .cached_remarks
                .iter()
                .map(|(id, remark)| (id.to_string(), *remark))
                .collect(),
        }
    }
}

impl From<ViewStateDocument> for ViewState {
    fn from(document: ViewStateDocument) -> Self {
        let mut state = ViewState::new();
        for entry in document.viewed_reports_with_timestamp {
            state.viewed.entry(entry.report_id).or_insert(entry.timestamp);
        }
        for (id, remark) in document.report_remarks {
            state.cached_remarks.insert(ReportId::from(id), remark);
        }
        state
    }
}

/// Persisted shape of the view state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStateDocument {
    #[serde(default)]
    pub viewed_reports_with_timestamp: Vec<ViewedReport>,
    #[serde(default)]
    pub report_remarks: BTreeMap<String, Remark>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedReport {
    pub report_id: ReportId,
    pub timestamp: EpochMillis,
}
