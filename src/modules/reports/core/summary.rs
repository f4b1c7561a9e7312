use crate::modules::reports::core::classify::{ClassifyPolicy, is_new, latest_remark};
use crate::modules::reports::core::report::{Remark, Report, ReportStatus};
use crate::modules::reports::core::view_state::ViewState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts shown above the triage board and in the daily report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageSummary {
    pub total: usize,
    pub new_count: usize,
    pub by_status: BTreeMap<ReportStatus, usize>,
    pub by_remark: BTreeMap<Remark, usize>,
}

pub fn summarize(
    reports: &[Report],
    view_state: &ViewState,
    now: DateTime<Utc>,
    policy: &ClassifyPolicy,
) -> TriageSummary {
    let mut summary = TriageSummary {
        total: reports.len(),
        ..TriageSummary::default()
    };
    for report in reports {
        if is_new(report, view_state, now, policy) {
            summary.new_count += 1;
        }
        *summary.by_status.entry(report.status.clone()).or_default() += 1;
        if let Some(remark) = latest_remark(report, view_state) {
            *summary.by_remark.entry(remark).or_default() += 1;
        }
    }
    summary
}
