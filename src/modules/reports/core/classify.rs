// Pure classification of a fetched report list into "recently new" and category groups.
//
// Responsibilities
// - Decide whether a report is new, with precedence: local view > backend acknowledgement >
//   explicit "new" tag > age window.
// - Resolve a report's latest remark through one fallback chain.
// - Partition reports so every report lands in exactly one of `recent` or `groups`.
//
// Boundaries
// - Reads a ViewState snapshot only. Writes happen through the acknowledge use case.

use crate::modules::reports::core::report::{Remark, Report, ReportId};
use crate::modules::reports::core::view_state::ViewState;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_NEW_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyPolicy {
    pub new_window: Duration,
    pub recent_limit: usize,
}

impl Default for ClassifyPolicy {
    fn default() -> Self {
        Self {
            new_window: Duration::hours(DEFAULT_NEW_WINDOW_HOURS),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriageView {
    pub recent: Vec<Report>,
    pub groups: BTreeMap<String, Vec<Report>>,
}

impl TriageView {
    pub fn len(&self) -> usize {
        self.recent.len() + self.groups.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn is_new(
    report: &Report,
    view_state: &ViewState,
    now: DateTime<Utc>,
    policy: &ClassifyPolicy,
) -> bool {
    if view_state.is_viewed(&report.id) {
        return false;
    }
    if report.remark_viewed == Some(true) {
        return false;
    }
    if report.remark_type.as_ref().is_some_and(|t| t.is_new()) {
        return true;
    }
    now - report.created_at <= policy.new_window
}

pub fn latest_remark(report: &Report, view_state: &ViewState) -> Option<Remark> {
    if let Some(remark) = report.remark_type.as_ref().and_then(|t| t.remark()) {
        return Some(remark);
    }
    if let Some(remark) = view_state.cached_remark(&report.id) {
        return Some(remark);
    }
    if let Some(remark) = report.remark.as_deref().and_then(Remark::parse) {
        return Some(remark);
    }
    let newest = report
        .updates
        .iter()
        .max_by_key(|update| update.updated_at)?;
    newest
        .resolution_type
        .as_deref()
        .and_then(Remark::parse)
        .or_else(|| newest.remark.as_deref().and_then(Remark::parse))
}

/// Display facets of one report: the NEW badge and the remark badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFacets {
    pub is_new: bool,
    pub latest_remark: Option<Remark>,
}

pub fn facets(
    reports: &[Report],
    view_state: &ViewState,
    now: DateTime<Utc>,
    policy: &ClassifyPolicy,
) -> BTreeMap<ReportId, ReportFacets> {
    reports
        .iter()
        .map(|report| {
            let facets = ReportFacets {
                is_new: is_new(report, view_state, now, policy),
                latest_remark: latest_remark(report, view_state),
            };
            (report.id.clone(), facets)
        })
        .collect()
}

pub fn classify(
    reports: &[Report],
    view_state: &ViewState,
    now: DateTime<Utc>,
    policy: &ClassifyPolicy,
) -> TriageView {
    let mut recent: Vec<Report> = reports
        .iter()
        .filter(|report| is_new(report, view_state, now, policy))
        .cloned()
        .collect();
    recent.sort_by_key(|report| Reverse(report.created_at));
    recent.truncate(policy.recent_limit);

    let recent_ids: HashSet<&ReportId> = recent.iter().map(|report| &report.id).collect();
    let mut groups: BTreeMap<String, Vec<Report>> = BTreeMap::new();
    for report in reports.iter().filter(|r| !recent_ids.contains(&r.id)) {
        groups
            .entry(report.category.clone())
            .or_default()
            .push(report.clone());
    }

    TriageView { recent, groups }
}
