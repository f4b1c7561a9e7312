// Free-text and status predicates applied before classification.
//
// Notes
// - Filtering runs first, so the recent cap applies to the filtered set.
// - RF and PR filters also match on the resolved latest remark, not just on status.

use crate::modules::reports::core::classify::latest_remark;
use crate::modules::reports::core::report::{Remark, Report, ReportStatus};
use crate::modules::reports::core::view_state::ViewState;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown status filter: {0}")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    Status(ReportStatus),
    Remark(Remark),
}

impl StatusFilter {
    /// An empty value means "no status filter".
    pub fn parse(value: &str) -> Result<Option<Self>, FilterError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        if let Some(status) = ReportStatus::parse(value) {
            return Ok(Some(Self::Status(status)));
        }
        match value {
            "RF" => Ok(Some(Self::Remark(Remark::Rf))),
            "PR" => Ok(Some(Self::Remark(Remark::Pr))),
            other => Err(FilterError::UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub query: String,
    pub status: Option<StatusFilter>,
    pub created_on: Option<NaiveDate>,
}

pub fn matches(
    report: &Report,
    query: &str,
    status_filter: Option<&StatusFilter>,
    view_state: &ViewState,
) -> bool {
    matches_text(report, query) && matches_status(report, status_filter, view_state)
}

fn matches_text(report: &Report, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        Some(report.description.as_str()),
        Some(report.category.as_str()),
        report.reporter_username(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_status(
    report: &Report,
    status_filter: Option<&StatusFilter>,
    view_state: &ViewState,
) -> bool {
    match status_filter {
        None => true,
        Some(StatusFilter::Status(status)) => report.status == *status,
        Some(StatusFilter::Remark(remark)) => {
            latest_remark(report, view_state) == Some(*remark)
        }
    }
}

pub fn filter_reports(
    reports: Vec<Report>,
    filter: &ReportFilter,
    view_state: &ViewState,
) -> Vec<Report> {
    reports
        .into_iter()
        .filter(|report| {
            filter
                .created_on
                .is_none_or(|day| report.created_at.date_naive() == day)
        })
        .filter(|report| matches(report, &filter.query, filter.status.as_ref(), view_state))
        .collect()
}

#[cfg(test)]
mod filter_tests {
    use super::*;
    use crate::modules::reports::core::report::{RemarkType, ReportId};
    use crate::tests::fixtures::reports::{ReportBuilder, fixed_now};
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn reports() -> Vec<Report> {
        let now = fixed_now();
        vec![
            ReportBuilder::new(1)
                .created_at(now - Duration::hours(1))
                .category("Plumbing")
                .description("Leaking tap")
                .build(),
            ReportBuilder::new(2)
                .created_at(now - Duration::hours(30))
                .category("Carpentry")
                .description("Door hinge")
                .remark_type(RemarkType::New)
                .status(ReportStatus::InProgress)
                .build(),
            ReportBuilder::new(3)
                .created_at(now - Duration::hours(2))
                .category("Electrical")
                .description("Socket sparks")
                .reported_by("maria.santos")
                .remark("RF")
                .build(),
        ]
    }

    #[rstest]
    fn it_should_match_the_category_case_insensitively(reports: Vec<Report>) {
        let state = ViewState::new();
        let hits: Vec<&Report> = reports
            .iter()
            .filter(|r| matches(r, "electrical", None, &state))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ReportId::from(3));
        assert!(!matches(&reports[0], "electrical", None, &state));
    }

    #[rstest]
    #[case("leaking", 1)]
    #[case("MARIA", 3)]
    #[case("hinge", 2)]
    fn it_should_match_description_and_reporter(
        reports: Vec<Report>,
        #[case] query: &str,
        #[case] expected_id: i64,
    ) {
        let state = ViewState::new();
        let hits: Vec<&ReportId> = reports
            .iter()
            .filter(|r| matches(r, query, None, &state))
            .map(|r| &r.id)
            .collect();
        assert_eq!(hits, vec![&ReportId::from(expected_id)]);
    }

    #[rstest]
    fn it_should_match_everything_for_an_empty_query(reports: Vec<Report>) {
        let state = ViewState::new();
        assert!(reports.iter().all(|r| matches(r, "", None, &state)));
        assert!(reports.iter().all(|r| matches(r, "   ", None, &state)));
    }

    #[rstest]
    fn it_should_match_an_exact_status(reports: Vec<Report>) {
        let state = ViewState::new();
        let filter = StatusFilter::Status(ReportStatus::InProgress);
        let hits: Vec<&str> = reports
            .iter()
            .filter(|r| matches(r, "", Some(&filter), &state))
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(hits, vec!["2"]);
    }

    #[rstest]
    fn it_should_match_a_remark_filter_against_the_latest_remark(reports: Vec<Report>) {
        let mut state = ViewState::new();
        state.cache_remark(&ReportId::from(1), Remark::Pr);

        let rf = StatusFilter::Remark(Remark::Rf);
        let pr = StatusFilter::Remark(Remark::Pr);

        assert!(matches(&reports[2], "", Some(&rf), &state));
        assert!(!matches(&reports[1], "", Some(&rf), &state));
        assert!(matches(&reports[0], "", Some(&pr), &state));
    }

    #[rstest]
    fn it_should_and_the_text_and_status_predicates(reports: Vec<Report>) {
        let state = ViewState::new();
        let rf = StatusFilter::Remark(Remark::Rf);
        assert!(matches(&reports[2], "socket", Some(&rf), &state));
        assert!(!matches(&reports[2], "tap", Some(&rf), &state));
    }

    #[rstest]
    #[case("", None)]
    #[case("PENDING", Some(StatusFilter::Status(ReportStatus::Pending)))]
    #[case("COMPLETED", Some(StatusFilter::Status(ReportStatus::Completed)))]
    #[case("RF", Some(StatusFilter::Remark(Remark::Rf)))]
    #[case("PR", Some(StatusFilter::Remark(Remark::Pr)))]
    fn it_should_parse_status_filters(#[case] raw: &str, #[case] expected: Option<StatusFilter>) {
        assert_eq!(StatusFilter::parse(raw), Ok(expected));
    }

    #[rstest]
    fn it_should_reject_an_unknown_status_filter() {
        assert_eq!(
            StatusFilter::parse("OPEN"),
            Err(FilterError::UnknownStatus("OPEN".to_string()))
        );
    }

    #[rstest]
    fn it_should_keep_only_reports_created_on_the_requested_day(reports: Vec<Report>) {
        let filter = ReportFilter {
            created_on: Some(fixed_now().date_naive()),
            ..ReportFilter::default()
        };
        let kept = filter_reports(reports, &filter, &ViewState::new());
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
