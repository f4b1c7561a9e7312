// End to end: triage a list, open a report, triage again.

use crate::modules::reports::core::ports::ReportKind;
use crate::modules::reports::core::report::{RemarkType, Report, ReportId};
use crate::modules::reports::use_cases::acknowledge_report::command::AcknowledgeReport;
use crate::modules::reports::use_cases::triage_reports::query::TriageReports;
use crate::shell::state::AppState;
use crate::tests::fixtures::reports::ReportBuilder;
use chrono::{Duration, Utc};
use rstest::rstest;

fn ids(reports: &[Report]) -> Vec<&str> {
    reports.iter().map(|r| r.id.as_str()).collect()
}

#[rstest]
#[tokio::test]
async fn opening_a_new_report_moves_it_into_its_category_group() {
    let now = Utc::now();
    let (state, source) = AppState::in_memory().await;
    source
        .seed(
            ReportKind::Unassigned,
            vec![
                ReportBuilder::new(1)
                    .created_at(now - Duration::hours(1))
                    .category("Plumbing")
                    .build(),
                ReportBuilder::new(2)
                    .created_at(now - Duration::hours(30))
                    .remark_type(RemarkType::New)
                    .category("Carpentry")
                    .build(),
                ReportBuilder::new(3)
                    .created_at(now - Duration::hours(2))
                    .category("Electrical")
                    .build(),
            ],
        )
        .await;

    let before = state
        .triage_handler
        .handle(TriageReports::new(ReportKind::Unassigned), now)
        .await
        .expect("first triage failed");
    assert_eq!(ids(&before.view.recent), vec!["1", "3", "2"]);
    assert!(before.view.groups.is_empty());

    let opened = before.view.recent[2].clone();
    state
        .acknowledge_handler
        .handle(AcknowledgeReport::from(&opened), now)
        .await;
    state.acknowledge_handler.settle().await;

    let after = state
        .triage_handler
        .handle(TriageReports::new(ReportKind::Unassigned), now)
        .await
        .expect("second triage failed");
    assert_eq!(ids(&after.view.recent), vec!["1", "3"]);
    assert_eq!(ids(&after.view.groups["Carpentry"]), vec!["2"]);
    assert!(before.facets[&ReportId::from(2)].is_new);
    assert!(!after.facets[&ReportId::from(2)].is_new);
    assert_eq!(
        *source.acknowledged.lock().await,
        vec![(ReportId::from(2), "admin@localhost".to_string())]
    );
}
