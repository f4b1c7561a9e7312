// Shared Report fixture for unit tests.
// The base record is parsed from json/report.json; setters override single fields.

use crate::modules::reports::core::report::{
    Identity, RemarkType, Report, ReportId, ReportStatus, ReportUpdate,
};
use chrono::{DateTime, TimeZone, Utc};

const REPORT_JSON: &str = include_str!("json/report.json");

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

pub struct ReportBuilder {
    inner: Report,
}

#[allow(dead_code)]
impl ReportBuilder {
    pub fn new(id: i64) -> Self {
        let mut inner: Report = serde_json::from_str(REPORT_JSON).unwrap();
        inner.id = ReportId::from(id);
        Self { inner }
    }

    pub fn status(mut self, v: ReportStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn category(mut self, v: impl Into<String>) -> Self {
        self.inner.category = v.into();
        self
    }

    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.inner.description = v.into();
        self
    }

    pub fn created_at(mut self, v: DateTime<Utc>) -> Self {
        self.inner.created_at = v;
        self
    }

    pub fn remark_type(mut self, v: RemarkType) -> Self {
        self.inner.remark_type = Some(v);
        self
    }

    pub fn remark(mut self, v: impl Into<String>) -> Self {
        self.inner.remark = Some(v.into());
        self
    }

    pub fn remark_viewed(mut self, v: bool) -> Self {
        self.inner.remark_viewed = Some(v);
        self
    }

    pub fn updates(mut self, v: Vec<ReportUpdate>) -> Self {
        self.inner.updates = v;
        self
    }

    pub fn reported_by(mut self, username: impl Into<String>) -> Self {
        self.inner.reported_by = Some(Identity {
            username: Some(username.into()),
            ..Identity::default()
        });
        self
    }

    pub fn build(self) -> Report {
        self.inner
    }
}

#[cfg(test)]
mod report_builder_tests {
    use super::*;
    use crate::modules::reports::core::report::Remark;
    use rstest::rstest;

    #[rstest]
    fn it_should_parse_the_json_fixture() {
        let report = ReportBuilder::new(1).build();
        assert_eq!(report.id, ReportId::from(1));
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.category, "General");
        assert_eq!(report.created_at, fixed_now() - chrono::Duration::hours(1));
        assert_eq!(report.remark_type, None);
        assert_eq!(report.reporter_username(), Some("staff-001"));
    }

    #[rstest]
    fn setters_override_fields() {
        let report = ReportBuilder::new(7)
            .status(ReportStatus::Completed)
            .category("Electrical")
            .description("desc")
            .remark_type(RemarkType::Remark(Remark::Ok))
            .remark("RF")
            .remark_viewed(true)
            .reported_by("tester")
            .build();

        assert_eq!(report.id.as_str(), "7");
        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.category, "Electrical");
        assert_eq!(report.description, "desc");
        assert_eq!(report.remark_type, Some(RemarkType::Remark(Remark::Ok)));
        assert_eq!(report.remark.as_deref(), Some("RF"));
        assert_eq!(report.remark_viewed, Some(true));
        assert_eq!(report.reporter_username(), Some("tester"));
    }
}
