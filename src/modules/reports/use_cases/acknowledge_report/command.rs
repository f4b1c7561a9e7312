use crate::modules::reports::core::report::{RemarkType, Report, ReportId};
use serde::Deserialize;

/// Sent when an admin opens a report's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeReport {
    pub report_id: ReportId,
    #[serde(default)]
    pub remark_type: Option<RemarkType>,
}

impl From<&Report> for AcknowledgeReport {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.id.clone(),
            remark_type: report.remark_type.clone(),
        }
    }
}
