use async_graphql::{Context, ID, Object, Result as GqlResult};
use chrono::Utc;

use crate::modules::reports::core::report::{RemarkType, ReportId};
use crate::modules::reports::use_cases::acknowledge_report::command::AcknowledgeReport;
use crate::shell::state::AppState;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn acknowledge_report(
        &self,
        context: &Context<'_>,
        report_id: ID,
        remark_type: Option<String>,
    ) -> GqlResult<ID> {
        let state = context.data_unchecked::<AppState>();
        let command = AcknowledgeReport {
            report_id: ReportId::from(report_id.to_string()),
            remark_type: remark_type.map(RemarkType::from),
        };
        state.acknowledge_handler.handle(command, Utc::now()).await;
        Ok(report_id)
    }
}
