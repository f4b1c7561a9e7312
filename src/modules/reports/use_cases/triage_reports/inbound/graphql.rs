use async_graphql::{Context, Object, Result as GqlResult};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

use crate::modules::reports::core::classify::ReportFacets;
use crate::modules::reports::core::report::{Report, ReportId};
use crate::modules::reports::use_cases::triage_reports::handler::TriageOutcome;
use crate::modules::reports::use_cases::triage_reports::inbound::http::TriageParams;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlReport {
    pub id: String,
    pub status: String,
    pub category: String,
    pub description: String,
    pub created_at: String,
    pub remark_type: Option<String>,
    pub remark_viewed: Option<bool>,
    pub reported_by: Option<String>,
    pub assigned_to: Option<String>,
    pub photo_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub is_new: bool,
    pub latest_remark: Option<String>,
}

impl GqlReport {
    fn with_facets(r: Report, facets: &BTreeMap<ReportId, ReportFacets>) -> Self {
        let reported_by = r.reporter_username().map(str::to_string);
        let facet = facets.get(&r.id).copied();
        Self {
            is_new: facet.is_some_and(|f| f.is_new),
            latest_remark: facet
                .and_then(|f| f.latest_remark)
                .map(|remark| remark.to_string()),
            id: r.id.to_string(),
            status: r.status.as_str().to_string(),
            category: r.category,
            description: r.description,
            created_at: r.created_at.to_rfc3339(),
            remark_type: r.remark_type.map(String::from),
            remark_viewed: r.remark_viewed,
            reported_by,
            assigned_to: r.assigned_to.and_then(|identity| identity.username),
            photo_urls: r.photo_urls,
            video_urls: r.video_urls,
        }
    }
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlCategoryGroup {
    pub category: String,
    pub reports: Vec<GqlReport>,
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlCount {
    pub key: String,
    pub count: u64,
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlTriageSummary {
    pub total: u64,
    pub new_count: u64,
    pub by_status: Vec<GqlCount>,
    pub by_remark: Vec<GqlCount>,
}

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlTriageView {
    pub recent: Vec<GqlReport>,
    pub groups: Vec<GqlCategoryGroup>,
    pub summary: GqlTriageSummary,
    pub load_failed: bool,
}

impl From<TriageOutcome> for GqlTriageView {
    fn from(o: TriageOutcome) -> Self {
        let facets = &o.facets;
        Self {
            recent: o
                .view
                .recent
                .into_iter()
                .map(|r| GqlReport::with_facets(r, facets))
                .collect(),
            groups: o
                .view
                .groups
                .into_iter()
                .map(|(category, reports)| GqlCategoryGroup {
                    category,
                    reports: reports
                        .into_iter()
                        .map(|r| GqlReport::with_facets(r, facets))
                        .collect(),
                })
                .collect(),
            summary: GqlTriageSummary {
                total: o.summary.total as u64,
                new_count: o.summary.new_count as u64,
                by_status: o
                    .summary
                    .by_status
                    .into_iter()
                    .map(|(status, count)| GqlCount {
                        key: status.as_str().to_string(),
                        count: count as u64,
                    })
                    .collect(),
                by_remark: o
                    .summary
                    .by_remark
                    .into_iter()
                    .map(|(remark, count)| GqlCount {
                        key: remark.to_string(),
                        count: count as u64,
                    })
                    .collect(),
            },
            load_failed: o.load_failed,
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[allow(clippy::too_many_arguments)]
    async fn triage(
        &self,
        context: &Context<'_>,
        kind: Option<String>,
        page: Option<u32>,
        size: Option<u32>,
        query: Option<String>,
        status: Option<String>,
        day: Option<String>,
    ) -> GqlResult<GqlTriageView> {
        let state = context.data_unchecked::<AppState>();
        let day = day
            .map(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        let triage = TriageParams {
            kind,
            page,
            size,
            query,
            status,
            day,
        }
        .into_query()
        .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        let outcome = state
            .triage_handler
            .handle(triage, Utc::now())
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(outcome.into())
    }
}

#[cfg(test)]
mod triage_reports_graphql_inbound_tests {
    use async_graphql::{EmptySubscription, Schema};
    use chrono::{Duration, Utc};

    use crate::modules::reports::core::ports::ReportKind;
    use crate::modules::reports::core::report::{Remark, RemarkType, ReportId};
    use crate::shell::graphql::{AppSchema, MutationRoot, QueryRoot};
    use crate::shell::state::AppState;
    use crate::tests::fixtures::reports::ReportBuilder;

    #[tokio::test]
    async fn it_should_resolve_the_triage_query() {
        let (state, source) = AppState::in_memory().await;
        source
            .seed(
                ReportKind::Assigned,
                vec![ReportBuilder::new(8)
                    .created_at(Utc::now() - Duration::days(2))
                    .category("Cleaning")
                    .remark_type(RemarkType::New)
                    .build()],
            )
            .await;
        let schema: AppSchema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(state)
            .finish();

        let response = schema
            .execute(r#"{ triage(kind: "assigned") { recent { id remarkType isNew latestRemark } loadFailed summary { total newCount } } }"#)
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["triage"]["recent"][0]["id"], "8");
        assert_eq!(data["triage"]["recent"][0]["remarkType"], "new");
        assert_eq!(data["triage"]["recent"][0]["isNew"], true);
        assert_eq!(data["triage"]["recent"][0]["latestRemark"], serde_json::Value::Null);
        assert_eq!(data["triage"]["loadFailed"], false);
        assert_eq!(data["triage"]["summary"]["newCount"], 1);
    }

    #[tokio::test]
    async fn it_should_resolve_the_badges_of_grouped_reports_from_the_view_state() {
        let (state, source) = AppState::in_memory().await;
        source
            .seed(
                ReportKind::Completed,
                vec![ReportBuilder::new(12)
                    .created_at(Utc::now() - Duration::days(3))
                    .category("Carpentry")
                    .build()],
            )
            .await;
        state.view_state.mark_viewed(&ReportId::from(12), Utc::now()).await;
        state.view_state.cache_remark(&ReportId::from(12), Remark::Rf).await;
        let schema: AppSchema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(state)
            .finish();

        let response = schema
            .execute(
                r#"{ triage(kind: "completed") { groups { category reports { id isNew latestRemark } } } }"#,
            )
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        let report = &data["triage"]["groups"][0]["reports"][0];
        assert_eq!(report["id"], "12");
        assert_eq!(report["isNew"], false);
        assert_eq!(report["latestRemark"], "RF");
    }

    #[tokio::test]
    async fn it_should_return_an_error_for_an_unknown_status() {
        let (state, _) = AppState::in_memory().await;
        let schema: AppSchema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(state)
            .finish();

        let response = schema
            .execute(r#"{ triage(status: "OPEN") { loadFailed } }"#)
            .await;

        assert_eq!(response.errors.len(), 1);
    }
}
