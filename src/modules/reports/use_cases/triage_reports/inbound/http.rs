use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::modules::reports::core::filter::{ReportFilter, StatusFilter};
use crate::modules::reports::core::ports::{PageRequest, ReportKind};
use crate::modules::reports::use_cases::triage_reports::handler::TriageError;
use crate::modules::reports::use_cases::triage_reports::query::TriageReports;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct TriageParams {
    pub kind: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub query: Option<String>,
    pub status: Option<String>,
    pub day: Option<NaiveDate>,
}

impl TriageParams {
    pub fn into_query(self) -> Result<TriageReports, TriageError> {
        let kind = match self.kind.as_deref() {
            None => ReportKind::Unassigned,
            Some(raw) => ReportKind::parse(raw)
                .ok_or_else(|| TriageError::InvalidQuery(format!("unknown kind: {raw}")))?,
        };
        let status = StatusFilter::parse(self.status.as_deref().unwrap_or_default())
            .map_err(|err| TriageError::InvalidQuery(err.to_string()))?;
        let defaults = PageRequest::default();
        Ok(TriageReports::new(kind)
            .page(
                self.page.unwrap_or(defaults.page),
                self.size.unwrap_or(defaults.size),
            )
            .filter(ReportFilter {
                query: self.query.unwrap_or_default(),
                status,
                created_on: self.day,
            }))
    }
}

pub async fn handle(
    State(state): State<AppState>,
    Query(params): Query<TriageParams>,
) -> impl IntoResponse {
    let outcome = match params.into_query() {
        Ok(query) => state.triage_handler.handle(query, Utc::now()).await,
        Err(err) => Err(err),
    };
    match outcome {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err @ TriageError::InvalidQuery(_)) => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(err @ TriageError::LoadInProgress(_)) => {
            (StatusCode::CONFLICT, err.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod triage_reports_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::modules::reports::core::ports::ReportKind;
    use crate::modules::reports::core::report::{Remark, ReportId};
    use crate::shell::state::AppState;
    use crate::tests::fixtures::reports::ReportBuilder;

    use super::handle;

    async fn app() -> Router {
        let (state, source) = AppState::in_memory().await;
        source
            .seed(
                ReportKind::Unassigned,
                vec![
                    ReportBuilder::new(1)
                        .created_at(Utc::now() - Duration::hours(1))
                        .category("Electrical")
                        .build(),
                    ReportBuilder::new(2)
                        .created_at(Utc::now() - Duration::days(3))
                        .category("Plumbing")
                        .build(),
                ],
            )
            .await;
        Router::new().route("/triage", get(handle)).with_state(state)
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .await
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn it_should_return_200_with_the_classified_view() {
        let (status, json) = get_json("/triage?kind=unassigned").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recent"][0]["id"], "1");
        assert_eq!(json["groups"]["Plumbing"][0]["id"], "2");
        assert_eq!(json["loadFailed"], false);
    }

    #[tokio::test]
    async fn it_should_return_the_new_and_remark_facets_of_each_report() {
        let (state, source) = AppState::in_memory().await;
        source
            .seed(
                ReportKind::Unassigned,
                vec![
                    ReportBuilder::new(1)
                        .created_at(Utc::now() - Duration::hours(1))
                        .build(),
                    ReportBuilder::new(2)
                        .created_at(Utc::now() - Duration::days(3))
                        .build(),
                ],
            )
            .await;
        state.view_state.mark_viewed(&ReportId::from(2), Utc::now()).await;
        state.view_state.cache_remark(&ReportId::from(2), Remark::Pr).await;
        let app = Router::new().route("/triage", get(handle)).with_state(state);

        let response = app
            .oneshot(Request::get("/triage").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["facets"]["1"]["isNew"], true);
        assert_eq!(json["facets"]["1"]["latestRemark"], serde_json::Value::Null);
        assert_eq!(json["facets"]["2"]["isNew"], false);
        assert_eq!(json["facets"]["2"]["latestRemark"], "PR");
    }

    #[tokio::test]
    async fn it_should_apply_the_search_query() {
        let (status, json) = get_json("/triage?query=plumb").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recent"], serde_json::json!([]));
        assert_eq!(json["summary"]["total"], 1);
    }

    #[tokio::test]
    async fn it_should_return_400_for_an_unknown_kind() {
        let (status, _) = get_json("/triage?kind=archived").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_return_400_for_an_unknown_status() {
        let (status, _) = get_json("/triage?status=OPEN").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_return_400_for_a_malformed_day() {
        let (status, _) = get_json("/triage?day=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
