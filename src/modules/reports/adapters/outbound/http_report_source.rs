// reqwest implementation of the ReportSource and RemarkAcknowledger ports.
//
// Responsibilities
// - GET /issues/{unassigned|assigned|completed}?page=&size= and decode either a bare array or
//   a `{ "data": [...] }` envelope.
// - POST /issues/{id}/remark/view with `{ "adminEmail": ... }`.
// - Attach the bearer token when configured. Map every failure to a typed error.
//
// Boundaries
// - A body that does not decode as a whole is a failure. Nothing is partially returned.

use crate::modules::reports::core::ports::{
    AcknowledgeError, FetchError, PageRequest, RemarkAcknowledger, ReportKind, ReportSource,
};
use crate::modules::reports::core::report::{Report, ReportId};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportsBody {
    List(Vec<Report>),
    Envelope { data: Vec<Report> },
}

impl ReportsBody {
    fn into_reports(self) -> Vec<Report> {
        match self {
            Self::List(reports) | Self::Envelope { data: reports } => reports,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemarkViewBody<'a> {
    admin_email: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpReportSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpReportSource {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn issues_url(&self, kind: ReportKind) -> String {
        format!("{}/issues/{}", self.base_url, kind.path_segment())
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::Decode(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait::async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch_reports(
        &self,
        kind: ReportKind,
        page: PageRequest,
    ) -> Result<Vec<Report>, FetchError> {
        let url = self.issues_url(kind);
        tracing::debug!(%url, page = page.page, size = page.size, "fetching reports");

        let response = self
            .authorised(
                self.client
                    .get(&url)
                    .query(&[("page", page.page), ("size", page.size)]),
            )
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        let body: ReportsBody =
            serde_json::from_slice(&bytes).map_err(|err| FetchError::Decode(err.to_string()))?;
        Ok(body.into_reports())
    }
}

#[async_trait::async_trait]
impl RemarkAcknowledger for HttpReportSource {
    async fn acknowledge_remark(
        &self,
        id: &ReportId,
        admin_email: &str,
    ) -> Result<(), AcknowledgeError> {
        let url = format!("{}/issues/{}/remark/view", self.base_url, id);
        let response = self
            .authorised(self.client.post(&url).json(&RemarkViewBody { admin_email }))
            .send()
            .await
            .map_err(|err| AcknowledgeError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcknowledgeError::Status(status.as_u16()));
        }
        Ok(())
    }
}
