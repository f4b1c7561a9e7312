// Ports define what the triage core needs from the backend, without implementing it.
//
// Responsibilities
// - Fetch raw report lists per kind, page and size.
// - Tell the backend an admin has seen a report's remark.
//
// Testing guidance
// - Use the in memory report source for tests and local development.

use crate::modules::reports::core::report::{Report, ReportId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Unassigned,
    Assigned,
    Completed,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [Self::Unassigned, Self::Assigned, Self::Completed];

    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path_segment().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 50 }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("backend answered with status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum AcknowledgeError {
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("backend answered with status {0}")]
    Status(u16),
}

#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_reports(
        &self,
        kind: ReportKind,
        page: PageRequest,
    ) -> Result<Vec<Report>, FetchError>;
}

#[async_trait]
pub trait RemarkAcknowledger: Send + Sync {
    async fn acknowledge_remark(
        &self,
        id: &ReportId,
        admin_email: &str,
    ) -> Result<(), AcknowledgeError>;
}
