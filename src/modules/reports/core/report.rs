// Report is the issue record owned by the backend. This crate only reads it.
//
// Notes
// - The backend sends `id` as either a number or a string; both normalise to ReportId.
// - Unknown enum values decode to a catch-all variant so one odd record never fails a whole fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawReportId")]
pub struct ReportId(String);

impl ReportId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReportId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ReportId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for ReportId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReportId {
    Number(i64),
    Text(String),
}

impl From<RawReportId> for ReportId {
    fn from(raw: RawReportId) -> Self {
        match raw {
            RawReportId::Number(n) => ReportId::from(n),
            RawReportId::Text(s) => ReportId(s),
        }
    }
}

/// Values outside the known workflow keep their raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Completed,
    Unknown(String),
}

impl ReportStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ReportStatus {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or(Self::Unknown(value))
    }
}

impl From<ReportStatus> for String {
    fn from(value: ReportStatus) -> Self {
        match value {
            ReportStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Staff resolution tag: resolved, requires procurement, requires an external contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Remark {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "RF")]
    Rf,
    #[serde(rename = "PR")]
    Pr,
}

impl Remark {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OK" => Some(Self::Ok),
            "RF" => Some(Self::Rf),
            "PR" => Some(Self::Pr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Rf => "RF",
            Self::Pr => "PR",
        }
    }
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemarkType {
    Remark(Remark),
    New,
    Unrecognised(String),
}

impl RemarkType {
    pub fn remark(&self) -> Option<Remark> {
        match self {
            Self::Remark(remark) => Some(*remark),
            _ => None,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New)
    }
}

impl From<String> for RemarkType {
    fn from(value: String) -> Self {
        if value == "new" {
            return Self::New;
        }
        match Remark::parse(&value) {
            Some(remark) => Self::Remark(remark),
            None => Self::Unrecognised(value),
        }
    }
}

impl From<RemarkType> for String {
    fn from(value: RemarkType) -> Self {
        match value {
            RemarkType::Remark(remark) => remark.as_str().to_string(),
            RemarkType::New => "new".to_string(),
            RemarkType::Unrecognised(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    pub id: Option<ReportId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportUpdate {
    #[serde(alias = "createdAt")]
    pub updated_at: Option<DateTime<Utc>>,
    pub resolution_type: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub status: ReportStatus,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub remark_type: Option<RemarkType>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub remark_viewed: Option<bool>,
    #[serde(default)]
    pub updates: Vec<ReportUpdate>,
    #[serde(default)]
    pub assigned_to: Option<Identity>,
    #[serde(default)]
    pub reported_by: Option<Identity>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub video_urls: Vec<String>,
}

impl Report {
    pub fn reporter_username(&self) -> Option<&str> {
        self.reported_by
            .as_ref()
            .and_then(|identity| identity.username.as_deref())
    }
}
