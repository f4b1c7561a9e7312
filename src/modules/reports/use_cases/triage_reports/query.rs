use crate::modules::reports::core::filter::ReportFilter;
use crate::modules::reports::core::ports::{PageRequest, ReportKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageReports {
    pub kind: ReportKind,
    pub page: PageRequest,
    pub filter: ReportFilter,
}

impl TriageReports {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            page: PageRequest::default(),
            filter: ReportFilter::default(),
        }
    }

    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = PageRequest { page, size };
        self
    }

    pub fn filter(mut self, filter: ReportFilter) -> Self {
        self.filter = filter;
        self
    }
}
