use form_forge_core::types::SubmissionRecord;
use serde::{Deserialize, Serialize};

/// Largest page a caller may request.
pub const MAX_LIMIT: u32 = 100;
/// Page size used when none is given.
pub const DEFAULT_LIMIT: u32 = 10;

/// A 1-based page request. Out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Builds a request, clamping `page` to at least 1 and `limit` to
    /// `1..=MAX_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records before this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_LIMIT)
    }
}

/// One page of submissions for a form, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPage {
    pub submissions: Vec<SubmissionRecord>,
    pub page: u32,
    pub limit: u32,
    /// Submissions stored for the form across all pages.
    pub total: usize,
    /// `ceil(total / limit)`; zero when nothing is stored.
    pub pages: usize,
}

impl SubmissionPage {
    /// Cuts the requested page out of `newest_first`.
    pub fn slice(newest_first: Vec<SubmissionRecord>, request: PageRequest) -> Self {
        let total = newest_first.len();
        let limit = request.limit() as usize;
        let submissions = newest_first
            .into_iter()
            .skip(request.offset())
            .take(limit)
            .collect();
        Self {
            submissions,
            page: request.page(),
            limit: request.limit(),
            total,
            pages: total.div_ceil(limit),
        }
    }
}
