use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the repository when an application is first stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobApplicationId(pub i64);

impl fmt::Display for JobApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an application currently stands. Stored and sent over the wire by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewing,
    Offered,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offered,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offered => "Offered",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Raised when text does not name one of the known statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

/// Field values that passed validation but have not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobApplication {
    pub company_name: String,
    pub position: String,
    pub status: ApplicationStatus,
    pub date_applied: NaiveDate,
}

/// A stored job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: JobApplicationId,
    pub company_name: String,
    pub position: String,
    pub status: ApplicationStatus,
    pub date_applied: NaiveDate,
}

impl JobApplication {
    pub fn from_draft(id: JobApplicationId, draft: NewJobApplication) -> Self {
        let NewJobApplication {
            company_name,
            position,
            status,
            date_applied,
        } = draft;
        Self {
            id,
            company_name,
            position,
            status,
            date_applied,
        }
    }

    /// Overwrite every mutable field with the draft's values. The id is never touched.
    pub fn apply(&mut self, draft: NewJobApplication) {
        self.company_name = draft.company_name;
        self.position = draft.position;
        self.status = draft.status;
        self.date_applied = draft.date_applied;
    }
}

/// One page of results plus the totals needed to render a pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, page_number: u32, page_size: u32, total_count: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(u64::from(page_size))
        };
        Self {
            data,
            page_number,
            page_size,
            total_count,
            total_pages,
        }
    }
}
