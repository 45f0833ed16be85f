//! Core domain model for ClickFix: service-provider profiles, bookings and the job lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CRATE_NAME: &str = "clickfix-core";

/// Category filter value that matches every worker.
pub const ALL_CATEGORIES: &str = "All";

pub type WorkerId = String;
pub type CustomerId = String;
pub type JobId = String;

/// Customer-facing progress steps, in display order.
pub const TIMELINE_STEPS: [&str; 5] = [
    "Request Sent",
    "Worker Accepted",
    "On the Way",
    "In Progress",
    "Job Completed",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user: String,
    pub text: String,
    pub rating: f64,
}

/// Service-provider profile. Immutable once loaded into a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub category: String,
    pub rating: f64,
    pub hourly_rate: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Worker {
    /// Case-insensitive substring match against name or category. An empty query matches.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.category.to_lowercase().contains(&needle)
    }

    /// Exact category match, or any category when the filter is [`ALL_CATEGORIES`].
    pub fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.category == category
    }
}

/// Lifecycle stage of a job.
///
/// Labels outside the known set are kept verbatim in [`JobStatus::Other`] so that
/// records coming from elsewhere survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Accepted,
    Rejected,
    InProgress,
    Completed,
    Cancelled,
    /// Mapped to [`BookingCategory::Upcoming`] but never reached by a transition.
    Upcoming,
    Other(String),
}

impl JobStatus {
    pub fn as_label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Upcoming => "Upcoming",
            Self::Other(label) => label,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "Pending" => Self::Pending,
            "Accepted" => Self::Accepted,
            "Rejected" => Self::Rejected,
            "In Progress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Cancelled" => Self::Cancelled,
            "Upcoming" => Self::Upcoming,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    /// Whether the lifecycle table permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: &JobStatus) -> bool {
        use JobStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Accepted, InProgress)
                | (Accepted, Completed)
                | (Accepted, Cancelled)
                | (InProgress, Completed)
        )
    }

    pub fn category(&self) -> BookingCategory {
        match self {
            Self::Pending | Self::Accepted | Self::InProgress => BookingCategory::Ongoing,
            Self::Upcoming => BookingCategory::Upcoming,
            Self::Completed => BookingCategory::Completed,
            Self::Rejected | Self::Cancelled => BookingCategory::Cancelled,
            Self::Other(_) => BookingCategory::Ongoing,
        }
    }

    /// Index into [`TIMELINE_STEPS`]. "On the Way" has no status of its own.
    pub fn timeline_step(&self) -> usize {
        match self {
            Self::Accepted => 1,
            Self::InProgress => 3,
            Self::Completed => 4,
            _ => 0,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl From<String> for JobStatus {
    fn from(label: String) -> Self {
        match Self::from_label(&label) {
            Self::Other(_) => Self::Other(label),
            known => known,
        }
    }
}

impl From<&str> for JobStatus {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(label) => label,
            known => known.as_label().to_string(),
        }
    }
}

/// Customer booking tab, derived from status and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingCategory {
    Ongoing,
    Upcoming,
    Completed,
    Cancelled,
}

impl BookingCategory {
    pub const ALL: [BookingCategory; 4] = [
        BookingCategory::Ongoing,
        BookingCategory::Upcoming,
        BookingCategory::Completed,
        BookingCategory::Cancelled,
    ];

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Upcoming => "Upcoming",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Case-insensitive lookup by tab label.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for BookingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Booking record. Worker name, category and rate are snapshots taken at booking time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub customer_id: CustomerId,
    pub worker_id: WorkerId,
    pub worker_name: String,
    /// Worker category at booking time.
    pub service: String,
    pub description: String,
    pub status: JobStatus,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub price: f64,
    #[serde(default)]
    pub attached_media: Vec<String>,
}

impl Job {
    pub fn category(&self) -> BookingCategory {
        self.status.category()
    }

    pub fn timeline_step(&self) -> usize {
        self.status.timeline_step()
    }
}
