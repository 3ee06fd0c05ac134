use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCounts {
    pub jobs: i64,
    pub applications: i64,
    pub projects: i64,
    pub services: i64,
    pub contacts: i64,
}

/// One calendar month of the trailing-six-month bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Short month name, e.g. "Jan".
    pub month: String,
    pub jobs: i64,
    pub projects: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    pub counts: ResourceCounts,
    pub monthly: Vec<MonthBucket>,
}
