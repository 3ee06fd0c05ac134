use chrono::{DateTime, Datelike, TimeZone, Utc};
use sqlx::PgPool;

use crate::dto::dashboard_dto::{DashboardStatsResponse, MonthBucket, ResourceCounts};
use crate::error::{Error, Result};

pub const CHART_MONTHS: usize = 6;

#[derive(Clone)]
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn stats(&self) -> Result<DashboardStatsResponse> {
        let counts = ResourceCounts {
            jobs: self.count("jobs").await?,
            applications: self.count("applications").await?,
            projects: self.count("projects").await?,
            services: self.count("services").await?,
            contacts: self.count("contacts").await?,
        };

        let keys = trailing_month_keys(Utc::now(), CHART_MONTHS);
        let cutoff = window_start(&keys)?;
        let jobs = self.created_since("jobs", cutoff).await?;
        let projects = self.created_since("projects", cutoff).await?;

        Ok(DashboardStatsResponse {
            counts,
            monthly: bucket_monthly(&keys, &jobs, &projects),
        })
    }

    async fn count(&self, table: &str) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn created_since(
        &self,
        table: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>> {
        let stamps = sqlx::query_scalar::<_, DateTime<Utc>>(&format!(
            "SELECT created_at FROM {} WHERE created_at >= $1",
            table
        ))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(stamps)
    }
}

/// Year-month keys for the trailing `n` calendar months, oldest first, the
/// current month included.
pub fn trailing_month_keys(now: DateTime<Utc>, n: usize) -> Vec<(i32, u32)> {
    let mut keys = Vec::with_capacity(n);
    let (mut year, mut month) = (now.year(), now.month());
    for _ in 0..n {
        keys.push((year, month));
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    keys.reverse();
    keys
}

fn window_start(keys: &[(i32, u32)]) -> Result<DateTime<Utc>> {
    let (year, month) = keys
        .first()
        .copied()
        .ok_or_else(|| Error::Internal("Empty chart window".to_string()))?;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::Internal("Invalid chart window start".to_string()))
}

pub fn bucket_monthly(
    keys: &[(i32, u32)],
    jobs: &[DateTime<Utc>],
    projects: &[DateTime<Utc>],
) -> Vec<MonthBucket> {
    let count_in = |stamps: &[DateTime<Utc>], key: (i32, u32)| {
        stamps
            .iter()
            .filter(|ts| (ts.year(), ts.month()) == key)
            .count() as i64
    };

    keys.iter()
        .map(|&(year, month)| MonthBucket {
            month: month_label(month).to_string(),
            jobs: count_in(jobs, (year, month)),
            projects: count_in(projects, (year, month)),
        })
        .collect()
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}
