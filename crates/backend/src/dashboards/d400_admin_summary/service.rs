use anyhow::Result;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use contracts::dashboards::d400_admin_summary::AdminSummary;
use contracts::system::profiles::UserRole;

use crate::domain::{a001_client, a002_call, a004_order};
use crate::system::profiles;

/// Сводные показатели для панели администратора
pub async fn get_summary() -> Result<AdminSummary> {
    let (month_start, month_end) = current_month_bounds(Utc::now());

    let total_reps = profiles::repository::count_by_role(UserRole::Rep).await?;
    let active_clients = a001_client::repository::count_active().await?;
    let calls_this_month = a002_call::repository::count_between(month_start, month_end).await?;
    let pending_orders = a004_order::service::count_pending().await?;

    Ok(AdminSummary {
        total_reps,
        active_clients,
        calls_this_month,
        pending_orders,
    })
}

/// Границы календарного месяца (UTC), полуинтервал [start, end)
fn current_month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let start = date
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let end = chrono::NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    (
        Utc.from_utc_datetime(&start),
        Utc.from_utc_datetime(&end),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_cover_mid_year() {
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 13, 45, 0).unwrap();
        let (start, end) = current_month_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn month_bounds_roll_over_december() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let (start, end) = current_month_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }
}
