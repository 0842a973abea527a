//! Fortnightly pay period calendar.
//!
//! Periods are derived, never stored: entry i has pay date
//! `anchor + i * 14 days`, and its master document is expected at
//! `<master_dir>/<DD-Mon-YYYY>.pdf`. Availability is an existence check
//! against that path at call time — deliberately not cached, the directory
//! is small and call frequency low.

use chrono::{Days, NaiveDate};
use std::path::Path;

use crate::models::PayPeriod;

/// Interval between pay dates, in days.
const PERIOD_DAYS: u64 = 14;

/// Format a pay date the way master documents are named, e.g. "24-Jul-2025".
pub fn pay_date_label(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// Generate `count` pay periods starting at `anchor`, checking each period's
/// master document under `master_dir`.
pub fn generate(anchor: NaiveDate, count: usize, master_dir: &Path) -> Vec<PayPeriod> {
    (0..count)
        .map(|i| {
            // Anchor + i fortnights never overflows NaiveDate for sane counts.
            let pay_date = anchor
                .checked_add_days(Days::new(i as u64 * PERIOD_DAYS))
                .unwrap_or(anchor);
            let label = pay_date_label(pay_date);
            let filepath = master_dir.join(format!("{label}.pdf"));
            let available = filepath.exists();
            PayPeriod {
                pay_date,
                label,
                filepath,
                available,
            }
        })
        .collect()
}
