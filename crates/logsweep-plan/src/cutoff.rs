//! Cutoff date resolution.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use logsweep_core::Cutoff;

/// Resolved boundary date. Files dated on or before it qualify for
/// archival; files dated after it are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffDate(NaiveDate);

impl CutoffDate {
    /// Resolve an age in days against `today`.
    ///
    /// The raw boundary (`today - days`) is widened to the last day of the
    /// month it falls in, so a month is always archived whole: either every
    /// dated file of that month qualifies or none does.
    pub fn from_age_days(today: NaiveDate, days: u32) -> Self {
        let raw = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(today);
        Self(month_end(raw))
    }

    /// Use an absolute boundary date verbatim.
    pub fn absolute(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Resolve a configured cutoff against `today`.
    pub fn resolve(cutoff: Cutoff, today: NaiveDate) -> Self {
        match cutoff {
            Cutoff::AgeDays(days) => Self::from_age_days(today, days),
            Cutoff::Before(date) => Self::absolute(date),
        }
    }

    /// Whether a file dated `date` qualifies for archival.
    pub fn includes(&self, date: NaiveDate) -> bool {
        date <= self.0
    }

    /// The boundary date itself.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for CutoffDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Last day of the month containing `date`.
fn month_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_cutoff_clamps_to_month_end() {
        // 90 days before 2024-06-15 is 2024-03-17; the boundary widens to
        // the end of March.
        let cutoff = CutoffDate::from_age_days(date(2024, 6, 15), 90);
        assert_eq!(cutoff.date(), date(2024, 3, 31));
    }

    #[test]
    fn test_month_end_handles_february() {
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(month_end(date(2023, 2, 10)), date(2023, 2, 28));
        assert_eq!(month_end(date(2024, 12, 1)), date(2024, 12, 31));
    }

    #[test]
    fn test_includes_is_on_or_before() {
        let cutoff = CutoffDate::absolute(date(2024, 3, 31));
        assert!(cutoff.includes(date(2024, 3, 31)));
        assert!(cutoff.includes(date(2024, 1, 1)));
        assert!(!cutoff.includes(date(2024, 4, 1)));
    }

    #[test]
    fn test_absolute_cutoff_is_verbatim() {
        let cutoff = CutoffDate::resolve(Cutoff::Before(date(2024, 3, 15)), date(2024, 6, 15));
        assert_eq!(cutoff.date(), date(2024, 3, 15));
        assert!(!cutoff.includes(date(2024, 3, 16)));
    }

    #[test]
    fn test_zero_age_covers_current_month() {
        let cutoff = CutoffDate::from_age_days(date(2024, 6, 15), 0);
        assert_eq!(cutoff.date(), date(2024, 6, 30));
    }
}
