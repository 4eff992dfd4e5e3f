//! Reporting period derivation — all comparison anchors fall out of one
//! selected date.
//!
//! END-OF-MONTH RULE: when the selected date is the last calendar day of
//! its month, every comparison anchor snaps to the last day of its own
//! month (2025-02-28 compares against 2025-01-31, not 2025-01-28). This
//! changes which daily snapshot row is selected and must never be
//! "simplified" into plain same-day-number arithmetic.
//!
//! Fact tables are daily snapshots carrying cumulative month-to-date
//! values, so a year-to-date or quarter-to-date sum samples the last
//! snapshot of each closed month plus the anchor itself, never adding up
//! every daily row.

use crate::types::YearMonth;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportingPeriod {
    pub selected_date:       NaiveDate,
    pub current_anchor:      NaiveDate,
    pub prior_month_anchor:  NaiveDate,
    pub prior_year_anchor:   NaiveDate,
    pub prior_quarter_anchor: NaiveDate,
    pub ytd_start:           NaiveDate,
    pub prior_ytd_start:     NaiveDate,
    pub prior_ytd_end:       NaiveDate,
    pub day_of_month:        u32,
    pub days_in_month:       u32,
}

impl ReportingPeriod {
    /// Derive every comparison anchor from one selected date.
    /// Pure, no I/O. Domain bounds (pre-rollout dates) are the caller's
    /// responsibility.
    pub fn for_date(selected: NaiveDate) -> Self {
        let days_in_month = last_day_of(selected.year(), selected.month()).day();
        let day_of_month = selected.day();
        let is_end_of_month = day_of_month == days_in_month;

        let prior_month_anchor = if is_end_of_month {
            // Day before the first of this month is the last day of the
            // prior month, whatever its length.
            month_start(selected.year(), selected.month()) - chrono::Duration::days(1)
        } else {
            sub_months(selected, 1)
        };

        let prior_year_anchor = if is_end_of_month {
            last_day_of(selected.year() - 1, selected.month())
        } else {
            // Feb 29 is always end-of-month, so the same day number
            // exists in every prior year here.
            sub_months(selected, 12)
        };

        let prior_quarter_anchor = if is_end_of_month {
            let back = sub_months(month_start(selected.year(), selected.month()), 3);
            last_day_of(back.year(), back.month())
        } else {
            sub_months(selected, 3)
        };

        ReportingPeriod {
            selected_date: selected,
            current_anchor: selected,
            prior_month_anchor,
            prior_year_anchor,
            prior_quarter_anchor,
            ytd_start: month_start(selected.year(), 1),
            prior_ytd_start: month_start(selected.year() - 1, 1),
            prior_ytd_end: prior_year_anchor,
            day_of_month,
            days_in_month,
        }
    }

    /// Days-elapsed over days-in-month, the pro-rata factor behind DRR.
    pub fn run_rate_fraction(&self) -> f64 {
        self.day_of_month as f64 / self.days_in_month as f64
    }

    /// `yyyy-mm` key of the month under report, as the target table keys it.
    pub fn current_month_key(&self) -> YearMonth {
        format!("{:04}-{:02}", self.current_anchor.year(), self.current_anchor.month())
    }

    /// Snapshot dates whose sum is the current year-to-date figure:
    /// the last day of each closed month since Jan 1, then the anchor.
    pub fn ytd_sample_dates(&self) -> Vec<NaiveDate> {
        snapshot_samples(self.ytd_start, self.current_anchor)
    }

    /// Snapshot dates for the prior-year year-to-date figure, covering
    /// the same span one year back.
    pub fn prior_ytd_sample_dates(&self) -> Vec<NaiveDate> {
        snapshot_samples(self.prior_ytd_start, self.prior_ytd_end)
    }

    /// Snapshot dates for the current quarter-to-date figure.
    pub fn qtd_sample_dates(&self) -> Vec<NaiveDate> {
        snapshot_samples(quarter_start(self.current_anchor), self.current_anchor)
    }

    /// Snapshot dates for the prior quarter, same span.
    pub fn prior_qtd_sample_dates(&self) -> Vec<NaiveDate> {
        snapshot_samples(quarter_start(self.prior_quarter_anchor), self.prior_quarter_anchor)
    }
}

/// Last snapshot of each closed month from `start`'s month up to the
/// anchor's month, then the anchor itself.
fn snapshot_samples(start: NaiveDate, anchor: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut cursor = month_start(start.year(), start.month());
    let anchor_month = month_start(anchor.year(), anchor.month());
    while cursor < anchor_month {
        dates.push(last_day_of(cursor.year(), cursor.month()));
        cursor = add_months(cursor, 1);
    }
    dates.push(anchor);
    dates
}

fn quarter_start(date: NaiveDate) -> NaiveDate {
    let first_month = (date.month0() / 3) * 3 + 1;
    month_start(date.year(), first_month)
}

fn month_start(year: i32, month: u32) -> NaiveDate {
    // Month is always 1..=12 here; the expect states the invariant.
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date")
}

fn last_day_of(year: i32, month: u32) -> NaiveDate {
    add_months(month_start(year, month), 1) - chrono::Duration::days(1)
}

fn add_months(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_add_months(Months::new(n))
        .expect("date stays within the calendar range")
}

fn sub_months(date: NaiveDate, n: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(n))
        .expect("date stays within the calendar range")
}
