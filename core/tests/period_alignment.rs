use chrono::NaiveDate;
use honai_core::ReportingPeriod;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// End-of-month selected dates compare against the last day of the
/// comparison month, not the same day number.
#[test]
fn end_of_month_anchors_snap_to_month_end() {
    let p = ReportingPeriod::for_date(d(2025, 2, 28));

    assert_eq!(p.prior_month_anchor, d(2025, 1, 31));
    assert_eq!(p.prior_year_anchor, d(2024, 2, 29), "2024 February is longer");
    assert_eq!(p.day_of_month, 28);
    assert_eq!(p.days_in_month, 28);
}

/// Mid-month dates keep their day number across comparisons.
#[test]
fn mid_month_anchors_keep_day_number() {
    let p = ReportingPeriod::for_date(d(2025, 2, 15));

    assert_eq!(p.prior_month_anchor, d(2025, 1, 15));
    assert_eq!(p.prior_year_anchor, d(2024, 2, 15));
    assert_eq!(p.prior_ytd_end, d(2024, 2, 15));
}

/// March 31 must land on Feb 28, not an invalid Feb 31.
#[test]
fn month_end_into_shorter_month() {
    let p = ReportingPeriod::for_date(d(2025, 3, 31));

    assert_eq!(p.prior_month_anchor, d(2025, 2, 28));
    assert_eq!(p.prior_quarter_anchor, d(2024, 12, 31));
}

/// January reports cross the year boundary for the prior month.
#[test]
fn january_prior_month_is_december() {
    let p = ReportingPeriod::for_date(d(2025, 1, 15));

    assert_eq!(p.prior_month_anchor, d(2024, 12, 15));
    assert_eq!(p.ytd_start, d(2025, 1, 1));
    assert_eq!(p.prior_ytd_start, d(2024, 1, 1));
    assert_eq!(p.ytd_sample_dates(), vec![d(2025, 1, 15)]);
}

/// YTD figures sample the last snapshot of each closed month plus the
/// anchor — the fact tables carry cumulative month-to-date values.
#[test]
fn ytd_samples_month_ends_plus_anchor() {
    let p = ReportingPeriod::for_date(d(2025, 3, 15));

    assert_eq!(
        p.ytd_sample_dates(),
        vec![d(2025, 1, 31), d(2025, 2, 28), d(2025, 3, 15)],
    );
    assert_eq!(
        p.prior_ytd_sample_dates(),
        vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 15)],
    );
}

/// Quarter-to-date sampling covers the same span of the prior quarter.
#[test]
fn qtd_samples_cover_matching_spans() {
    let p = ReportingPeriod::for_date(d(2025, 6, 15));

    assert_eq!(
        p.qtd_sample_dates(),
        vec![d(2025, 4, 30), d(2025, 5, 31), d(2025, 6, 15)],
    );
    assert_eq!(p.prior_quarter_anchor, d(2025, 3, 15));
    assert_eq!(
        p.prior_qtd_sample_dates(),
        vec![d(2025, 1, 31), d(2025, 2, 28), d(2025, 3, 15)],
    );
}

#[test]
fn run_rate_fraction_and_month_key() {
    let p = ReportingPeriod::for_date(d(2025, 6, 15));

    assert_eq!(p.run_rate_fraction(), 0.5);
    assert_eq!(p.current_month_key(), "2025-06");
}
