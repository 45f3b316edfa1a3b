use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use civildiff::{
    compare, time_between, time_between_str, truncate_time, CalendarField, CivilMoment, Error,
    Instant, IntervalUnit, Zone,
};
use std::cmp::Ordering;

/// Whole months from `from` to `to` counted by stepping forward with
/// clamped month addition, independent of civildiff.
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let (lo, hi, sign) = if from <= to {
        (from, to, 1)
    } else {
        (to, from, -1)
    };
    let mut n = i64::from(hi.year() - lo.year()) * 12 + i64::from(hi.month0())
        - i64::from(lo.month0());
    while n > 0 && lo + Months::new(n as u32) > hi {
        n -= 1;
    }
    sign * n
}

fn years_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let (lo, hi, sign) = if from <= to {
        (from, to, 1)
    } else {
        (to, from, -1)
    };
    let mut n = i64::from(hi.year() - lo.year());
    while n > 0 && lo + Months::new(12 * n as u32) > hi {
        n -= 1;
    }
    sign * n
}

fn ny_midnight(date: NaiveDate) -> DateTime<chrono_tz::Tz> {
    New_York
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .expect("New York midnight is unambiguous")
}

fn civil(datetime: &DateTime<chrono_tz::Tz>, zone: &Zone) -> CivilMoment {
    CivilMoment::new(Instant::from_utc(datetime.with_timezone(&Utc)), zone.clone())
}

#[test]
fn ten_years_of_start_dates_match_independent_calendar_math() {
    let zone = Zone::from(New_York);
    let start = NaiveDate::from_ymd_opt(1995, 1, 1).unwrap();
    let end_date = NaiveDate::from_ymd_opt(2000, 10, 5).unwrap();
    let end_dt = ny_midnight(end_date);
    let end = civil(&end_dt, &zone);

    let first = civil(&ny_midnight(start), &zone);
    assert_eq!(time_between(&first, &end, IntervalUnit::Years), 5);
    assert_eq!(time_between(&first, &end, IntervalUnit::Months), 69);

    for i in 1..3650 {
        let date = start + chrono::Duration::days(i);
        let start_dt = ny_midnight(date);
        let moment = civil(&start_dt, &zone);
        let elapsed = end_dt - start_dt;
        let days = (end_date - date).num_days();

        let expected = [
            (IntervalUnit::Years, years_between(date, end_date)),
            (IntervalUnit::Months, months_between(date, end_date)),
            (IntervalUnit::Weeks, days / 7),
            (IntervalUnit::Days, days),
            (IntervalUnit::Hours, elapsed.num_hours()),
            (IntervalUnit::Minutes, elapsed.num_minutes()),
            (IntervalUnit::Seconds, elapsed.num_seconds()),
        ];
        for (unit, want) in expected {
            assert_eq!(
                time_between(&moment, &end, unit),
                want,
                "{unit} from {date} to {end_date}"
            );
        }
    }
}

#[test]
fn string_overload_matches_moment_overload() {
    let zone = Zone::named("Europe/Athens").unwrap();
    let start = CivilMoment::from_ymd(zone.clone(), 2001, 3, 25).unwrap();
    let end = CivilMoment::from_ymd(zone.clone(), 2004, 10, 31).unwrap();
    for unit in IntervalUnit::ALL {
        assert_eq!(
            time_between_str("2001/03/25", "2004/10/31", unit, "%Y/%m/%d", &zone),
            Ok(time_between(&start, &end, unit)),
            "{unit}"
        );
    }
}

#[test]
fn malformed_text_is_reported() {
    let result = time_between_str(
        "2001-03-25",
        "2004/10/31",
        IntervalUnit::Days,
        "%Y/%m/%d",
        &Zone::utc(),
    );
    assert!(matches!(result, Err(Error::Parse { ref input, .. }) if input == "2001-03-25"));
}

#[test]
fn southern_hemisphere_days_are_whole() {
    let zone = Zone::named("Australia/Sydney").unwrap();
    // Sydney moves clocks back on 2024-04-07 and forward on 2024-10-06.
    let april = CivilMoment::from_ymd(zone.clone(), 2024, 4, 6).unwrap();
    let october = CivilMoment::from_ymd(zone.clone(), 2024, 10, 7).unwrap();
    assert_eq!(time_between(&april, &october, IntervalUnit::Days), 184);
    assert_eq!(time_between(&april, &october, IntervalUnit::Months), 6);
    let next_day = april.with_added(CalendarField::DayOfMonth, 1);
    assert_eq!(time_between(&april, &next_day, IntervalUnit::Hours), 25);
}

#[test]
fn truncated_moments_compare_equal_to_midnight() {
    let zone = Zone::named("Europe/Berlin").unwrap();
    let utc = Utc.with_ymd_and_hms(2024, 6, 1, 15, 42, 7).unwrap();
    let mut moment = CivilMoment::new(Instant::from_utc(utc), zone.clone());
    let midnight = CivilMoment::from_ymd(zone, 2024, 6, 1).unwrap();
    assert_eq!(compare(&*truncate_time(&mut moment), &midnight), Ordering::Equal);
}
