//! Sampling of one query date per mission year.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;

use crate::error::Error;

/// Inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, Error> {
        if end < start {
            return Err(Error::config(format!(
                "end year {end} is before start year {start}"
            )));
        }
        for year in [start, end] {
            // Dec 31 of `end` plus one day must stay representable.
            if NaiveDate::from_ymd_opt(year, 1, 1).is_none()
                || NaiveDate::from_ymd_opt(year + 1, 1, 1).is_none()
            {
                return Err(Error::config(format!("year {year} is out of range")));
            }
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> i32 {
        self.start
    }

    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Number of years covered, always at least one.
    pub const fn year_count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

/// Draws one uniformly distributed day from each year in `range`, in year order.
pub fn sample_dates<R: Rng + ?Sized>(range: YearRange, rng: &mut R) -> Vec<NaiveDate> {
    range.years().map(|year| random_day_in(year, rng)).collect()
}

fn random_day_in<R: Rng + ?Sized>(year: i32, rng: &mut R) -> NaiveDate {
    // YearRange::new guarantees both bounds exist.
    let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let next = NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap_or(NaiveDate::MAX);
    let days_in_year = next.signed_duration_since(first).num_days().max(1) as u64;
    let offset = rng.random_range(0..days_in_year);
    first
        .checked_add_days(Days::new(offset))
        .filter(|d| d.year() == year)
        .unwrap_or(first)
}

/// Wire format used in `earth_date` query parameters.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn one_date_per_year_within_its_year() {
        let range = YearRange::new(2012, 2023).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let dates = sample_dates(range, &mut rng);
            assert_eq!(dates.len(), 12);
            for (date, year) in dates.iter().zip(2012..=2023) {
                assert_eq!(date.year(), year);
            }
        }
    }

    #[test]
    fn formatted_dates_are_iso() {
        let range = YearRange::new(1999, 2001).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for date in sample_dates(range, &mut rng) {
            let s = format_date(date);
            assert_eq!(s.len(), 10);
            assert_eq!(&s[4..5], "-");
            assert_eq!(&s[7..8], "-");
            assert_eq!(NaiveDate::parse_from_str(&s, "%Y-%m-%d").unwrap(), date);
            assert_eq!(s, date.to_string());
        }
    }

    #[test]
    fn single_year_range() {
        let range = YearRange::new(2020, 2020).unwrap();
        assert_eq!(range.year_count(), 1);
        let mut rng = StdRng::seed_from_u64(0);
        let dates = sample_dates(range, &mut rng);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].year(), 2020);
    }

    #[test]
    fn leap_day_is_reachable() {
        let range = YearRange::new(2016, 2016).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let leap_day = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
        let new_years_eve = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();
        let mut seen_leap = false;
        let mut seen_last = false;
        for _ in 0..20_000 {
            let d = sample_dates(range, &mut rng)[0];
            seen_leap |= d == leap_day;
            seen_last |= d == new_years_eve;
        }
        assert!(seen_leap);
        assert!(seen_last);
    }

    #[test]
    fn same_seed_same_dates() {
        let range = YearRange::new(2012, 2015).unwrap();
        let a = sample_dates(range, &mut StdRng::seed_from_u64(99));
        let b = sample_dates(range, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = YearRange::new(2023, 2012).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("before start year"));
    }
}
