//! Day-precise calendar arithmetic for payment projection
//!
//! Dates are `YYYY-Mmm-DD`, not number of seconds. Jumps by months or years
//! never overflow into the following month: a day that does not exist in the
//! target month is truncated to the last day of that month.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A date with day-precision
///
/// Supports years in the range 1000..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: u16,
    month: Month,
    day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:02}", self.year, self.month, self.day)
    }
}

/// Twelve months in the year, identified by their 3-letter abbreviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, PartialOrd, Ord)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Month from its zero-based position in the year, with wrapping
    pub fn nth(idx: usize) -> Self {
        // always in range after the modulo
        Self::from_usize(idx % 12).unwrap_or(Month::Jan)
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => {
                if is_leap(year) {
                    29
                } else {
                    28
                }
            }
        }
    }
}

impl FromStr for Month {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        use Month::*;
        Ok(match s {
            "Jan" => Jan,
            "Feb" => Feb,
            "Mar" => Mar,
            "Apr" => Apr,
            "May" => May,
            "Jun" => Jun,
            "Jul" => Jul,
            "Aug" => Aug,
            "Sep" => Sep,
            "Oct" => Oct,
            "Nov" => Nov,
            "Dec" => Dec,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Ways in which a date taken from user input can be wrong
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DateError {
    /// year is outside of 1000..=9999
    #[error("{0} is outside of the supported range for years")]
    UnsupportedYear(usize),
    /// Feb 29 of a non-leap year
    #[error("{0} is not bissextile, Feb 29 does not exist")]
    NotBissextile(usize),
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    #[error("{0} is a short month, it does not have a {1}th day")]
    MonthTooShort(Month, usize),
    /// day outside of 1..=31
    #[error("{0} is not a valid day")]
    InvalidDay(usize),
    /// text is not of the form `YYYY-Mmm-DD`
    #[error("'{0}' is not a date of the form YYYY-Mmm-DD")]
    Malformed(String),
}

impl Date {
    /// Validate year-month-day into date
    pub fn from(year: usize, month: Month, day: usize) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            Err(DateError::UnsupportedYear(year))
        } else if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as usize {
            Ok(Self {
                year: year as u16,
                month,
                day: day as u8,
            })
        } else if day >= 30 {
            Err(DateError::MonthTooShort(month, day))
        } else {
            Err(DateError::NotBissextile(year))
        }
    }

    /// Build a date, truncating `day` to the length of the month
    ///
    /// `day` is expected in 1..=31; 0 is raised to 1.
    pub fn clamped(year: u16, month: Month, day: u8) -> Self {
        Self {
            year,
            month,
            day: day.clamp(1, month.count(year)),
        }
    }

    /// Current local date, read through the system clock
    pub fn today() -> Self {
        use chrono::Datelike;
        let now = chrono::Local::now().date_naive();
        Self::clamped(
            now.year().clamp(1000, 9999) as u16,
            Month::nth(now.month0() as usize),
            now.day() as u8,
        )
    }

    /// `self.day` accessor
    pub fn day(&self) -> u8 {
        self.day
    }

    /// `self.month` accessor
    pub fn month(&self) -> Month {
        self.month
    }

    /// `self.year` accessor
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Biject the dates with integers, consecutive days having
    /// consecutive indices
    pub fn index(self) -> usize {
        let leaps = {
            let years = if self.month <= Month::Feb {
                self.year as usize - 1
            } else {
                self.year as usize
            };
            // count leap years before current
            (years / 4) - (years / 100) + (years / 400)
        };
        let mut n = self.year as usize * 365 + self.day as usize;
        // partially elapsed current year
        n += [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334][self.month as usize];
        n += leaps;
        n
    }

    /// Signed number of days from `self` to `other`
    pub fn days_to(self, other: Self) -> i64 {
        other.index() as i64 - self.index() as i64
    }

    /// `count` months before/after current date
    ///
    /// Day will be truncated to fit in the new month:
    /// adding one month to `2000-Jan-31` makes it `2000-Feb-29`
    pub fn jump_month(self, count: isize) -> Self {
        let total = self.year as isize * 12 + self.month as isize + count;
        let year = total.div_euclid(12) as u16;
        let month = Month::nth(total.rem_euclid(12) as usize);
        Self::clamped(year, month, self.day)
    }

    /// `count` years before/after current date
    ///
    /// Day will be truncated in the rare case it is needed:
    /// adding one year to `2000-Feb-29` makes it `2001-Feb-28`
    pub fn jump_year(self, count: isize) -> Self {
        let year = (self.year as isize + count) as u16;
        Self::clamped(year, self.month, self.day)
    }

    /// Same year and month, `day` truncated to the length of the month
    pub fn with_day_clamped(self, day: u8) -> Self {
        Self::clamped(self.year, self.month, day)
    }

    /// Same year and day (truncated), different month
    pub fn with_month_clamped(self, month: Month) -> Self {
        Self::clamped(self.year, month, self.day)
    }
}

/// Day-by-day navigation, only used to check `index`
#[cfg(test)]
impl Date {
    fn next(self) -> Self {
        if self.month.count(self.year) == self.day {
            if self.month == Month::Dec {
                Self {
                    year: self.year + 1,
                    month: Month::Jan,
                    day: 1,
                }
            } else {
                Self {
                    month: Month::nth(self.month as usize + 1),
                    day: 1,
                    ..self
                }
            }
        } else {
            Self {
                day: self.day + 1,
                ..self
            }
        }
    }

    fn prev(self) -> Self {
        if self.day == 1 {
            if self.month == Month::Jan {
                Self {
                    year: self.year - 1,
                    month: Month::Dec,
                    day: 31,
                }
            } else {
                let month = Month::nth(self.month as usize + 11);
                Self {
                    month,
                    day: month.count(self.year),
                    ..self
                }
            }
        } else {
            Self {
                day: self.day - 1,
                ..self
            }
        }
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parse `YYYY-Mmm-DD`, e.g. `2023-Jan-05`
    fn from_str(s: &str) -> Result<Self, DateError> {
        let malformed = || DateError::Malformed(s.to_string());
        let mut parts = s.trim().split('-');
        let year = parts.next().and_then(|y| y.parse::<usize>().ok());
        let month = parts.next().and_then(|m| m.parse::<Month>().ok());
        let day = parts.next().and_then(|d| d.parse::<usize>().ok());
        match (year, month, day, parts.next()) {
            (Some(year), Some(month), Some(day), None) => Date::from(year, month, day),
            _ => Err(malformed()),
        }
    }
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl DateError {
    /// What message to show to help fix the date error
    pub fn fix_hint(&self) -> String {
        use DateError::*;
        match self {
            UnsupportedYear(_) => "year should be between 1000 and 9999 inclusive".to_string(),
            NotBissextile(y) => format!("did you mean {y}-Feb-28 or {y}-Mar-01 ?", y = y),
            MonthTooShort(m, d) => format!(
                "{} is only {} days long",
                m,
                if *m == Month::Feb { 28.max(d - 1) } else { 30 }
            ),
            InvalidDay(d) => format!("{} is not in the range 1 ..= 31", d),
            Malformed(_) => "write dates as YYYY-Mmm-DD, e.g. 2023-Jan-05".to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Month::*, *};

    #[test]
    fn bissextile_check() {
        macro_rules! yes {
            ( $y:expr ) => { assert!(is_leap($y)); }
        }
        macro_rules! no {
            ( $y:expr ) => { assert!(!is_leap($y)); }
        }
        yes!(2004);
        no!(2100);
        yes!(2000);
        no!(2001);
        yes!(2024);
        no!(2026);
    }

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from($y, $m, $d).unwrap()
        };
    }

    #[test]
    fn validation() {
        assert_eq!(Date::from(2021, Feb, 29), Err(DateError::NotBissextile(2021)));
        assert_eq!(Date::from(2020, Apr, 31), Err(DateError::MonthTooShort(Apr, 31)));
        assert_eq!(Date::from(2020, Jan, 0), Err(DateError::InvalidDay(0)));
        assert_eq!(Date::from(999, Jan, 1), Err(DateError::UnsupportedYear(999)));
        assert!(Date::from(2020, Feb, 29).is_ok());
    }

    #[test]
    fn index_consistent() {
        let mut d = dt!(2000-Jan-1);
        let end = dt!(2100-Dec-31);
        while d < end {
            let ds = d.next();
            assert_eq!(d.index() + 1, ds.index(), "date {}, successor {}", d, ds);
            assert_eq!(ds.prev(), d);
            d = ds;
        }
    }

    #[test]
    fn days_between() {
        assert_eq!(dt!(2026-Oct-14).days_to(dt!(2026-Oct-14)), 0);
        assert_eq!(dt!(2026-Oct-14).days_to(dt!(2026-Nov-1)), 18);
        assert_eq!(dt!(2024-Feb-1).days_to(dt!(2024-Mar-1)), 29);
        assert_eq!(dt!(2026-Jan-1).days_to(dt!(2025-Dec-31)), -1);
    }

    macro_rules! jmonth {
        ( $d1:expr, $n:expr, <->, $d2:expr ) => {{
            assert_eq!($d1.jump_month($n), $d2);
            assert_eq!($d2.jump_month(-$n), $d1);
        }};
        ( $d1:expr, $n:expr, ->, $d2:expr ) => {{
            assert_eq!($d1.jump_month($n), $d2);
        }};
    }

    #[test]
    fn jump_month() {
        jmonth!(dt!(2020-Jan-1), 2, <->, dt!(2020-Mar-1));
        jmonth!(dt!(2020-Dec-1), 1, <->, dt!(2021-Jan-1));
        jmonth!(dt!(2020-Dec-30), 1, <->, dt!(2021-Jan-30));
        jmonth!(dt!(2020-Mar-31), 1, ->, dt!(2020-Apr-30));
        jmonth!(dt!(2019-Dec-31), 2, ->, dt!(2020-Feb-29));
        jmonth!(dt!(2021-Jan-31), 1, ->, dt!(2021-Feb-28));
        jmonth!(dt!(2026-Nov-30), 3, ->, dt!(2027-Feb-28));
        jmonth!(dt!(2020-Jan-15), 25, <->, dt!(2022-Feb-15));
    }

    #[test]
    fn jump_year() {
        assert_eq!(dt!(2020-Jan-1).jump_year(1), dt!(2021-Jan-1));
        assert_eq!(dt!(2020-Feb-29).jump_year(5), dt!(2025-Feb-28));
        assert_eq!(dt!(2020-Feb-29).jump_year(4), dt!(2024-Feb-29));
    }

    #[test]
    fn clamping() {
        assert_eq!(dt!(2026-Feb-3).with_day_clamped(31), dt!(2026-Feb-28));
        assert_eq!(dt!(2026-Apr-3).with_day_clamped(31), dt!(2026-Apr-30));
        assert_eq!(dt!(2026-Jan-31).with_month_clamped(Jun), dt!(2026-Jun-30));
        assert_eq!(dt!(2024-Feb-12).with_day_clamped(31), dt!(2024-Feb-29));
    }

    #[test]
    fn parse() {
        assert_eq!("2023-Jan-05".parse::<Date>(), Ok(dt!(2023-Jan-5)));
        assert_eq!("2024-Feb-29".parse::<Date>(), Ok(dt!(2024-Feb-29)));
        assert_eq!("2023-Feb-29".parse::<Date>(), Err(DateError::NotBissextile(2023)));
        assert!(matches!("2023-01-05".parse::<Date>(), Err(DateError::Malformed(_))));
        assert!(matches!("2023-Jan".parse::<Date>(), Err(DateError::Malformed(_))));
        assert_eq!(format!("{}", dt!(2023-Jan-5)), "2023-Jan-05");
    }
}
