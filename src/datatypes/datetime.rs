// ABOUTME: SMPP time values in YYMMDDhhmmsstnnp format, absolute or relative
// ABOUTME: Parses SMSC-supplied timestamps and builds validated schedule/validity fields

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, TimeZone, Timelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Length of a non-empty SMPP time field, excluding the NUL terminator.
pub const SMPP_TIME_LEN: usize = 16;

lazy_static! {
    static ref SMPP_TIME: Regex =
        Regex::new(r"^(\d{2})(\d{2})(\d{2})(\d{2})(\d{2})(\d{2})(\d)(\d{2})([R+-])$")
            .expect("valid SMPP time regex");
}

/// Relative period from an `R`-suffixed SMPP time (SMPP v3.4 §7.1.1.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RelativePeriod {
    pub years: u8,
    pub months: u8,
    pub days: u8,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl RelativePeriod {
    /// Adds this period to `base`; `None` if the result is out of range.
    pub fn apply_to(&self, base: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = u32::from(self.years) * 12 + u32::from(self.months);
        let seconds = i64::from(self.days) * 86_400
            + i64::from(self.hours) * 3_600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);

        base.checked_add_months(Months::new(months))?
            .checked_add_signed(Duration::seconds(seconds))
    }
}

impl fmt::Display for RelativePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}{:02}{:02}{:02}{:02}{:02}000R",
            self.years, self.months, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// A decoded SMPP time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmppTime {
    Absolute(DateTime<FixedOffset>),
    Relative(RelativePeriod),
}

impl SmppTime {
    /// Resolves the time to UTC, relative periods counted from `now`.
    pub fn to_utc(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            SmppTime::Absolute(at) => Some(at.with_timezone(&Utc)),
            SmppTime::Relative(period) => period.apply_to(now),
        }
    }
}

/// Parses a `YYMMDDhhmmsstnnp` timestamp.
///
/// `p` is `R` for a relative period, otherwise `+`/`-` with `nn` quarter
/// hours of offset from UTC. Malformed input, impossible calendar values and
/// offsets of a day or more all yield `None`.
pub fn parse_smpp_time(input: &str) -> Option<SmppTime> {
    let caps = SMPP_TIME.captures(input)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let (yy, mm, dd) = (field(1)?, field(2)?, field(3)?);
    let (hh, mi, ss) = (field(4)?, field(5)?, field(6)?);
    let tenths = field(7)?;
    let quarters = field(8)?;
    let direction = caps.get(9)?.as_str();

    if direction == "R" {
        // every captured field is two digits, so each fits in a u8
        return Some(SmppTime::Relative(RelativePeriod {
            years: yy as u8,
            months: mm as u8,
            days: dd as u8,
            hours: hh as u8,
            minutes: mi as u8,
            seconds: ss as u8,
        }));
    }

    let offset_secs = (quarters * 15 * 60) as i32;
    let offset = if direction == "-" {
        FixedOffset::west_opt(offset_secs)?
    } else {
        FixedOffset::east_opt(offset_secs)?
    };

    let local = NaiveDate::from_ymd_opt(2000 + yy as i32, mm, dd)?
        .and_hms_milli_opt(hh, mi, ss, tenths * 100)?;

    offset
        .from_local_datetime(&local)
        .single()
        .map(SmppTime::Absolute)
}

/// A validated value for schedule_delivery_time or validity_period.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SmppDateTime(String);

impl SmppDateTime {
    pub fn new(value: &str) -> Result<Self, DateTimeError> {
        if value.len() != SMPP_TIME_LEN {
            return Err(DateTimeError::InvalidLength {
                expected: SMPP_TIME_LEN,
                actual: value.len(),
            });
        }
        if parse_smpp_time(value).is_none() {
            return Err(DateTimeError::InvalidFormat(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Absolute time expressed in UTC (`nn = 00`, `p = +`).
    pub fn absolute(at: DateTime<Utc>) -> Result<Self, DateTimeError> {
        let year = at.year();
        if !(2000..2100).contains(&year) {
            return Err(DateTimeError::OutOfRange(year));
        }
        let tenths = at.timestamp_subsec_millis() / 100;
        Ok(Self(format!(
            "{:02}{:02}{:02}{:02}{:02}{:02}{}00+",
            year - 2000,
            at.month(),
            at.day(),
            at.hour(),
            at.minute(),
            at.second(),
            tenths
        )))
    }

    pub fn relative(period: RelativePeriod) -> Result<Self, DateTimeError> {
        Self::new(&period.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Option<SmppTime> {
        parse_smpp_time(&self.0)
    }
}

impl fmt::Debug for SmppDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SmppDateTime({})", self.0)
    }
}

impl fmt::Display for SmppDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Not a valid SMPP time: {0:?}")]
    InvalidFormat(String),

    #[error("Year {0} cannot be expressed in a two digit SMPP time")]
    OutOfRange(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_with_positive_offset() {
        let parsed = parse_smpp_time("111019080000704+").unwrap();
        let SmppTime::Absolute(at) = parsed else {
            panic!("expected absolute time, got {parsed:?}");
        };
        assert_eq!(at.offset().local_minus_utc(), 3600);
        assert_eq!(
            at.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2011, 10, 19, 7, 0, 0).unwrap() + Duration::milliseconds(700)
        );
    }

    #[test]
    fn absolute_with_negative_offset() {
        let parsed = parse_smpp_time("240229235959012-").unwrap();
        let utc = parsed.to_utc(Utc::now()).unwrap();
        // 23:59:59 at UTC-3h is 02:59:59 the next day
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 3, 1, 2, 59, 59).unwrap());
    }

    #[test]
    fn relative_period() {
        assert_eq!(
            parse_smpp_time("020610233429000R"),
            Some(SmppTime::Relative(RelativePeriod {
                years: 2,
                months: 6,
                days: 10,
                hours: 23,
                minutes: 34,
                seconds: 29,
            }))
        );

        let period = RelativePeriod {
            days: 1,
            hours: 2,
            ..Default::default()
        };
        let base = Utc.with_ymd_and_hms(2020, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(
            period.apply_to(base),
            Some(Utc.with_ymd_and_hms(2020, 2, 1, 2, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_is_none() {
        assert_eq!(parse_smpp_time(""), None);
        assert_eq!(parse_smpp_time("11101908000070+"), None);
        assert_eq!(parse_smpp_time("111019080000704*"), None);
        // February 30th
        assert_eq!(parse_smpp_time("110230080000000+"), None);
        // 96 quarter hours is a full day of offset
        assert_eq!(parse_smpp_time("111019080000096+"), None);
    }

    #[test]
    fn schedule_values() {
        assert!(SmppDateTime::new("111019080000704+").is_ok());
        assert_eq!(
            SmppDateTime::new("1110190800"),
            Err(DateTimeError::InvalidLength {
                expected: 16,
                actual: 10
            })
        );
        assert!(SmppDateTime::new("111319080000704+").is_err());

        let at = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let value = SmppDateTime::absolute(at).unwrap();
        assert_eq!(value.as_str(), "250304050607000+");
        assert_eq!(value.parse().and_then(|t| t.to_utc(at)), Some(at));

        let period = RelativePeriod {
            hours: 48,
            ..Default::default()
        };
        assert_eq!(
            SmppDateTime::relative(period).unwrap().as_str(),
            "000000480000000R"
        );
    }
}
