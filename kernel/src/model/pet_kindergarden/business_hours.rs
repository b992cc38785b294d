use chrono::{NaiveTime, TimeDelta};
use shared::error::{AppError, ErrorKind};
use std::{fmt, str::FromStr};
use thiserror::Error;

const TIME_FORMAT: &str = "%H:%M";

/// 営業時間。"09:00-18:00" の形式で保存・入力される
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    opens_at: NaiveTime,
    closes_at: NaiveTime,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidBusinessHours {
    #[error("Business hours must look like HH:MM-HH:MM, got '{0}'.")]
    Format(String),
    #[error("Opening time must be before closing time.")]
    NotIncreasing,
}

impl From<InvalidBusinessHours> for AppError {
    fn from(value: InvalidBusinessHours) -> Self {
        AppError::rejected(
            ErrorKind::ValidationFailed,
            "pet_kindergarden_invalid_business_hour",
            value.to_string(),
        )
    }
}

impl BusinessHours {
    pub fn new(opens_at: NaiveTime, closes_at: NaiveTime) -> Result<Self, InvalidBusinessHours> {
        if opens_at >= closes_at {
            return Err(InvalidBusinessHours::NotIncreasing);
        }
        Ok(Self {
            opens_at,
            closes_at,
        })
    }

    pub fn opens_at(&self) -> NaiveTime {
        self.opens_at
    }

    pub fn closes_at(&self) -> NaiveTime {
        self.closes_at
    }

    /// from から hours 時間の滞在が営業時間に収まるか。
    /// 日付をまたぐ場合は収まらないものとする
    pub fn covers(&self, from: NaiveTime, hours: i64) -> bool {
        if from < self.opens_at || from >= self.closes_at {
            return false;
        }
        let (until, overflow) = from.overflowing_add_signed(TimeDelta::hours(hours));
        overflow == 0 && until <= self.closes_at
    }
}

impl FromStr for BusinessHours {
    type Err = InvalidBusinessHours;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || InvalidBusinessHours::Format(s.to_string());
        let (open, close) = s.split_once('-').ok_or_else(format_err)?;
        let opens_at =
            NaiveTime::parse_from_str(open.trim(), TIME_FORMAT).map_err(|_| format_err())?;
        let closes_at =
            NaiveTime::parse_from_str(close.trim(), TIME_FORMAT).map_err(|_| format_err())?;
        Self::new(opens_at, closes_at)
    }
}

impl fmt::Display for BusinessHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.opens_at.format(TIME_FORMAT),
            self.closes_at.format(TIME_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, TIME_FORMAT).unwrap()
    }

    #[test]
    fn parses_and_formats() {
        let hours: BusinessHours = "09:00-18:30".parse().unwrap();
        assert_eq!(hours.opens_at(), time("09:00"));
        assert_eq!(hours.closes_at(), time("18:30"));
        assert_eq!(hours.to_string(), "09:00-18:30");
    }

    #[rstest]
    #[case("0900-1800")]
    #[case("9-18")]
    #[case("")]
    #[case("09:00-25:00")]
    fn rejects_malformed_text(#[case] text: &str) {
        assert!(matches!(
            text.parse::<BusinessHours>(),
            Err(InvalidBusinessHours::Format(_))
        ));
    }

    #[test]
    fn rejects_closing_before_opening() {
        assert_eq!(
            "18:00-09:00".parse::<BusinessHours>(),
            Err(InvalidBusinessHours::NotIncreasing)
        );
    }

    #[rstest]
    #[case("09:00", 0, true)]
    #[case("09:00", 9, true)]
    #[case("15:00", 4, false)]
    #[case("08:59", 0, false)]
    #[case("18:00", 0, false)]
    fn covers_visits_inside_opening_hours(
        #[case] from: &str,
        #[case] hours: i64,
        #[case] expected: bool,
    ) {
        let business_hours: BusinessHours = "09:00-18:00".parse().unwrap();
        assert_eq!(business_hours.covers(time(from), hours), expected);
    }

    #[test]
    fn invalid_hours_become_validation_failures() {
        let err: AppError = InvalidBusinessHours::NotIncreasing.into();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.code(), "pet_kindergarden_invalid_business_hour");
    }
}
