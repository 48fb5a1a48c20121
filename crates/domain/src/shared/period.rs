use chrono::Duration;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Unit used both for reminder lead times and for the repeat interval of
/// vaccinations and treatments. The api encodes it as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl PeriodUnit {
    /// Units offered when choosing how often a procedure repeats
    pub const REPEAT_UNITS: [PeriodUnit; 4] = [
        PeriodUnit::Day,
        PeriodUnit::Week,
        PeriodUnit::Month,
        PeriodUnit::Year,
    ];

    pub fn code(&self) -> u8 {
        match self {
            Self::Minute => 0,
            Self::Hour => 1,
            Self::Day => 2,
            Self::Week => 3,
            Self::Month => 4,
            Self::Year => 5,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, InvalidPeriodUnitError> {
        match code {
            0 => Ok(Self::Minute),
            1 => Ok(Self::Hour),
            2 => Ok(Self::Day),
            3 => Ok(Self::Week),
            4 => Ok(Self::Month),
            5 => Ok(Self::Year),
            _ => Err(InvalidPeriodUnitError::UnknownCode(code)),
        }
    }

    /// Length of `value` units when it does not depend on the calendar.
    /// Days and longer follow the wall clock of a time zone instead.
    pub fn fixed_duration(&self, value: i64) -> Option<Duration> {
        match self {
            Self::Minute => Some(Duration::minutes(value)),
            Self::Hour => Some(Duration::hours(value)),
            Self::Day | Self::Week | Self::Month | Self::Year => None,
        }
    }

    /// Label shown for a repeat interval of one unit
    pub fn repeat_label(&self) -> &'static str {
        match self {
            Self::Minute => "Once a minute",
            Self::Hour => "Once an hour",
            Self::Day => "Once a day",
            Self::Week => "Once a week",
            Self::Month => "Once a month",
            Self::Year => "Once a year",
        }
    }
}

impl Display for PeriodUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        write!(f, "{}", s)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidPeriodUnitError {
    #[error("Unknown period unit code: {0}")]
    UnknownCode(u64),
    #[error("Invalid period unit specified: {0}")]
    InvalidIdentifier(String),
}

impl FromStr for PeriodUnit {
    type Err = InvalidPeriodUnitError;

    fn from_str(unit: &str) -> Result<Self, Self::Err> {
        match unit.trim().to_lowercase().as_str() {
            "minute" | "minutes" | "min" | "m" => Ok(Self::Minute),
            "hour" | "hours" | "h" => Ok(Self::Hour),
            "day" | "days" | "d" => Ok(Self::Day),
            "week" | "weeks" | "w" => Ok(Self::Week),
            "month" | "months" => Ok(Self::Month),
            "year" | "years" | "y" => Ok(Self::Year),
            _ => Err(InvalidPeriodUnitError::InvalidIdentifier(unit.to_string())),
        }
    }
}

impl Serialize for PeriodUnit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for PeriodUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PeriodUnitVisitor;

        impl<'de> Visitor<'de> for PeriodUnitVisitor {
            type Value = PeriodUnit;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A period unit code between 0 and 5")
            }

            fn visit_u64<E>(self, value: u64) -> Result<PeriodUnit, E>
            where
                E: serde::de::Error,
            {
                PeriodUnit::from_code(value).map_err(E::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<PeriodUnit, E>
            where
                E: serde::de::Error,
            {
                if value < 0 {
                    return Err(E::custom(format!("Negative period unit: {}", value)));
                }
                self.visit_u64(value as u64)
            }
        }

        deserializer.deserialize_u64(PeriodUnitVisitor)
    }
}
