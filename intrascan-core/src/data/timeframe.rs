//! Parsing of the provider's period/interval strings ("1d", "5m", ...).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimeFrameError {
    #[error("invalid interval '{0}' (expected e.g. 1m, 5m, 15m, 1h)")]
    InvalidInterval(String),

    #[error("invalid period '{0}' (expected e.g. 1d, 5d, 1mo)")]
    InvalidPeriod(String),
}

/// Bar width, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    minutes: u32,
}

impl Interval {
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl FromStr for Interval {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeFrameError::InvalidInterval(s.to_string());
        let (amount, unit) = split_amount(s).ok_or_else(err)?;
        let minutes = match unit {
            "m" => amount,
            "h" => amount.checked_mul(60).ok_or_else(err)?,
            _ => return Err(err()),
        };
        if minutes == 0 {
            return Err(err());
        }
        Ok(Self { minutes })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes % 60 == 0 {
            write!(f, "{}h", self.minutes / 60)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}

/// How far back to fetch, in trading sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackPeriod {
    sessions: u32,
}

impl LookbackPeriod {
    pub fn sessions(&self) -> u32 {
        self.sessions
    }
}

impl FromStr for LookbackPeriod {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeFrameError::InvalidPeriod(s.to_string());
        let (amount, unit) = split_amount(s).ok_or_else(err)?;
        let sessions = match unit {
            "d" => amount,
            "wk" => amount.checked_mul(5).ok_or_else(err)?,
            "mo" => amount.checked_mul(21).ok_or_else(err)?,
            _ => return Err(err()),
        };
        if sessions == 0 {
            return Err(err());
        }
        Ok(Self { sessions })
    }
}

fn split_amount(s: &str) -> Option<(u32, &str)> {
    let digits = s.find(|c: char| !c.is_ascii_digit())?;
    if digits == 0 {
        return None;
    }
    let amount = s[..digits].parse().ok()?;
    Some((amount, &s[digits..]))
}
