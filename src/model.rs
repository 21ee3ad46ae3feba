//! Domain types for the selection state: regions, statistic kinds and the
//! displayed snapshot.

use std::fmt;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use crate::covid::{Counters, CountryStat, GlobalStat};
use crate::error::TrackerError;

pub const WORLDWIDE: &str = "worldwide";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Worldwide,
    /// Upper-case ISO alpha-2 code.
    Country(String),
}

impl Region {
    pub fn country(code: &str) -> Self {
        Self::Country(code.to_ascii_uppercase())
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Worldwide => None,
            Self::Country(code) => Some(code),
        }
    }
}

impl FromStr for Region {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(WORLDWIDE) {
            return Ok(Self::Worldwide);
        }
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TrackerError::InvalidRegion(s.to_string()));
        }
        Ok(Self::country(s))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Worldwide => f.write_str(WORLDWIDE),
            Self::Country(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    #[default]
    Cases,
    Recovered,
    Deaths,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Cases, StatKind::Recovered, StatKind::Deaths];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Recovered => "recovered",
            Self::Deaths => "deaths",
        }
    }
}

impl FromStr for StatKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::InvalidStatistic(s.to_string()))
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryOption {
    pub name: String,
    pub code: String,
}

/// Totals currently on display. Replaced whole, never merged.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Global(GlobalStat),
    Country(CountryStat),
}

impl Snapshot {
    pub fn counters(&self) -> &Counters {
        match self {
            Self::Global(stat) => &stat.counters,
            Self::Country(stat) => &stat.counters,
        }
    }

    /// `None` for the worldwide shape.
    pub fn country_code(&self) -> Option<&str> {
        match self {
            Self::Global(_) => None,
            Self::Country(stat) => stat.code(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Global(_) => "Worldwide",
            Self::Country(stat) => &stat.country,
        }
    }
}
