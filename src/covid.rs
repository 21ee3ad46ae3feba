use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use crate::model::{LatLng, StatKind};

/// The counter block shared by `/all`, `/countries` and `/countries/{code}`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    #[serde(default)]
    pub cases: u64,
    #[serde(default)]
    pub today_cases: u64,
    #[serde(default)]
    pub recovered: u64,
    #[serde(default)]
    pub today_recovered: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub today_deaths: u64,
    #[serde(default)]
    pub population: Option<u64>,
}

impl Counters {
    pub fn total(&self, kind: StatKind) -> u64 {
        match kind {
            StatKind::Cases => self.cases,
            StatKind::Recovered => self.recovered,
            StatKind::Deaths => self.deaths,
        }
    }

    pub fn today(&self, kind: StatKind) -> u64 {
        match kind {
            StatKind::Cases => self.today_cases,
            StatKind::Recovered => self.today_recovered,
            StatKind::Deaths => self.today_deaths,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CountryInfo {
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub long: f64,
    #[serde(default)]
    pub flag: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub country: String,
    #[serde(default)]
    pub country_info: Option<CountryInfo>,
    #[serde(flatten)]
    pub counters: Counters,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub updated: Option<DateTime<Utc>>,
}

impl CountryStat {
    /// ISO alpha-2 code, absent for entries such as cruise ships.
    pub fn code(&self) -> Option<&str> {
        self.country_info.as_ref()?.iso2.as_deref()
    }

    pub fn coordinate(&self) -> Option<LatLng> {
        self.country_info.as_ref().map(|info| LatLng {
            lat: info.lat,
            lng: info.long,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStat {
    #[serde(flatten)]
    pub counters: Counters,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub affected_countries: Option<u32>,
}

/// Body of `/historical/all`: cumulative counts keyed by `M/D/YY` dates.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct HistoricalTotals {
    #[serde(default)]
    pub cases: HashMap<String, u64>,
    #[serde(default)]
    pub deaths: HashMap<String, u64>,
    #[serde(default)]
    pub recovered: HashMap<String, u64>,
}

impl HistoricalTotals {
    pub fn series(&self, kind: StatKind) -> &HashMap<String, u64> {
        match kind {
            StatKind::Cases => &self.cases,
            StatKind::Recovered => &self.recovered,
            StatKind::Deaths => &self.deaths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRANCE: &str = r#"{
        "updated": 1700000000000,
        "country": "France",
        "countryInfo": {
            "_id": 250, "iso2": "FR", "iso3": "FRA", "lat": 46, "long": 2,
            "flag": "https://disease.sh/assets/img/flags/fr.png"
        },
        "cases": 40138560, "todayCases": 12,
        "deaths": 167642, "todayDeaths": 0,
        "recovered": 39970918, "todayRecovered": 3,
        "active": 0, "population": 65584518
    }"#;

    #[test]
    fn decodes_country_body() {
        let stat: CountryStat = serde_json::from_str(FRANCE).unwrap();
        assert_eq!(stat.country, "France");
        assert_eq!(stat.code(), Some("FR"));
        assert_eq!(stat.coordinate(), Some(LatLng { lat: 46.0, lng: 2.0 }));
        assert_eq!(stat.counters.cases, 40138560);
        assert_eq!(stat.counters.today_recovered, 3);
        assert_eq!(stat.counters.population, Some(65584518));
        assert_eq!(stat.updated.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn null_iso2_and_missing_info_have_no_code() {
        let ship: CountryStat = serde_json::from_str(
            r#"{"country": "Diamond Princess",
                "countryInfo": {"iso2": null, "lat": 0, "long": 0}, "cases": 712}"#,
        )
        .unwrap();
        assert_eq!(ship.code(), None);

        let bare: CountryStat =
            serde_json::from_str(r#"{"country": "Nowhere", "cases": 1}"#).unwrap();
        assert_eq!(bare.code(), None);
        assert_eq!(bare.coordinate(), None);
    }

    #[test]
    fn counters_select_by_kind() {
        let counters = Counters {
            cases: 10,
            today_cases: 1,
            recovered: 8,
            today_recovered: 2,
            deaths: 3,
            today_deaths: 0,
            population: None,
        };
        assert_eq!(counters.total(StatKind::Recovered), 8);
        assert_eq!(counters.today(StatKind::Recovered), 2);
        assert_eq!(counters.total(StatKind::Deaths), 3);
        assert_eq!(counters.today(StatKind::Cases), 1);
    }

    #[test]
    fn decodes_global_body() {
        let global: GlobalStat = serde_json::from_str(
            r#"{"updated": 1700000000000, "cases": 700000000, "todayCases": 5,
                "deaths": 7000000, "recovered": 670000000, "affectedCountries": 231}"#,
        )
        .unwrap();
        assert_eq!(global.counters.cases, 700000000);
        assert_eq!(global.counters.today_deaths, 0);
        assert_eq!(global.affected_countries, Some(231));
    }
}
