use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::{LatLng, StatKind};

pub const DEFAULT_API_BASE: &str = "https://disease.sh/v3/covid-19";
pub const DEFAULT_HISTORY_DAYS: u32 = 120;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TABLE_ROWS: usize = 15;

/// Initial map center. Arbitrary, chosen to frame the Atlantic.
pub const WORLD_CENTER: LatLng = LatLng { lat: 34.80746, lng: -40.4796 };
pub const WORLD_ZOOM: u8 = 3;
pub const COUNTRY_ZOOM: u8 = 4;

pub struct StatStyle {
    pub title: &'static str,
    pub hex: &'static str,
    pub multiplier: f64,
    /// Rendered in the alert colour on the info boxes.
    pub alert: bool,
}

pub static STAT_STYLES: Lazy<HashMap<StatKind, StatStyle>> = Lazy::new(|| {
    HashMap::from([
        (
            StatKind::Cases,
            StatStyle {
                title: "COVID-19 Cases",
                hex: "#CC1034",
                multiplier: 800.0,
                alert: true,
            },
        ),
        (
            StatKind::Recovered,
            StatStyle {
                title: "Recoveries",
                hex: "#7dd71d",
                multiplier: 1200.0,
                alert: false,
            },
        ),
        (
            StatKind::Deaths,
            StatStyle {
                title: "Deaths",
                hex: "#fb4443",
                multiplier: 2000.0,
                alert: true,
            },
        ),
    ])
});

pub fn style(kind: StatKind) -> &'static StatStyle {
    &STAT_STYLES[&kind]
}
