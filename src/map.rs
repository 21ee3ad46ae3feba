use serde_derive::Serialize;

use crate::constants::{self, COUNTRY_ZOOM, WORLD_CENTER, WORLD_ZOOM};
use crate::covid::CountryStat;
use crate::model::{LatLng, StatKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    pub fn world() -> Self {
        Self {
            center: WORLD_CENTER,
            zoom: WORLD_ZOOM,
        }
    }

    pub fn country(center: LatLng) -> Self {
        Self {
            center,
            zoom: COUNTRY_ZOOM,
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::world()
    }
}

/// One bubble on the map layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub country: String,
    pub center: LatLng,
    /// Meters.
    pub radius: f64,
    pub color: &'static str,
}

/// Bubbles for every country with a coordinate, sized by the square root of
/// the selected total.
pub fn circles(countries: &[CountryStat], kind: StatKind) -> Vec<Circle> {
    let style = constants::style(kind);
    countries
        .iter()
        .filter_map(|stat| {
            let center = stat.coordinate()?;
            Some(Circle {
                country: stat.country.clone(),
                center,
                radius: (stat.counters.total(kind) as f64).sqrt() * style.multiplier,
                color: style.hex,
            })
        })
        .collect()
}
