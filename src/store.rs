//! Single-owner dashboard state.
//!
//! Every change goes through a typed transition. Region fetches are tagged
//! with the generation current when they were issued; a result whose
//! generation is no longer current is dropped, so the displayed snapshot
//! always follows the most recent region choice no matter which response
//! arrives last.

use tracing::{debug, info, warn};

use crate::catalog;
use crate::chart::{self, ChartPoint};
use crate::covid::{CountryStat, GlobalStat, HistoricalTotals};
use crate::error::TrackerError;
use crate::map::{self, Circle, MapView};
use crate::model::{CountryOption, Region, Snapshot, StatKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub region: Region,
    pub statistic: StatKind,
}

/// A region fetch the caller must issue. Its result is handed back with the
/// same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTicket {
    pub generation: u64,
    pub region: Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Superseded by a newer region choice and discarded.
    Stale,
    Failed,
}

/// Which fetch a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    Region { generation: u64 },
    Countries,
    History,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    selection: Selection,
    /// Generation of the latest issued region ticket.
    generation: u64,
    /// Generation of the snapshot on display, 0 before the first one.
    applied: u64,
    snapshot: Option<Snapshot>,
    countries: Vec<CountryStat>,
    options: Vec<CountryOption>,
    table: Vec<CountryStat>,
    history: Option<HistoricalTotals>,
    map: MapView,
    /// Generation of the latest region fetch that failed, 0 if none.
    failed: u64,
    region_error: Option<String>,
    countries_error: Option<String>,
    history_error: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for the startup fetch of the initial (worldwide) region.
    pub fn start(&mut self) -> RegionTicket {
        self.issue()
    }

    pub fn choose_region(&mut self, region: Region) -> Result<RegionTicket, TrackerError> {
        if let Region::Country(code) = &region {
            if !self.options.is_empty() && !self.options.iter().any(|o| &o.code == code) {
                return Err(TrackerError::UnknownCountry(code.clone()));
            }
        }

        info!(%region, "region selected");
        self.selection.region = region;
        Ok(self.issue())
    }

    /// Pure state change: derived views pick the new kind up on next read.
    pub fn choose_statistic(&mut self, kind: StatKind) {
        debug!(statistic = %kind, "statistic selected");
        self.selection.statistic = kind;
    }

    fn issue(&mut self) -> RegionTicket {
        self.generation += 1;
        RegionTicket {
            generation: self.generation,
            region: self.selection.region.clone(),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping superseded region result");
            return false;
        }
        true
    }

    pub fn receive_global_stat(&mut self, generation: u64, stat: GlobalStat) -> Outcome {
        if !self.is_current(generation) {
            return Outcome::Stale;
        }
        self.snapshot = Some(Snapshot::Global(stat));
        self.map = MapView::world();
        self.mark_fresh(generation);
        Outcome::Applied
    }

    pub fn receive_country_stat(&mut self, generation: u64, stat: CountryStat) -> Outcome {
        if !self.is_current(generation) {
            return Outcome::Stale;
        }
        match stat.coordinate() {
            Some(center) => self.map = MapView::country(center),
            None => warn!(country = %stat.country, "country has no coordinate, map left in place"),
        }
        self.snapshot = Some(Snapshot::Country(stat));
        self.mark_fresh(generation);
        Outcome::Applied
    }

    /// Replaces the country list, the dropdown options and the sorted table
    /// together.
    pub fn receive_country_list(&mut self, countries: Vec<CountryStat>) -> Outcome {
        self.options = catalog::build_options(&countries);
        self.table = catalog::sort_by_cases(&countries);
        info!(
            countries = countries.len(),
            selectable = self.options.len(),
            "country list loaded"
        );
        self.countries = countries;
        self.countries_error = None;
        Outcome::Applied
    }

    pub fn receive_history(&mut self, history: HistoricalTotals) -> Outcome {
        self.history = Some(history);
        self.history_error = None;
        Outcome::Applied
    }

    /// Records a failed fetch. The previous data stays on display; a failed
    /// region fetch additionally flags the totals as stale. Each fetch keeps
    /// its own error slot.
    pub fn receive_failure(&mut self, fetch: Fetch, error: &TrackerError) -> Outcome {
        let message = Some(error.to_string());
        match fetch {
            Fetch::Region { generation } => {
                if !self.is_current(generation) {
                    return Outcome::Stale;
                }
                self.failed = generation;
                self.region_error = message;
            }
            Fetch::Countries => self.countries_error = message,
            Fetch::History => self.history_error = message,
        }
        warn!(?fetch, %error, "fetch failed");
        Outcome::Failed
    }

    fn mark_fresh(&mut self, generation: u64) {
        self.applied = generation;
        self.region_error = None;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn countries(&self) -> &[CountryStat] {
        &self.countries
    }

    pub fn options(&self) -> &[CountryOption] {
        &self.options
    }

    pub fn table(&self) -> &[CountryStat] {
        &self.table
    }

    pub fn map(&self) -> MapView {
        self.map
    }

    /// True while the latest region fetch has neither landed nor failed.
    pub fn is_loading(&self) -> bool {
        self.applied != self.generation && self.failed != self.generation
    }

    /// True when the latest region fetch failed and older totals are shown.
    pub fn is_stale(&self) -> bool {
        self.generation != 0 && self.failed == self.generation
    }

    /// Why the most recent region fetch failed, until a region result lands.
    pub fn last_error(&self) -> Option<&str> {
        self.region_error.as_deref()
    }

    pub fn countries_error(&self) -> Option<&str> {
        self.countries_error.as_deref()
    }

    pub fn history_error(&self) -> Option<&str> {
        self.history_error.as_deref()
    }

    pub fn chart(&self) -> Vec<ChartPoint> {
        self.history
            .as_ref()
            .map(|h| chart::build_chart_data(h, self.selection.statistic))
            .unwrap_or_default()
    }

    pub fn circles(&self) -> Vec<Circle> {
        map::circles(&self.countries, self.selection.statistic)
    }
}

#[cfg(test)]
mod tests {
    use hyper::StatusCode;

    use super::*;
    use crate::covid::{CountryInfo, Counters};
    use crate::model::LatLng;

    fn country(name: &str, code: &str, cases: u64, lat: f64, long: f64) -> CountryStat {
        CountryStat {
            country: name.to_string(),
            country_info: Some(CountryInfo {
                iso2: Some(code.to_string()),
                lat,
                long,
                ..CountryInfo::default()
            }),
            counters: Counters {
                cases,
                ..Counters::default()
            },
            updated: None,
        }
    }

    fn global(cases: u64) -> GlobalStat {
        GlobalStat {
            counters: Counters {
                cases,
                ..Counters::default()
            },
            updated: None,
            affected_countries: None,
        }
    }

    fn not_found() -> TrackerError {
        TrackerError::Status {
            status: StatusCode::NOT_FOUND,
            url: "/countries/FR".to_string(),
        }
    }

    #[test]
    fn starts_worldwide_on_cases() {
        let mut dashboard = Dashboard::new();
        assert_eq!(dashboard.selection(), &Selection::default());
        assert_eq!(dashboard.selection().region, Region::Worldwide);
        assert_eq!(dashboard.selection().statistic, StatKind::Cases);

        let ticket = dashboard.start();
        assert_eq!(ticket, RegionTicket { generation: 1, region: Region::Worldwide });
        assert!(dashboard.is_loading());

        assert_eq!(dashboard.receive_global_stat(1, global(10)), Outcome::Applied);
        assert_eq!(dashboard.snapshot().unwrap().country_code(), None);
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn country_result_recenters_map() {
        let mut dashboard = Dashboard::new();
        dashboard.start();
        let ticket = dashboard.choose_region(Region::country("fr")).unwrap();
        assert_eq!(ticket.region, Region::Country("FR".to_string()));

        let france = country("France", "FR", 5, 46.0, 2.0);
        let outcome = dashboard.receive_country_stat(ticket.generation, france);
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(dashboard.snapshot().unwrap().country_code(), Some("FR"));
        assert_eq!(dashboard.map(), MapView::country(LatLng { lat: 46.0, lng: 2.0 }));

        let back = dashboard.choose_region(Region::Worldwide).unwrap();
        dashboard.receive_global_stat(back.generation, global(1));
        assert_eq!(dashboard.map(), MapView::world());
        assert_eq!(dashboard.snapshot().unwrap().country_code(), None);
    }

    #[test]
    fn superseded_results_are_dropped() {
        let mut dashboard = Dashboard::new();
        let us = dashboard.choose_region(Region::country("US")).unwrap();
        let fr = dashboard.choose_region(Region::country("FR")).unwrap();

        assert_eq!(
            dashboard.receive_country_stat(fr.generation, country("France", "FR", 5, 46.0, 2.0)),
            Outcome::Applied
        );
        assert_eq!(
            dashboard.receive_country_stat(us.generation, country("USA", "US", 9, 38.0, -97.0)),
            Outcome::Stale
        );
        assert_eq!(dashboard.snapshot().unwrap().country_code(), Some("FR"));
        assert_eq!(dashboard.selection().region, Region::country("FR"));
    }

    #[test]
    fn unknown_code_is_rejected_once_catalog_is_loaded() {
        let mut dashboard = Dashboard::new();
        dashboard.receive_country_list(vec![country("France", "FR", 5, 46.0, 2.0)]);
        let before = dashboard.generation();

        assert!(matches!(
            dashboard.choose_region(Region::country("ZZ")),
            Err(TrackerError::UnknownCountry(code)) if code == "ZZ"
        ));
        assert_eq!(dashboard.generation(), before);
        assert_eq!(dashboard.selection().region, Region::Worldwide);
    }

    #[test]
    fn failure_keeps_previous_snapshot_and_flags_stale() {
        let mut dashboard = Dashboard::new();
        let start = dashboard.start();
        dashboard.receive_global_stat(start.generation, global(42));

        let fr = dashboard.choose_region(Region::country("FR")).unwrap();
        assert_eq!(
            dashboard.receive_failure(Fetch::Region { generation: fr.generation }, &not_found()),
            Outcome::Failed
        );
        assert!(dashboard.is_stale());
        assert!(!dashboard.is_loading());
        assert!(dashboard.last_error().unwrap().contains("404"));
        assert_eq!(dashboard.snapshot().unwrap().counters().cases, 42);
        assert_eq!(dashboard.map(), MapView::world());

        let again = dashboard.choose_region(Region::country("FR")).unwrap();
        dashboard.receive_country_stat(again.generation, country("France", "FR", 5, 46.0, 2.0));
        assert!(!dashboard.is_stale());
        assert_eq!(dashboard.last_error(), None);
    }

    #[test]
    fn stale_failure_does_not_flag() {
        let mut dashboard = Dashboard::new();
        let old = dashboard.choose_region(Region::country("US")).unwrap();
        dashboard.choose_region(Region::country("FR")).unwrap();

        assert_eq!(
            dashboard.receive_failure(Fetch::Region { generation: old.generation }, &not_found()),
            Outcome::Stale
        );
        assert!(!dashboard.is_stale());
    }

    #[test]
    fn choosing_again_after_failure_is_loading_not_stale() {
        let mut dashboard = Dashboard::new();
        let start = dashboard.start();
        dashboard.receive_global_stat(start.generation, global(42));

        let fr = dashboard.choose_region(Region::country("FR")).unwrap();
        dashboard.receive_failure(Fetch::Region { generation: fr.generation }, &not_found());
        assert!(dashboard.is_stale());

        let de = dashboard.choose_region(Region::country("DE")).unwrap();
        assert!(dashboard.is_loading());
        assert!(!dashboard.is_stale());

        dashboard.receive_failure(Fetch::Region { generation: de.generation }, &not_found());
        assert!(!dashboard.is_loading());
        assert!(dashboard.is_stale());
    }

    #[test]
    fn auxiliary_failures_keep_their_own_errors() {
        let mut dashboard = Dashboard::new();
        let start = dashboard.start();
        dashboard.receive_failure(Fetch::Region { generation: start.generation }, &not_found());

        let unavailable = TrackerError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            url: "/historical/all".to_string(),
        };
        dashboard.receive_failure(Fetch::History, &unavailable);
        dashboard.receive_failure(Fetch::Countries, &unavailable);

        assert!(dashboard.last_error().unwrap().contains("404"));
        assert!(dashboard.history_error().unwrap().contains("503"));
        assert!(dashboard.countries_error().unwrap().contains("503"));

        let again = dashboard.choose_region(Region::Worldwide).unwrap();
        dashboard.receive_global_stat(again.generation, global(1));
        assert_eq!(dashboard.last_error(), None);
        assert!(dashboard.countries_error().is_some());

        dashboard.receive_country_list(Vec::new());
        dashboard.receive_history(HistoricalTotals::default());
        assert_eq!(dashboard.countries_error(), None);
        assert_eq!(dashboard.history_error(), None);
    }

    #[test]
    fn statistic_switch_keeps_region_and_generation() {
        let mut dashboard = Dashboard::new();
        dashboard.choose_region(Region::country("FR")).unwrap();
        let generation = dashboard.generation();

        dashboard.choose_statistic(StatKind::Deaths);
        assert_eq!(dashboard.selection().statistic, StatKind::Deaths);
        assert_eq!(dashboard.selection().region, Region::country("FR"));
        assert_eq!(dashboard.generation(), generation);
    }

    #[test]
    fn country_list_builds_options_and_table() {
        let mut dashboard = Dashboard::new();
        let mut ship = country("Diamond Princess", "XX", 712, 0.0, 0.0);
        ship.country_info.as_mut().unwrap().iso2 = None;

        dashboard.receive_country_list(vec![
            country("A", "AA", 500, 0.0, 0.0),
            ship,
            country("B", "BB", 1500, 0.0, 0.0),
            country("C", "CC", 1500, 0.0, 0.0),
        ]);

        let codes: Vec<&str> = dashboard.options().iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, ["AA", "BB", "CC"]);
        let table: Vec<&str> = dashboard.table().iter().map(|s| s.country.as_str()).collect();
        assert_eq!(table, ["B", "C", "Diamond Princess", "A"]);
        assert_eq!(dashboard.countries().len(), 4);
        assert_eq!(dashboard.circles().len(), 4);
    }

    #[test]
    fn chart_follows_selected_statistic() {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.chart().is_empty());

        let mut history = HistoricalTotals::default();
        history.cases.insert("1/1/21".to_string(), 10);
        history.cases.insert("1/2/21".to_string(), 15);
        history.deaths.insert("1/1/21".to_string(), 1);
        history.deaths.insert("1/2/21".to_string(), 3);
        dashboard.receive_history(history);

        assert_eq!(dashboard.chart()[0].new, 5);
        dashboard.choose_statistic(StatKind::Deaths);
        assert_eq!(dashboard.chart()[0].new, 2);
    }
}
