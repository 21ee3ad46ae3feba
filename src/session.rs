//! Async driver around [`Dashboard`].
//!
//! Fetches run as independent tokio tasks; their completions are applied one
//! at a time on the owner's task, so the dashboard never needs a lock. There
//! is no cancellation: a superseded region fetch still runs to completion and
//! its result is discarded by generation.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::covid::{CountryStat, GlobalStat, HistoricalTotals};
use crate::error::TrackerError;
use crate::model::{Region, StatKind};
use crate::source::StatsSource;
use crate::store::{Dashboard, Fetch, Outcome, RegionTicket};

/// A finished fetch, tagged with what it was for.
#[derive(Debug)]
pub enum Event {
    Global {
        generation: u64,
        result: Result<GlobalStat, TrackerError>,
    },
    Country {
        generation: u64,
        result: Result<CountryStat, TrackerError>,
    },
    Countries(Result<Vec<CountryStat>, TrackerError>),
    History(Result<HistoricalTotals, TrackerError>),
}

pub struct Session<S> {
    source: Arc<S>,
    dashboard: Dashboard,
    tasks: JoinSet<Event>,
    history_days: u32,
}

impl<S: StatsSource> Session<S> {
    pub fn new(source: S, history_days: u32) -> Self {
        Self::with_shared(Arc::new(source), history_days)
    }

    pub fn with_shared(source: Arc<S>, history_days: u32) -> Self {
        Self {
            source,
            dashboard: Dashboard::new(),
            tasks: JoinSet::new(),
            history_days,
        }
    }

    /// Fires the startup fetches: worldwide totals, the country list and the
    /// chart history, all concurrently and in no particular order.
    pub fn start(&mut self) {
        let ticket = self.dashboard.start();
        self.spawn_region(ticket);

        let source = Arc::clone(&self.source);
        self.tasks
            .spawn(async move { Event::Countries(source.fetch_all_countries().await) });

        let source = Arc::clone(&self.source);
        let days = self.history_days;
        self.tasks
            .spawn(async move { Event::History(source.fetch_history(days).await) });
    }

    /// Switches region and issues exactly one fetch for it.
    pub fn choose_region(&mut self, region: Region) -> Result<(), TrackerError> {
        let ticket = self.dashboard.choose_region(region)?;
        self.spawn_region(ticket);
        Ok(())
    }

    /// Never touches the network.
    pub fn choose_statistic(&mut self, kind: StatKind) {
        self.dashboard.choose_statistic(kind);
    }

    fn spawn_region(&mut self, ticket: RegionTicket) {
        let source = Arc::clone(&self.source);
        let RegionTicket { generation, region } = ticket;
        debug!(generation, %region, "spawning region fetch");

        match region {
            Region::Worldwide => {
                self.tasks.spawn(async move {
                    Event::Global {
                        generation,
                        result: source.fetch_global().await,
                    }
                });
            }
            Region::Country(code) => {
                self.tasks.spawn(async move {
                    Event::Country {
                        generation,
                        result: source.fetch_country(&code).await,
                    }
                });
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Waits for the next fetch to finish and applies it. `None` when nothing
    /// is in flight.
    pub async fn next_event(&mut self) -> Option<Outcome> {
        let joined = self.tasks.join_next().await?;
        Some(match joined {
            Ok(event) => self.apply(event),
            Err(e) => {
                error!(error = %e, "fetch task did not complete");
                Outcome::Failed
            }
        })
    }

    /// Applies completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    pub fn apply(&mut self, event: Event) -> Outcome {
        let dashboard = &mut self.dashboard;
        match event {
            Event::Global { generation, result } => match result {
                Ok(stat) => dashboard.receive_global_stat(generation, stat),
                Err(e) => dashboard.receive_failure(Fetch::Region { generation }, &e),
            },
            Event::Country { generation, result } => match result {
                Ok(stat) => dashboard.receive_country_stat(generation, stat),
                Err(e) => dashboard.receive_failure(Fetch::Region { generation }, &e),
            },
            Event::Countries(result) => match result {
                Ok(countries) => dashboard.receive_country_list(countries),
                Err(e) => dashboard.receive_failure(Fetch::Countries, &e),
            },
            Event::History(result) => match result {
                Ok(history) => dashboard.receive_history(history),
                Err(e) => dashboard.receive_failure(Fetch::History, &e),
            },
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }
}
