//! The read-only queries the dashboard issues against the statistics service.
//!
//! The session spawns these futures on tokio, so every one of them must be
//! `Send`. Implementations may still be written with `async fn`.

use std::future::Future;

use crate::covid::{CountryStat, GlobalStat, HistoricalTotals};
use crate::error::TrackerError;

pub trait StatsSource: Send + Sync + 'static {
    /// Worldwide totals.
    fn fetch_global(&self) -> impl Future<Output = Result<GlobalStat, TrackerError>> + Send;

    /// Latest totals for every country, in upstream order.
    fn fetch_all_countries(
        &self,
    ) -> impl Future<Output = Result<Vec<CountryStat>, TrackerError>> + Send;

    fn fetch_country(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<CountryStat, TrackerError>> + Send;

    /// Worldwide cumulative series for the last `last_days` days.
    fn fetch_history(
        &self,
        last_days: u32,
    ) -> impl Future<Output = Result<HistoricalTotals, TrackerError>> + Send;
}
