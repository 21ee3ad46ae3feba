//! Line chart data: daily new counts derived from the cumulative history.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::Itertools;
use serde_derive::Serialize;
use tracing::warn;

use crate::covid::HistoricalTotals;
use crate::model::StatKind;

const HISTORY_DATE_FORMAT: &str = "%m/%d/%y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub new: u64,
}

/// Per-day increase of the cumulative `kind` series, oldest first. The first
/// day has no predecessor and is omitted. Downward corrections clamp to zero.
pub fn build_chart_data(history: &HistoricalTotals, kind: StatKind) -> Vec<ChartPoint> {
    let series: BTreeMap<NaiveDate, u64> = history
        .series(kind)
        .iter()
        .filter_map(|(date, &total)| match NaiveDate::parse_from_str(date, HISTORY_DATE_FORMAT) {
            Ok(date) => Some((date, total)),
            Err(e) => {
                warn!(date = %date, error = %e, "skipping unparseable history date");
                None
            }
        })
        .collect();

    series
        .iter()
        .tuple_windows()
        .map(|((_, &prev), (&date, &total))| ChartPoint {
            date,
            new: total.saturating_sub(prev),
        })
        .collect()
}
