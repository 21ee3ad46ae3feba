use std::fmt::Write;

use crate::constants;
use crate::format::{abbreviate, pretty_print_stat, thousands};
use crate::model::StatKind;
use crate::store::Dashboard;

pub fn info_boxes(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let selection = dashboard.selection();

    let label = dashboard.snapshot().map_or("-", |s| s.label());
    let _ = write!(out, "COVID-19 TRACKER  [{}] {label}", selection.region);
    if dashboard.is_loading() {
        out.push_str("  (loading)");
    }
    if dashboard.is_stale() {
        let _ = write!(out, "  (stale: {})", dashboard.last_error().unwrap_or("fetch failed"));
    }
    out.push('\n');

    for kind in StatKind::ALL {
        let style = constants::style(kind);
        let marker = if selection.statistic == kind { '>' } else { ' ' };
        let (today, total) = match dashboard.snapshot() {
            Some(snapshot) => (
                pretty_print_stat(snapshot.counters().today(kind)),
                abbreviate(snapshot.counters().total(kind)),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        let flag = if style.alert { "!" } else { " " };
        let _ = writeln!(out, "{marker}{flag} {:<16} {today:>10}  {total:>10} total", style.title);
    }
    out
}

pub fn table(dashboard: &Dashboard, rows: usize) -> String {
    let mut out = String::from("Live Cases by Country\n");
    for stat in dashboard.table().iter().take(rows) {
        let _ = writeln!(out, "  {:<32} {:>15}", stat.country, thousands(stat.counters.cases));
    }
    out
}

pub fn countries(dashboard: &Dashboard) -> String {
    let mut out = String::from("  worldwide  Worldwide\n");
    for option in dashboard.options() {
        let _ = writeln!(out, "  {:<9}  {}", option.code, option.name);
    }
    out
}

pub fn chart(dashboard: &Dashboard, points: usize) -> String {
    let statistic = dashboard.selection().statistic;
    let mut out = format!("Worldwide New {statistic}\n");
    let data = dashboard.chart();
    for point in data.iter().skip(data.len().saturating_sub(points)) {
        let _ = writeln!(out, "  {}  {:>12}", point.date, thousands(point.new));
    }
    out
}
