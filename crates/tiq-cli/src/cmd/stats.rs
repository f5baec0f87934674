//! `tiq stats` — dashboard counters and week-over-week trends.

use std::io::Write;

use chrono::Utc;
use clap::Args;
use tiq_core::config::EffectiveConfig;
use tiq_core::stats::BoardStats;

use crate::backend;
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

pub fn run_stats(
    _args: &StatsArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let store = backend::store_client(config, output)?;
    let board = backend::load_board(&store, output)?;
    let stats = board.stats(Utc::now());

    render(output, &stats, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &BoardStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "total  {}  {:+}%", stats.total, stats.trends.total)?;
    writeln!(w, "pending  {}  {:+}%", stats.pending, stats.trends.pending)?;
    writeln!(
        w,
        "processed  {}  {:+}%",
        stats.processed, stats.trends.processed
    )?;
    writeln!(w, "positive  {}", stats.positive)?;
    writeln!(w, "negative  {}  {:+}%", stats.negative, stats.trends.negative)
}

fn render_stats_pretty(stats: &BoardStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Ticket dashboard")?;
    pretty_kv(w, "Total", format!("{} {}", stats.total, arrow(stats.trends.total)))?;
    pretty_kv(
        w,
        "Pendientes",
        format!("{} {}", stats.pending, arrow(stats.trends.pending)),
    )?;
    pretty_kv(
        w,
        "Procesados",
        format!("{} {}", stats.processed, arrow(stats.trends.processed)),
    )?;
    pretty_kv(w, "Positivos", stats.positive.to_string())?;
    pretty_kv(
        w,
        "Negativos",
        format!("{} {}", stats.negative, arrow(stats.trends.negative)),
    )
}

/// Week-over-week marker as the dashboard cards show it.
fn arrow(trend: f64) -> String {
    if trend >= 0.0 {
        format!("↗ +{trend}%")
    } else {
        format!("↘ {trend}%")
    }
}
