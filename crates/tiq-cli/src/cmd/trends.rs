//! `tiq trends` — Monday-to-Sunday activity for the current week.

use std::io::Write;

use chrono::Local;
use clap::Args;
use serde::Serialize;
use tiq_core::config::EffectiveConfig;
use tiq_core::stats::{DayBucket, WeekSummary, summarize_week};

use crate::backend;
use crate::output::{OutputMode, pretty_section, render};

#[derive(Args, Debug, Default)]
pub struct TrendsArgs {}

/// Report payload for `tiq trends`.
#[derive(Debug, Serialize)]
pub struct TrendsReport {
    pub days: Vec<DayBucket>,
    pub summary: WeekSummary,
}

pub fn run_trends(
    _args: &TrendsArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let store = backend::store_client(config, output)?;
    let board = backend::load_board(&store, output)?;

    let days = board.weekly_series(Local::now().date_naive());
    let summary = summarize_week(&days);
    let report = TrendsReport {
        days: days.to_vec(),
        summary,
    };

    render(output, &report, render_trends_text, render_trends_pretty)
}

fn render_trends_text(report: &TrendsReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "DAY  DATE  TOTAL  PROCESSED  PENDING  NEGATIVE")?;
    for day in &report.days {
        writeln!(
            w,
            "{}  {}  {}  {}  {}  {}",
            day.label(),
            day.date,
            day.total,
            day.processed,
            day.pending,
            day.negative,
        )?;
    }
    Ok(())
}

fn render_trends_pretty(report: &TrendsReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Actividad semanal (lunes a domingo)")?;
    for day in &report.days {
        writeln!(
            w,
            "{} {}  {:<24} total {:>3} · procesados {:>3} · negativos {:>3}",
            day.label(),
            day.date.format("%d/%m"),
            bar(day.total),
            day.total,
            day.processed,
            day.negative,
        )?;
    }
    writeln!(
        w,
        "\nSemana: {} tickets · {}% procesados · {} negativos",
        report.summary.total, report.summary.processing_rate, report.summary.negative,
    )
}

/// Tiny inline bar, capped so wide weeks stay on one line.
fn bar(count: usize) -> String {
    "█".repeat(count.min(24))
}
