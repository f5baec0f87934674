//! `tiq list` — list tickets with filtering and search.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use tiq_core::config::EffectiveConfig;
use tiq_core::stats::FilterCounts;
use tiq_core::{Filter, FilterState, Ticket, filter};

use crate::backend;
use crate::output::{OutputMode, pretty_section, render};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter tab: all, pending, processed, positive, negative.
    #[arg(short, long, default_value = "all")]
    pub filter: Filter,

    /// Free-text search over description and category.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Maximum tickets to show.
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}

/// Report payload for `tiq list`.
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub counts: FilterCounts,
    pub shown: usize,
    pub tickets: Vec<Ticket>,
}

pub fn run_list(
    args: &ListArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let store = backend::store_client(config, output)?;
    let board = backend::load_board(&store, output)?;

    let state = FilterState {
        filter: args.filter,
        search: args.search.clone(),
    };
    let view = filter::apply(board.tickets(), &state);

    let report = ListReport {
        counts: board.filter_counts(),
        shown: view.len().min(args.limit),
        tickets: view.into_iter().take(args.limit).cloned().collect(),
    };

    render(output, &report, render_list_text, render_list_pretty)
}

/// One TSV-like row per ticket for pipes.
fn render_list_text(report: &ListReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "ID  STATE  CATEGORY  SENTIMENT  DESCRIPTION")?;
    for ticket in &report.tickets {
        writeln!(
            w,
            "{}  {}  {}  {}  {}",
            ticket.id,
            if ticket.processed { "processed" } else { "pending" },
            ticket.category.as_ref().map_or("-", |c| c.as_str()),
            ticket.sentiment.as_ref().map_or("-", |s| s.as_str()),
            truncate(&ticket.description, 60),
        )?;
    }
    Ok(())
}

fn render_list_pretty(report: &ListReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Tickets")?;
    if report.tickets.is_empty() {
        writeln!(w, "(no tickets match)")?;
    }
    for ticket in &report.tickets {
        let state = if ticket.processed { "✓" } else { "·" };
        let category = ticket.category.as_ref().map_or("-", |c| c.as_str());
        let sentiment = ticket.sentiment.as_ref().map_or("-", |s| s.as_str());
        writeln!(
            w,
            "{state} {:<10} {:<20} {:<9} {} {}",
            short_id(&ticket.id),
            category,
            sentiment,
            ticket.created_at.format("%Y-%m-%d %H:%M"),
            truncate(&ticket.description, 48),
        )?;
    }
    writeln!(
        w,
        "\n{} shown · {} total · {} pending · {} processed · {} positive · {} negative",
        report.shown,
        report.counts.all,
        report.counts.pending,
        report.counts.processed,
        report.counts.positive,
        report.counts.negative,
    )
}

/// First id segment, enough to paste into `tiq process`.
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{cut}…")
}
