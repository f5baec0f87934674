//! `tiq watch` — stream store changes into a live board.
//!
//! The poller bridges the store's change feed (see
//! `tiq_client::rest_store`); each received event is applied to the
//! board and echoed, one line per event.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use serde::Serialize;
use tiq_core::config::EffectiveConfig;
use tiq_core::Ticket;
use tiq_core::store::ChangeEvent;
use tracing::info;

use crate::backend;
use crate::output::OutputMode;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between store polls.
    #[arg(short, long, default_value = "5")]
    pub interval: u64,

    /// Run a single poll cycle and exit.
    #[arg(long)]
    pub once: bool,
}

/// One emitted line per change event.
#[derive(Debug, Serialize)]
struct EventLine<'a> {
    event: &'static str,
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticket: Option<&'a Ticket>,
}

pub fn run_watch(
    args: &WatchArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let store = backend::store_client(config, output)?;
    let mut board = backend::load_board(&store, output)?;
    info!(count = board.tickets().len(), "watching ticket board");

    if args.once {
        let events = store.poll_changes(board.tickets())?;
        for event in events {
            emit(&event, output)?;
            board.apply(event);
        }
        return Ok(());
    }

    let interval = Duration::from_secs(args.interval.max(1));
    let subscription = tiq_client::rest_store::spawn_poller(store, interval);

    // Runs until interrupted; dropping the subscription (process
    // exit) stops the poller thread.
    loop {
        if let Some(event) = subscription.next_timeout(interval) {
            emit(&event, output)?;
            board.apply(event);
        }
    }
}

fn emit(event: &ChangeEvent, output: OutputMode) -> anyhow::Result<()> {
    let line = match event {
        ChangeEvent::Inserted(ticket) => EventLine {
            event: "inserted",
            id: &ticket.id,
            ticket: Some(ticket),
        },
        ChangeEvent::Updated(ticket) => EventLine {
            event: "updated",
            id: &ticket.id,
            ticket: Some(ticket),
        },
        ChangeEvent::Deleted(id) => EventLine {
            event: "deleted",
            id,
            ticket: None,
        },
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if output.is_json() {
        writeln!(out, "{}", serde_json::to_string(&line)?)?;
    } else {
        match line.ticket {
            Some(ticket) => writeln!(
                out,
                "{}  {}  {}",
                line.event,
                line.id,
                ticket.description.chars().take(60).collect::<String>()
            )?,
            None => writeln!(out, "{}  {}", line.event, line.id)?,
        }
    }
    Ok(())
}
