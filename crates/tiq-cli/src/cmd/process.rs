//! `tiq process` — request AI classification for an existing ticket.

use std::io::Write;

use clap::Args;
use tiq_core::config::EffectiveConfig;

use crate::backend;
use crate::output::{CliError, OutputMode, pretty_kv, render, render_error};

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Id of the ticket to classify.
    #[arg(value_name = "TICKET_ID")]
    pub ticket_id: String,
}

pub fn run_process(
    args: &ProcessArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let client = backend::api_client(config);

    // The board picks up the processed row via the change feed; this
    // response is user feedback only.
    let processed = match client.process_ticket(&args.ticket_id) {
        Ok(processed) => processed,
        Err(err) => {
            render_error(output, &CliError::new(err.to_string()))?;
            anyhow::bail!("process failed");
        }
    };

    render(
        output,
        &processed,
        |p, w| {
            writeln!(
                w,
                "{}  {}  {}",
                p.ticket_id,
                p.category.as_str(),
                p.sentiment.as_str()
            )
        },
        |p, w| {
            writeln!(w, "✓ {}", p.message)?;
            pretty_kv(w, "Ticket", &p.ticket_id)?;
            pretty_kv(w, "Categoría", p.category.as_str())?;
            pretty_kv(w, "Sentimiento", p.sentiment.as_str())
        },
    )
}
