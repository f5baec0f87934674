//! Construction of the remote collaborators from resolved config.

use crate::output::{CliError, OutputMode, render_error};
use tiq_client::{ApiClient, RestStore};
use tiq_core::TicketBoard;
use tiq_core::config::EffectiveConfig;
use tiq_core::store::TicketStore;

/// Build the ticket-store client, or fail with a configuration hint.
pub fn store_client(config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<RestStore> {
    match &config.store_url {
        Some(url) => Ok(RestStore::new(url.clone(), config.store_key.clone())),
        None => {
            render_error(
                output,
                &CliError::with_details(
                    "ticket store not configured",
                    "Set TIQ_STORE_URL (and TIQ_STORE_KEY), or add [store] url to tiq/config.toml",
                    "store_unconfigured",
                ),
            )?;
            anyhow::bail!("ticket store not configured");
        }
    }
}

/// Build the classification-service client.
#[must_use]
pub fn api_client(config: &EffectiveConfig) -> ApiClient {
    ApiClient::new(config.api_url.clone())
}

/// Load a fresh board from the store, rendering a page-level error on
/// failure.
pub fn load_board(store: &dyn TicketStore, output: OutputMode) -> anyhow::Result<TicketBoard> {
    let mut board = TicketBoard::new();
    if let Err(err) = board.load(store) {
        render_error(
            output,
            &CliError::with_details(
                format!("failed to load tickets: {err}"),
                "Check the store URL/key and retry",
                "load_failed",
            ),
        )?;
        anyhow::bail!("failed to load tickets");
    }
    Ok(board)
}
