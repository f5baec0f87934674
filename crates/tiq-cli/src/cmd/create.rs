//! `tiq create` — create a new support ticket.

use std::io::Write;

use clap::Args;
use tiq_core::config::EffectiveConfig;
use tiq_core::model::{Category, Sentiment};

use crate::backend;
use crate::output::{CliError, OutputMode, pretty_kv, render, render_error};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Description of the problem or request.
    #[arg(short, long)]
    pub description: String,

    /// Category, when already known (otherwise the service infers it).
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Sentiment, when already known: positivo, negativo, neutro.
    #[arg(short, long)]
    pub sentiment: Option<Sentiment>,
}

pub fn run_create(
    args: &CreateArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let client = backend::api_client(config);

    let created = match client.create_ticket(
        &args.description,
        args.category.as_ref(),
        args.sentiment.as_ref(),
    ) {
        Ok(created) => created,
        Err(err) => {
            render_error(output, &CliError::new(err.to_string()))?;
            anyhow::bail!("create failed");
        }
    };

    render(
        output,
        &created,
        |created, w| writeln!(w, "{}  created", created.ticket_id),
        |created, w| {
            writeln!(w, "✓ {}", created.message)?;
            pretty_kv(w, "Ticket", &created.ticket_id)?;
            pretty_kv(
                w,
                "Categoría",
                created.category.as_ref().map_or("(pendiente)", |c| c.as_str()),
            )?;
            pretty_kv(
                w,
                "Sentimiento",
                created.sentiment.as_ref().map_or("(pendiente)", |s| s.as_str()),
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::CreateArgs;
    use tiq_core::model::{Category, Sentiment};

    #[test]
    fn create_args_parse_optional_classification() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CreateArgs,
        }

        let w = Wrapper::parse_from(["test", "--description", "Mi factura está mal"]);
        assert!(w.args.category.is_none());
        assert!(w.args.sentiment.is_none());

        let w = Wrapper::parse_from([
            "test",
            "--description",
            "Mi factura está mal",
            "--category",
            "facturación",
            "--sentiment",
            "negativo",
        ]);
        assert_eq!(w.args.category, Some(Category::Billing));
        assert_eq!(w.args.sentiment, Some(Sentiment::Negative));
    }

    #[test]
    fn unknown_category_is_preserved_not_rejected() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: CreateArgs,
        }
        let w = Wrapper::parse_from(["test", "-d", "texto", "--category", "algo nuevo"]);
        assert_eq!(w.args.category, Some(Category::Unknown("algo nuevo".into())));
    }
}
