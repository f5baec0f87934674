//! `tiq analyze` — classify a text without persisting anything.

use std::io::Write;

use clap::Args;
use tiq_core::config::EffectiveConfig;

use crate::backend;
use crate::output::{CliError, OutputMode, pretty_kv, render, render_error};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Text to classify.
    #[arg(value_name = "TEXT")]
    pub text: String,
}

pub fn run_analyze(
    args: &AnalyzeArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let client = backend::api_client(config);

    let analysis = match client.analyze_text(&args.text) {
        Ok(analysis) => analysis,
        Err(err) => {
            render_error(output, &CliError::new(err.to_string()))?;
            anyhow::bail!("analyze failed");
        }
    };

    render(
        output,
        &analysis,
        |a, w| writeln!(w, "{}  {}", a.category.as_str(), a.sentiment.as_str()),
        |a, w| {
            pretty_kv(w, "Categoría", a.category.as_str())?;
            pretty_kv(w, "Sentimiento", a.sentiment.as_str())
        },
    )
}
