use anyhow::Context;
use clap::{Args, Subcommand};
use stackfetch::{FetchOptions, Stack, StackConfig};

use crate::output::{print_value, render_asset_table, OutputMode};

#[derive(Debug, Clone, Args)]
pub struct AssetCmd {
    #[command(subcommand)]
    command: AssetSubcmd,
}

#[derive(Debug, Clone, Subcommand)]
enum AssetSubcmd {
    /// Fetch a single asset by uid.
    Fetch {
        uid: String,
        /// Extra query parameter as key=value. Repeatable.
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        #[arg(long)]
        include_fallback: bool,
        /// Only return these fields. Repeatable.
        #[arg(long = "only")]
        only: Vec<String>,
        /// Print the raw asset object instead of the typed view.
        #[arg(long)]
        json: bool,
        #[arg(long)]
        timeout_ms: Option<u64>,
        #[arg(long)]
        retries: Option<u32>,
    },
}

pub async fn run(config: StackConfig, mode: OutputMode, cmd: AssetCmd) -> anyhow::Result<()> {
    let stack = Stack::new(config)?;

    match cmd.command {
        AssetSubcmd::Fetch {
            uid,
            params,
            include_fallback,
            only,
            json,
            timeout_ms,
            retries,
        } => {
            let mut assets = stack.asset(&uid);
            for (key, value) in &params {
                assets.add_param(key, value)?;
            }
            if include_fallback {
                assets.include_fallback();
            }
            if !only.is_empty() {
                let fields = only.iter().map(String::as_str).collect::<Vec<_>>();
                assets.only(&fields)?;
            }
            if json {
                assets.to_json();
            }

            let mut overrides = FetchOptions::new();
            overrides.timeout_ms = timeout_ms;
            overrides.retry_limit = retries;

            let response = assets
                .fetch(Some(overrides))
                .await
                .with_context(|| format!("fetching asset {uid}"))?;
            let value = response.to_value()?;

            match mode {
                OutputMode::Json => print_value(mode, &value),
                OutputMode::Table => render_asset_table(&value),
            }
        }
    }
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}
