use clap::{Args, Subcommand};
use dialoguer::{Confirm, Input, Select};
use serde_json::json;
use stackfetch::config::{
    config_path, delete_config, load_stored_config, save_config, Region, StoredConfig,
};

use crate::output::{print_value, OutputMode};

const REGIONS: [Region; 5] = [
    Region::Us,
    Region::Eu,
    Region::AzureNa,
    Region::AzureEu,
    Region::GcpNa,
];

#[derive(Debug, Clone, Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    command: ConfigSubcmd,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigSubcmd {
    Setup,
    Show,
    Path,
    Reset,
}

pub async fn run(cmd: ConfigCmd, mode: OutputMode) -> anyhow::Result<()> {
    match cmd.command {
        ConfigSubcmd::Setup => setup(mode),
        ConfigSubcmd::Show => show(mode),
        ConfigSubcmd::Path => path(mode),
        ConfigSubcmd::Reset => reset(mode),
    }
}

fn setup(mode: OutputMode) -> anyhow::Result<()> {
    let region_names = REGIONS.iter().map(Region::as_str).collect::<Vec<_>>();
    let region_idx = Select::new()
        .with_prompt("Region")
        .items(&region_names)
        .default(0)
        .interact()?;

    let api_key: String = Input::new().with_prompt("Stack API key").interact_text()?;
    let delivery_token: String = Input::new()
        .with_prompt("Delivery token")
        .interact_text()?;
    let environment: String = Input::new()
        .with_prompt("Publishing environment (blank for none)")
        .allow_empty(true)
        .interact_text()?;

    let cfg = StoredConfig {
        api_key: Some(api_key),
        delivery_token: Some(delivery_token),
        environment: Some(environment).filter(|e| !e.is_empty()),
        region: Some(REGIONS[region_idx]),
        host: None,
    };

    let path = save_config(&cfg)?;
    print_value(mode, &json!({"ok": true, "path": path.display().to_string()}))
}

fn show(mode: OutputMode) -> anyhow::Result<()> {
    let cfg = load_stored_config()?;
    let masked = json!({
        "apiKey": cfg.api_key.as_deref().map(mask_secret),
        "deliveryToken": cfg.delivery_token.as_deref().map(mask_secret),
        "environment": cfg.environment,
        "region": cfg.region.map(|r| r.as_str()),
        "host": cfg.host,
    });
    print_value(mode, &masked)
}

fn path(mode: OutputMode) -> anyhow::Result<()> {
    print_value(mode, &json!({"path": config_path()?.display().to_string()}))
}

fn reset(mode: OutputMode) -> anyhow::Result<()> {
    if Confirm::new()
        .with_prompt("Delete stored credentials?")
        .default(false)
        .interact()?
    {
        let deleted = delete_config()?;
        print_value(mode, &json!({"deleted": deleted}))
    } else {
        print_value(mode, &json!({"deleted": false}))
    }
}

fn mask_secret(value: &str) -> String {
    let chars = value.chars().collect::<Vec<_>>();
    if chars.len() <= 6 {
        return "***".to_string();
    }
    let head = chars[..3].iter().collect::<String>();
    let tail = chars[chars.len() - 3..].iter().collect::<String>();
    format!("{head}***{tail}")
}
