mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::{asset, config_cmd};
use output::OutputMode;
use stackfetch::config::{load_stored_config, resolve_stack_config, ConfigOverrides, Region};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Args)]
struct GlobalOpts {
    #[arg(short = 'o', long = "output", value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    #[arg(short = 'r', long = "region", value_enum, global = true)]
    region: Option<Region>,

    #[arg(long = "host", global = true)]
    host: Option<String>,

    #[arg(long = "api-key", global = true)]
    api_key: Option<String>,

    #[arg(long = "delivery-token", global = true)]
    delivery_token: Option<String>,

    #[arg(long = "environment", global = true)]
    environment: Option<String>,
}

#[derive(Debug, Parser)]
#[command(name = "stack", version, about = "Content stack delivery CLI")]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Asset(asset::AssetCmd),
    Config(config_cmd::ConfigCmd),
}

impl From<OutputFormat> for OutputMode {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Table => OutputMode::Table,
            OutputFormat::Json => OutputMode::Json,
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dispatch(cli).await
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let output_mode = OutputMode::from(cli.global.output);

    match cli.command {
        Commands::Config(cmd) => config_cmd::run(cmd, output_mode).await,
        Commands::Asset(cmd) => {
            let overrides = ConfigOverrides {
                api_key: cli.global.api_key,
                delivery_token: cli.global.delivery_token,
                environment: cli.global.environment,
                region: cli.global.region,
                host: cli.global.host,
            };
            let config = resolve_stack_config(overrides, load_stored_config()?)?;
            asset::run(config, output_mode, cmd).await
        }
    }
}
