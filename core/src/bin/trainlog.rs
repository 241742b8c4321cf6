use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use log::debug;
use serde_json::Value;

use trainlog_core::tools::{TOOL_LATEST_WORKOUT, TOOL_WEIGHT_PLOT, TOOL_WEIGHT_SUMMARY};
use trainlog_core::{
    default_renderer, plotting_available, tool_specs, Metrics, SheetConfig, SheetsApiClient, Tools,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Treningslogg: siste økt og vektstatistikk fra regnearket", long_about = None)]
struct Cli {
    /// Konfigfil (JSON)
    #[arg(short, long, default_value = "trainlog.json", value_hint = ValueHint::FilePath)]
    config: PathBuf,

    /// Debug-logging (overstyres av RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Skriv prometheus-tellere til stderr etter kjøringen
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Siste økt fra fanen "тренировки"
    Workout,
    /// Vektstatistikk for inneværende måned
    Weight,
    /// Vektgraf: "last" (måned, per dag) eller "all" (per uke)
    Plot {
        #[arg(long, default_value = "last")]
        period: String,
    },
    /// Kall et verktøy ved navn, slik agent-laget gjør
    Tool {
        name: String,
        /// Argumenter som JSON-objekt
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// List verktøyene som JSON
    Specs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    let (name, args) = match cli.command {
        Command::Workout => (TOOL_LATEST_WORKOUT.to_string(), Value::Null),
        Command::Weight => (TOOL_WEIGHT_SUMMARY.to_string(), Value::Null),
        Command::Plot { period } => (TOOL_WEIGHT_PLOT.to_string(), serde_json::json!({ "period": period })),
        Command::Tool { name, args } => {
            let args: Value = serde_json::from_str(&args).context("--args er ikke gyldig JSON")?;
            (name, args)
        }
        Command::Specs => {
            println!("{}", serde_json::to_string_pretty(&tool_specs())?);
            return Ok(());
        }
    };

    let cfg = SheetConfig::load(&cli.config)
        .with_context(|| format!("kunne ikke laste {}", cli.config.display()))?;
    let client = SheetsApiClient::new(cfg.clone());
    let metrics = Metrics::new().context("kunne ikke sette opp metrikk")?;
    let renderer = default_renderer();
    debug!("graf-støtte: {}", plotting_available());
    let tools = Tools::new(client, cfg, renderer, metrics);

    let out = tools.invoke(&name, &args).with_context(|| format!("verktøyet `{}` feilet", name))?;
    println!("{}", out);

    if cli.metrics {
        eprint!("{}", tools.metrics().render_text());
    }
    Ok(())
}
