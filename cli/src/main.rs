use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use bbs_demo_core_rs::models::params::{parse_decimal, DEFAULT_ROULETTE_SLOTS};
use bbs_demo_core_rs::{BbsParams, DemoService, SamplingStrategy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Blum-Blum-Shub cipher, roulette and shuffle demo")]
struct Cli {
    /// First prime factor (decimal)
    #[arg(long, global = true)]
    p: Option<String>,

    /// Second prime factor (decimal)
    #[arg(long, global = true)]
    q: Option<String>,

    /// Seed (decimal)
    #[arg(long, global = true)]
    seed: Option<String>,

    /// JSON file holding `{"p": "...", "q": "...", "seed": "..."}`.
    ///
    /// Individual `--p/--q/--seed` flags override values from the file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Omit the step trace from printed results
    #[arg(long, global = true, default_value_t = false)]
    hide_steps: bool,

    /// Print the audit event log after the result
    #[arg(long, global = true, default_value_t = false)]
    events: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encrypt text to uppercase hex
    Encrypt {
        #[arg(long)]
        text: String,
    },

    /// Decrypt hex produced by `encrypt` with the same parameters
    Decrypt {
        #[arg(long)]
        hex: String,
    },

    /// Spin the roulette wheel
    Spin {
        #[arg(long, default_value_t = DEFAULT_ROULETTE_SLOTS)]
        slots: usize,
        /// Redraw out-of-range results instead of reducing modulo the slot count
        #[arg(long, default_value_t = false)]
        rejection: bool,
    },

    /// Shuffle a comma-separated list
    Shuffle {
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        items: Vec<String>,
    },

    /// Shuffle a standard 52-card deck
    ShuffleDeck,
}

fn resolve_params(cli: &Cli) -> Result<BbsParams> {
    let mut params = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str::<BbsParams>(&raw)
                .with_context(|| format!("parse {}", path.display()))?
        }
        None => BbsParams::default(),
    };

    if let Some(p) = &cli.p {
        params.p = parse_decimal("p", p)?;
    }
    if let Some(q) = &cli.q {
        params.q = parse_decimal("q", q)?;
    }
    if let Some(seed) = &cli.seed {
        params.seed = parse_decimal("seed", seed)?;
    }
    Ok(params)
}

fn render<T: Serialize>(result: &T, hide_steps: bool) -> Result<String> {
    let mut value = serde_json::to_value(result).context("serialize result")?;
    if hide_steps {
        if let Value::Object(map) = &mut value {
            map.remove("steps");
        }
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

fn run(cli: &Cli, service: &mut DemoService) -> Result<String> {
    let params = resolve_params(cli)?;

    let rendered = match &cli.cmd {
        Cmd::Encrypt { text } => render(&service.encrypt(text, &params)?, cli.hide_steps)?,
        Cmd::Decrypt { hex } => render(&service.decrypt(hex, &params)?, cli.hide_steps)?,
        Cmd::Spin { slots, rejection } => {
            let strategy = if *rejection {
                SamplingStrategy::Rejection
            } else {
                SamplingStrategy::Modulo
            };
            render(&service.spin(&params, *slots, strategy)?, cli.hide_steps)?
        }
        Cmd::Shuffle { items } => {
            render(&service.shuffle(&params, items.clone())?, cli.hide_steps)?
        }
        Cmd::ShuffleDeck => render(&service.shuffle_deck(&params)?, cli.hide_steps)?,
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut service = DemoService::new();

    let outcome = run(&cli, &mut service);
    if cli.events {
        let events = serde_json::to_string_pretty(service.event_log().events())?;
        eprintln!("{}", events);
    }

    println!("{}", outcome?);
    Ok(())
}
