mod config;
mod input;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::AppConfig;
use html_options::{render, RenderKind};
use input::{InputFormat, RequestDocument};

#[derive(Parser, Debug)]
#[command(name = "html-options")]
#[command(version)]
#[command(about = "Render select, multiselect, radio and checkbox list markup from option data")]
struct Args {
    /// Request file (JSON or TOML); reads stdin when omitted or `-`
    request: Option<PathBuf>,

    /// Input format (defaults to the file extension, JSON for stdin)
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Override the request kind (select, multiselect, radio, checkbox_list)
    #[arg(short, long)]
    kind: Option<RenderKind>,

    /// Selected/checked value; repeat for a set
    #[arg(short, long = "default", value_name = "VALUE")]
    defaults: Vec<String>,

    /// Set an attribute as key=value, or a bare key for a boolean attribute
    #[arg(short, long = "attr", value_name = "KEY[=VALUE]")]
    attrs: Vec<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Write a default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays pure markup
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.init_config {
        let path = AppConfig::default().save(args.config.as_deref())?;
        tracing::info!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = AppConfig::load(args.config.as_deref())?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let html = render_request(&args, &config)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    if config.trailing_newline {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn render_request(args: &Args, config: &AppConfig) -> Result<String> {
    let (content, format) = match args.request.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (content, args.format.unwrap_or_else(|| InputFormat::from_path(path)))
        }
        _ => {
            let content = io::read_to_string(io::stdin()).context("Failed to read stdin")?;
            (content, args.format.unwrap_or(InputFormat::Json))
        }
    };

    let mut request = RequestDocument::parse(&content, format)?.into_request(config);

    if let Some(kind) = args.kind {
        request.kind = kind;
    }
    if let Some(default) = input::selection_from_args(&args.defaults) {
        request.default = default;
    }
    for arg in &args.attrs {
        let (key, value) = input::parse_attr(arg)?;
        request.attributes.insert(key, value);
    }

    Ok(render(&request))
}
