//! Block styling preview tool.
//!
//! Loads a feature config and a stored block record, then prints the editor
//! field set or the rendered front-end output.
//!
//! Usage:
//!   blockstyle fields --config features.yml --block block.json
//!   blockstyle render --config features.yml --block block.json
//!   blockstyle check-config --config features.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use blockstyle::{
    ConfigResolver, ContentBlockAttributes, FeatureConfig, FieldSetBuilder,
    InlineMarkupFormatter, OutputRenderer, PassthroughFormatter, TextFormatter,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Feature config file (.yml, .yaml or .toml). Defaults to BLOCKSTYLE_* variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the editor field set for a block as JSON.
    Fields {
        /// Stored block record (JSON).
        #[arg(long)]
        block: PathBuf,

        #[arg(long, value_enum, default_value_t = FormatterKind::Inline)]
        formatter: FormatterKind,
    },

    /// Print the CSS classes and formatted headline for a block as JSON.
    Render {
        /// Stored block record (JSON).
        #[arg(long)]
        block: PathBuf,

        #[arg(long, value_enum, default_value_t = FormatterKind::Inline)]
        formatter: FormatterKind,
    },

    /// Print the resolved feature config as JSON.
    CheckConfig,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatterKind {
    Inline,
    Passthrough,
}

impl FormatterKind {
    fn formatter(self) -> &'static dyn TextFormatter {
        match self {
            FormatterKind::Inline => &InlineMarkupFormatter,
            FormatterKind::Passthrough => &PassthroughFormatter,
        }
    }
}

#[derive(Serialize)]
struct RenderOutput {
    classes: String,
    headline: String,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    info!(
        has_spacing = config.has_spacing,
        has_borders = config.has_borders,
        has_headline_tags = config.has_headline_tags,
        has_headline_optic = config.has_headline_optic,
        "Feature config loaded"
    );
    let resolver = ConfigResolver::new(config);

    match args.command {
        Command::Fields { block, formatter } => {
            let attrs = load_block(&block)?;
            let fields =
                FieldSetBuilder::new(resolver).build_fields(&attrs, formatter.formatter());
            print_json(&fields)
        }
        Command::Render { block, formatter } => {
            let attrs = load_block(&block)?;
            let renderer = OutputRenderer::new(resolver);
            let output = RenderOutput {
                classes: renderer.css_classes(&attrs),
                headline: renderer.render_headline(&attrs, formatter.formatter()),
            };
            print_json(&output)
        }
        Command::CheckConfig => print_json(resolver.config()),
    }
}

fn load_config(path: Option<&Path>) -> Result<FeatureConfig> {
    match path {
        Some(path) => FeatureConfig::load_from_path(path)
            .with_context(|| format!("failed to load feature config from {}", path.display())),
        None => FeatureConfig::from_env().context("failed to load feature config from environment"),
    }
}

fn load_block(path: &Path) -> Result<ContentBlockAttributes> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read block record {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse block record {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
