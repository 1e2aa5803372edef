//! Render the featured products block of a fixture storefront as JSON.

mod fixture;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use storefront_featured::StoreScope;
use storefront_observability::LogFormat;

use crate::fixture::Fixture;

#[derive(Debug, Parser)]
#[command(name = "storefront-preview", version, about)]
struct Cli {
    /// TOML fixture with storefront settings, configuration and catalog.
    #[arg(long, env = "STOREFRONT_FIXTURE")]
    fixture: PathBuf,

    /// Website code used for configuration lookups.
    #[arg(long, default_value = "base")]
    website: String,

    /// Store code used for configuration lookups.
    #[arg(long)]
    store: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Log line format on stderr (json or compact).
    #[arg(long, default_value = "json")]
    log_format: LogFormat,
}

impl Cli {
    fn scope(&self) -> StoreScope {
        match &self.store {
            Some(store) => StoreScope::store(self.website.as_str(), store.as_str()),
            None => StoreScope::website(self.website.as_str()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    storefront_observability::init_with(cli.log_format);

    let mut fixture = Fixture::load(&cli.fixture)?;
    fixture.config.apply_env();
    let cards = fixture
        .featured(cli.scope())
        .cards()
        .context("failed to build featured product cards")?;
    tracing::info!(cards = cards.len(), "featured products rendered");

    let json = if cli.pretty {
        serde_json::to_string_pretty(&cards)?
    } else {
        serde_json::to_string(&cards)?
    };
    println!("{json}");
    Ok(())
}
