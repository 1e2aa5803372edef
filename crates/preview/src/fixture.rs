//! TOML fixture: storefront settings, scoped configuration and a small catalog.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use storefront_catalog::{InMemoryCatalog, Product};
use storefront_core::ProductId;
use storefront_featured::{
    FeaturedProductList, LocaleCurrencyFormatter, MediaImageUrlBuilder, ScopedConfig, StoreScope,
};

#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub storefront: StorefrontSettings,
    #[serde(default)]
    pub config: ScopedConfig,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub variants: Vec<VariantLink>,
}

#[derive(Debug, Deserialize)]
pub struct StorefrontSettings {
    pub media_base_url: String,
    pub static_base_url: String,
    #[serde(default)]
    pub currency: LocaleCurrencyFormatter,
}

#[derive(Debug, Deserialize)]
pub struct VariantLink {
    pub child: ProductId,
    pub parents: Vec<ProductId>,
}

impl Fixture {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid fixture")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    fn catalog(&self) -> Arc<InMemoryCatalog> {
        let catalog = Arc::new(InMemoryCatalog::new());
        for product in &self.products {
            catalog.insert(product.clone());
        }
        for link in &self.variants {
            for parent in &link.parents {
                catalog.link(link.child, *parent);
            }
        }
        catalog
    }

    /// Wire the featured product list for `scope` against this fixture.
    ///
    /// Only the fixture's own configuration is consulted; environment
    /// overrides are applied to `self.config` by the caller.
    pub fn featured(self, scope: StoreScope) -> FeaturedProductList {
        let catalog = self.catalog();
        tracing::debug!(products = catalog.len(), "fixture catalog loaded");

        FeaturedProductList::new(
            Arc::new(self.config),
            catalog.clone(),
            catalog.clone(),
            catalog,
            Arc::new(MediaImageUrlBuilder::new(
                self.storefront.media_base_url,
                self.storefront.static_base_url,
            )),
            Arc::new(self.storefront.currency),
            scope,
        )
    }
}
