//! View model behind the featured products block.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use storefront_catalog::{
    CatalogLookup, ConditionType, Filter, LookupError, Money, Product, ProductSearch,
    SearchCriteria, Sku, VariantRelationshipLookup,
};
use storefront_core::DomainError;

use crate::card::ProductCard;
use crate::config::{ConfigSource, FEATURED_SKUS_PATH, StoreScope};
use crate::image::{ImagePreset, ImageUrlBuilder};
use crate::price::CurrencyFormatter;
use crate::url_resolver::{ProductUrlResolver, ResolveError};

/// Width (px) of the product page image rendition shown on featured tiles.
pub const DEFAULT_IMAGE_WIDTH: u32 = 500;

#[derive(Debug, Error)]
pub enum FeaturedError {
    #[error("featured product search failed: {0}")]
    Search(#[from] LookupError),

    #[error("invalid search criteria: {0}")]
    Criteria(#[from] DomainError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

type Resolver = ProductUrlResolver<Arc<dyn VariantRelationshipLookup>, Arc<dyn CatalogLookup>>;

/// Featured products for one store view.
pub struct FeaturedProductList {
    config: Arc<dyn ConfigSource>,
    search: Arc<dyn ProductSearch>,
    resolver: Resolver,
    images: Arc<dyn ImageUrlBuilder>,
    prices: Arc<dyn CurrencyFormatter>,
    scope: StoreScope,
}

impl FeaturedProductList {
    pub fn new(
        config: Arc<dyn ConfigSource>,
        search: Arc<dyn ProductSearch>,
        relationships: Arc<dyn VariantRelationshipLookup>,
        catalog: Arc<dyn CatalogLookup>,
        images: Arc<dyn ImageUrlBuilder>,
        prices: Arc<dyn CurrencyFormatter>,
        scope: StoreScope,
    ) -> Self {
        Self {
            config,
            search,
            resolver: ProductUrlResolver::new(relationships, catalog),
            images,
            prices,
            scope,
        }
    }

    /// Configured featured SKUs, in configuration order, without blanks or duplicates.
    pub fn featured_skus(&self) -> Vec<Sku> {
        let raw = self
            .config
            .value(FEATURED_SKUS_PATH, &self.scope)
            .unwrap_or_default();
        parse_sku_list(&raw)
    }

    /// Catalog products for the configured SKUs, ordered like the configuration.
    /// SKUs with no matching product are skipped.
    pub fn featured_products(&self) -> Result<Vec<Product>, FeaturedError> {
        let skus = self.featured_skus();
        if skus.is_empty() {
            return Ok(Vec::new());
        }

        let filter = Filter::builder()
            .field("sku")
            .condition(ConditionType::In)
            .values(skus.iter().map(Sku::as_str))
            .build()?;
        let criteria = SearchCriteria::builder().filter(filter).build();
        let mut products = self.search.search(&criteria)?;

        let rank: HashMap<&Sku, usize> = skus.iter().enumerate().map(|(i, s)| (s, i)).collect();
        products.sort_by_key(|p| rank.get(p.sku()).copied().unwrap_or(usize::MAX));

        if products.len() < skus.len() {
            tracing::debug!(
                configured = skus.len(),
                found = products.len(),
                "some featured SKUs did not match a catalog product"
            );
        }
        Ok(products)
    }

    pub fn product_image_url(&self, product: &Product) -> String {
        self.images
            .build(product, &ImagePreset::product_page(), DEFAULT_IMAGE_WIDTH)
    }

    pub fn formatted_price(&self, price: &Money) -> String {
        self.prices.format(price)
    }

    /// See [`ProductUrlResolver::resolve_url`].
    pub fn product_url(&self, product: &Product) -> Result<Option<String>, ResolveError> {
        self.resolver.resolve_url(product)
    }

    /// Render-ready tiles for every featured product.
    pub fn cards(&self) -> Result<Vec<ProductCard>, FeaturedError> {
        self.featured_products()?
            .iter()
            .map(|product| -> Result<ProductCard, FeaturedError> {
                Ok(ProductCard {
                    sku: product.sku().to_string(),
                    name: product.name().to_string(),
                    url: self.product_url(product)?,
                    image_url: self.product_image_url(product),
                    price: product.price().map(|p| self.formatted_price(p)),
                })
            })
            .collect()
    }
}

fn parse_sku_list(raw: &str) -> Vec<Sku> {
    let mut seen = HashSet::new();
    raw.split([',', '\n', '\r'])
        .filter_map(|part| Sku::parse(part).ok())
        .filter(|sku| seen.insert(sku.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use std::sync::Mutex;

    use rust_decimal::Decimal;
    use storefront_catalog::{InMemoryCatalog, LookupResult, Visibility};
    use storefront_core::ProductId;

    use crate::config::ScopedConfig;
    use crate::image::MediaImageUrlBuilder;
    use crate::price::LocaleCurrencyFormatter;

    /// Search backend that records the criteria it was called with.
    #[derive(Default)]
    struct RecordingSearch {
        inner: InMemoryCatalog,
        calls: Mutex<Vec<SearchCriteria>>,
    }

    impl ProductSearch for RecordingSearch {
        fn search(&self, criteria: &SearchCriteria) -> LookupResult<Vec<Product>> {
            self.calls.lock().unwrap().push(criteria.clone());
            self.inner.search(criteria)
        }
    }

    fn product(id: u64, sku: &str) -> Product {
        Product::new(ProductId::new(id), Sku::parse(sku).unwrap(), format!("Product {sku}"))
            .with_url(format!("/{}.html", sku.to_lowercase()))
    }

    fn list(skus: Option<&str>, catalog: Arc<InMemoryCatalog>, search: Arc<RecordingSearch>) -> FeaturedProductList {
        let mut config = ScopedConfig::new();
        if let Some(skus) = skus {
            config.set_default(FEATURED_SKUS_PATH, skus);
        }
        FeaturedProductList::new(
            Arc::new(config),
            search,
            catalog.clone(),
            catalog,
            Arc::new(MediaImageUrlBuilder::new("https://shop.test/media", "https://shop.test/static")),
            Arc::new(LocaleCurrencyFormatter::new()),
            StoreScope::store("base", "default"),
        )
    }

    #[test]
    fn sku_list_is_trimmed_deduplicated_and_ordered() {
        let skus = parse_sku_list(" B ,A,, \nB,C\r\n ");
        let skus: Vec<&str> = skus.iter().map(Sku::as_str).collect();
        assert_eq!(skus, vec!["B", "A", "C"]);
    }

    #[test]
    fn no_configuration_means_no_search() {
        let search = Arc::new(RecordingSearch::default());
        let list = list(None, Arc::new(InMemoryCatalog::new()), search.clone());

        assert!(list.featured_skus().is_empty());
        assert!(list.featured_products().unwrap().is_empty());
        assert!(search.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn searches_by_sku_in_filter_and_keeps_configured_order() {
        let search = Arc::new(RecordingSearch::default());
        search.inner.insert(product(1, "A"));
        search.inner.insert(product(2, "B"));
        search.inner.insert(product(3, "C"));
        let list = list(Some("C, A, MISSING"), Arc::new(InMemoryCatalog::new()), search.clone());

        let products = list.featured_products().unwrap();
        let skus: Vec<&str> = products.iter().map(|p| p.sku().as_str()).collect();
        assert_eq!(skus, vec!["C", "A"]);

        let calls = search.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let filter = &calls[0].filters()[0];
        assert_eq!(filter.field(), "sku");
        assert_eq!(filter.condition(), ConditionType::In);
        assert_eq!(filter.values(), ["C", "A", "MISSING"]);
    }

    #[test]
    fn helpers_delegate_to_collaborators() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let list = list(None, catalog, Arc::new(RecordingSearch::default()));
        let p = product(1, "WJ01").with_image("w/j/wj01.jpg");

        assert_eq!(
            list.product_image_url(&p),
            "https://shop.test/media/catalog/product/cache/product_page_image/500x/w/j/wj01.jpg"
        );
        let price = Money::new(Decimal::from_str("49.5").unwrap(), "USD").unwrap();
        assert_eq!(list.formatted_price(&price), "$49.50");
        assert_eq!(list.product_url(&p).unwrap().as_deref(), Some("/wj01.html"));
    }

    #[test]
    fn cards_resolve_parent_urls_and_prices() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.insert(product(5, "SHIRT"));
        catalog.link(ProductId::new(10), ProductId::new(5));
        catalog.link(ProductId::new(12), ProductId::new(99));

        let search = Arc::new(RecordingSearch::default());
        search.inner.insert(
            product(10, "SHIRT-BLUE")
                .with_visibility(Visibility::NotVisibleIndividually)
                .with_price(Money::new(Decimal::from_str("1200").unwrap(), "USD").unwrap()),
        );
        search.inner.insert(product(12, "SHIRT-GREEN").with_visibility(Visibility::NotVisibleIndividually));

        let cards = list(Some("SHIRT-BLUE,SHIRT-GREEN"), catalog, search).cards().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].url.as_deref(), Some("/shirt.html"));
        assert_eq!(cards[0].price.as_deref(), Some("$1,200.00"));
        assert_eq!(cards[0].image_url, "https://shop.test/static/placeholder/product_page_image.jpg");
        assert_eq!(cards[1].sku, "SHIRT-GREEN");
        assert_eq!(cards[1].url, None);
        assert_eq!(cards[1].price, None);
    }
}
