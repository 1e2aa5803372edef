use serde::Serialize;

/// Everything a template needs to render one featured product tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub sku: String,
    pub name: String,
    /// `None` when the product has no navigable page (see `UrlResolution`).
    pub url: Option<String>,
    pub image_url: String,
    /// Formatted price with currency symbol; `None` for products without a price.
    pub price: Option<String>,
}
