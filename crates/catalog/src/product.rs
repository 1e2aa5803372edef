use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Entity, ProductId};

use crate::money::Money;
use crate::sku::Sku;

/// Catalog visibility: whether a product has its own navigable storefront page.
///
/// Codes match the catalog's stored attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    NotVisibleIndividually,
    InCatalog,
    InSearch,
    InCatalogAndSearch,
}

impl Visibility {
    pub fn code(self) -> u8 {
        match self {
            Visibility::NotVisibleIndividually => 1,
            Visibility::InCatalog => 2,
            Visibility::InSearch => 3,
            Visibility::InCatalogAndSearch => 4,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Visibility::NotVisibleIndividually),
            2 => Ok(Visibility::InCatalog),
            3 => Ok(Visibility::InSearch),
            4 => Ok(Visibility::InCatalogAndSearch),
            other => Err(DomainError::validation(format!("unknown visibility code {other}"))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::NotVisibleIndividually => "not_visible_individually",
            Visibility::InCatalog => "in_catalog",
            Visibility::InSearch => "in_search",
            Visibility::InCatalogAndSearch => "in_catalog_and_search",
        }
    }

    /// Variants of a configurable product are usually stored as not individually visible.
    pub fn is_individually_visible(self) -> bool {
        self != Visibility::NotVisibleIndividually
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::InCatalogAndSearch
    }
}

/// Accepts either the numeric code ("1".."4") or the snake_case name.
impl FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Self::from_code(code);
        }
        match s {
            "not_visible_individually" => Ok(Visibility::NotVisibleIndividually),
            "in_catalog" => Ok(Visibility::InCatalog),
            "in_search" => Ok(Visibility::InSearch),
            "in_catalog_and_search" => Ok(Visibility::InCatalogAndSearch),
            other => Err(DomainError::validation(format!("unknown visibility `{other}`"))),
        }
    }
}

/// Catalog product entity, as read by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    sku: Sku,
    name: String,
    #[serde(default)]
    visibility: Visibility,
    /// Canonical storefront URL; empty when the catalog has none (e.g. no URL rewrite).
    #[serde(default)]
    url: String,
    /// Base image file, relative to the product media directory.
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    price: Option<Money>,
}

impl Product {
    pub fn new(id: ProductId, sku: Sku, name: impl Into<String>) -> Self {
        Self {
            id,
            sku,
            name: name.into(),
            visibility: Visibility::default(),
            url: String::new(),
            image: None,
            price: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.trim().is_empty())
    }

    pub fn price(&self) -> Option<&Money> {
        self.price.as_ref()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
