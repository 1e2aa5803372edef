//! Featured products storefront component.
//!
//! Reads the configured featured SKUs, resolves them through catalog search and
//! prepares everything a template needs to render them: image URLs, formatted
//! prices and canonical product URLs (with configurable-parent resolution).
//! All collaborators are passed in explicitly.

pub mod card;
pub mod config;
pub mod image;
pub mod price;
pub mod product_list;
pub mod url_resolver;

pub use card::ProductCard;
pub use config::{ConfigError, ConfigSource, FEATURED_SKUS_PATH, ScopedConfig, StoreScope};
pub use image::{ImagePreset, ImageUrlBuilder, MediaImageUrlBuilder};
pub use price::{CurrencyFormatter, LocaleCurrencyFormatter, SymbolPosition};
pub use product_list::{DEFAULT_IMAGE_WIDTH, FeaturedError, FeaturedProductList};
pub use url_resolver::{ProductUrlResolver, ResolveError, UrlResolution};
