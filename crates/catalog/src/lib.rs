//! Catalog domain module.
//!
//! Read-only view of catalog products as the storefront sees them, plus the
//! collaborator traits through which the storefront reaches the catalog
//! (entity lookup, configurable-product relationships, search). The catalog
//! store itself lives elsewhere; `InMemoryCatalog` backs tests and previews.

pub mod in_memory;
pub mod lookup;
pub mod money;
pub mod product;
pub mod search;
pub mod sku;

pub use in_memory::InMemoryCatalog;
pub use lookup::{CatalogLookup, LookupError, LookupResult, ProductSearch, VariantRelationshipLookup};
pub use money::Money;
pub use product::{Product, Visibility};
pub use search::{ConditionType, Filter, FilterBuilder, SearchCriteria, SearchCriteriaBuilder};
pub use sku::Sku;
