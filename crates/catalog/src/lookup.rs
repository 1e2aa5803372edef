//! Collaborator traits through which the storefront reads the catalog.

use std::sync::Arc;

use thiserror::Error;

use storefront_core::ProductId;

use crate::product::Product;
use crate::search::SearchCriteria;

pub type LookupResult<T> = Result<T, LookupError>;

/// Failure reported by a catalog collaborator.
///
/// `NotFound` is the expected, recoverable case (e.g. a parent product removed
/// after its variant association was recorded). Everything else is a lookup
/// failure the caller cannot do anything about.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("product {0} does not exist")]
    NotFound(ProductId),

    #[error("unsupported search criteria: {0}")]
    Unsupported(String),

    #[error("catalog backend failure: {0}")]
    Backend(String),
}

impl LookupError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}

/// Entity lookup by id.
pub trait CatalogLookup: Send + Sync {
    fn get_by_id(&self, id: ProductId) -> LookupResult<Product>;
}

/// Configurable-product grouping: child (variant) id → parent ids.
pub trait VariantRelationshipLookup: Send + Sync {
    /// Parent ids in the catalog's association order. Empty when the product is
    /// not a variant of anything.
    fn parent_ids(&self, child: ProductId) -> LookupResult<Vec<ProductId>>;
}

/// Product search by criteria.
pub trait ProductSearch: Send + Sync {
    fn search(&self, criteria: &SearchCriteria) -> LookupResult<Vec<Product>>;
}

impl<S> CatalogLookup for Arc<S>
where
    S: CatalogLookup + ?Sized,
{
    fn get_by_id(&self, id: ProductId) -> LookupResult<Product> {
        (**self).get_by_id(id)
    }
}

impl<S> VariantRelationshipLookup for Arc<S>
where
    S: VariantRelationshipLookup + ?Sized,
{
    fn parent_ids(&self, child: ProductId) -> LookupResult<Vec<ProductId>> {
        (**self).parent_ids(child)
    }
}

impl<S> ProductSearch for Arc<S>
where
    S: ProductSearch + ?Sized,
{
    fn search(&self, criteria: &SearchCriteria) -> LookupResult<Vec<Product>> {
        (**self).search(criteria)
    }
}
