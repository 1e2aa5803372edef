//! Canonical storefront URL for a product, with configurable-parent fallback.
//!
//! A variant that is not individually visible has no page of its own; links to
//! it must point at its configurable parent instead.

use thiserror::Error;

use storefront_catalog::{CatalogLookup, LookupError, Product, VariantRelationshipLookup};
use storefront_core::ProductId;

/// Outcome of a URL resolution. Only [`UrlResolution::url`] matters to most
/// callers; the variants exist so the "no URL" cases stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlResolution {
    /// The product's own URL.
    Own(String),
    /// The URL of the configurable parent the product belongs to.
    Parent { parent_id: ProductId, url: String },
    /// The parent was recorded in the variant association but no longer exists.
    ParentMissing { child_id: ProductId, parent_id: ProductId },
    /// The product whose URL would be used has none.
    Empty { product_id: ProductId },
}

impl UrlResolution {
    fn own(product: &Product) -> Self {
        if product.url().trim().is_empty() {
            UrlResolution::Empty { product_id: product.id_typed() }
        } else {
            UrlResolution::Own(product.url().to_string())
        }
    }

    fn parent(parent: &Product) -> Self {
        if parent.url().trim().is_empty() {
            UrlResolution::Empty { product_id: parent.id_typed() }
        } else {
            UrlResolution::Parent {
                parent_id: parent.id_typed(),
                url: parent.url().to_string(),
            }
        }
    }

    /// Non-empty URL, or `None`.
    pub fn url(&self) -> Option<&str> {
        match self {
            UrlResolution::Own(url) | UrlResolution::Parent { url, .. } => Some(url.as_str()),
            UrlResolution::ParentMissing { .. } | UrlResolution::Empty { .. } => None,
        }
    }

    pub fn into_url(self) -> Option<String> {
        match self {
            UrlResolution::Own(url) | UrlResolution::Parent { url, .. } => Some(url),
            UrlResolution::ParentMissing { .. } | UrlResolution::Empty { .. } => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("variant relationship lookup failed: {0}")]
    Relationships(#[source] LookupError),

    #[error("lookup of parent product {parent_id} failed: {source}")]
    ParentLookup {
        parent_id: ProductId,
        #[source]
        source: LookupError,
    },
}

/// Resolves the URL a storefront should link to for a product.
#[derive(Debug, Clone)]
pub struct ProductUrlResolver<R, C> {
    relationships: R,
    catalog: C,
}

impl<R, C> ProductUrlResolver<R, C>
where
    R: VariantRelationshipLookup,
    C: CatalogLookup,
{
    pub fn new(relationships: R, catalog: C) -> Self {
        Self { relationships, catalog }
    }

    /// Only the first parent (in the order the relationship lookup returns
    /// them) is considered. A parent that no longer exists yields
    /// [`UrlResolution::ParentMissing`]; any other lookup failure is returned
    /// as an error.
    pub fn resolve(&self, child: &Product) -> Result<UrlResolution, ResolveError> {
        let child_id = child.id_typed();
        let parent_ids = self
            .relationships
            .parent_ids(child_id)
            .map_err(ResolveError::Relationships)?;

        let parent_id = match parent_ids.first() {
            Some(id) if !child.visibility().is_individually_visible() => *id,
            _ => return Ok(UrlResolution::own(child)),
        };

        match self.catalog.get_by_id(parent_id) {
            Ok(parent) => Ok(UrlResolution::parent(&parent)),
            Err(LookupError::NotFound(_)) => {
                tracing::warn!(
                    child_id = %child_id,
                    parent_id = %parent_id,
                    "configurable parent no longer exists; product has no URL"
                );
                Ok(UrlResolution::ParentMissing { child_id, parent_id })
            }
            Err(source) => Err(ResolveError::ParentLookup { parent_id, source }),
        }
    }

    pub fn resolve_url(&self, child: &Product) -> Result<Option<String>, ResolveError> {
        self.resolve(child).map(UrlResolution::into_url)
    }
}
