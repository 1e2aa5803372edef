use std::collections::HashMap;
use std::sync::RwLock;

use storefront_core::{Entity, ProductId};

use crate::lookup::{
    CatalogLookup, LookupError, LookupResult, ProductSearch, VariantRelationshipLookup,
};
use crate::product::{Product, Visibility};
use crate::search::{ConditionType, Filter, SearchCriteria};

/// In-memory catalog for tests/dev.
///
/// Search supports `sku` (`eq`/`in`), `entity_id` (`eq`/`in`) and
/// `visibility` (`eq`). Results are ordered by product id.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    parents: RwLock<HashMap<ProductId, Vec<ProductId>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product. A poisoned lock drops the write with a warning.
    pub fn insert(&self, product: Product) {
        match self.products.write() {
            Ok(mut map) => {
                map.insert(*product.id(), product);
            }
            Err(_) => tracing::warn!(
                product_id = %product.id_typed(),
                "products lock poisoned; insert dropped"
            ),
        }
    }

    /// Remove a product. Variant links pointing at it are left in place, the
    /// same way a catalog leaves stale associations behind.
    pub fn remove(&self, id: ProductId) -> Option<Product> {
        self.products.write().ok()?.remove(&id)
    }

    /// Record `parent` as a configurable parent of `child`, after any existing parents.
    pub fn link(&self, child: ProductId, parent: ProductId) {
        let mut map = match self.parents.write() {
            Ok(map) => map,
            Err(_) => {
                tracing::warn!(
                    child_id = %child,
                    parent_id = %parent,
                    "relationships lock poisoned; link dropped"
                );
                return;
            }
        };
        let entry = map.entry(child).or_default();
        if !entry.contains(&parent) {
            entry.push(parent);
        }
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(what: &str) -> LookupError {
    LookupError::backend(format!("{what} lock poisoned"))
}

fn filter_matches(product: &Product, filter: &Filter) -> LookupResult<bool> {
    let values = filter.values();
    match (filter.field(), filter.condition()) {
        ("sku", _) => Ok(values.iter().any(|v| v.trim() == product.sku().as_str())),
        ("entity_id", _) => {
            let id = product.id_typed().to_string();
            Ok(values.iter().any(|v| v.trim() == id))
        }
        ("visibility", ConditionType::Eq) => {
            let wanted: Visibility = values
                .first()
                .map(String::as_str)
                .unwrap_or_default()
                .parse()
                .map_err(|e| LookupError::Unsupported(format!("visibility filter: {e}")))?;
            Ok(product.visibility() == wanted)
        }
        (field, condition) => Err(LookupError::Unsupported(format!(
            "{condition:?} on field `{field}`"
        ))),
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn get_by_id(&self, id: ProductId) -> LookupResult<Product> {
        let map = self.products.read().map_err(|_| poisoned("products"))?;
        map.get(&id).cloned().ok_or(LookupError::NotFound(id))
    }
}

impl VariantRelationshipLookup for InMemoryCatalog {
    fn parent_ids(&self, child: ProductId) -> LookupResult<Vec<ProductId>> {
        let map = self.parents.read().map_err(|_| poisoned("relationships"))?;
        Ok(map.get(&child).cloned().unwrap_or_default())
    }
}

impl ProductSearch for InMemoryCatalog {
    fn search(&self, criteria: &SearchCriteria) -> LookupResult<Vec<Product>> {
        let map = self.products.read().map_err(|_| poisoned("products"))?;

        let mut found = Vec::new();
        for product in map.values() {
            let mut keep = true;
            for filter in criteria.filters() {
                if !filter_matches(product, filter)? {
                    keep = false;
                    break;
                }
            }
            if keep {
                found.push(product.clone());
            }
        }

        found.sort_by_key(|p| p.id_typed());
        if let Some(size) = criteria.page_size() {
            found.truncate(size);
        }
        tracing::debug!(
            filters = criteria.filters().len(),
            results = found.len(),
            "in-memory catalog search"
        );
        Ok(found)
    }
}
