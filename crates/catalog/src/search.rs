//! Search criteria passed to a [`ProductSearch`](crate::ProductSearch) backend.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

/// Comparison applied by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    Eq,
    In,
}

/// A single field condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    field: String,
    condition: ConditionType,
    values: Vec<String>,
}

impl Filter {
    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn condition(&self) -> ConditionType {
        self.condition
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Builder for [`Filter`]; `Eq` filters take exactly one value.
#[derive(Debug, Default, Clone)]
pub struct FilterBuilder {
    field: Option<String>,
    condition: Option<ConditionType>,
    values: Vec<String>,
}

impl FilterBuilder {
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn condition(mut self, condition: ConditionType) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.values = vec![value.into()];
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> DomainResult<Filter> {
        let field = self
            .field
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| DomainError::validation("filter field is required"))?;
        let condition = self.condition.unwrap_or(ConditionType::Eq);
        if condition == ConditionType::Eq && self.values.len() != 1 {
            return Err(DomainError::validation(format!(
                "`eq` filter on `{field}` needs exactly one value, got {}",
                self.values.len()
            )));
        }
        Ok(Filter {
            field,
            condition,
            values: self.values,
        })
    }
}

/// Conjunction of filters plus an optional page size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    filters: Vec<Filter>,
    page_size: Option<usize>,
}

impl SearchCriteria {
    pub fn builder() -> SearchCriteriaBuilder {
        SearchCriteriaBuilder::default()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchCriteriaBuilder {
    filters: Vec<Filter>,
    page_size: Option<usize>,
}

impl SearchCriteriaBuilder {
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn build(self) -> SearchCriteria {
        SearchCriteria {
            filters: self.filters,
            page_size: self.page_size,
        }
    }
}
