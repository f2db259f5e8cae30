//! List/get query parameters.

use crate::filter::Filter;

/// Parameters for a `:list` or `:get` call, rendered in a fixed order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    page_size: Option<u32>,
    page: Option<u32>,
    sort: Vec<String>,
    appends: Vec<String>,
    fields: Vec<String>,
    filter_by_tk: Option<String>,
    filter: Option<Filter>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Add a sort key; prefix with `-` for descending.
    pub fn sort(mut self, key: &str) -> Self {
        self.sort.push(key.to_string());
        self
    }

    /// Ask the API to embed a relation (dotted paths allowed).
    pub fn append(mut self, relation: &str) -> Self {
        self.appends.push(relation.to_string());
        self
    }

    /// Restrict the projection to `field`.
    pub fn field(mut self, field: &str) -> Self {
        self.fields.push(field.to_string());
        self
    }

    /// Primary-key selector used by `:get`.
    pub fn filter_by_tk(mut self, key: impl ToString) -> Self {
        self.filter_by_tk = Some(key.to_string());
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(size) = self.page_size {
            pairs.push(("pageSize".to_string(), size.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        pairs.extend(self.sort.iter().map(|s| ("sort[]".to_string(), s.clone())));
        pairs.extend(self.appends.iter().map(|a| ("appends[]".to_string(), a.clone())));
        pairs.extend(self.fields.iter().map(|f| ("fields[]".to_string(), f.clone())));
        if let Some(key) = &self.filter_by_tk {
            pairs.push(("filterByTk".to_string(), key.clone()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("filter".to_string(), filter.to_query_value()));
        }
        pairs
    }
}
