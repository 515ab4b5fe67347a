//! SoQL query builder: simple equality filters plus `$`-prefixed clauses.

use std::collections::BTreeMap;

use url::Url;

/// Parameters for a single resource request.
///
/// Equality filters are sent as `column=value` pairs. SoQL clauses are sent
/// with their `$` prefix. Nothing here follows pagination; `$limit` and
/// `$offset` are forwarded exactly as given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SodaQuery {
    pub filters: BTreeMap<String, String>,
    pub select: Option<String>,
    pub where_clause: Option<String>,
    pub order: Option<String>,
    pub group: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SodaQuery {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (column, value) in self.filters.iter() {
            url.query_pairs_mut().append_pair(column, value);
        }
        if let Some(select) = &self.select {
            url.query_pairs_mut().append_pair("$select", select);
        }
        if let Some(where_clause) = &self.where_clause {
            url.query_pairs_mut().append_pair("$where", where_clause);
        }
        if let Some(order) = &self.order {
            url.query_pairs_mut().append_pair("$order", order);
        }
        if let Some(group) = &self.group {
            url.query_pairs_mut().append_pair("$group", group);
        }
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("$q", search);
        }
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("$limit", &limit.to_string());
        }
        if let Some(offset) = self.offset {
            url.query_pairs_mut()
                .append_pair("$offset", &offset.to_string());
        }
        url
    }

    pub fn with_filter(mut self, column: &str, value: &str) -> Self {
        self.filters.insert(column.to_string(), value.to_string());
        self
    }
    pub fn with_filters<I, K, V>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.filters
            .extend(filters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_select(mut self, select: &str) -> Self {
        self.select = Some(select.to_string());
        self
    }

    pub fn with_where(mut self, where_clause: &str) -> Self {
        self.where_clause = Some(where_clause.to_string());
        self
    }

    pub fn with_order(mut self, order: &str) -> Self {
        self.order = Some(order.to_string());
        self
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Full-text search across all columns (`$q`).
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::SodaQuery;

    fn base_url() -> Url {
        Url::parse("https://example.com/resource/abcd-1234.json").unwrap()
    }

    #[test]
    fn empty_query_leaves_url_untouched() {
        let url = SodaQuery::default().add_to_url(&base_url());
        assert_eq!(url.query(), None);
    }

    #[test]
    fn filters_are_encoded() {
        let url = SodaQuery::default()
            .with_filter("issue_time", "11:00 pm")
            .with_filter("state", "NY")
            .add_to_url(&base_url());
        let query = url.query().unwrap();
        assert!(query.contains("issue_time=11%3A00+pm"));
        assert!(query.contains("state=NY"));
    }

    #[test]
    fn later_filter_replaces_earlier_value() {
        let query = SodaQuery::default()
            .with_filter("state", "NY")
            .with_filters([("state", "CA")]);
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters["state"], "CA");
    }
}
