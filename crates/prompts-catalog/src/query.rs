use crate::{Catalog, Template};

/// Search text plus optional category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub category: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>, category: Option<String>) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    /// True when the query matches every template
    pub fn is_unfiltered(&self) -> bool {
        self.text.trim().is_empty() && self.category.is_none()
    }

    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Template> {
        filter(catalog, &self.text, self.category.as_deref())
    }
}

/// Templates matching both the search text and the category, in catalog order.
///
/// Blank search text matches everything; `None` category matches everything.
/// An unknown category simply yields no results.
pub fn filter<'a>(
    catalog: &'a Catalog,
    search_query: &str,
    active_category: Option<&str>,
) -> Vec<&'a Template> {
    let needle = needle(search_query);
    let results: Vec<&Template> = catalog
        .iter()
        .filter(|t| matches_category(t, active_category))
        .filter(|t| needle.as_deref().is_none_or(|n| contains_needle(t, n)))
        .collect();

    log::debug!(
        "filter({:?}, {:?}) -> {} of {}",
        search_query,
        active_category,
        results.len(),
        catalog.len()
    );
    results
}

/// Exact, case-sensitive category comparison.
pub fn matches_category(template: &Template, active_category: Option<&str>) -> bool {
    active_category.is_none_or(|category| template.category == category)
}

/// Case-insensitive substring test over title, description, then tags.
pub fn matches_search(template: &Template, search_query: &str) -> bool {
    match needle(search_query) {
        Some(n) => contains_needle(template, &n),
        None => true,
    }
}

/// Lowercased query, or None when it is blank
fn needle(search_query: &str) -> Option<String> {
    if search_query.trim().is_empty() {
        None
    } else {
        Some(search_query.to_lowercase())
    }
}

fn contains_needle(template: &Template, needle: &str) -> bool {
    template.title.to_lowercase().contains(needle)
        || template.description.to_lowercase().contains(needle)
        || template
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
