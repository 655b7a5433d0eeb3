use anyhow::{Result, bail};
use prompts_catalog::{Catalog, Template};

const MAX_SUGGESTIONS: usize = 5;

/// Find a template by id, falling back to a case-insensitive match.
///
/// The error lists close ids (or the first few ids when nothing is close).
pub fn find_template<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Template> {
    if let Some(template) = catalog.get(id) {
        return Ok(template);
    }
    if let Some(template) = catalog.iter().find(|t| t.id.eq_ignore_ascii_case(id)) {
        return Ok(template);
    }

    let needle = id.to_lowercase();
    let mut suggestions: Vec<&str> = catalog
        .iter()
        .map(|t| t.id.as_str())
        .filter(|candidate| {
            !needle.is_empty() && (candidate.contains(&needle) || needle.contains(candidate))
        })
        .collect();
    if suggestions.is_empty() {
        suggestions = catalog.iter().map(|t| t.id.as_str()).collect();
    }

    let mut message = format!("Template '{id}' not found");
    if !suggestions.is_empty() {
        message.push_str("\n\nDid you mean:");
        for suggestion in suggestions.iter().take(MAX_SUGGESTIONS) {
            message.push_str("\n  ");
            message.push_str(suggestion);
        }
    }
    bail!(message)
}
