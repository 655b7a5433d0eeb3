use crate::{LoadError, Template};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Catalog compiled into the binary
const BUILTIN_TOML: &str = include_str!("../data/templates.toml");

static BUILTIN: OnceCell<Catalog> = OnceCell::new();

/// On-disk layout shared by the TOML and JSON formats
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    template: Vec<Template>,
}

/// Ordered, validated, read-only collection of templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    templates: Vec<Template>,
}

/// Load the built-in catalog.
///
/// Parsed and validated on first use, then shared for the rest of the process.
pub fn load() -> Result<&'static Catalog, LoadError> {
    BUILTIN.get_or_try_init(|| Catalog::from_toml_str(BUILTIN_TOML))
}

/// Distinct categories in order of first appearance.
pub fn categories(catalog: &Catalog) -> Vec<&str> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .map(|t| t.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

/// Categories paired with the number of templates in each, first-appearance order.
pub fn category_counts(catalog: &Catalog) -> Vec<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for template in catalog.iter() {
        *counts.entry(template.category.as_str()).or_default() += 1;
    }
    categories(catalog)
        .into_iter()
        .map(|category| (category, counts[category]))
        .collect()
}

impl Catalog {
    /// Build a catalog from records, rejecting empty required fields and duplicate ids.
    pub fn new(templates: Vec<Template>) -> Result<Self, LoadError> {
        validate(&templates)?;
        log::debug!("Loaded catalog with {} templates", templates.len());
        Ok(Self { templates })
    }

    /// Parse a TOML document made of `[[template]]` tables.
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        let file: CatalogFile = toml::from_str(s)?;
        Self::new(file.template)
    }

    /// Parse a JSON document: either `{"template": [...]}` or a bare array.
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        let templates = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            serde_json::from_value::<CatalogFile>(value)?.template
        };
        Self::new(templates)
    }

    /// Read a catalog file; `.json` files are parsed as JSON, everything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Reading catalog from {}", path.display());

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Look up a template by id
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Position of a template in catalog order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.id == id)
    }

    pub fn categories(&self) -> Vec<&str> {
        categories(self)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate(templates: &[Template]) -> Result<(), LoadError> {
    let mut seen = HashSet::new();
    for (index, template) in templates.iter().enumerate() {
        let required = [
            ("id", &template.id),
            ("title", &template.title),
            ("category", &template.category),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(LoadError::MissingField { index, field });
            }
        }
        if !seen.insert(template.id.as_str()) {
            return Err(LoadError::DuplicateId {
                id: template.id.clone(),
            });
        }
    }
    Ok(())
}
