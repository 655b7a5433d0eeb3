//! Prompt template catalog.
//!
//! The catalog is an immutable, ordered list of [`Template`] records loaded
//! once at startup, either from the data compiled into this crate or from an
//! external TOML/JSON file. [`filter`] narrows it down by search text and
//! category without reordering.

mod catalog;
mod error;
mod query;
mod template;

pub use catalog::{Catalog, categories, category_counts, load};
pub use error::LoadError;
pub use query::{Query, filter, matches_category, matches_search};
pub use template::Template;
