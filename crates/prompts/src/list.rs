use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use prompts_catalog::{Catalog, Template, filter};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive text matched against titles, descriptions and tags
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only list templates in this category (exact match)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn execute(args: ListArgs, catalog: &Catalog) -> Result<()> {
    if let Some(category) = &args.category
        && !catalog.categories().contains(&category.as_str())
    {
        log::warn!("Unknown category '{category}'");
    }

    let results = filter(catalog, &args.search, args.category.as_deref());

    let mut writer = io::stdout().lock();
    match args.format {
        OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string_pretty(&results)?)?,
        OutputFormat::Table => write_template_table(&results, catalog.len(), writer)?,
    };

    Ok(())
}

fn write_template_table<W: Write>(
    results: &[&Template],
    total: usize,
    mut writer: W,
) -> io::Result<()> {
    if results.is_empty() {
        writeln!(writer, "No templates found. Try a different search.")?;
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::DynamicFullWidth);
        table.set_header(vec!["ID", "Title", "Category", "Tags"]);

        for template in results {
            let tags = template.tags.join(", ");
            table.add_row(vec![
                template.id.as_str(),
                template.title.as_str(),
                template.category.as_str(),
                tags.as_str(),
            ]);
        }

        writeln!(writer, "{table}")?;
    }

    writeln!(writer, "Showing {} of {} templates", results.len(), total)
}
