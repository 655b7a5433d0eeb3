use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use prompts_catalog::{Catalog, category_counts};
use unicode_width::UnicodeWidthStr;

use crate::list::OutputFormat;

#[derive(Args, Debug, Clone)]
pub struct CategoriesArgs {
    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn execute(args: CategoriesArgs, catalog: &Catalog) -> Result<()> {
    let counts = category_counts(catalog);
    match args.format {
        OutputFormat::Json => {
            let entries: Vec<_> = counts
                .iter()
                .map(|(name, count)| serde_json::json!({ "name": name, "count": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Table => write_categories(&counts, io::stdout().lock())?,
    }
    Ok(())
}

/// One aligned `name  count` line per category, in catalog order
fn write_categories<W: Write>(counts: &[(&str, usize)], mut writer: W) -> io::Result<()> {
    let name_width = counts.iter().map(|(name, _)| name.width()).max().unwrap_or(0);
    for (name, count) in counts {
        let pad = name_width - name.width();
        writeln!(
            writer,
            "{}{}  {}",
            name.bold(),
            " ".repeat(pad),
            count.to_string().dimmed()
        )?;
    }
    Ok(())
}
