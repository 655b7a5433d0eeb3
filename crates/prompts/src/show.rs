use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use prompts_catalog::{Catalog, Template};
use unicode_width::UnicodeWidthStr;

use crate::lookup::find_template;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Template id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print only the prompt body
    #[arg(long)]
    pub raw: bool,
}

pub fn execute(args: ShowArgs, catalog: &Catalog) -> Result<()> {
    let template = find_template(catalog, &args.id)?;
    let mut writer = io::stdout().lock();
    if args.raw {
        writeln!(writer, "{}", template.prompt.trim_end_matches('\n'))?;
    } else {
        write_template(template, writer)?;
    }
    Ok(())
}

fn write_template<W: Write>(template: &Template, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", template.title.bold())?;
    writeln!(writer, "{}", "─".repeat(template.title.width()).dimmed())?;
    writeln!(
        writer,
        "{} {}",
        template.category.cyan(),
        format!("({}.txt)", template.id).dimmed()
    )?;

    if !template.description.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}", template.description)?;
    }

    writeln!(writer)?;
    writeln!(writer, "{}", template.prompt.trim_end())?;

    if !template.tips.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}", "Usage Tips".bold())?;
        for tip in &template.tips {
            writeln!(writer, "  • {tip}")?;
        }
    }

    if !template.tags.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{} {}", "Tags:".dimmed(), template.tags.join(", "))?;
    }

    Ok(())
}
