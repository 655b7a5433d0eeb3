use std::io::{self, IsTerminal};

use anyhow::{Result, bail};
use clap::Args;
use prompts_catalog::{Catalog, Query};

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Start with this search text
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Start with this category selected
    #[arg(short, long)]
    pub category: Option<String>,
}

pub fn execute(args: BrowseArgs, catalog: &Catalog) -> Result<()> {
    if !io::stdout().is_terminal() {
        bail!("The interactive browser needs a terminal; use `prompts list` instead");
    }
    prompts_tui::run(catalog, Query::new(args.search, args.category))
}
