use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use prompts_catalog::Catalog;
use std::borrow::Cow;
use std::path::PathBuf;

mod browse;
mod categories;
mod copy;
mod list;
mod lookup;
mod show;

/// Environment variable naming an external catalog file
const CATALOG_ENV: &str = "PROMPTS_CATALOG";

#[derive(Parser)]
#[command(name = "prompts")]
#[command(about = "Browse, search and copy prompt engineering templates", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Load templates from a TOML or JSON file instead of the built-in catalog
    #[arg(long, global = true, value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive browser (default)
    #[command(alias = "b")]
    Browse(browse::BrowseArgs),

    /// List templates matching a search and category
    #[command(alias = "ls")]
    List(list::ListArgs),

    /// List categories with their template counts
    Categories(categories::CategoriesArgs),

    /// Show a single template in full
    Show(show::ShowArgs),

    /// Copy a template's prompt to the system clipboard
    #[command(alias = "cp")]
    Copy(copy::CopyArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug (overridden by RUST_LOG)
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let catalog = open_catalog(cli.catalog)?;

    match cli.command {
        None => browse::execute(browse::BrowseArgs::default(), &catalog),
        Some(Commands::Browse(args)) => browse::execute(args, &catalog),
        Some(Commands::List(args)) => list::execute(args, &catalog),
        Some(Commands::Categories(args)) => categories::execute(args, &catalog),
        Some(Commands::Show(args)) => show::execute(args, &catalog),
        Some(Commands::Copy(args)) => copy::execute(args, &catalog),
    }
}

/// Resolve the catalog source: `--catalog`, then `PROMPTS_CATALOG`, then the built-in data
fn open_catalog(flag: Option<PathBuf>) -> Result<Cow<'static, Catalog>> {
    let path = flag.or_else(|| {
        std::env::var_os(CATALOG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    match path {
        Some(path) => {
            let catalog = Catalog::from_path(&path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            log::debug!("Using catalog {} ({} templates)", path.display(), catalog.len());
            Ok(Cow::Owned(catalog))
        }
        None => {
            let catalog = prompts_catalog::load().context("Built-in catalog is invalid")?;
            Ok(Cow::Borrowed(catalog))
        }
    }
}
