use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use prompts_catalog::{Catalog, Template};
use prompts_tui::{ClipboardWriter, SystemClipboard};

use crate::lookup::find_template;

#[derive(Args, Debug, Clone)]
pub struct CopyArgs {
    /// Template id
    #[arg(value_name = "ID")]
    pub id: String,
}

pub fn execute(args: CopyArgs, catalog: &Catalog) -> Result<()> {
    let template = find_template(catalog, &args.id)?;
    let mut clipboard = SystemClipboard::new()?;
    copy_prompt(&mut clipboard, template)?;
    println!("{} Copied '{}' to clipboard", "✓".green(), template.id);
    Ok(())
}

/// Write the template's prompt body, verbatim, to `clipboard`.
///
/// Returns once the contents no longer depend on this process.
fn copy_prompt(clipboard: &mut dyn ClipboardWriter, template: &Template) -> Result<()> {
    log::debug!("Copying {} ({} bytes)", template.id, template.prompt.len());
    clipboard
        .write_text_and_wait(&template.prompt)
        .with_context(|| format!("Failed to copy '{}'", template.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompts_tui::ClipboardWriteError;

    #[derive(Default)]
    struct Recorder {
        written: Vec<String>,
        waited: bool,
        fail: bool,
    }

    impl ClipboardWriter for Recorder {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteError> {
            if self.fail {
                return Err(ClipboardWriteError::Write("denied".into()));
            }
            self.written.push(text.to_string());
            Ok(())
        }

        fn write_text_and_wait(&mut self, text: &str) -> Result<(), ClipboardWriteError> {
            self.write_text(text)?;
            self.waited = true;
            Ok(())
        }
    }

    #[test]
    fn test_copies_prompt_verbatim() {
        let catalog = prompts_catalog::load().unwrap();
        let template = find_template(catalog, "sql-optimizer").unwrap();
        let mut clipboard = Recorder::default();
        copy_prompt(&mut clipboard, template).unwrap();
        assert_eq!(clipboard.written, vec![template.prompt.clone()]);
    }

    #[test]
    fn test_copy_outlives_the_process() {
        let catalog = prompts_catalog::load().unwrap();
        let template = find_template(catalog, "docker-compose").unwrap();
        let mut clipboard = Recorder::default();
        copy_prompt(&mut clipboard, template).unwrap();
        assert!(clipboard.waited);
    }

    #[test]
    fn test_write_failure_names_template() {
        let catalog = prompts_catalog::load().unwrap();
        let template = find_template(catalog, "rag-query").unwrap();
        let mut clipboard = Recorder {
            fail: true,
            ..Default::default()
        };
        let err = copy_prompt(&mut clipboard, template).unwrap_err();
        assert_eq!(err.to_string(), "Failed to copy 'rag-query'");
        assert!(clipboard.written.is_empty());
        assert!(!clipboard.waited);
    }
}
