//! Terminal front end for the prompt catalog: the interactive browser,
//! the category style table and the clipboard capability it copies through.

pub mod clipboard;
pub mod style;
pub mod tui;

pub use clipboard::{ClipboardWriteError, ClipboardWriter, SystemClipboard};
pub use style::{CategoryStyle, category_style};
pub use tui::run;
