//! Interactive catalog browser
//!
//! Single-threaded: every keystroke updates the query state and the result
//! list is recomputed synchronously before the next frame.
//!
//! Layout:
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Prompt Engineering Templates                                │
//! │ ▌ search text█                                              │
//! │  All  Code Generation  Content & Writing  DevOps  ...       │
//! │ Showing 3 of 13 templates                                   │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │ </> Code Review Assistant    │ Code Review Assistant        │
//! │     Get comprehensive ...    │ code-review.txt              │
//! │ </> REST API Generator       │ You are an expert ...        │
//! │     ...                      │ Usage Tips                   │
//! ├──────────────────────────────┴──────────────────────────────┤
//! │ [Copied to clipboard!]                                      │
//! │ [↑↓ select] [Tab category] [Enter open] [Esc quit]          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//! The right-hand detail drawer is only shown while a template is open.

mod app;
mod input;
mod toast;
mod ui;

pub use app::{App, run};
pub use input::TextInput;
pub use toast::{TOAST_DURATION, Toast};
