//! Application state and event loop

use super::input::TextInput;
use super::toast::{TOAST_DURATION, Toast};
use super::ui;
use crate::clipboard::{ClipboardWriteError, ClipboardWriter, SystemClipboard};
use anyhow::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use prompts_catalog::{Catalog, Query, Template};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

const PAGE_SIZE: isize = 10;

/// Browser state. Borrows the catalog for its whole lifetime.
pub struct App<'c> {
    catalog: &'c Catalog,
    /// Derived once from the catalog
    pub categories: Vec<&'c str>,
    pub search_input: TextInput,
    /// None = all categories
    pub active_category: Option<String>,
    /// Current filter output, catalog order
    pub results: Vec<&'c Template>,
    /// Selection index into `results` (handles scroll)
    pub list_state: ListState,
    pub selected_template_id: Option<String>,
    /// Detail drawer visible
    pub detail_open: bool,
    pub detail_scroll: u16,
    /// Largest useful `detail_scroll`, measured when the drawer is drawn
    pub detail_max_scroll: u16,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    /// Query the current `results` were computed for
    last_query: Option<Query>,
    clipboard: Option<Box<dyn ClipboardWriter>>,
}

impl<'c> App<'c> {
    pub fn new(catalog: &'c Catalog, clipboard: Option<Box<dyn ClipboardWriter>>) -> Self {
        let mut app = Self {
            catalog,
            categories: catalog.categories(),
            search_input: TextInput::new(),
            active_category: None,
            results: Vec::new(),
            list_state: ListState::default(),
            selected_template_id: None,
            detail_open: false,
            detail_scroll: 0,
            detail_max_scroll: u16::MAX,
            toast: None,
            should_quit: false,
            last_query: None,
            clipboard,
        };
        app.refresh_results();
        app
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn query(&self) -> Query {
        Query::new(self.search_input.text.clone(), self.active_category.clone())
    }

    /// Recompute results if the query changed since the last call
    pub fn refresh_results(&mut self) {
        let query = self.query();
        if self.last_query.as_ref() == Some(&query) {
            return;
        }
        self.results = query.apply(self.catalog);
        self.last_query = Some(query);
        self.sync_selection();
    }

    /// Keep the selected template if it is still visible, otherwise select the first result
    fn sync_selection(&mut self) {
        let index = self
            .selected_template_id
            .as_deref()
            .and_then(|id| self.results.iter().position(|t| t.id == id))
            .or_else(|| (!self.results.is_empty()).then_some(0));
        self.select(index);
    }

    fn select(&mut self, index: Option<usize>) {
        self.list_state.select(index);
        let id = index
            .and_then(|i| self.results.get(i))
            .map(|t| t.id.clone());
        if id != self.selected_template_id {
            self.detail_scroll = 0;
        }
        if id.is_none() {
            self.detail_open = false;
        }
        self.selected_template_id = id;
    }

    pub fn selected_template(&self) -> Option<&'c Template> {
        self.list_state
            .selected()
            .and_then(|i| self.results.get(i).copied())
    }

    /// Move selection by `delta` rows, clamped to the result list
    pub fn move_selection(&mut self, delta: isize) {
        if self.results.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let last = self.results.len() as isize - 1;
        self.select(Some((current + delta).clamp(0, last) as usize));
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.active_category = category;
        self.refresh_results();
    }

    /// Replace both the search text and the category filter
    pub fn set_query(&mut self, query: Query) {
        self.search_input.text = query.text;
        self.search_input.move_end();
        self.set_category(query.category);
    }

    /// Step through `All` followed by each category, wrapping around
    pub fn cycle_category(&mut self, forward: bool) {
        let slots = self.categories.len() + 1;
        let current = match &self.active_category {
            None => 0,
            Some(active) => self
                .categories
                .iter()
                .position(|c| *c == active.as_str())
                .map_or(0, |i| i + 1),
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        let category = next
            .checked_sub(1)
            .map(|i| self.categories[i].to_string());
        self.set_category(category);
    }

    pub fn open_detail(&mut self) {
        if self.selected_template().is_some() {
            self.detail_open = true;
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    /// Copy the selected template's prompt. Failures are logged and shown, never propagated.
    pub fn copy_selected(&mut self) {
        let Some(template) = self.selected_template() else {
            return;
        };

        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.write_text(&template.prompt),
            None => Err(ClipboardWriteError::Unavailable(
                "no system clipboard".to_string(),
            )),
        };

        match result {
            Ok(()) => {
                log::debug!("Copied prompt '{}' to clipboard", template.id);
                self.show_toast(Toast::new(COPIED_MESSAGE, TOAST_DURATION));
            }
            Err(e) => {
                log::warn!("Failed to copy prompt '{}': {}", template.id, e);
                self.show_toast(Toast::error(e.summary(), TOAST_DURATION));
            }
        }
    }

    /// Replace any visible toast and restart the timer
    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    pub fn update_toast(&mut self) {
        self.update_toast_at(Instant::now());
    }

    /// Clear the toast if it has expired by `now`
    pub fn update_toast_at(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.toast = None;
        }
    }

    fn scroll_detail(&mut self, delta: i32) {
        let next = (self.detail_scroll as i32 + delta).max(0);
        self.detail_scroll = next.min(self.detail_max_scroll as i32) as u16;
    }

    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.detail_open {
            self.handle_detail_key(key.code, key.modifiers);
        } else {
            self.handle_list_key(key.code, key.modifiers);
        }
        self.refresh_results();
    }

    fn handle_detail_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Esc => self.close_detail(),
            KeyCode::Enter => self.copy_selected(),
            KeyCode::Char('y') if ctrl => self.copy_selected(),
            KeyCode::Up => self.scroll_detail(-1),
            KeyCode::Char('k') if ctrl => self.scroll_detail(-1),
            KeyCode::Down => self.scroll_detail(1),
            KeyCode::Char('j') if ctrl => self.scroll_detail(1),
            KeyCode::PageUp => self.scroll_detail(-(PAGE_SIZE as i32)),
            KeyCode::PageDown => self.scroll_detail(PAGE_SIZE as i32),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('y') if ctrl => self.copy_selected(),
            KeyCode::Tab => self.cycle_category(true),
            KeyCode::BackTab => self.cycle_category(false),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('k') if ctrl => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('j') if ctrl => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_SIZE),
            KeyCode::PageDown => self.move_selection(PAGE_SIZE),
            _ => {
                self.search_input.handle_key(code, modifiers);
            }
        }
    }
}

/// Run the browser until the user quits, starting from `initial`
pub fn run(catalog: &Catalog, initial: Query) -> Result<()> {
    let clipboard: Option<Box<dyn ClipboardWriter>> = match SystemClipboard::new() {
        Ok(c) => Some(Box::new(c)),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, clipboard);
    app.set_query(initial);

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    const FRAME_TIME: Duration = Duration::from_millis(16);

    loop {
        app.update_toast();

        terminal.draw(|f| ui::render(f, app))?;

        // Drain everything queued so fast typing doesn't lag a frame per key
        if event::poll(FRAME_TIME)? {
            app.handle_event(event::read()?);
            while event::poll(Duration::ZERO)? && !app.should_quit {
                app.handle_event(event::read()?);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::FakeClipboard;
    use crossterm::event::KeyEvent;
    use std::sync::{Mutex, Once};

    fn catalog() -> &'static Catalog {
        prompts_catalog::load().unwrap()
    }

    fn app_with(clipboard: Option<FakeClipboard>) -> App<'static> {
        App::new(
            catalog(),
            clipboard.map(|c| Box::new(c) as Box<dyn ClipboardWriter>),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        press_with(app, code, KeyModifiers::NONE);
    }

    fn press_with(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn result_ids<'a>(app: &'a App) -> Vec<&'a str> {
        app.results.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let app = app_with(None);
        assert_eq!(app.results.len(), 13);
        assert_eq!(app.categories.len(), 6);
        assert_eq!(app.selected_template_id.as_deref(), Some("code-review"));
        assert!(app.active_category.is_none());
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_typing_filters_results() {
        let mut app = app_with(None);
        type_str(&mut app, "Review");
        assert_eq!(result_ids(&app), vec!["code-review"]);

        type_str(&mut app, "zzz");
        assert!(app.results.is_empty());
        assert!(app.selected_template().is_none());

        press_with(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.results.len(), 13);
    }

    #[test]
    fn test_tab_cycles_categories() {
        let mut app = app_with(None);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_category.as_deref(), Some("Code Generation"));
        assert_eq!(
            result_ids(&app),
            vec!["code-review", "api-endpoint", "test-generator"]
        );

        press(&mut app, KeyCode::BackTab);
        assert!(app.active_category.is_none());
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_category.as_deref(), Some("Product & Business"));
        press(&mut app, KeyCode::Tab);
        assert!(app.active_category.is_none());
    }

    #[test]
    fn test_search_and_category_combine() {
        let mut app = app_with(None);
        type_str(&mut app, "review");
        press(&mut app, KeyCode::Tab);
        assert_eq!(result_ids(&app), vec!["code-review"]);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_category.as_deref(), Some("Content & Writing"));
        assert!(app.results.is_empty());
        assert!(app.selected_template_id.is_none());
    }

    #[test]
    fn test_set_query_preseeds_input() {
        let mut app = app_with(None);
        app.set_query(Query::new("database", Some("Data & Analysis".to_string())));
        assert_eq!(app.search_input.text, "database");
        assert_eq!(app.search_input.cursor, "database".len());
        assert_eq!(result_ids(&app), vec!["sql-optimizer", "data-schema"]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.search_input.text, "databas");
    }

    #[test]
    fn test_selection_follows_template_across_filters() {
        let mut app = app_with(None);
        for _ in 0..6 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.selected_template_id.as_deref(), Some("data-schema"));

        type_str(&mut app, "database");
        assert_eq!(result_ids(&app), vec!["sql-optimizer", "data-schema"]);
        assert_eq!(app.list_state.selected(), Some(1));
        assert_eq!(app.selected_template_id.as_deref(), Some("data-schema"));

        type_str(&mut app, "x");
        assert!(app.selected_template_id.is_none());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.selected_template_id.as_deref(), Some("sql-optimizer"));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = app_with(None);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.list_state.selected(), Some(0));
        press(&mut app, KeyCode::PageDown);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.list_state.selected(), Some(12));
        assert_eq!(app.selected_template_id.as_deref(), Some("technical-spec"));
        press_with(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(app.selected_template_id.as_deref(), Some("prd-generator"));
    }

    #[test]
    fn test_detail_open_close_and_quit() {
        let mut app = app_with(None);
        press(&mut app, KeyCode::Enter);
        assert!(app.detail_open);

        // Typing is ignored while the drawer is open
        type_str(&mut app, "abc");
        assert!(app.search_input.text.is_empty());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.detail_scroll, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.detail_scroll, 0);

        press(&mut app, KeyCode::Esc);
        assert!(!app.detail_open);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_enter_with_no_results_does_not_open() {
        let mut app = app_with(None);
        type_str(&mut app, "zzz-nomatch");
        press(&mut app, KeyCode::Enter);
        assert!(!app.detail_open);
    }

    #[test]
    fn test_ctrl_c_quits_from_drawer() {
        let mut app = app_with(None);
        press(&mut app, KeyCode::Enter);
        press_with(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_copy_shows_toast_for_two_seconds() {
        let clipboard = FakeClipboard::default();
        let mut app = app_with(Some(clipboard.clone()));

        press(&mut app, KeyCode::Enter);
        let before = Instant::now();
        press(&mut app, KeyCode::Enter);
        let after = Instant::now();

        let expected = &catalog().get("code-review").unwrap().prompt;
        assert_eq!(clipboard.last().as_ref(), Some(expected));

        let toast = app.toast.clone().expect("toast after copy");
        assert_eq!(toast.message, COPIED_MESSAGE);
        assert!(!toast.is_error);

        app.update_toast_at(before + Duration::from_millis(1999));
        assert!(app.toast.is_some());

        app.update_toast_at(after + TOAST_DURATION);
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_copy_from_list_view() {
        let clipboard = FakeClipboard::default();
        let mut app = app_with(Some(clipboard.clone()));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press_with(&mut app, KeyCode::Char('y'), KeyModifiers::CONTROL);

        let expected = &catalog().get("blog-outline").unwrap().prompt;
        assert_eq!(clipboard.last().as_ref(), Some(expected));
        assert!(!app.detail_open);
    }

    #[test]
    fn test_new_copy_replaces_toast() {
        let mut app = app_with(Some(FakeClipboard::default()));
        let old_start = Instant::now()
            .checked_sub(Duration::from_millis(1500))
            .unwrap_or_else(Instant::now);
        app.show_toast(Toast::shown_at("old", TOAST_DURATION, old_start));
        let old_expiry = app.toast.as_ref().unwrap().expires_at;

        app.copy_selected();
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, COPIED_MESSAGE);
        assert!(toast.expires_at > old_expiry);
    }

    #[test]
    fn test_clipboard_failure_is_reported_not_raised() {
        let clipboard = FakeClipboard::failing();
        let mut app = app_with(Some(clipboard.clone()));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);

        let toast = app.toast.as_ref().expect("failure toast");
        assert!(toast.is_error);
        assert_eq!(toast.message, "Failed to copy to clipboard");
        assert!(clipboard.last().is_none());

        // Still interactive
        press(&mut app, KeyCode::Esc);
        assert!(!app.detail_open);
        assert!(!app.should_quit);
    }

    struct CapturedLogs;

    static CAPTURED: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

    impl log::Log for CapturedLogs {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    fn capture_logs() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&CapturedLogs).unwrap();
            log::set_max_level(log::LevelFilter::Trace);
        });
    }

    #[test]
    fn test_clipboard_failure_is_not_logged_as_error() {
        // env_logger prints errors by default, which would land on the live screen
        capture_logs();
        let mut app = app_with(Some(FakeClipboard::failing()));
        app.copy_selected();
        assert!(app.toast.as_ref().unwrap().is_error);

        let logs = CAPTURED.lock().unwrap();
        let (level, _) = logs
            .iter()
            .find(|(_, msg)| msg.contains("Failed to copy prompt 'code-review'"))
            .expect("failure is logged");
        assert_eq!(*level, log::Level::Warn);
        assert!(logs.iter().all(|(level, _)| *level > log::Level::Error));
    }

    #[test]
    fn test_detail_scroll_stops_at_measured_end() {
        let mut app = app_with(None);
        app.open_detail();
        app.detail_max_scroll = 4;
        for _ in 0..3 {
            press(&mut app, KeyCode::PageDown);
        }
        assert_eq!(app.detail_scroll, 4);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.detail_scroll, 3);
    }

    #[test]
    fn test_missing_clipboard() {
        let mut app = app_with(None);
        app.copy_selected();
        let toast = app.toast.as_ref().unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, "Clipboard not available");
    }

    #[test]
    fn test_copy_with_nothing_selected_is_noop() {
        let clipboard = FakeClipboard::default();
        let mut app = app_with(Some(clipboard.clone()));
        type_str(&mut app, "zzz-nomatch");
        app.copy_selected();
        assert!(app.toast.is_none());
        assert!(clipboard.last().is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let empty = Catalog::default();
        let mut app = App::new(&empty, None);
        assert!(app.results.is_empty());
        assert!(app.categories.is_empty());
        press(&mut app, KeyCode::Tab);
        assert!(app.active_category.is_none());
        press(&mut app, KeyCode::Down);
        assert!(app.list_state.selected().is_none());
    }
}
