//! Single-line search input with a byte-offset cursor

use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Default, Clone)]
pub struct TextInput {
    pub text: String,
    /// Byte offset into `text`, always on a char boundary
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_word_boundary(c: char) -> bool {
        c.is_whitespace() || matches!(c, '-' | '/' | '&')
    }

    /// Byte offset of the char before `pos`
    fn prev_char(&self, pos: usize) -> usize {
        self.text[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Byte offset of the char after `pos`
    fn next_char(&self, pos: usize) -> usize {
        self.text[pos..]
            .chars()
            .next()
            .map(|c| pos + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    /// Start of the word ending at or before the cursor (skipping trailing boundaries)
    fn word_start_before(&self) -> usize {
        let head = &self.text[..self.cursor];
        let trimmed = head.trim_end_matches(Self::is_word_boundary);
        trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| Self::is_word_boundary(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    /// End of the word starting at or after the cursor (skipping leading boundaries)
    fn word_end_after(&self) -> usize {
        let tail = &self.text[self.cursor..];
        let skipped = tail.len() - tail.trim_start_matches(Self::is_word_boundary).len();
        let rest = &tail[skipped..];
        let word = rest
            .find(Self::is_word_boundary)
            .unwrap_or(rest.len());
        self.cursor + skipped + word
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_char(self.cursor);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_char_at(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.next_char(self.cursor);
            self.text.drain(self.cursor..next);
        }
    }

    pub fn delete_word_before(&mut self) {
        let start = self.word_start_before();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_char(self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_char(self.cursor);
    }

    pub fn move_word_left(&mut self) {
        self.cursor = self.word_start_before();
    }

    pub fn move_word_right(&mut self) {
        self.cursor = self.word_end_after();
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        // macOS Option may report as SUPER
        let alt = modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SUPER);

        match code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_before(),
            KeyCode::Backspace if alt => self.delete_word_before(),
            KeyCode::Char('a') if ctrl => self.move_start(),
            KeyCode::Char('e') if ctrl => self.move_end(),
            KeyCode::Char('b') if alt => self.move_word_left(),
            KeyCode::Char('f') if alt => self.move_word_right(),
            KeyCode::Left if ctrl || alt => self.move_word_left(),
            KeyCode::Right if ctrl || alt => self.move_word_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_at(),
            KeyCode::Char(c) if !ctrl && !alt => self.insert_char(c),
            _ => return false,
        }
        true
    }
}
