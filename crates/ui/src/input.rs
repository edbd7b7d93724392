use crossterm::event::{KeyCode, KeyEvent};

/// Minimal single-line text editor for form fields.
#[derive(Debug, Default, Clone)]
pub struct InputField {
    value: String,
    cursor: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Clears the field and returns the sanitized text.
    pub fn take(&mut self) -> String {
        let text = common::sanitize_line(&self.value).trim().to_string();
        self.clear();
        text
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Returns true when the key was consumed by the editor.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    /// Value with a cursor mark, for rendering inside a paragraph.
    pub fn display(&self) -> String {
        let at = self.byte_index();
        format!("{}\u{2502}{}", &self.value[..at], &self.value[at..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn editing_respects_utf8_boundaries() {
        let mut field = InputField::new();
        for c in "ação".chars() {
            field.handle_key(&press(KeyCode::Char(c)));
        }
        field.handle_key(&press(KeyCode::Left));
        field.handle_key(&press(KeyCode::Backspace));
        assert_eq!(field.value(), "aço");
        assert!(!field.is_empty());
    }

    #[test]
    fn take_sanitizes_and_clears() {
        let mut field = InputField::new();
        field.set("  meta\u{0007} nova\t");
        let text = field.take();
        assert_eq!(text, "meta nova");
        assert!(field.is_empty());
    }
}
