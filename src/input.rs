//! Keyboard value entry for the window host.

use tracing::warn;

/// Amount the arrow keys move the committed value.
pub const STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Enter,
    Up,
    Down,
}

/// Text buffer holding the value being typed and the last committed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEditor {
    buffer: String,
    committed: i32,
}

impl ValueEditor {
    pub fn new(initial: i32) -> Self {
        Self {
            buffer: initial.to_string(),
            committed: initial,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn committed(&self) -> i32 {
        self.committed
    }

    /// Replaces buffer and committed value, e.g. after an external update.
    pub fn sync(&mut self, value: i32) {
        self.committed = value;
        self.buffer = value.to_string();
    }

    /// True while the buffer holds text that has not been committed.
    pub fn is_editing(&self) -> bool {
        self.buffer != self.committed.to_string()
    }

    /// Takes a value set from outside the editor. An uncommitted edit stays in
    /// the buffer; otherwise the buffer shows the new value.
    pub fn follow(&mut self, value: i32) {
        if self.is_editing() {
            self.committed = value;
        } else {
            self.sync(value);
        }
    }

    /// Applies a key; returns the new value when one was committed.
    pub fn handle(&mut self, key: EditKey) -> Option<i32> {
        match key {
            EditKey::Char(c) if c.is_ascii_digit() => {
                if self.buffer == "0" {
                    self.buffer.clear();
                }
                self.buffer.push(c);
                None
            }
            EditKey::Char('-') if self.buffer.is_empty() || self.buffer == "0" => {
                self.buffer = "-".to_string();
                None
            }
            EditKey::Char(_) => None,
            EditKey::Backspace => {
                self.buffer.pop();
                None
            }
            EditKey::Enter => match self.buffer.parse::<i32>() {
                Ok(value) => {
                    self.sync(value);
                    Some(value)
                }
                Err(err) => {
                    warn!(input = self.buffer.as_str(), %err, "ignoring value that is not an integer");
                    None
                }
            },
            EditKey::Up => {
                self.sync(self.committed.saturating_add(STEP));
                Some(self.committed)
            }
            EditKey::Down => {
                self.sync(self.committed.saturating_sub(STEP));
                Some(self.committed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut ValueEditor, text: &str) {
        for c in text.chars() {
            editor.handle(EditKey::Char(c));
        }
    }

    #[test]
    fn typing_replaces_a_leading_zero() {
        let mut editor = ValueEditor::new(0);
        type_str(&mut editor, "42");
        assert_eq!(editor.text(), "42");
        assert_eq!(editor.handle(EditKey::Enter), Some(42));
        assert_eq!(editor.committed(), 42);
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut editor = ValueEditor::new(5);
        type_str(&mut editor, "a1.");
        assert_eq!(editor.text(), "51");
    }

    #[test]
    fn empty_buffer_does_not_commit() {
        let mut editor = ValueEditor::new(7);
        editor.handle(EditKey::Backspace);
        assert_eq!(editor.text(), "");
        assert_eq!(editor.handle(EditKey::Enter), None);
        assert_eq!(editor.committed(), 7);

        editor.handle(EditKey::Char('-'));
        assert_eq!(editor.handle(EditKey::Enter), None);
    }

    #[test]
    fn negative_values_can_be_entered() {
        let mut editor = ValueEditor::new(0);
        type_str(&mut editor, "-15");
        assert_eq!(editor.handle(EditKey::Enter), Some(-15));
    }

    #[test]
    fn overflow_is_rejected() {
        let mut editor = ValueEditor::new(1);
        type_str(&mut editor, "99999999999");
        assert_eq!(editor.handle(EditKey::Enter), None);
        assert_eq!(editor.committed(), 1);
    }

    #[test]
    fn outside_updates_keep_an_uncommitted_edit() {
        let mut editor = ValueEditor::new(3);
        editor.follow(8);
        assert_eq!(editor.text(), "8");
        assert!(!editor.is_editing());

        type_str(&mut editor, "4");
        assert!(editor.is_editing());
        editor.follow(20);
        assert_eq!(editor.text(), "84");
        assert_eq!(editor.committed(), 20);
        assert_eq!(editor.handle(EditKey::Enter), Some(84));
    }

    #[test]
    fn arrows_step_from_the_committed_value() {
        let mut editor = ValueEditor::new(20);
        type_str(&mut editor, "9");
        assert_eq!(editor.handle(EditKey::Up), Some(30));
        assert_eq!(editor.text(), "30");
        assert_eq!(editor.handle(EditKey::Down), Some(20));
    }
}
