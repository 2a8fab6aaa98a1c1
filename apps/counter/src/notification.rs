//! # Notifications
//!
//! What the operator sees after every action: a short title and a message
//! block, shown until the next action.

use std::fmt;

/// One transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            message: message.into(),
        }
    }

    /// "Success" notification.
    pub fn success(message: impl Into<String>) -> Self {
        Notification::new("Success", message)
    }

    /// Builds a report notification from lines, or `empty` when there are none.
    pub fn report<I>(title: &str, lines: I, empty: &str) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let body = lines.into_iter().collect::<Vec<_>>().join("\n");
        if body.is_empty() {
            Notification::new(title, empty)
        } else {
            Notification::new(title, body)
        }
    }

    /// Renders the notification as a text block for the terminal.
    ///
    /// ```text
    /// ┌ Medicine Stock
    /// │ Paracetamol: 80 left
    /// │ Ibuprofen: 12 left
    /// └
    /// ```
    pub fn render(&self) -> String {
        let mut out = format!("┌ {}\n", self.title);
        for line in self.message.lines() {
            out.push_str("│ ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("└\n");
        out
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
