use chrono::{DateTime, Local};
use serde::Serialize;

/// Fixed identifier of the safe-exit notification.
pub const SAFE_EXIT_ID: &str = "safe-exit";
/// Fixed identifier of the end-of-day notification.
pub const END_OF_DAY_ID: &str = "end-of-day";

/// A pending system notification, keyed by identifier
/// (⇔ one row of the `notifications` table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationRequest {
    pub identifier: String,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Local>,
    pub repeats: bool,
    pub created_at: String,
}

impl NotificationRequest {
    pub fn new(identifier: &str, title: &str, body: &str, fire_at: DateTime<Local>) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            fire_at,
            repeats: false,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn repeating(mut self, repeats: bool) -> Self {
        self.repeats = repeats;
        self
    }

    pub fn is_fixed(&self) -> bool {
        self.identifier == SAFE_EXIT_ID || self.identifier == END_OF_DAY_ID
    }
}
