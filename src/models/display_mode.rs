use serde::{Deserialize, Serialize};

/// Milestone shown by the compact status title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    #[default]
    Remaining,
    End,
    SafeExit,
    Worked,
}

impl DisplayMode {
    pub fn code(&self) -> &'static str {
        match self {
            DisplayMode::Remaining => "remaining",
            DisplayMode::End => "end",
            DisplayMode::SafeExit => "safe-exit",
            DisplayMode::Worked => "worked",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DisplayMode::Remaining => "⏳",
            DisplayMode::End => "🏁",
            DisplayMode::SafeExit => "🚪",
            DisplayMode::Worked => "💼",
        }
    }

    /// Convert DB / CLI string → enum
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "remaining" | "r" => Some(DisplayMode::Remaining),
            "end" | "e" => Some(DisplayMode::End),
            "safe-exit" | "safe_exit" | "safe" | "s" => Some(DisplayMode::SafeExit),
            "worked" | "w" => Some(DisplayMode::Worked),
            _ => None,
        }
    }
}
