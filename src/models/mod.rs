pub mod coordinate;
pub mod display_mode;
pub mod entry;
pub mod notification;
pub mod reminder;
pub mod workdays;
