pub mod calculator;
pub mod entry;
pub mod geofence;
pub mod log;
pub mod login;
pub mod notify;
pub mod reminder;
pub mod settings;
pub mod status;
