pub mod config;
pub mod entry;
pub mod init;
pub mod locate;
pub mod log;
pub mod notify;
pub mod reminder;
pub mod settings;
pub mod status;
