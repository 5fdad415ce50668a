pub mod config;
pub mod data;
pub mod prefs;
pub mod sessions;
pub mod stats;
pub mod timer;
