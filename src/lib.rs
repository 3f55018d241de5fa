pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod model;
pub mod playlist_file;
pub mod queue;
