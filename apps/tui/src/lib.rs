// Export our modules for use in binaries and tests
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod event;
pub mod logging;
pub mod terminal;
pub mod ui;
