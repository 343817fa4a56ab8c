pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod report;
pub mod utils;
