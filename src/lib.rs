pub mod cli;
pub mod config;
pub mod error;
pub mod gui;
pub mod logging;
pub mod model;
