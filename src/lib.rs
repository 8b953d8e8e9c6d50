pub mod commands;
pub mod config;
pub mod model;
pub mod report;
pub mod xml;
