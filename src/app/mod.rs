pub mod adb;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod models;
