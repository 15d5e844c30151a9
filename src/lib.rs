pub mod aggregate;
pub mod apis;
pub mod canon;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod logging;
pub mod output;
pub mod text;
pub mod types;
