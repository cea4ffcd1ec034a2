pub mod api;
pub mod archive;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod page;
pub mod session;
