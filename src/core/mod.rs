pub mod cli;
pub mod config;
pub mod dom;
pub mod handler;
pub mod logging;
pub mod page;
pub mod selector;
pub mod visibility;
