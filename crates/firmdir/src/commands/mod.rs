//! Command handlers, one module per top-level command.

pub mod about;
pub mod companies;
pub mod config_cmd;
