pub mod cache;
pub mod commands;
pub mod email;
pub mod environment;
