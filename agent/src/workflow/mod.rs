pub mod config;
pub mod curator;
