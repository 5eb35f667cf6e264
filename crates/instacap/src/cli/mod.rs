//! Command implementations.

pub mod analyze;
pub mod caption;
pub mod config;
pub mod input;
