//! CLI command implementations.

pub mod common;
pub mod config;
pub mod thumbnail;
pub mod tile;
pub mod verify;
