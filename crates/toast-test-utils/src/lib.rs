//! Shared test utilities for the wsl-toast workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`env`] - [`TestEnv`](env::TestEnv): a throwaway home and project directory
//! - [`fixtures`] - settings file contents seen in the wild

pub mod env;
pub mod fixtures;

pub use env::TestEnv;
