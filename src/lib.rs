//! Falling Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benchmarks use `falling_blocks::{core,input,store,term,types}`.

pub mod config;

pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_store as store;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;

pub use config::AppConfig;
