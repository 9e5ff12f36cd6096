//! Utility functions and helpers for the vertex-llm gateway.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and token sanitization.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
