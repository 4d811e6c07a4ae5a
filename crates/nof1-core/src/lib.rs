//! Core types for N-of-1 effect estimation
//!
//! This crate provides the pieces shared by the resampling and estimation
//! crates: the error taxonomy, small numeric helpers and the execution
//! strategy used to run bootstrap iterations.
//!
//! # Example
//!
//! ```rust
//! use nof1_core::utils::{mean, percentile};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(mean(&data), 3.0);
//! assert_eq!(percentile(&data, 0.5), 3.0);
//! ```

pub mod error;
pub mod execution;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};
pub use execution::ExecutionStrategy;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::execution::ExecutionStrategy;
    pub use crate::Result;
}
