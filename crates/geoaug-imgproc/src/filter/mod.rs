//! Filter operations
//!
//! Low-pass filtering used to anti-alias images before they are down-sampled.

/// Filter kernels
pub mod kernels;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
