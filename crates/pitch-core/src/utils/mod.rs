//! Utility functions and helpers

pub mod simd;
pub mod validation;
