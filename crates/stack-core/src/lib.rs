//! Core types for the scroll-stack layout engine.
//!
//! This crate provides the foundational types shared by the layout crate:
//! - Value types (axes, sizes, alignment, cross-axis modes)
//! - Stack items and their validating builder
//! - Stack configuration
//! - Error types

pub mod errors;
pub mod item;
pub mod options;
pub mod types;

pub use errors::*;
pub use item::*;
pub use options::*;
pub use types::*;
