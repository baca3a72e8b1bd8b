//! Common types and error definitions for kinematic_rrt
//!
//! This module provides the foundational building blocks used across
//! the planner crate.

pub mod types;
pub mod error;

pub use types::*;
pub use error::*;
