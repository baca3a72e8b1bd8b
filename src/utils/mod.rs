//! Utility modules for kinematic_rrt

pub mod visualization;

pub use visualization::render_tree;
