//! Visualization layer: Bevy-based renderer for the physics bridge demo.

pub mod cli;
pub mod debug_lines;
pub mod plugin;
pub mod scene;
pub mod step;

pub use plugin::{BridgeVizPlugin, Settings};
