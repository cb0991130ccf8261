//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;
use bridge_core::BridgeConfig;

use crate::debug_lines::DebugLinesPlugin;
use crate::scene::ScenePlugin;
use crate::step::StepPlugin;

/// Effective settings for the demo, inserted by `main` before the app runs.
#[derive(Resource, Clone)]
pub struct Settings {
    /// Validated bridge configuration.
    pub config: BridgeConfig,
    /// Window title.
    pub window_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config: BridgeConfig::default(),
            window_title: "Physics Bridge".to_string(),
        }
    }
}

/// Main plugin for the bridge demo.
///
/// This plugin sets up the window, then adds the scene, stepping, and debug
/// overlay sub-plugins.
pub struct BridgeVizPlugin;

impl Plugin for BridgeVizPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<Settings>() {
            app.init_resource::<Settings>();
        }
        let title = app.world().resource::<Settings>().window_title.clone();

        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title,
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((ScenePlugin, StepPlugin, DebugLinesPlugin));
    }
}
