//! Debug line overlay fed by the bridge's batcher.

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bridge_core::{LineBatch, LineSink};

use crate::step::{Bridge, FrameSet};

/// Overlay bookkeeping: the line mesh and the entity rendering it.
#[derive(Resource)]
pub struct DebugLines {
    entity: Option<Entity>,
    mesh: Option<Handle<Mesh>>,
    /// Whether the overlay is rebuilt and shown.
    pub enabled: bool,
}

impl Default for DebugLines {
    fn default() -> Self {
        Self {
            entity: None,
            mesh: None,
            enabled: true,
        }
    }
}

/// Marks the overlay entity.
#[derive(Component)]
pub struct DebugLineOverlay;

/// Sink that writes a committed batch into a line-list mesh.
pub struct MeshLineSink<'a> {
    mesh: &'a mut Mesh,
}

impl<'a> MeshLineSink<'a> {
    /// Wraps a mesh created by [`empty_line_mesh`].
    pub fn new(mesh: &'a mut Mesh) -> Self {
        Self { mesh }
    }
}

impl LineSink for MeshLineSink<'_> {
    fn commit(&mut self, batch: &LineBatch) {
        let positions: Vec<[f32; 3]> = batch.positions.iter().map(|p| p.to_array()).collect();
        let colors: Vec<[f32; 4]> = batch.colors.iter().map(|c| c.to_array()).collect();
        self.mesh
            .insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        self.mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    }
}

/// An empty line-list mesh ready to receive committed batches.
pub fn empty_line_mesh() -> Mesh {
    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, Vec::<[f32; 3]>::new())
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, Vec::<[f32; 4]>::new())
}

/// Plugin rendering the solver's debug geometry as colored lines.
pub struct DebugLinesPlugin;

impl Plugin for DebugLinesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugLines>().add_systems(
            Update,
            (
                update_debug_lines.in_set(FrameSet::DebugLines),
                toggle_debug_lines,
            ),
        );
    }
}

/// System to rebuild the overlay mesh from this frame's debug batch.
///
/// The overlay entity is spawned lazily on the first frame with a bridge;
/// after that the same mesh is rewritten in place.
fn update_debug_lines(
    mut commands: Commands,
    bridge: Option<ResMut<Bridge>>,
    mut lines: ResMut<DebugLines>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(mut bridge) = bridge else {
        return;
    };
    if !lines.enabled {
        return;
    }

    if lines.mesh.is_none() {
        let handle = meshes.add(empty_line_mesh());
        let entity = commands
            .spawn((
                PbrBundle {
                    mesh: handle.clone(),
                    material: materials.add(StandardMaterial {
                        base_color: Color::WHITE,
                        unlit: true,
                        ..default()
                    }),
                    ..default()
                },
                DebugLineOverlay,
                NotShadowCaster,
            ))
            .id();
        lines.entity = Some(entity);
        lines.mesh = Some(handle);
        tracing::info!("Spawned debug line overlay");
    }

    let Some(handle) = lines.mesh.as_ref() else {
        return;
    };
    let Some(mesh) = meshes.get_mut(handle) else {
        return;
    };
    bridge.0.draw_debug(&mut MeshLineSink::new(mesh));
}

/// System to toggle the overlay with F3.
fn toggle_debug_lines(
    keys: Res<ButtonInput<KeyCode>>,
    mut lines: ResMut<DebugLines>,
    mut overlays: Query<&mut Visibility, With<DebugLineOverlay>>,
) {
    if !keys.just_pressed(KeyCode::F3) {
        return;
    }
    lines.enabled = !lines.enabled;
    tracing::info!(
        "Debug lines {}",
        if lines.enabled { "enabled" } else { "disabled" }
    );
    for mut visibility in &mut overlays {
        *visibility = if lines.enabled {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
