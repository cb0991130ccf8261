//! Per-frame stepping and pose mirroring systems.

use bevy::prelude::*;
use bridge_core::{DisplayPose, PhysicsBridge};
use bridge_rapier::{RapierWorld, RigidBodyHandle};

/// Update-schedule phases, in execution order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Clock tick, solver step, episode resets.
    Step,
    /// Solver poses copied onto render transforms.
    Mirror,
    /// Debug overlay rebuilt from the stepped world.
    DebugLines,
}

/// The bridge and its rapier world, inserted once the scene is built.
#[derive(Resource)]
pub struct Bridge(pub PhysicsBridge<RapierWorld>);

/// Marks a mesh whose transform mirrors a solver body.
#[derive(Component)]
pub struct MirroredBody {
    /// Body this mesh follows.
    pub body: RigidBodyHandle,
}

/// Plugin wiring the frame loop into the Update schedule.
pub struct StepPlugin;

impl Plugin for StepPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (FrameSet::Step, FrameSet::Mirror, FrameSet::DebugLines).chain(),
        )
        .add_systems(Update, step_physics.in_set(FrameSet::Step))
        .add_systems(Update, mirror_bodies.in_set(FrameSet::Mirror));
    }
}

/// System to advance the bridge once per render frame.
fn step_physics(bridge: Option<ResMut<Bridge>>) {
    let Some(mut bridge) = bridge else {
        return;
    };
    bridge.0.advance_now();
}

/// System to copy solver poses onto mirrored transforms.
fn mirror_bodies(
    bridge: Option<Res<Bridge>>,
    mut mirrored: Query<(&MirroredBody, &mut Transform)>,
) {
    let Some(bridge) = bridge else {
        return;
    };
    for (mirrored_body, mut transform) in &mut mirrored {
        let pose = bridge.0.display_pose(mirrored_body.body);
        apply_pose(&mut transform, pose);
    }
}

/// Writes a display pose onto a transform.
///
/// Translation z is left alone so meshes keep their authored depth.
fn apply_pose(transform: &mut Transform, pose: DisplayPose) {
    transform.translation.x = pose.position.x;
    transform.translation.y = pose.position.y;
    transform.rotation = Quat::from_rotation_z(pose.angle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_pose_keeps_depth() {
        let mut transform = Transform::from_xyz(0.0, 0.0, 7.5);
        apply_pose(
            &mut transform,
            DisplayPose {
                position: Vec2::new(2.0, -1.0),
                angle: std::f32::consts::FRAC_PI_4,
            },
        );
        assert_eq!(transform.translation, Vec3::new(2.0, -1.0, 7.5));
        let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_4);
        assert!(transform.rotation.angle_between(expected) < 1e-6);
    }

    #[test]
    fn test_apply_pose_replaces_rotation() {
        let mut transform = Transform::from_rotation(Quat::from_rotation_x(1.0));
        apply_pose(
            &mut transform,
            DisplayPose {
                position: Vec2::ZERO,
                angle: 0.0,
            },
        );
        assert!(transform.rotation.angle_between(Quat::IDENTITY) < 1e-6);
    }
}
