//! Per-frame copy of solver poses into display space.

use glam::Vec2;

use crate::units::UnitScale;
use crate::world::PhysicsWorld;

/// Display-space pose for a mirrored mesh.
///
/// The host writes `position` onto its transform's x and y and `angle` onto
/// its rotation about z. The transform's z translation is never touched, so
/// meshes keep whatever depth they were placed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPose {
    /// Position in display units.
    pub position: Vec2,
    /// Rotation about the z axis, radians.
    pub angle: f32,
}

/// Reads a body's current pose and converts it to display space.
pub fn display_pose<W: PhysicsWorld>(world: &W, body: W::Handle, scale: UnitScale) -> DisplayPose {
    DisplayPose {
        position: scale.point_to_display(world.body_position(body)),
        angle: world.body_angle(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeWorld;
    use crate::world::BodyDef;

    #[test]
    fn test_pose_scales_position_but_not_angle() {
        let mut world = FakeWorld::new();
        let body = world.create_body(&BodyDef::dynamic_at(Vec2::new(0.5, -1.0)).with_angle(0.3));
        let scale = UnitScale::new(3.0).unwrap();

        let pose = display_pose(&world, body, scale);
        assert_eq!(pose.position, Vec2::new(1.5, -3.0));
        assert_eq!(pose.angle, 0.3);
    }

    #[test]
    fn test_pose_tracks_the_live_body() {
        let mut world = FakeWorld::new();
        let body = world.create_body(&BodyDef::dynamic_at(Vec2::ZERO));
        world.drift = Vec2::new(0.0, -0.5);
        world.step(0.016);

        let pose = display_pose(&world, body, UnitScale::new(2.0).unwrap());
        assert_eq!(pose.position, Vec2::new(0.0, -1.0));
    }
}
