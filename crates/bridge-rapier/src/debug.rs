//! Walks rapier colliders into typed debug-draw callbacks.

use bridge_core::{DebugDraw, Rgba};
use glam::Vec2;
use rapier2d::prelude::*;

use crate::world::RapierWorld;

/// Fill color for fixtures on static bodies.
pub const STATIC_COLOR: Rgba = Rgba::opaque(0.5, 0.9, 0.5);

/// Fill color for fixtures on sleeping dynamic bodies.
pub const SLEEPING_COLOR: Rgba = Rgba::opaque(0.6, 0.6, 0.6);

/// Fill color for fixtures on awake dynamic bodies.
pub const AWAKE_COLOR: Rgba = Rgba::opaque(0.9, 0.7, 0.7);

impl RapierWorld {
    /// Reports every collider as a filled polygon or circle, colored by the
    /// state of its parent body.
    ///
    /// Cuboids arrive as their four world-space corners, counterclockwise.
    /// Balls arrive with their world-space center and the body's local x
    /// axis. Other shapes are skipped.
    pub(crate) fn walk_colliders(&self, draw: &mut dyn DebugDraw) {
        for (_, collider) in self.colliders.iter() {
            let color = collider
                .parent()
                .and_then(|parent| self.bodies.get(parent))
                .map_or(STATIC_COLOR, body_state_color);
            let position = collider.position();

            if let Some(cuboid) = collider.shape().as_cuboid() {
                let corners = cuboid_corners(position, cuboid);
                draw.draw_solid_polygon(&corners, color);
            } else if let Some(ball) = collider.shape().as_ball() {
                let center = position.translation.vector;
                let axis = position.rotation * vector![1.0, 0.0];
                draw.draw_solid_circle(
                    Vec2::new(center.x, center.y),
                    ball.radius,
                    Vec2::new(axis.x, axis.y),
                    color,
                );
            }
        }
    }
}

/// Fill color for a body's current state.
fn body_state_color(body: &RigidBody) -> Rgba {
    if !body.is_dynamic() {
        STATIC_COLOR
    } else if body.is_sleeping() {
        SLEEPING_COLOR
    } else {
        AWAKE_COLOR
    }
}

/// World-space corners of a cuboid, counterclockwise from the lower left.
fn cuboid_corners(position: &Isometry<Real>, cuboid: &Cuboid) -> [Vec2; 4] {
    let he = cuboid.half_extents;
    let local = [
        point![-he.x, -he.y],
        point![he.x, -he.y],
        point![he.x, he.y],
        point![-he.x, he.y],
    ];
    local.map(|corner| {
        let world = position * corner;
        Vec2::new(world.x, world.y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_corners_at_identity() {
        let cuboid = Cuboid::new(vector![2.0, 1.0]);
        let corners = cuboid_corners(&Isometry::identity(), &cuboid);
        assert_eq!(corners[0], Vec2::new(-2.0, -1.0));
        assert_eq!(corners[1], Vec2::new(2.0, -1.0));
        assert_eq!(corners[2], Vec2::new(2.0, 1.0));
        assert_eq!(corners[3], Vec2::new(-2.0, 1.0));
    }

    #[test]
    fn test_cuboid_corners_follow_the_pose() {
        let cuboid = Cuboid::new(vector![1.0, 1.0]);
        let pose = Isometry::new(vector![10.0, 0.0], std::f32::consts::FRAC_PI_2);
        let corners = cuboid_corners(&pose, &cuboid);
        // a quarter turn sends (-1, -1) to (1, -1), then the translation
        assert!((corners[0] - Vec2::new(11.0, -1.0)).length() < 1e-5);
        assert!((corners[2] - Vec2::new(9.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_body_state_palette() {
        let fixed = RigidBodyBuilder::fixed().build();
        assert_eq!(body_state_color(&fixed), STATIC_COLOR);

        let dynamic = RigidBodyBuilder::dynamic().build();
        assert_eq!(body_state_color(&dynamic), AWAKE_COLOR);

        let mut sleeping = RigidBodyBuilder::dynamic().build();
        sleeping.sleep();
        assert_eq!(body_state_color(&sleeping), SLEEPING_COLOR);
    }
}
