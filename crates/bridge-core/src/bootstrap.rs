//! One-time construction of solver bodies from rendered mesh bounds.
//!
//! The demo scene derives collision shapes from the meshes it renders: the
//! ground slab's fixture comes from the mesh's bounding half-extents and the
//! ball's from its bounding radius. Measurements arrive in display units and
//! leave here converted to meters.

use glam::Vec2;

use crate::units::UnitScale;
use crate::world::{BodyDef, FixtureDef, ShapeDef};

/// Padding added to ground half-extents, in display units.
///
/// Keeps the collision box a hair wider than the rendered slab so contacts
/// near the rim still land on the fixture.
pub const EDGE_EPSILON: f32 = 0.01;

/// Density convention for static fixtures.
pub const STATIC_DENSITY: f32 = 0.0;

/// Density for the dynamic ball, kg/m^2.
pub const BALL_DENSITY: f32 = 1.0;

/// Builds the tilted ground slab's body and fixture.
///
/// `half_extents` are the mesh's bounding half-widths in the simulation
/// plane, display units. The pad is applied before unit conversion.
pub fn ground_body(
    half_extents: Vec2,
    tilt: f32,
    scale: UnitScale,
    restitution: f32,
) -> (BodyDef, FixtureDef) {
    let padded = half_extents + Vec2::splat(EDGE_EPSILON);
    let body = BodyDef::static_at(Vec2::ZERO).with_angle(tilt);
    let fixture = FixtureDef {
        shape: ShapeDef::Box {
            half_extents: scale.point_to_sim(padded),
        },
        density: STATIC_DENSITY,
        restitution,
    };
    (body, fixture)
}

/// Builds the falling ball's body and fixture.
///
/// `bounding_radius` and `spawn` are in display units.
pub fn ball_body(
    bounding_radius: f32,
    spawn: Vec2,
    scale: UnitScale,
    restitution: f32,
) -> (BodyDef, FixtureDef) {
    let body = BodyDef::dynamic_at(scale.point_to_sim(spawn));
    let fixture = FixtureDef {
        shape: ShapeDef::Circle {
            radius: scale.to_sim(bounding_radius),
        },
        density: BALL_DENSITY,
        restitution,
    };
    (body, fixture)
}
