//! Capability surface a 2D physics solver exposes to the bridge.

use glam::Vec2;

use crate::debug_draw::DebugDraw;

/// Whether a body is moved by the solver or pinned in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Never moves; infinite mass.
    #[default]
    Static,
    /// Integrated and collided by the solver.
    Dynamic,
}

/// Definition for a rigid body, in simulation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    /// Static or dynamic.
    pub kind: BodyKind,
    /// Initial position, meters.
    pub position: Vec2,
    /// Initial rotation, radians.
    pub angle: f32,
}

impl BodyDef {
    /// A static body at `position`.
    pub fn static_at(position: Vec2) -> Self {
        Self {
            kind: BodyKind::Static,
            position,
            angle: 0.0,
        }
    }

    /// A dynamic body at `position`.
    pub fn dynamic_at(position: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position,
            angle: 0.0,
        }
    }

    /// Sets the initial rotation.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }
}

/// Collision shape, in simulation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeDef {
    /// Axis-aligned box in body-local space.
    Box {
        /// Half-widths along x and y, meters.
        half_extents: Vec2,
    },
    /// Circle centered on the body origin.
    Circle {
        /// Radius, meters.
        radius: f32,
    },
}

/// A shape plus its material parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureDef {
    /// Collision shape.
    pub shape: ShapeDef,
    /// Mass density, kg/m^2. Zero for static fixtures.
    pub density: f32,
    /// Bounciness in [0, 1].
    pub restitution: f32,
}

/// The operations the bridge needs from a physics solver.
///
/// Handles stay valid for the life of the world; no operation removes a
/// body. Pose getters and setters speak simulation units throughout, and the
/// conversion to display space happens outside this trait.
pub trait PhysicsWorld {
    /// Opaque body identifier.
    type Handle: Copy + PartialEq;

    /// Creates a body and returns its handle.
    fn create_body(&mut self, def: &BodyDef) -> Self::Handle;

    /// Attaches a fixture to an existing body.
    fn attach_fixture(&mut self, body: Self::Handle, fixture: &FixtureDef);

    /// Advances the simulation by `dt` seconds. Non-positive `dt` is a no-op.
    fn step(&mut self, dt: f32);

    /// Current position of a body, meters.
    fn body_position(&self, body: Self::Handle) -> Vec2;

    /// Current rotation of a body, radians.
    fn body_angle(&self, body: Self::Handle) -> f32;

    /// Moves a body to a pose without integrating along the way.
    fn teleport_body(&mut self, body: Self::Handle, position: Vec2, angle: f32);

    /// Overwrites a body's linear velocity, m/s.
    fn set_linear_velocity(&mut self, body: Self::Handle, velocity: Vec2);

    /// Overwrites a body's angular velocity, rad/s.
    fn set_angular_velocity(&mut self, body: Self::Handle, velocity: f32);

    /// Walks every fixture and reports it through the draw callbacks.
    ///
    /// Takes `&self`: drawing observes the world and never mutates it.
    fn debug_draw(&self, draw: &mut dyn DebugDraw);
}
