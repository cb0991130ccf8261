//! Test doubles for the solver surface.
//!
//! Enable the `test-fixtures` feature to use these from other crates.

use glam::Vec2;

use crate::debug_draw::{DebugDraw, LineBatch, LineSink, Rgba};
use crate::world::{BodyDef, BodyKind, FixtureDef, PhysicsWorld};

/// One body tracked by a [`FakeWorld`].
#[derive(Debug, Clone)]
pub struct FakeBody {
    /// Definition the body was created from.
    pub def: BodyDef,
    /// Current position, meters.
    pub position: Vec2,
    /// Current rotation, radians.
    pub angle: f32,
    /// Current linear velocity, m/s.
    pub linear_velocity: Vec2,
    /// Current angular velocity, rad/s.
    pub angular_velocity: f32,
    /// Fixtures attached so far.
    pub fixtures: Vec<FixtureDef>,
}

/// A scripted primitive a [`FakeWorld`] reports during its debug-draw walk.
#[derive(Debug, Clone)]
pub enum ScriptedPrimitive {
    /// Reported through `draw_solid_polygon`.
    SolidPolygon {
        /// Vertices, meters.
        vertices: Vec<Vec2>,
        /// Fill color.
        color: Rgba,
    },
    /// Reported through `draw_solid_circle`.
    SolidCircle {
        /// Center, meters.
        center: Vec2,
        /// Radius, meters.
        radius: f32,
        /// Local x axis.
        axis: Vec2,
        /// Fill color.
        color: Rgba,
    },
}

/// Scripted stand-in for a physics solver.
///
/// Instead of integrating forces, every step moves each dynamic body by
/// `drift` and records the call, so tests can assert exact positions and
/// call sequences.
#[derive(Debug, Default)]
pub struct FakeWorld {
    /// Bodies in creation order; the handle is the index.
    pub bodies: Vec<FakeBody>,
    /// Offset applied to every dynamic body per step.
    pub drift: Vec2,
    /// Every `step` call's dt, in order.
    pub steps: Vec<f32>,
    /// Every teleport, with the restored pose.
    pub teleports: Vec<(usize, Vec2, f32)>,
    /// Primitives replayed by `debug_draw`.
    pub scripted_draws: Vec<ScriptedPrimitive>,
}

impl FakeWorld {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhysicsWorld for FakeWorld {
    type Handle = usize;

    fn create_body(&mut self, def: &BodyDef) -> usize {
        self.bodies.push(FakeBody {
            def: *def,
            position: def.position,
            angle: def.angle,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            fixtures: Vec::new(),
        });
        self.bodies.len() - 1
    }

    fn attach_fixture(&mut self, body: usize, fixture: &FixtureDef) {
        self.bodies[body].fixtures.push(*fixture);
    }

    fn step(&mut self, dt: f32) {
        self.steps.push(dt);
        if dt <= 0.0 {
            return;
        }
        for body in &mut self.bodies {
            if body.def.kind == BodyKind::Dynamic {
                body.position += self.drift;
            }
        }
    }

    fn body_position(&self, body: usize) -> Vec2 {
        self.bodies[body].position
    }

    fn body_angle(&self, body: usize) -> f32 {
        self.bodies[body].angle
    }

    fn teleport_body(&mut self, body: usize, position: Vec2, angle: f32) {
        self.teleports.push((body, position, angle));
        self.bodies[body].position = position;
        self.bodies[body].angle = angle;
    }

    fn set_linear_velocity(&mut self, body: usize, velocity: Vec2) {
        self.bodies[body].linear_velocity = velocity;
    }

    fn set_angular_velocity(&mut self, body: usize, velocity: f32) {
        self.bodies[body].angular_velocity = velocity;
    }

    fn debug_draw(&self, draw: &mut dyn DebugDraw) {
        for primitive in &self.scripted_draws {
            match primitive {
                ScriptedPrimitive::SolidPolygon { vertices, color } => {
                    draw.draw_solid_polygon(vertices, *color);
                }
                ScriptedPrimitive::SolidCircle {
                    center,
                    radius,
                    axis,
                    color,
                } => {
                    draw.draw_solid_circle(*center, *radius, *axis, *color);
                }
            }
        }
    }
}

/// Records every debug-draw callback it receives.
#[derive(Debug, Default)]
pub struct RecordingDraw {
    /// `draw_polygon` calls.
    pub polygons: Vec<(Vec<Vec2>, Rgba)>,
    /// `draw_solid_polygon` calls.
    pub solid_polygons: Vec<(Vec<Vec2>, Rgba)>,
    /// `draw_circle` calls.
    pub circles: Vec<(Vec2, f32, Rgba)>,
    /// `draw_solid_circle` calls.
    pub solid_circles: Vec<(Vec2, f32, Vec2, Rgba)>,
    /// `draw_segment` calls.
    pub segments: Vec<(Vec2, Vec2, Rgba)>,
    /// `draw_transform` calls.
    pub transforms: Vec<(Vec2, f32)>,
    /// `draw_point` calls.
    pub points: Vec<(Vec2, f32, Rgba)>,
}

impl DebugDraw for RecordingDraw {
    fn draw_polygon(&mut self, vertices: &[Vec2], color: Rgba) {
        self.polygons.push((vertices.to_vec(), color));
    }

    fn draw_solid_polygon(&mut self, vertices: &[Vec2], color: Rgba) {
        self.solid_polygons.push((vertices.to_vec(), color));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.circles.push((center, radius, color));
    }

    fn draw_solid_circle(&mut self, center: Vec2, radius: f32, axis: Vec2, color: Rgba) {
        self.solid_circles.push((center, radius, axis, color));
    }

    fn draw_segment(&mut self, a: Vec2, b: Vec2, color: Rgba) {
        self.segments.push((a, b, color));
    }

    fn draw_transform(&mut self, position: Vec2, angle: f32) {
        self.transforms.push((position, angle));
    }

    fn draw_point(&mut self, point: Vec2, size: f32, color: Rgba) {
        self.points.push((point, size, color));
    }
}

/// Captures every committed line batch.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Batches in commit order.
    pub commits: Vec<LineBatch>,
}

impl LineSink for RecordingSink {
    fn commit(&mut self, batch: &LineBatch) {
        self.commits.push(batch.clone());
    }
}
