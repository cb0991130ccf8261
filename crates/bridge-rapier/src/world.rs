//! Rapier-backed implementation of the solver surface.

use std::num::NonZeroUsize;

use bridge_core::config::SolverSection;
use bridge_core::{BodyDef, BodyKind, DebugDraw, FixtureDef, PhysicsWorld, ShapeDef};
use glam::Vec2;
use rapier2d::prelude::*;

/// A 2D rapier world behind the bridge's [`PhysicsWorld`] surface.
///
/// Owns the whole pipeline. Stepping reuses the same structures every frame
/// with the frame delta written into the integration parameters; everything
/// not covered by [`SolverSection`] stays at rapier's defaults.
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl RapierWorld {
    /// Creates an empty world with the given gravity and solver iteration
    /// count. An iteration count of zero keeps rapier's default.
    pub fn new(gravity: Vec2, solver_iterations: usize) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        if let Some(iterations) = NonZeroUsize::new(solver_iterations) {
            integration_parameters.num_solver_iterations = iterations;
        }
        Self {
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Creates an empty world from the solver config section.
    pub fn from_config(solver: &SolverSection) -> Self {
        Self::new(Vec2::from(solver.gravity), solver.solver_iterations)
    }

    /// Linear velocity of a body, zero for unknown handles.
    pub fn linear_velocity(&self, body: RigidBodyHandle) -> Vec2 {
        self.bodies.get(body).map_or(Vec2::ZERO, |rb| {
            let v = rb.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    /// Angular velocity of a body, zero for unknown handles.
    pub fn angular_velocity(&self, body: RigidBodyHandle) -> f32 {
        self.bodies.get(body).map_or(0.0, |rb| rb.angvel())
    }

    /// Whether a body has fallen asleep.
    pub fn is_sleeping(&self, body: RigidBodyHandle) -> bool {
        self.bodies.get(body).is_some_and(|rb| rb.is_sleeping())
    }
}

impl PhysicsWorld for RapierWorld {
    type Handle = RigidBodyHandle;

    fn create_body(&mut self, def: &BodyDef) -> RigidBodyHandle {
        let builder = match def.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let body = builder
            .translation(vector![def.position.x, def.position.y])
            .rotation(def.angle)
            .build();
        self.bodies.insert(body)
    }

    fn attach_fixture(&mut self, body: RigidBodyHandle, fixture: &FixtureDef) {
        let builder = match fixture.shape {
            ShapeDef::Box { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            }
            ShapeDef::Circle { radius } => ColliderBuilder::ball(radius),
        };
        let collider = builder
            .density(fixture.density)
            .restitution(fixture.restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, body, &mut self.bodies);
    }

    fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn body_position(&self, body: RigidBodyHandle) -> Vec2 {
        let Some(rb) = self.bodies.get(body) else {
            tracing::warn!("position read for unknown body {:?}", body);
            return Vec2::ZERO;
        };
        let t = rb.translation();
        Vec2::new(t.x, t.y)
    }

    fn body_angle(&self, body: RigidBodyHandle) -> f32 {
        let Some(rb) = self.bodies.get(body) else {
            tracing::warn!("angle read for unknown body {:?}", body);
            return 0.0;
        };
        rb.rotation().angle()
    }

    fn teleport_body(&mut self, body: RigidBodyHandle, position: Vec2, angle: f32) {
        let Some(rb) = self.bodies.get_mut(body) else {
            tracing::warn!("teleport of unknown body {:?}", body);
            return;
        };
        rb.set_position(Isometry::new(vector![position.x, position.y], angle), true);
    }

    fn set_linear_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) {
        let Some(rb) = self.bodies.get_mut(body) else {
            tracing::warn!("velocity write to unknown body {:?}", body);
            return;
        };
        rb.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn set_angular_velocity(&mut self, body: RigidBodyHandle, velocity: f32) {
        let Some(rb) = self.bodies.get_mut(body) else {
            tracing::warn!("velocity write to unknown body {:?}", body);
            return;
        };
        rb.set_angvel(velocity, true);
    }

    fn debug_draw(&self, draw: &mut dyn DebugDraw) {
        self.walk_colliders(draw);
    }
}
