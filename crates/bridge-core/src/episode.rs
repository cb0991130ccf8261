//! Scripted episode resets that teleport bodies back to their spawn pose.

use glam::Vec2;

use crate::world::PhysicsWorld;

/// One body's reset schedule.
///
/// Counts simulation steps and, every `every` steps, teleports the body back
/// to `position`/`angle` with zeroed velocities.
#[derive(Debug, Clone)]
pub struct ResetRule<H> {
    /// Body to reset.
    pub body: H,
    /// Pose restored on reset, simulation units.
    pub position: Vec2,
    /// Rotation restored on reset, radians.
    pub angle: f32,
    /// Steps between resets. At least one.
    pub every: u32,
    frames: u32,
}

impl<H> ResetRule<H> {
    /// Creates a rule resetting `body` to `position` every `every` steps.
    pub fn new(body: H, position: Vec2, every: u32) -> Self {
        Self {
            body,
            position,
            angle: 0.0,
            every: every.max(1),
            frames: 0,
        }
    }

    /// Sets the rotation restored on reset.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Steps counted since the last reset. Always below `every`.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

/// Runs every tracked [`ResetRule`] after each simulation step.
#[derive(Debug)]
pub struct EpisodeLoop<H> {
    rules: Vec<ResetRule<H>>,
}

impl<H> Default for EpisodeLoop<H> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<H> EpisodeLoop<H> {
    /// Creates an empty loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the loop.
    pub fn track(&mut self, rule: ResetRule<H>) {
        self.rules.push(rule);
    }

    /// The tracked rules.
    pub fn rules(&self) -> &[ResetRule<H>] {
        &self.rules
    }

    /// Counts one completed step and fires any rule that reached its
    /// interval. Call exactly once after each [`PhysicsWorld::step`].
    pub fn after_step<W>(&mut self, world: &mut W)
    where
        W: PhysicsWorld<Handle = H>,
        H: Copy,
    {
        for rule in &mut self.rules {
            rule.frames += 1;
            if rule.frames >= rule.every {
                world.teleport_body(rule.body, rule.position, rule.angle);
                world.set_linear_velocity(rule.body, Vec2::ZERO);
                world.set_angular_velocity(rule.body, 0.0);
                rule.frames = 0;
                tracing::debug!("episode reset after {} steps", rule.every);
            }
        }
    }
}
