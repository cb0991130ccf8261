//! Synchronization layer between a 2D physics solver and a 3D renderer.
//!
//! The solver simulates in meters on the z = 0 plane; the renderer draws
//! meshes authored in display units. This crate owns everything that sits
//! between the two: unit conversion, the per-frame clock/step/reset order,
//! pose mirroring, and a typed debug-draw surface that turns solver geometry
//! into batched line segments.
//!
//! # Architecture
//!
//! ```text
//! ┌────────┐    meters     ┌────────┐    display units    ┌──────────┐
//! │ solver │ ────────────▶ │ bridge │ ──────────────────▶ │ renderer │
//! └────────┘               └────────┘                     └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`units`]: scale factor between meters and display units
//! - [`world`]: the solver capability surface ([`PhysicsWorld`])
//! - [`clock`]: wall-clock frame deltas with clamping
//! - [`episode`]: scripted periodic body resets
//! - [`debug_draw`]: typed draw callbacks and line batching
//! - [`mirror`]: solver poses converted for render transforms
//! - [`bootstrap`]: solver bodies built from mesh bounds
//! - [`config`]: TOML configuration

pub mod bootstrap;
pub mod clock;
pub mod config;
pub mod debug_draw;
pub mod episode;
pub mod mirror;
pub mod units;
pub mod world;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export config types
pub use config::{
    default_config_toml, BridgeConfig, ClockSection, ConfigError, EpisodeSection, SceneSection,
    SolverSection, UnitsSection,
};

// Re-export debug draw types
pub use debug_draw::{DebugDraw, LineBatch, LineBatcher, LineSink, Rgba};

// Re-export world types
pub use world::{BodyDef, BodyKind, FixtureDef, PhysicsWorld, ShapeDef};

pub use clock::FrameClock;
pub use episode::{EpisodeLoop, ResetRule};
pub use mirror::{display_pose, DisplayPose};
pub use units::UnitScale;

use std::time::Instant;

/// Everything the per-frame loop needs, bundled over one solver world.
///
/// One [`advance`](Self::advance) per render frame keeps the order fixed:
/// measure the frame delta, step the solver once, then run episode resets.
/// Pose reads and debug drawing happen between frames through
/// [`display_pose`](Self::display_pose) and [`draw_debug`](Self::draw_debug).
pub struct PhysicsBridge<W: PhysicsWorld> {
    world: W,
    clock: FrameClock,
    episodes: EpisodeLoop<W::Handle>,
    scale: UnitScale,
    batcher: LineBatcher,
}

impl<W: PhysicsWorld> PhysicsBridge<W> {
    /// Wraps a populated world, measuring frames from now.
    pub fn new(world: W, scale: UnitScale, max_dt: f32) -> Self {
        Self::with_clock(world, scale, FrameClock::new(max_dt))
    }

    /// Wraps a populated world with a caller-seeded clock.
    pub fn with_clock(world: W, scale: UnitScale, clock: FrameClock) -> Self {
        Self {
            world,
            clock,
            episodes: EpisodeLoop::new(),
            scale,
            batcher: LineBatcher::new(scale),
        }
    }

    /// Adds an episode reset rule.
    pub fn track(&mut self, rule: ResetRule<W::Handle>) {
        self.episodes.track(rule);
    }

    /// Runs one frame: clock tick, solver step, episode bookkeeping.
    ///
    /// Returns the clamped frame delta that was stepped.
    pub fn advance(&mut self, now: Instant) -> f32 {
        let dt = self.clock.tick(now);
        self.world.step(dt);
        self.episodes.after_step(&mut self.world);
        dt
    }

    /// [`advance`](Self::advance) against the current wall clock.
    pub fn advance_now(&mut self) -> f32 {
        self.advance(Instant::now())
    }

    /// Walks the world's fixtures into a fresh line batch and commits it.
    ///
    /// The sink receives exactly one batch per call, empty if the world has
    /// nothing to draw.
    pub fn draw_debug(&mut self, sink: &mut dyn LineSink) {
        self.batcher.begin();
        self.world.debug_draw(&mut self.batcher);
        self.batcher.end(sink);
    }

    /// A body's current pose in display units.
    pub fn display_pose(&self, body: W::Handle) -> DisplayPose {
        display_pose(&self.world, body, self.scale)
    }

    /// The wrapped solver world.
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable access to the wrapped solver world.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// The unit scale conversions go through.
    pub fn scale(&self) -> UnitScale {
        self.scale
    }

    /// The tracked episode rules.
    pub fn episodes(&self) -> &EpisodeLoop<W::Handle> {
        &self.episodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FakeWorld, RecordingSink, ScriptedPrimitive};
    use glam::Vec2;
    use std::time::Duration;

    fn make_bridge(start: Instant) -> (PhysicsBridge<FakeWorld>, usize) {
        let mut world = FakeWorld::new();
        let body = world.create_body(&BodyDef::dynamic_at(Vec2::new(1.0, 2.0)));
        world.drift = Vec2::new(0.0, -0.1);
        let scale = UnitScale::new(3.0).unwrap();
        let bridge = PhysicsBridge::with_clock(world, scale, FrameClock::seeded_at(start, 0.25));
        (bridge, body)
    }

    #[test]
    fn test_advance_ticks_then_steps_once() {
        let start = Instant::now();
        let (mut bridge, _) = make_bridge(start);

        let dt = bridge.advance(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(bridge.world().steps.len(), 1);
        assert!((bridge.world().steps[0] - dt).abs() < 1e-9);
    }

    #[test]
    fn test_advance_runs_episode_resets_after_the_step() {
        let start = Instant::now();
        let (mut bridge, body) = make_bridge(start);
        bridge.track(ResetRule::new(body, Vec2::new(1.0, 2.0), 2));

        bridge.advance(start + Duration::from_millis(16));
        assert!(bridge.world().teleports.is_empty());

        bridge.advance(start + Duration::from_millis(32));
        assert_eq!(bridge.world().teleports.len(), 1);
        // the same advance that fired the reset already restored the pose
        assert_eq!(bridge.world().body_position(body), Vec2::new(1.0, 2.0));
        assert_eq!(bridge.episodes().rules()[0].frames(), 0);
    }

    #[test]
    fn test_display_pose_converts_units() {
        let start = Instant::now();
        let (bridge, body) = make_bridge(start);
        let pose = bridge.display_pose(body);
        assert_eq!(pose.position, Vec2::new(3.0, 6.0));
        assert_eq!(pose.angle, 0.0);
    }

    #[test]
    fn test_draw_debug_commits_one_batch_per_call() {
        let start = Instant::now();
        let (mut bridge, _) = make_bridge(start);
        bridge.world_mut().scripted_draws.push(ScriptedPrimitive::SolidPolygon {
            vertices: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            color: Rgba::opaque(0.5, 0.9, 0.5),
        });

        let mut sink = RecordingSink::default();
        bridge.draw_debug(&mut sink);
        assert_eq!(sink.commits.len(), 1);
        assert_eq!(sink.commits[0].segment_count(), 4);

        // a second frame re-walks the world instead of accumulating
        bridge.draw_debug(&mut sink);
        assert_eq!(sink.commits.len(), 2);
        assert_eq!(sink.commits[1].segment_count(), 4);
    }

    #[test]
    fn test_draw_debug_commits_empty_batch_for_empty_world() {
        let start = Instant::now();
        let (mut bridge, _) = make_bridge(start);
        let mut sink = RecordingSink::default();
        bridge.draw_debug(&mut sink);
        assert_eq!(sink.commits.len(), 1);
        assert!(sink.commits[0].is_empty());
    }
}
