//! Rapier binding for the physics bridge.
//!
//! [`RapierWorld`] puts a `rapier2d` pipeline behind the bridge's solver
//! surface, including the debug-draw walk that reports collider shapes as
//! typed primitives colored by body state.

pub mod debug;
pub mod world;

// Re-export the handle type bodies are addressed by
pub use rapier2d::dynamics::RigidBodyHandle;

pub use debug::{AWAKE_COLOR, SLEEPING_COLOR, STATIC_COLOR};
pub use world::RapierWorld;
