//! Startup systems that build the demo scene and its solver world.

use bevy::prelude::*;
use bridge_core::{bootstrap, PhysicsBridge, PhysicsWorld, ResetRule};
use bridge_rapier::RapierWorld;

use crate::plugin::Settings;
use crate::step::{Bridge, MirroredBody};

/// Rendered ball diameter, display units.
const BALL_DIAMETER: f32 = 2.0;

/// Rendered slab dimensions, display units.
const GROUND_SIZE: Vec3 = Vec3::new(6.0, 0.1, 6.0);

/// Plugin building the scene at startup.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_camera_and_light, spawn_scene));
    }
}

/// System to place the camera and key light.
fn spawn_camera_and_light(mut commands: Commands) {
    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 4.6, 14.3).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 7_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(0.0, 8.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
}

/// System to spawn the meshes, build the solver world from their bounds,
/// and insert the bridge.
fn spawn_scene(
    mut commands: Commands,
    settings: Res<Settings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = &settings.config;
    let Ok(scale) = config.unit_scale() else {
        tracing::error!(
            "invalid units_per_meter {}, scene not built",
            config.units.units_per_meter
        );
        return;
    };

    let ground_mesh: Mesh = Cuboid::new(GROUND_SIZE.x, GROUND_SIZE.y, GROUND_SIZE.z).into();
    let ball_mesh = Sphere::new(BALL_DIAMETER / 2.0).mesh().uv(32, 18);

    // fixtures take their dimensions from what is actually rendered
    let ground_half = half_extents_2d(&ground_mesh).unwrap_or(GROUND_SIZE.truncate() / 2.0);
    let ball_radius = bounding_radius(&ball_mesh).unwrap_or(BALL_DIAMETER / 2.0);

    let mut world = RapierWorld::from_config(&config.solver);

    let (ground_def, ground_fixture) = bootstrap::ground_body(
        ground_half,
        config.scene.ground_tilt,
        scale,
        config.scene.restitution,
    );
    let ground = world.create_body(&ground_def);
    world.attach_fixture(ground, &ground_fixture);

    let spawn = Vec2::from(config.scene.spawn_position);
    let (ball_def, ball_fixture) =
        bootstrap::ball_body(ball_radius, spawn, scale, config.scene.restitution);
    let ball = world.create_body(&ball_def);
    world.attach_fixture(ball, &ball_fixture);

    let mut bridge = PhysicsBridge::new(world, scale, config.clock.max_dt);
    bridge.track(ResetRule::new(
        ball,
        ball_def.position,
        config.episode.reset_interval,
    ));

    tracing::info!(
        "Scene built: {} units per meter, ball reset every {} steps",
        config.units.units_per_meter,
        config.episode.reset_interval
    );

    commands.spawn(PbrBundle {
        mesh: meshes.add(ground_mesh),
        material: materials.add(Color::srgb(0.45, 0.55, 0.45)),
        transform: Transform::from_rotation(Quat::from_rotation_z(config.scene.ground_tilt)),
        ..default()
    });

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(ball_mesh),
            material: materials.add(Color::srgb(0.8, 0.8, 0.85)),
            transform: Transform::from_translation(spawn.extend(0.0)),
            ..default()
        },
        MirroredBody { body: ball },
    ));

    commands.insert_resource(Bridge(bridge));
}

/// A mesh's bounding half-extents in the simulation plane, display units.
fn half_extents_2d(mesh: &Mesh) -> Option<Vec2> {
    mesh.compute_aabb()
        .map(|aabb| Vec2::new(aabb.half_extents.x, aabb.half_extents.y))
}

/// A mesh's bounding radius, taken from its vertical half-extent.
fn bounding_radius(mesh: &Mesh) -> Option<f32> {
    mesh.compute_aabb().map(|aabb| aabb.half_extents.y)
}
