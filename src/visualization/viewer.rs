use bevy::log::LogPlugin;
use bevy::math::primitives::Sphere;
use bevy::prelude::*;

use crate::simulation::clock::{RunState, SimulationClock, Snapshot, TickOutcome};
use crate::simulation::math::{NVec3, Orientation};

/// Bevy resource wrapping the simulation context driven by the render loop
#[derive(Resource)]
pub struct ClockResource(pub SimulationClock);

/// Component tagging each sphere with its body index into the snapshot
#[derive(Component)]
struct BodyIndex(pub usize);

/// Marker for the center-of-mass dot
#[derive(Component)]
struct CenterOfMassMarker;

/// Camera distance from the center of mass, per unit of framing radius
const ZOOM_FACTOR: f32 = 2.0;

/// Closest the camera gets to the center of mass
const MIN_CAMERA_DISTANCE: f32 = 5.0;

fn to_vec3(v: &NVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

fn to_quat(q: &Orientation) -> Quat {
    let c = q.quaternion().coords; // [i, j, k, w]
    Quat::from_xyzw(c.x as f32, c.y as f32, c.z as f32, c.w as f32)
}

/// Open a window and drive `clock` once per rendered frame
///
/// Controls: Space toggles start/stop, R resets to the saved start.
pub fn run_viewer(clock: SimulationClock) {
    info!("starting viewer with {} bodies", clock.system().len());

    App::new()
        .insert_resource(ClockResource(clock))
        // the binary installs its own tracing subscriber
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_controls, physics_step, sync_transforms).chain())
        .run();
}

/// Startup system: spawn camera, one sphere per body and the COM marker
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    clock: Res<ClockResource>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 0.0, 20.0),
        ..Default::default()
    });

    let snapshot = clock.0.snapshot();

    // Unit-diameter sphere, scaled per body by its size
    let body_mesh = meshes.add(Sphere::new(0.5).mesh().uv(16, 16));
    let body_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 1.0, 1.0),
        unlit: true,
        ..Default::default()
    });

    for (i, b) in snapshot.bodies.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: body_mesh.clone(),
                material: body_material.clone(),
                transform: Transform::from_translation(to_vec3(&b.position))
                    .with_rotation(to_quat(&b.orientation))
                    .with_scale(Vec3::splat(b.size as f32)),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(0.1).mesh().uv(16, 16)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.0, 0.0),
                unlit: true,
                ..Default::default()
            }),
            transform: Transform::from_translation(to_vec3(&snapshot.metrics.center_of_mass)),
            ..Default::default()
        },
        CenterOfMassMarker,
    ));
}

fn handle_controls(keys: Res<ButtonInput<KeyCode>>, mut clock: ResMut<ClockResource>) {
    let clock = &mut clock.0;
    if keys.just_pressed(KeyCode::Space) {
        if clock.state() == RunState::Running {
            clock.stop();
        } else if let Err(e) = clock.start() {
            warn!("{e}");
        }
    }
    if keys.just_pressed(KeyCode::KeyR) {
        if let Err(e) = clock.reset() {
            error!("reset failed: {e}");
        }
    }
}

/// Per-frame physics: exactly one tick per rendered frame
fn physics_step(mut clock: ResMut<ClockResource>) {
    match clock.0.tick() {
        Ok(TickOutcome::Terminated(verdict)) => info!("{}", verdict.message()),
        Ok(_) => {}
        Err(e) => {
            error!("tick failed: {e}");
            clock.0.stop();
        }
    }
}

fn place_camera(snapshot: &Snapshot, camera: &mut Transform) {
    let com = to_vec3(&snapshot.metrics.center_of_mass);
    let distance = (snapshot.metrics.framing_radius as f32 * ZOOM_FACTOR).max(MIN_CAMERA_DISTANCE);
    camera.translation = com + Vec3::new(0.0, 0.0, distance);
}

fn sync_transforms(
    clock: Res<ClockResource>,
    mut bodies: Query<(&BodyIndex, &mut Transform)>,
    mut com: Query<&mut Transform, (With<CenterOfMassMarker>, Without<BodyIndex>)>,
    mut camera: Query<&mut Transform, (With<Camera3d>, Without<BodyIndex>, Without<CenterOfMassMarker>)>,
) {
    let snapshot = clock.0.snapshot();

    for (BodyIndex(i), mut transform) in &mut bodies {
        if let Some(b) = snapshot.bodies.get(*i) {
            transform.translation = to_vec3(&b.position);
            transform.rotation = to_quat(&b.orientation);
            transform.scale = Vec3::splat(b.size as f32);
        }
    }

    for mut transform in &mut com {
        transform.translation = to_vec3(&snapshot.metrics.center_of_mass);
    }

    for mut transform in &mut camera {
        place_camera(&snapshot, &mut transform);
    }
}
