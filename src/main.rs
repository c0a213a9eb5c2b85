//! Example train track application.
//!
//! Run with: `cargo run`

use bevy::prelude::*;
use bevy_train_track::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(TrainPlugin)
        .add_plugins(TrackPlacementPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (request_placement, log_laps))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(5.0, 18.0, 22.0).looking_at(Vec3::new(5.0, 0.0, 5.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // A hilly loop-ish track; control points are entities so they can be moved
    let points = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(-4.0, 3.0, 12.0),
        Vec3::new(14.0, -1.0, 14.0),
        Vec3::new(14.0, 2.0, -4.0),
        Vec3::new(0.5, 0.0, -0.5),
    ];
    let track = commands.spawn(TrainTrack::new(points.to_vec())).id();
    for (index, point) in points.into_iter().enumerate() {
        commands.spawn((
            TrackControlPoint { track, index },
            Transform::from_translation(point),
        ));
    }

    let car = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(0.8, 0.8, 1.6))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.4, 0.8))),
            Transform::default(),
            PrefabSource,
        ))
        .id();

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.3, 0.2))),
        Transform::default(),
        TrainController::new(track)
            .with_start_t(0.19)
            .with_rolling_stock(4, 2.0)
            .with_rolling_stock_source(car)
            .with_slope_gravity(9.8),
    ));

    let sleeper = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.6, 0.1, 0.3))),
            MeshMaterial3d(materials.add(Color::srgb(0.4, 0.3, 0.2))),
            Transform::default(),
            PrefabSource,
        ))
        .id();
    commands.spawn(TrackPlacement::new(track, sleeper).with_spacing(0.75));

    info!("W/S or Up/Down to drive, P to lay sleepers");
}

fn request_placement(
    keyboard: Res<ButtonInput<KeyCode>>,
    placements: Query<Entity, With<TrackPlacement>>,
    mut requests: MessageWriter<PlaceAlongTrack>,
) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        for placement in &placements {
            requests.write(PlaceAlongTrack { placement });
        }
    }
}

fn log_laps(mut events: MessageReader<TrainEvent>) {
    for event in events.read() {
        info!("train {:?}: {:?}", event.entity, event.kind);
    }
}
