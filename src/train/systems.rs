use bevy::prelude::*;

use crate::prefab::clone_visuals;
use crate::track::{TrackArcLength, TrainTrack};

use super::{
    ConsistState, DriveBindings, DriveInput, RollingStock, TrainController, TrainEvent,
};

/// Poll the keyboard once per frame into [`DriveInput`].
pub fn read_drive_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<DriveBindings>,
    mut input: ResMut<DriveInput>,
) {
    let next = if keyboard.any_pressed(bindings.forward.iter().copied()) {
        DriveInput::Forward
    } else if keyboard.any_pressed(bindings.backward.iter().copied()) {
        DriveInput::Backward
    } else {
        DriveInput::None
    };
    input.set_if_neq(next);
}

/// Spawn or respawn rolling stock when a train's car count, spacing or template changes.
pub fn rebuild_consists(
    mut commands: Commands,
    mut trains: Query<(Entity, &mut TrainController, Option<&ConsistState>)>,
    tracks: Query<&TrainTrack>,
    sources: Query<(
        Option<&Mesh3d>,
        Option<&MeshMaterial3d<StandardMaterial>>,
    )>,
) {
    for (train_entity, mut train, state) in &mut trains {
        let needs_rebuild = state.is_none_or(|s| {
            s.cached_count != train.rolling_stock_count
                || s.cached_source != train.rolling_stock_source
                || s.cached_spacing.to_bits() != train.rolling_stock_spacing.to_bits()
        });
        if !needs_rebuild {
            continue;
        }

        let Ok(track) = tracks.get(train.track) else {
            warn_once!("train {train_entity:?} references a missing track {:?}", train.track);
            continue;
        };

        // Despawn old cars
        if let Some(state) = state {
            for &car in &state.cars {
                if let Ok(mut entity_commands) = commands.get_entity(car) {
                    entity_commands.despawn();
                }
            }
        }

        if let Err(err) = train.validate() {
            warn!("not building rolling stock for {train_entity:?}: {err}");
            // Remember the rejected config so the warning fires once per change
            commands.entity(train_entity).insert(ConsistState {
                cars: Vec::new(),
                cached_count: train.rolling_stock_count,
                cached_source: train.rolling_stock_source,
                cached_spacing: train.rolling_stock_spacing,
            });
            continue;
        }

        train.initialize_consist(track.segments);
        debug!(
            "building {} rolling stock cars for {train_entity:?}",
            train.rolling_stock_count
        );

        let visuals = train
            .rolling_stock_source
            .and_then(|source| sources.get(source).ok());

        let mut cars = Vec::with_capacity(train.cars.len());
        for (index, car) in train.cars.iter().enumerate() {
            let mut entity_commands = commands.spawn((
                Transform::from_translation(track.evaluate(car.t)),
                RollingStock {
                    train: train_entity,
                    index,
                },
                Visibility::default(),
            ));
            clone_visuals(&mut entity_commands, visuals);
            cars.push(entity_commands.id());
        }

        commands.entity(train_entity).insert(ConsistState {
            cars,
            cached_count: train.rolling_stock_count,
            cached_source: train.rolling_stock_source,
            cached_spacing: train.rolling_stock_spacing,
        });
    }
}

/// Advance every train one tick and write the resulting transforms.
pub fn update_trains(
    mut trains: Query<(
        Entity,
        &mut TrainController,
        &mut Transform,
        Option<&ConsistState>,
    )>,
    tracks: Query<(&TrainTrack, &TrackArcLength)>,
    mut cars: Query<&mut Transform, (With<RollingStock>, Without<TrainController>)>,
    time: Res<Time>,
    input: Res<DriveInput>,
    mut events: MessageWriter<TrainEvent>,
) {
    let delta = time.delta_secs();

    for (entity, mut train, mut transform, state) in &mut trains {
        let Ok((track, arc_length)) = tracks.get(train.track) else {
            continue;
        };

        let Some(poses) = train.tick(track, &arc_length.0, delta, *input) else {
            continue;
        };

        transform.translation = poses.lead.translation;
        transform.rotation = poses.lead.rotation;

        if let Some(state) = state {
            for (&car, pose) in state.cars.iter().zip(&poses.cars) {
                if let Ok(mut car_transform) = cars.get_mut(car) {
                    car_transform.translation = pose.translation;
                    car_transform.rotation = pose.rotation;
                }
            }
        }

        if let Some(kind) = poses.lap {
            events.write(TrainEvent { entity, kind });
        }
    }
}

/// Despawn rolling stock whose train lost its controller or was despawned.
pub fn cleanup_consists(
    mut commands: Commands,
    mut removed: RemovedComponents<TrainController>,
    cars: Query<(Entity, &RollingStock)>,
) {
    for removed_train in removed.read() {
        for (entity, car) in &cars {
            if car.train == removed_train {
                commands.entity(entity).despawn();
            }
        }
        if let Ok(mut entity_commands) = commands.get_entity(removed_train) {
            entity_commands.remove::<ConsistState>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::{SpacingPolicy, TrainPlugin};

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_plugins(TrainPlugin);
        app
    }

    fn spawn_track(app: &mut App) -> Entity {
        app.world_mut()
            .spawn(TrainTrack::new(vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(10.0, 0.0, 0.0),
            ]))
            .id()
    }

    fn car_count(app: &mut App, train: Entity) -> usize {
        app.world_mut()
            .query::<&RollingStock>()
            .iter(app.world())
            .filter(|car| car.train == train)
            .count()
    }

    #[test]
    fn spawns_and_respawns_rolling_stock() {
        let mut app = test_app();
        let track = spawn_track(&mut app);
        let train = app
            .world_mut()
            .spawn((
                Transform::default(),
                TrainController::new(track)
                    .with_start_t(0.5)
                    .with_rolling_stock(3, 2.0),
            ))
            .id();

        app.update();
        assert_eq!(car_count(&mut app, train), 3);

        app.world_mut()
            .get_mut::<TrainController>(train)
            .unwrap()
            .rolling_stock_count = 1;
        app.update();
        assert_eq!(car_count(&mut app, train), 1);

        app.world_mut().entity_mut(train).despawn();
        app.update();
        assert_eq!(car_count(&mut app, train), 0);
    }

    #[test]
    fn invalid_spacing_builds_no_cars() {
        let mut app = test_app();
        let track = spawn_track(&mut app);
        let train = app
            .world_mut()
            .spawn((
                Transform::default(),
                TrainController::new(track).with_rolling_stock(2, 0.0),
            ))
            .id();

        app.update();
        assert_eq!(car_count(&mut app, train), 0);
    }

    #[test]
    fn fixing_spacing_builds_the_cars() {
        let mut app = test_app();
        let track = spawn_track(&mut app);
        let train = app
            .world_mut()
            .spawn((
                Transform::default(),
                TrainController::new(track).with_rolling_stock(2, 0.0),
            ))
            .id();

        app.update();
        assert_eq!(car_count(&mut app, train), 0);

        app.world_mut()
            .get_mut::<TrainController>(train)
            .unwrap()
            .rolling_stock_spacing = 2.0;
        app.update();
        assert_eq!(car_count(&mut app, train), 2);
    }

    #[test]
    fn breaking_spacing_removes_the_cars() {
        let mut app = test_app();
        let track = spawn_track(&mut app);
        let train = app
            .world_mut()
            .spawn((
                Transform::default(),
                TrainController::new(track)
                    .with_start_t(0.5)
                    .with_rolling_stock(2, 2.0)
                    .with_spacing_policy(SpacingPolicy::Parametric),
            ))
            .id();

        app.update();
        assert_eq!(car_count(&mut app, train), 2);

        app.world_mut()
            .get_mut::<TrainController>(train)
            .unwrap()
            .rolling_stock_spacing = f32::NAN;
        app.update();
        app.update();
        assert_eq!(car_count(&mut app, train), 0);

        let transform = app.world().get::<Transform>(train).unwrap();
        assert!(transform.translation.is_finite());
        assert!(transform.rotation.is_finite());
        assert!(app.world().get::<TrainController>(train).unwrap().cars.is_empty());
    }

    #[test]
    fn train_snaps_onto_track() {
        let mut app = test_app();
        let track = spawn_track(&mut app);
        let train = app
            .world_mut()
            .spawn((
                Transform::from_xyz(100.0, 100.0, 100.0),
                TrainController::new(track).with_start_t(0.5),
            ))
            .id();

        app.update();
        let transform = app.world().get::<Transform>(train).unwrap();
        assert!((transform.translation - Vec3::new(5.0, 0.0, 7.5)).length() < 1e-4);
    }

    #[test]
    fn keyboard_maps_to_drive_input() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowDown);
        app.update();
        assert_eq!(*app.world().resource::<DriveInput>(), DriveInput::Backward);
    }
}
