use bevy::prelude::*;

use crate::error::TrackError;

/// How rolling stock cars are spaced behind the lead train.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum SpacingPolicy {
    /// Constant distance along the curve between consecutive cars.
    ///
    /// The lead's arc length is looked up, the spacing subtracted, and the
    /// result mapped back to t through the arc length table.
    #[default]
    ArcLength,
    /// Offset directly in parameter space by `spacing / segments` per car.
    ///
    /// Cheaper, but cars bunch up where control points are close together.
    Parametric,
}

/// Directional input for one tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource, Default)]
pub enum DriveInput {
    /// No throttle this tick.
    #[default]
    None,
    /// Accelerate toward increasing t.
    Forward,
    /// Accelerate toward decreasing t.
    Backward,
}

impl DriveInput {
    /// `1.0` for forward, `-1.0` for backward, `0.0` otherwise.
    pub fn sign(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// Keyboard bindings read into [`DriveInput`] each frame.
///
/// Forward wins when both directions are held.
#[derive(Resource, Debug, Clone)]
pub struct DriveBindings {
    /// Keys that accelerate forward.
    pub forward: Vec<KeyCode>,
    /// Keys that accelerate backward.
    pub backward: Vec<KeyCode>,
}

impl Default for DriveBindings {
    fn default() -> Self {
        Self {
            forward: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            backward: vec![KeyCode::KeyS, KeyCode::ArrowDown],
        }
    }
}

/// Velocity tuning for a train.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Default)]
pub struct MotionModel {
    /// Acceleration applied per second while input is held.
    pub speed: f32,
    /// Fraction of velocity removed per second, interpolating toward zero.
    pub friction: f32,
    /// Strength of the slope pull, `None` to ignore inclines.
    ///
    /// Velocity loses `gravity * dot(forward, up) * dt` each tick, so trains
    /// slow down uphill and speed up downhill.
    pub slope_gravity: Option<f32>,
}

impl Default for MotionModel {
    fn default() -> Self {
        Self {
            speed: 5.0,
            friction: 0.1,
            slope_gravity: None,
        }
    }
}

/// Position of one car of a consist on the track.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CarState {
    /// Curve parameter in [0, 1).
    pub t: f32,
    /// Last valid unit forward direction, reused where the curve is stationary.
    pub forward: Vec3,
}

impl CarState {
    /// A car at parameter t facing the default forward direction.
    pub fn at(t: f32) -> Self {
        Self {
            t,
            forward: Vec3::NEG_Z,
        }
    }
}

impl Default for CarState {
    fn default() -> Self {
        Self::at(0.0)
    }
}

/// Component that drives an entity along a [`TrainTrack`](crate::track::TrainTrack)
/// and pulls a line of rolling stock behind it.
///
/// The entity's [`Transform`] is rewritten every frame.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct TrainController {
    /// The track entity to follow.
    pub track: Entity,

    /// Acceleration, friction and slope settings.
    pub motion: MotionModel,

    /// Number of rolling stock cars pulled behind the train.
    pub rolling_stock_count: usize,

    /// Distance between consecutive cars.
    ///
    /// Measured along the curve for [`SpacingPolicy::ArcLength`], scaled by
    /// the track's segment count for [`SpacingPolicy::Parametric`].
    pub rolling_stock_spacing: f32,

    /// How cars are placed behind the train.
    pub spacing_policy: SpacingPolicy,

    /// Template entity whose mesh and material each car copies.
    pub rolling_stock_source: Option<Entity>,

    /// World up, used for orientation and for the slope term.
    pub up_vector: Vec3,

    /// Signed velocity, in segments per second.
    pub velocity: f32,

    /// The lead car.
    pub lead: CarState,

    /// Trailing cars, nearest first.
    pub cars: Vec<CarState>,
}

impl Default for TrainController {
    fn default() -> Self {
        Self {
            track: Entity::PLACEHOLDER,
            motion: MotionModel::default(),
            rolling_stock_count: 0,
            rolling_stock_spacing: 2.0,
            spacing_policy: SpacingPolicy::default(),
            rolling_stock_source: None,
            up_vector: Vec3::Y,
            velocity: 0.0,
            lead: CarState::default(),
            cars: Vec::new(),
        }
    }
}

impl TrainController {
    /// Create a new train on the given track.
    pub fn new(track: Entity) -> Self {
        Self {
            track,
            ..default()
        }
    }

    /// Set the acceleration applied while input is held.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.motion.speed = speed;
        self
    }

    /// Set the friction factor.
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.motion.friction = friction;
        self
    }

    /// Enable the slope term with the given strength.
    pub fn with_slope_gravity(mut self, gravity: f32) -> Self {
        self.motion.slope_gravity = Some(gravity);
        self
    }

    /// Set the number of cars and the spacing between them.
    pub fn with_rolling_stock(mut self, count: usize, spacing: f32) -> Self {
        self.rolling_stock_count = count;
        self.rolling_stock_spacing = spacing;
        self
    }

    /// Set the template entity cars are cloned from.
    pub fn with_rolling_stock_source(mut self, source: Entity) -> Self {
        self.rolling_stock_source = Some(source);
        self
    }

    /// Set the spacing policy.
    pub fn with_spacing_policy(mut self, policy: SpacingPolicy) -> Self {
        self.spacing_policy = policy;
        self
    }

    /// Set the starting position, wrapped into [0, 1).
    pub fn with_start_t(mut self, t: f32) -> Self {
        self.lead.t = crate::track::wrap_unit(t);
        self
    }

    /// Set the up vector.
    pub fn with_up_vector(mut self, up: Vec3) -> Self {
        self.up_vector = up;
        self
    }

    /// Validate the rolling stock configuration.
    pub fn validate(&self) -> Result<(), TrackError> {
        let spacing = self.rolling_stock_spacing;
        if self.rolling_stock_count > 0 && !(spacing.is_finite() && spacing > 0.0) {
            return Err(TrackError::InvalidSpacing { spacing });
        }
        Ok(())
    }
}

/// Marker component added to spawned rolling stock cars.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RollingStock {
    /// The train pulling this car.
    pub train: Entity,
    /// Position in the consist, 0 is directly behind the train.
    pub index: usize,
}

/// Internal component tracking the spawned cars of a train.
#[derive(Component, Debug, Clone)]
pub(crate) struct ConsistState {
    /// Car entities in consist order.
    pub cars: Vec<Entity>,
    /// Cached count to detect changes.
    pub cached_count: usize,
    /// Cached source to detect changes.
    pub cached_source: Option<Entity>,
    /// Cached spacing to detect changes, compared bitwise so NaN is stable.
    pub cached_spacing: f32,
}

/// Transforms produced by one tick of a train.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistPoses {
    /// Transform of the lead train.
    pub lead: Transform,
    /// Transforms of the trailing cars, nearest first.
    pub cars: Vec<Transform>,
    /// Set when the lead wrapped around the track this tick.
    pub lap: Option<TrainEventKind>,
}

/// Message emitted when a train wraps around its track.
#[derive(Message, Debug, Clone)]
pub struct TrainEvent {
    /// The entity with the TrainController component.
    pub entity: Entity,
    /// The type of event.
    pub kind: TrainEventKind,
}

/// Types of train events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainEventKind {
    /// Lead passed t = 1 moving forward.
    LapCompleted,
    /// Lead passed t = 0 moving backward.
    LapReversed,
}
