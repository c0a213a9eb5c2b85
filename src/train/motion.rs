//! Velocity integration and consist placement, independent of the ECS.

use crate::geometry::{incline, pose};
use crate::track::{wrap_unit, ArcLengthTable, TrainTrack};

use super::{
    CarState, ConsistPoses, DriveInput, MotionModel, SpacingPolicy, TrainController,
    TrainEventKind,
};

/// Interpolate velocity toward zero by `friction * dt`, never past it.
pub fn apply_friction(velocity: f32, friction: f32, dt: f32) -> f32 {
    let amount = (friction * dt).clamp(0.0, 1.0);
    velocity + (0.0 - velocity) * amount
}

/// One tick of velocity: input, then friction, then the optional slope term.
///
/// `incline` is `dot(forward, up)` at the train's current position.
pub fn integrate_velocity(
    velocity: f32,
    input: DriveInput,
    dt: f32,
    model: &MotionModel,
    incline: f32,
) -> f32 {
    let mut velocity = velocity + input.sign() * model.speed * dt;
    velocity = apply_friction(velocity, model.friction, dt);
    if let Some(gravity) = model.slope_gravity {
        velocity -= gravity * incline * dt;
    }
    velocity
}

/// Move a curve parameter by `velocity * dt / segments` and wrap it into [0, 1).
///
/// Also reports which way the parameter wrapped, if it did.
pub fn advance_parameter(
    t: f32,
    velocity: f32,
    dt: f32,
    segments: usize,
) -> (f32, Option<TrainEventKind>) {
    let raw = t + velocity * dt / segments.max(1) as f32;
    let lap = if raw >= 1.0 {
        Some(TrainEventKind::LapCompleted)
    } else if raw < 0.0 {
        Some(TrainEventKind::LapReversed)
    } else {
        None
    };
    (wrap_unit(raw), lap)
}

/// Parameter of the car `index` places behind the lead (0 is the nearest car).
pub fn trailing_parameter(
    policy: SpacingPolicy,
    lead_t: f32,
    index: usize,
    spacing: f32,
    table: &ArcLengthTable,
) -> f32 {
    let offset = (index + 1) as f32 * spacing;
    match policy {
        SpacingPolicy::Parametric => wrap_unit(lead_t - offset / table.segments() as f32),
        SpacingPolicy::ArcLength => {
            let total = table.total_length();
            if total <= 0.0 {
                return 0.0;
            }
            let target = (table.arc_length_at_t(lead_t) - offset).rem_euclid(total);
            table.t_at_arc_length(target)
        }
    }
}

impl TrainController {
    /// Place the rolling stock behind the lead in parameter space.
    ///
    /// Called whenever the consist is (re)built; the first tick then moves the
    /// cars onto the configured [`SpacingPolicy`].
    pub fn initialize_consist(&mut self, segments: usize) {
        let segments = segments.max(1) as f32;
        let lead_t = self.lead.t;
        let spacing = self.rolling_stock_spacing;

        self.cars = (0..self.rolling_stock_count)
            .map(|i| CarState::at(wrap_unit(lead_t - (i + 1) as f32 * spacing / segments)))
            .collect();
    }

    /// Advance the train by one tick and compute transforms for the whole consist.
    ///
    /// Returns `None`, leaving all state untouched, when the track has fewer
    /// than two control points. While the rolling stock config is invalid only
    /// the lead moves and no car poses are produced.
    pub fn tick(
        &mut self,
        track: &TrainTrack,
        table: &ArcLengthTable,
        dt: f32,
        input: DriveInput,
    ) -> Option<ConsistPoses> {
        if !track.is_valid() {
            return None;
        }
        if self.validate().is_err() {
            self.cars.clear();
        } else if self.cars.len() != self.rolling_stock_count {
            self.initialize_consist(track.segments);
        }

        let up = self.up_vector;
        let current_forward = track.forward(self.lead.t).unwrap_or(self.lead.forward);
        self.velocity = integrate_velocity(
            self.velocity,
            input,
            dt,
            &self.motion,
            incline(current_forward, up),
        );

        let (t, lap) = advance_parameter(self.lead.t, self.velocity, dt, track.segments);
        self.lead.t = t;
        if let Some(forward) = track.forward(t) {
            self.lead.forward = forward;
        }
        let lead = pose(track.evaluate(t), self.lead.forward, up);

        let mut cars = Vec::with_capacity(self.cars.len());
        for (index, car) in self.cars.iter_mut().enumerate() {
            car.t = trailing_parameter(
                self.spacing_policy,
                t,
                index,
                self.rolling_stock_spacing,
                table,
            );
            if let Some(forward) = track.forward(car.t) {
                car.forward = forward;
            }
            cars.push(pose(track.evaluate(car.t), car.forward, up));
        }

        Some(ConsistPoses { lead, cars, lap })
    }
}
