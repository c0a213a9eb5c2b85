//! Orientation helpers for entities riding a track.

use bevy::prelude::*;

/// Rotation that points an entity's forward (-Z) along `forward` with its +Y
/// as close to `up` as possible.
///
/// When `forward` is parallel to `up` the X axis is used as the reference
/// instead. A zero or non-finite `forward` yields the identity rotation.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let forward = forward.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let back = -forward;

    let mut right = up.cross(back).normalize_or_zero();
    if right.length_squared() < 0.001 {
        right = Vec3::X.cross(back).normalize_or_zero();
    }
    if right.length_squared() < 0.001 {
        return Quat::IDENTITY;
    }
    let up = back.cross(right).normalize_or_zero();

    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

/// Signed steepness of a direction: `+1` straight up, `-1` straight down.
pub fn incline(forward: Vec3, up: Vec3) -> f32 {
    forward.normalize_or_zero().dot(up.normalize_or_zero())
}

/// Transform at `position` facing `forward`.
pub fn pose(position: Vec3, forward: Vec3, up: Vec3) -> Transform {
    Transform {
        translation: position,
        rotation: look_rotation(forward, up),
        scale: Vec3::ONE,
    }
}
