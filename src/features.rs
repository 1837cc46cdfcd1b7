use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::control::Control;
use crate::reward::Vec3;

/// Speed reported to the baseline policy is capped here (km/h).
pub const MAX_FEATURE_SPEED: f32 = 150.0;

pub const BASELINE_FEATURES: usize = 12;
pub const ROUTE_FEATURES: usize = 17;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("expected a row of {expected} values, got {actual}")]
    RowWidth { expected: usize, actual: usize },
}

/// IMU and pose readings of the ego vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleReadings {
    /// km/h
    pub speed: f32,
    pub accelerometer: [f32; 3],
    pub gyroscope: [f32; 3],
    pub location: [f32; 2],
    pub destination: [f32; 2],
    /// Degrees, as reported by the compass.
    pub compass: f32,
}

/// Description of the next waypoint relative to the vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointFeatures {
    pub similarity: f32,
    pub forward: Vec3,
    pub distance: f32,
}

pub fn baseline_features(v: &VehicleReadings) -> [f32; BASELINE_FEATURES] {
    [
        v.speed.min(MAX_FEATURE_SPEED),
        v.accelerometer[0],
        v.accelerometer[1],
        v.accelerometer[2],
        v.gyroscope[0],
        v.gyroscope[1],
        v.gyroscope[2],
        v.location[0],
        v.location[1],
        v.destination[0],
        v.destination[1],
        v.compass.to_radians(),
    ]
}

pub fn route_features(
    v: &VehicleReadings,
    control: &Control,
    waypoint: &WaypointFeatures,
) -> [f32; ROUTE_FEATURES] {
    [
        (1.0 + v.speed).log2(),
        control.throttle,
        control.steer,
        control.brake,
        if control.reverse { 1.0 } else { 0.0 },
        v.accelerometer[0],
        v.accelerometer[1],
        v.accelerometer[2],
        v.gyroscope[0],
        v.gyroscope[1],
        v.gyroscope[2],
        waypoint.similarity,
        waypoint.forward.x,
        waypoint.forward.y,
        waypoint.forward.z,
        waypoint.distance,
        v.compass.to_radians(),
    ]
}

/// Fixed-size history of feature rows along a temporal axis.
///
/// Rows are written at the current time index, which then advances modulo
/// the horizon, so the oldest row is overwritten first.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalBuffer {
    horizon: usize,
    width: usize,
    data: Vec<f32>,
    index: usize,
}

impl TemporalBuffer {
    pub fn new(horizon: usize, width: usize) -> Self {
        let horizon = horizon.max(1);
        Self {
            horizon,
            width,
            data: vec![0.0; horizon * width],
            index: 0,
        }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Index the next row will be written at.
    pub fn time_index(&self) -> usize {
        self.index
    }

    pub fn push(&mut self, row: &[f32]) -> Result<(), FeatureError> {
        if row.len() != self.width {
            return Err(FeatureError::RowWidth {
                expected: self.width,
                actual: row.len(),
            });
        }
        let start = self.index * self.width;
        self.data[start..start + self.width].copy_from_slice(row);
        self.index = (self.index + 1) % self.horizon;
        Ok(())
    }

    pub fn row(&self, t: usize) -> Option<&[f32]> {
        (t < self.horizon).then(|| &self.data[t * self.width..(t + 1) * self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks(self.width.max(1))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn reset(&mut self) {
        self.data.fill(0.0);
        self.index = 0;
    }
}
