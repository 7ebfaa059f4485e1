//! Simulation clock.
//!
//! Owns the pausable, speed-scaled time base every body position is derived
//! from, plus an unscaled real-time counter for UI animation.

use crate::error::SimError;

/// Speed multipliers bound to the number keys and the preset buttons.
pub const SPEED_PRESETS: [f64; 4] = [0.01, 0.1, 1.0, 10.0];

/// Pausable, speed-scaled simulation time.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    accumulated: f64,
    real_elapsed: f64,
    paused: bool,
    speed: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            accumulated: 0.0,
            real_elapsed: 0.0,
            paused: false,
            speed: 1.0,
        }
    }
}

fn check_speed(operation: &'static str, value: f64) -> Result<f64, SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidInput { operation, value })
    }
}

impl SimulationClock {
    /// A running clock at time zero with the given speed.
    pub fn new(speed: f64) -> Result<Self, SimError> {
        Ok(Self {
            speed: check_speed("clock speed", speed)?,
            ..Self::default()
        })
    }

    /// Advance by `delta` real seconds.
    ///
    /// Simulation time only moves while running; real time always moves.
    pub fn tick(&mut self, delta: f64) -> Result<(), SimError> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(SimError::InvalidInput {
                operation: "tick",
                value: delta,
            });
        }
        self.real_elapsed += delta;
        if !self.paused {
            self.accumulated += delta * self.speed;
        }
        Ok(())
    }

    /// Replace the speed multiplier. Applies from the next tick on.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), SimError> {
        self.speed = check_speed("set_speed", speed)?;
        Ok(())
    }

    /// Double the speed, capped at `max`.
    pub fn faster(&mut self, max: f64) -> f64 {
        self.speed = (self.speed * 2.0).min(max);
        self.speed
    }

    /// Halve the speed, floored at `min`.
    pub fn slower(&mut self, min: f64) -> f64 {
        self.speed = (self.speed * 0.5).max(min);
        self.speed
    }

    /// Flip the pause state and return the new one.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Accumulated simulation seconds.
    pub fn elapsed(&self) -> f64 {
        self.accumulated
    }

    /// Unscaled seconds since start, including paused time.
    pub fn real_elapsed(&self) -> f64 {
        self.real_elapsed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Rewind simulation time to zero. Speed, pause state and real time are kept.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
